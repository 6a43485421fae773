use crate::models::Section;
use sqlx::PgPool;
use uuid::Uuid;

/// Fields accepted when creating or replacing a section
#[derive(Debug, Clone)]
pub struct SectionInput {
    pub slug: String,
    pub heading_en: String,
    pub heading_es: String,
    pub body_en: String,
    pub body_es: String,
    pub display_order: i32,
    pub visible: bool,
}

/// Create a new section
pub async fn create_section(pool: &PgPool, input: &SectionInput) -> Result<Section, sqlx::Error> {
    let section = sqlx::query_as::<_, Section>(
        r#"
        INSERT INTO sections (slug, heading_en, heading_es, body_en, body_es,
                              display_order, visible)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, slug, heading_en, heading_es, body_en, body_es,
                  display_order, visible, created_at, updated_at
        "#,
    )
    .bind(&input.slug)
    .bind(&input.heading_en)
    .bind(&input.heading_es)
    .bind(&input.body_en)
    .bind(&input.body_es)
    .bind(input.display_order)
    .bind(input.visible)
    .fetch_one(pool)
    .await?;

    Ok(section)
}

/// List visible sections in display order (public site)
pub async fn list_visible_sections(pool: &PgPool) -> Result<Vec<Section>, sqlx::Error> {
    let sections = sqlx::query_as::<_, Section>(
        r#"
        SELECT id, slug, heading_en, heading_es, body_en, body_es,
               display_order, visible, created_at, updated_at
        FROM sections
        WHERE visible = TRUE
        ORDER BY display_order ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(sections)
}

/// List every section for the admin dashboard
pub async fn list_all_sections(pool: &PgPool) -> Result<Vec<Section>, sqlx::Error> {
    let sections = sqlx::query_as::<_, Section>(
        r#"
        SELECT id, slug, heading_en, heading_es, body_en, body_es,
               display_order, visible, created_at, updated_at
        FROM sections
        ORDER BY display_order ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(sections)
}

/// Replace a section's fields
pub async fn update_section(
    pool: &PgPool,
    section_id: Uuid,
    input: &SectionInput,
) -> Result<Option<Section>, sqlx::Error> {
    let section = sqlx::query_as::<_, Section>(
        r#"
        UPDATE sections
        SET slug = $1, heading_en = $2, heading_es = $3, body_en = $4, body_es = $5,
            display_order = $6, visible = $7, updated_at = NOW()
        WHERE id = $8
        RETURNING id, slug, heading_en, heading_es, body_en, body_es,
                  display_order, visible, created_at, updated_at
        "#,
    )
    .bind(&input.slug)
    .bind(&input.heading_en)
    .bind(&input.heading_es)
    .bind(&input.body_en)
    .bind(&input.body_es)
    .bind(input.display_order)
    .bind(input.visible)
    .bind(section_id)
    .fetch_optional(pool)
    .await?;

    Ok(section)
}

/// Delete a section
pub async fn delete_section(pool: &PgPool, section_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sections WHERE id = $1")
        .bind(section_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
