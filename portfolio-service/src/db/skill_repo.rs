use crate::models::Skill;
use sqlx::PgPool;
use uuid::Uuid;

/// Fields accepted when creating or replacing a skill
#[derive(Debug, Clone)]
pub struct SkillInput {
    pub name: String,
    pub category: String,
    pub level: i32,
    pub display_order: i32,
}

/// Create a new skill
pub async fn create_skill(pool: &PgPool, input: &SkillInput) -> Result<Skill, sqlx::Error> {
    let skill = sqlx::query_as::<_, Skill>(
        r#"
        INSERT INTO skills (name, category, level, display_order)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, category, level, display_order, created_at, updated_at
        "#,
    )
    .bind(&input.name)
    .bind(&input.category)
    .bind(input.level)
    .bind(input.display_order)
    .fetch_one(pool)
    .await?;

    Ok(skill)
}

/// List all skills grouped for display (category, then order)
pub async fn list_skills(pool: &PgPool) -> Result<Vec<Skill>, sqlx::Error> {
    let skills = sqlx::query_as::<_, Skill>(
        r#"
        SELECT id, name, category, level, display_order, created_at, updated_at
        FROM skills
        ORDER BY category ASC, display_order ASC, name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(skills)
}

/// Replace a skill's fields
pub async fn update_skill(
    pool: &PgPool,
    skill_id: Uuid,
    input: &SkillInput,
) -> Result<Option<Skill>, sqlx::Error> {
    let skill = sqlx::query_as::<_, Skill>(
        r#"
        UPDATE skills
        SET name = $1, category = $2, level = $3, display_order = $4, updated_at = NOW()
        WHERE id = $5
        RETURNING id, name, category, level, display_order, created_at, updated_at
        "#,
    )
    .bind(&input.name)
    .bind(&input.category)
    .bind(input.level)
    .bind(input.display_order)
    .bind(skill_id)
    .fetch_optional(pool)
    .await?;

    Ok(skill)
}

/// Delete a skill
pub async fn delete_skill(pool: &PgPool, skill_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM skills WHERE id = $1")
        .bind(skill_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
