use crate::models::Project;
use sqlx::PgPool;
use uuid::Uuid;

/// Fields accepted when creating or replacing a project
#[derive(Debug, Clone)]
pub struct ProjectInput {
    pub title_en: String,
    pub title_es: String,
    pub description_en: String,
    pub description_es: String,
    pub technologies: Vec<String>,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub cover_image: Option<String>,
    pub display_order: i32,
    pub visible: bool,
}

/// Create a new project
pub async fn create_project(pool: &PgPool, input: &ProjectInput) -> Result<Project, sqlx::Error> {
    let project = sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (title_en, title_es, description_en, description_es,
                              technologies, repo_url, demo_url, cover_image,
                              display_order, visible)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id, title_en, title_es, description_en, description_es, technologies,
                  repo_url, demo_url, cover_image, display_order, visible,
                  created_at, updated_at
        "#,
    )
    .bind(&input.title_en)
    .bind(&input.title_es)
    .bind(&input.description_en)
    .bind(&input.description_es)
    .bind(&input.technologies)
    .bind(&input.repo_url)
    .bind(&input.demo_url)
    .bind(&input.cover_image)
    .bind(input.display_order)
    .bind(input.visible)
    .fetch_one(pool)
    .await?;

    Ok(project)
}

/// Get a single project by ID
pub async fn get_project_by_id(
    pool: &PgPool,
    project_id: Uuid,
) -> Result<Option<Project>, sqlx::Error> {
    let project = sqlx::query_as::<_, Project>(
        r#"
        SELECT id, title_en, title_es, description_en, description_es, technologies,
               repo_url, demo_url, cover_image, display_order, visible,
               created_at, updated_at
        FROM projects
        WHERE id = $1
        "#,
    )
    .bind(project_id)
    .fetch_optional(pool)
    .await?;

    Ok(project)
}

/// List visible projects in display order
pub async fn list_visible_projects(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
    let projects = sqlx::query_as::<_, Project>(
        r#"
        SELECT id, title_en, title_es, description_en, description_es, technologies,
               repo_url, demo_url, cover_image, display_order, visible,
               created_at, updated_at
        FROM projects
        WHERE visible = TRUE
        ORDER BY display_order ASC, created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(projects)
}

/// List every project for the admin dashboard
pub async fn list_all_projects(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
    let projects = sqlx::query_as::<_, Project>(
        r#"
        SELECT id, title_en, title_es, description_en, description_es, technologies,
               repo_url, demo_url, cover_image, display_order, visible,
               created_at, updated_at
        FROM projects
        ORDER BY display_order ASC, created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(projects)
}

/// Replace a project's fields
pub async fn update_project(
    pool: &PgPool,
    project_id: Uuid,
    input: &ProjectInput,
) -> Result<Option<Project>, sqlx::Error> {
    let project = sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects
        SET title_en = $1, title_es = $2, description_en = $3, description_es = $4,
            technologies = $5, repo_url = $6, demo_url = $7, cover_image = $8,
            display_order = $9, visible = $10, updated_at = NOW()
        WHERE id = $11
        RETURNING id, title_en, title_es, description_en, description_es, technologies,
                  repo_url, demo_url, cover_image, display_order, visible,
                  created_at, updated_at
        "#,
    )
    .bind(&input.title_en)
    .bind(&input.title_es)
    .bind(&input.description_en)
    .bind(&input.description_es)
    .bind(&input.technologies)
    .bind(&input.repo_url)
    .bind(&input.demo_url)
    .bind(&input.cover_image)
    .bind(input.display_order)
    .bind(input.visible)
    .bind(project_id)
    .fetch_optional(pool)
    .await?;

    Ok(project)
}

/// Delete a project
pub async fn delete_project(pool: &PgPool, project_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(project_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
