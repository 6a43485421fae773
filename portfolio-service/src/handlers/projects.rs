/// Project handlers - public listing and admin CRUD
use crate::cache::{CacheType, Invalidator};
use crate::db::project_repo::{self, ProjectInput};
use crate::error::Result;
use crate::models::Project;
use actix_web::{web, HttpResponse};
use portfolio_cache::{ttl, CacheKey, CacheOperations, PortfolioCache};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// List visible projects (public, cache-aside)
pub async fn list_projects(
    pool: web::Data<PgPool>,
    cache: web::Data<PortfolioCache>,
) -> Result<HttpResponse> {
    let key = CacheKey::projects_list();
    if let Some(projects) = cache.get::<Vec<Project>>(&key).await.unwrap_or(None) {
        return Ok(HttpResponse::Ok().json(projects));
    }

    let projects = project_repo::list_visible_projects(pool.get_ref()).await?;
    if let Err(e) = cache.set(&key, &projects, ttl::PROJECTS).await {
        tracing::warn!(error = %e, "Failed to cache project list");
    }

    Ok(HttpResponse::Ok().json(projects))
}

/// Get a single project
pub async fn get_project(pool: web::Data<PgPool>, project_id: web::Path<Uuid>) -> Result<HttpResponse> {
    match project_repo::get_project_by_id(pool.get_ref(), *project_id).await? {
        Some(project) => Ok(HttpResponse::Ok().json(project)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// List every project including hidden ones (admin)
pub async fn admin_list_projects(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let projects = project_repo::list_all_projects(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(projects))
}

/// Create a project (admin)
pub async fn create_project(
    pool: web::Data<PgPool>,
    invalidator: web::Data<Invalidator>,
    req: web::Json<ProjectRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let project = project_repo::create_project(pool.get_ref(), &req.to_input()).await?;
    invalidator.invalidate_after_write(CacheType::Projects).await;

    Ok(HttpResponse::Created().json(project))
}

/// Replace a project (admin)
pub async fn update_project(
    pool: web::Data<PgPool>,
    invalidator: web::Data<Invalidator>,
    project_id: web::Path<Uuid>,
    req: web::Json<ProjectRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    match project_repo::update_project(pool.get_ref(), *project_id, &req.to_input()).await? {
        Some(project) => {
            invalidator.invalidate_after_write(CacheType::Projects).await;
            Ok(HttpResponse::Ok().json(project))
        }
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Delete a project (admin)
pub async fn delete_project(
    pool: web::Data<PgPool>,
    invalidator: web::Data<Invalidator>,
    project_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if project_repo::delete_project(pool.get_ref(), *project_id).await? {
        invalidator.invalidate_after_write(CacheType::Projects).await;
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

/// Request body for creating or replacing a project
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectRequest {
    #[validate(length(min = 1, max = 200))]
    pub title_en: String,
    pub title_es: Option<String>,
    #[serde(default)]
    pub description_en: String,
    pub description_es: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[validate(url)]
    pub repo_url: Option<String>,
    #[validate(url)]
    pub demo_url: Option<String>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl ProjectRequest {
    fn to_input(&self) -> ProjectInput {
        ProjectInput {
            title_en: self.title_en.clone(),
            title_es: self
                .title_es
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| self.title_en.clone()),
            description_en: self.description_en.clone(),
            description_es: self
                .description_es
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| self.description_en.clone()),
            technologies: self
                .technologies
                .iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            repo_url: self.repo_url.clone(),
            demo_url: self.demo_url.clone(),
            cover_image: self.cover_image.clone(),
            display_order: self.display_order,
            visible: self.visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanish_fields_fall_back_to_english() {
        let req = ProjectRequest {
            title_en: "CLI tool".into(),
            title_es: None,
            description_en: "A tool".into(),
            description_es: Some("  ".into()),
            technologies: vec![" rust ".into(), String::new()],
            repo_url: None,
            demo_url: None,
            cover_image: None,
            display_order: 0,
            visible: true,
        };

        let input = req.to_input();
        assert_eq!(input.title_es, "CLI tool");
        assert_eq!(input.description_es, "A tool");
        assert_eq!(input.technologies, vec!["rust"]);
    }
}
