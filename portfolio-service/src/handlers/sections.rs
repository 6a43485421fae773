/// Section handlers - ordered, visibility-toggleable public content blocks
use crate::cache::{CacheType, Invalidator};
use crate::db::section_repo::{self, SectionInput};
use crate::error::{db_conflict, Result};
use crate::models::Section;
use crate::services::localization::slugify;
use actix_web::{web, HttpResponse};
use portfolio_cache::{ttl, CacheKey, CacheOperations, PortfolioCache};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// List visible sections in display order (public, cache-aside)
pub async fn list_sections(
    pool: web::Data<PgPool>,
    cache: web::Data<PortfolioCache>,
) -> Result<HttpResponse> {
    let key = CacheKey::sections_list();
    if let Some(sections) = cache.get::<Vec<Section>>(&key).await.unwrap_or(None) {
        return Ok(HttpResponse::Ok().json(sections));
    }

    let sections = section_repo::list_visible_sections(pool.get_ref()).await?;
    if let Err(e) = cache.set(&key, &sections, ttl::SECTIONS).await {
        tracing::warn!(error = %e, "Failed to cache section list");
    }

    Ok(HttpResponse::Ok().json(sections))
}

/// List every section including hidden ones (admin)
pub async fn admin_list_sections(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let sections = section_repo::list_all_sections(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(sections))
}

/// Create a section (admin)
pub async fn create_section(
    pool: web::Data<PgPool>,
    invalidator: web::Data<Invalidator>,
    req: web::Json<SectionRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let section = section_repo::create_section(pool.get_ref(), &req.to_input())
        .await
        .map_err(|e| db_conflict(e, "a section with this slug already exists"))?;
    invalidator.invalidate_after_write(CacheType::Sections).await;

    Ok(HttpResponse::Created().json(section))
}

/// Replace a section (admin)
pub async fn update_section(
    pool: web::Data<PgPool>,
    invalidator: web::Data<Invalidator>,
    section_id: web::Path<Uuid>,
    req: web::Json<SectionRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let updated = section_repo::update_section(pool.get_ref(), *section_id, &req.to_input())
        .await
        .map_err(|e| db_conflict(e, "a section with this slug already exists"))?;

    match updated {
        Some(section) => {
            invalidator.invalidate_after_write(CacheType::Sections).await;
            Ok(HttpResponse::Ok().json(section))
        }
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Delete a section (admin)
pub async fn delete_section(
    pool: web::Data<PgPool>,
    invalidator: web::Data<Invalidator>,
    section_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if section_repo::delete_section(pool.get_ref(), *section_id).await? {
        invalidator.invalidate_after_write(CacheType::Sections).await;
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

/// Request body for creating or replacing a section
#[derive(Debug, Deserialize, Validate)]
pub struct SectionRequest {
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub heading_en: String,
    pub heading_es: Option<String>,
    #[serde(default)]
    pub body_en: String,
    pub body_es: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl SectionRequest {
    fn to_input(&self) -> SectionInput {
        SectionInput {
            slug: match self.slug.as_deref().map(str::trim) {
                Some(slug) if !slug.is_empty() => slug.to_string(),
                _ => slugify(&self.heading_en),
            },
            heading_en: self.heading_en.clone(),
            heading_es: self
                .heading_es
                .clone()
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(|| self.heading_en.clone()),
            body_en: self.body_en.clone(),
            body_es: self
                .body_es
                .clone()
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| self.body_en.clone()),
            display_order: self.display_order,
            visible: self.visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_derived_from_heading() {
        let req = SectionRequest {
            slug: None,
            heading_en: "About Me".into(),
            heading_es: None,
            body_en: String::new(),
            body_es: None,
            display_order: 0,
            visible: true,
        };
        assert_eq!(req.to_input().slug, "about-me");
    }
}
