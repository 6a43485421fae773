/// Skill handlers - public listing and admin CRUD
use crate::cache::{CacheType, Invalidator};
use crate::db::skill_repo::{self, SkillInput};
use crate::error::{AppError, Result};
use crate::models::Skill;
use actix_web::{web, HttpResponse};
use portfolio_cache::{ttl, CacheKey, CacheOperations, PortfolioCache};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// List all skills (public, cache-aside)
pub async fn list_skills(
    pool: web::Data<PgPool>,
    cache: web::Data<PortfolioCache>,
) -> Result<HttpResponse> {
    let key = CacheKey::skills_list();
    if let Some(skills) = cache.get::<Vec<Skill>>(&key).await.unwrap_or(None) {
        return Ok(HttpResponse::Ok().json(skills));
    }

    let skills = skill_repo::list_skills(pool.get_ref()).await?;
    if let Err(e) = cache.set(&key, &skills, ttl::SKILLS).await {
        tracing::warn!(error = %e, "Failed to cache skill list");
    }

    Ok(HttpResponse::Ok().json(skills))
}

/// Create a skill (admin)
pub async fn create_skill(
    pool: web::Data<PgPool>,
    invalidator: web::Data<Invalidator>,
    req: web::Json<SkillRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let input = req.to_input()?;

    let skill = skill_repo::create_skill(pool.get_ref(), &input).await?;
    invalidator.invalidate_after_write(CacheType::Skills).await;

    Ok(HttpResponse::Created().json(skill))
}

/// Replace a skill (admin)
pub async fn update_skill(
    pool: web::Data<PgPool>,
    invalidator: web::Data<Invalidator>,
    skill_id: web::Path<Uuid>,
    req: web::Json<SkillRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    let input = req.to_input()?;

    match skill_repo::update_skill(pool.get_ref(), *skill_id, &input).await? {
        Some(skill) => {
            invalidator.invalidate_after_write(CacheType::Skills).await;
            Ok(HttpResponse::Ok().json(skill))
        }
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Delete a skill (admin)
pub async fn delete_skill(
    pool: web::Data<PgPool>,
    invalidator: web::Data<Invalidator>,
    skill_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if skill_repo::delete_skill(pool.get_ref(), *skill_id).await? {
        invalidator.invalidate_after_write(CacheType::Skills).await;
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

/// Request body for creating or replacing a skill
#[derive(Debug, Deserialize, Validate)]
pub struct SkillRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub level: i32,
    #[serde(default)]
    pub display_order: i32,
}

fn default_category() -> String {
    "general".to_string()
}

impl SkillRequest {
    fn to_input(&self) -> Result<SkillInput> {
        if !(0..=100).contains(&self.level) {
            return Err(AppError::Validation(format!(
                "skill level must be between 0 and 100, got {}",
                self.level
            )));
        }

        Ok(SkillInput {
            name: self.name.trim().to_string(),
            category: self.category.trim().to_lowercase(),
            level: self.level,
            display_order: self.display_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_bounds() {
        let mut req = SkillRequest {
            name: "Rust".into(),
            category: "Languages".into(),
            level: 85,
            display_order: 0,
        };
        assert!(req.to_input().is_ok());

        req.level = 101;
        assert!(req.to_input().is_err());

        req.level = -1;
        assert!(req.to_input().is_err());
    }

    #[test]
    fn test_category_normalized() {
        let req = SkillRequest {
            name: "Rust".into(),
            category: " Languages ".into(),
            level: 50,
            display_order: 0,
        };
        assert_eq!(req.to_input().unwrap().category, "languages");
    }
}
