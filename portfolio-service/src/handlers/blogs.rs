/// Blog handlers - public reads, admin CRUD, newsletter dispatch
use crate::cache::{CacheType, Invalidator};
use crate::db::{blog_repo, subscriber_repo};
use crate::error::{db_conflict, AppError, Result};
use crate::models::BlogPost;
use crate::services::localization::{normalize_blog, BlogPayload};
use crate::services::NewsletterService;
use actix_web::{web, HttpResponse};
use portfolio_cache::{ttl, CacheKey, CacheOperations, PortfolioCache};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

/// List published posts, newest first (public, cache-aside)
pub async fn list_blogs(
    pool: web::Data<PgPool>,
    cache: web::Data<PortfolioCache>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let limit = query.limit.clamp(1, 100);
    let offset = query.offset.max(0);

    let key = CacheKey::blogs_list(limit, offset);
    if let Some(posts) = cache.get::<Vec<BlogPost>>(&key).await.unwrap_or(None) {
        return Ok(HttpResponse::Ok().json(posts));
    }

    let posts = blog_repo::list_published(pool.get_ref(), limit, offset).await?;
    if let Err(e) = cache.set(&key, &posts, ttl::BLOGS).await {
        tracing::warn!(error = %e, "Failed to cache blog list");
    }

    Ok(HttpResponse::Ok().json(posts))
}

/// Get a published post by slug (public, cache-aside with negative caching)
pub async fn get_blog(
    pool: web::Data<PgPool>,
    cache: web::Data<PortfolioCache>,
    slug: web::Path<String>,
) -> Result<HttpResponse> {
    let key = CacheKey::blog_by_slug(&slug);

    if let Ok(Some(raw)) = cache.get_raw(&key).await {
        if PortfolioCache::is_negative_cache(&raw) {
            return Ok(HttpResponse::NotFound().finish());
        }
        if let Ok(post) = serde_json::from_str::<BlogPost>(&raw) {
            return Ok(HttpResponse::Ok().json(post));
        }
        // corrupted entry: fall through to the database
    }

    match blog_repo::get_published_by_slug(pool.get_ref(), &slug).await? {
        Some(post) => {
            if let Err(e) = cache.set(&key, &post, ttl::BLOGS).await {
                tracing::warn!(error = %e, "Failed to cache blog post");
            }
            Ok(HttpResponse::Ok().json(post))
        }
        None => {
            if let Err(e) = cache.set_negative(&key).await {
                tracing::warn!(error = %e, "Failed to set negative cache");
            }
            Ok(HttpResponse::NotFound().finish())
        }
    }
}

/// List every post including drafts (admin)
pub async fn admin_list_blogs(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let posts = blog_repo::list_all_blogs(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Create a post from a raw bilingual payload (admin)
pub async fn create_blog(
    pool: web::Data<PgPool>,
    invalidator: web::Data<Invalidator>,
    req: web::Json<BlogPayload>,
) -> Result<HttpResponse> {
    let normalized = normalize_blog(&req).map_err(AppError::Validation)?;

    let post = blog_repo::create_blog(pool.get_ref(), &normalized)
        .await
        .map_err(|e| db_conflict(e, "a blog post with this slug already exists"))?;
    invalidator.invalidate_after_write(CacheType::Blogs).await;

    Ok(HttpResponse::Created().json(post))
}

/// Replace a post from a raw bilingual payload (admin)
pub async fn update_blog(
    pool: web::Data<PgPool>,
    invalidator: web::Data<Invalidator>,
    blog_id: web::Path<Uuid>,
    req: web::Json<BlogPayload>,
) -> Result<HttpResponse> {
    let normalized = normalize_blog(&req).map_err(AppError::Validation)?;

    let updated = blog_repo::update_blog(pool.get_ref(), *blog_id, &normalized)
        .await
        .map_err(|e| db_conflict(e, "a blog post with this slug already exists"))?;

    match updated {
        Some(post) => {
            invalidator.invalidate_after_write(CacheType::Blogs).await;
            Ok(HttpResponse::Ok().json(post))
        }
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Delete a post (admin)
pub async fn delete_blog(
    pool: web::Data<PgPool>,
    invalidator: web::Data<Invalidator>,
    blog_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if blog_repo::delete_blog(pool.get_ref(), *blog_id).await? {
        invalidator.invalidate_after_write(CacheType::Blogs).await;
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

/// Send a post as a newsletter to every active subscriber (admin).
/// Responds with the per-recipient outcome: sent count plus the failed
/// addresses.
pub async fn send_newsletter(
    pool: web::Data<PgPool>,
    newsletter: web::Data<NewsletterService>,
    blog_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let post = blog_repo::get_blog_by_id(pool.get_ref(), *blog_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("blog post {} not found", blog_id)))?;

    if !post.published {
        return Err(AppError::BadRequest(
            "cannot send a newsletter for an unpublished post".to_string(),
        ));
    }

    let subscribers = subscriber_repo::list_active_subscribers(pool.get_ref()).await?;
    let report = newsletter.dispatch(&post, &subscribers).await;

    Ok(HttpResponse::Ok().json(report))
}
