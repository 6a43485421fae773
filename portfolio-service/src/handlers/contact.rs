/// Contact form handlers - rate-limited public submission, admin inbox
use crate::db::contact_repo;
use crate::error::{AppError, Result};
use crate::middleware::{client_ip, RateLimiter};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Accept a contact form submission (public). Submissions beyond the
/// per-IP window limit are rejected with 429 and never stored.
pub async fn submit_contact(
    http_req: HttpRequest,
    pool: web::Data<PgPool>,
    limiter: web::Data<RateLimiter>,
    req: web::Json<ContactRequest>,
) -> Result<HttpResponse> {
    let sender_ip = client_ip(&http_req);

    if limiter.is_rate_limited(&sender_ip).await {
        return Err(AppError::RateLimitExceeded);
    }

    req.validate()?;

    let message = contact_repo::create_contact(
        pool.get_ref(),
        req.name.trim(),
        req.email.trim(),
        req.subject.as_deref().unwrap_or("").trim(),
        req.body.trim(),
        Some(sender_ip.as_str()),
    )
    .await?;

    Ok(HttpResponse::Created().json(message))
}

/// List contact messages (admin)
pub async fn list_contacts(
    pool: web::Data<PgPool>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let messages = contact_repo::list_contacts(
        pool.get_ref(),
        query.limit.clamp(1, 200),
        query.offset.max(0),
    )
    .await?;

    Ok(HttpResponse::Ok().json(messages))
}

/// Delete a contact message (admin)
pub async fn delete_contact(
    pool: web::Data<PgPool>,
    contact_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if contact_repo::delete_contact(pool.get_ref(), *contact_id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

/// Request body for the contact form
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 1, max = 10000))]
    pub body: String,
}
