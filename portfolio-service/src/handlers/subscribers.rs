/// Newsletter subscription handlers
use crate::db::subscriber_repo;
use crate::error::{db_conflict, AppError, Result};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
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
    100
}

/// Subscribe to the newsletter (public). Duplicate active addresses are a
/// conflict; unsubscribed addresses are reactivated with a fresh token.
pub async fn subscribe(
    pool: web::Data<PgPool>,
    req: web::Json<SubscribeRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let email = req.email.trim().to_lowercase();
    let language = req
        .language
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty());
    let token = Uuid::new_v4().simple().to_string();

    if let Some(existing) = subscriber_repo::get_subscriber_by_email(pool.get_ref(), &email).await? {
        if existing.active {
            return Err(AppError::Conflict(
                "this address is already subscribed".to_string(),
            ));
        }

        let reactivated =
            subscriber_repo::reactivate_subscriber(pool.get_ref(), &email, language, &token)
                .await?
                .ok_or_else(|| AppError::Internal("subscriber vanished mid-update".to_string()))?;
        return Ok(HttpResponse::Ok().json(reactivated));
    }

    let subscriber = subscriber_repo::create_subscriber(pool.get_ref(), &email, language, &token)
        .await
        .map_err(|e| db_conflict(e, "this address is already subscribed"))?;

    Ok(HttpResponse::Created().json(subscriber))
}

/// Unsubscribe by token (public, linked from every newsletter)
pub async fn unsubscribe(
    pool: web::Data<PgPool>,
    query: web::Query<UnsubscribeQuery>,
) -> Result<HttpResponse> {
    let token = query.token.trim();
    if token.is_empty() {
        return Err(AppError::BadRequest("token is required".to_string()));
    }

    if subscriber_repo::deactivate_by_token(pool.get_ref(), token).await? {
        Ok(HttpResponse::Ok().json(json!({ "unsubscribed": true })))
    } else {
        Err(AppError::NotFound("unknown unsubscribe token".to_string()))
    }
}

/// List subscribers (admin)
pub async fn list_subscribers(
    pool: web::Data<PgPool>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let subscribers = subscriber_repo::list_all_subscribers(
        pool.get_ref(),
        query.limit.clamp(1, 500),
        query.offset.max(0),
    )
    .await?;

    Ok(HttpResponse::Ok().json(subscribers))
}

/// Request body for subscribing
#[derive(Debug, Deserialize, Validate)]
pub struct SubscribeRequest {
    #[validate(email)]
    pub email: String,
    pub language: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UnsubscribeQuery {
    pub token: String,
}
