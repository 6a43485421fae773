/// Comment handlers - public creation/voting and admin moderation
use crate::db::{blog_repo, comment_repo};
use crate::error::{AppError, Result};
use crate::middleware::client_ip;
use crate::models::{CommentStatus, VoteValue};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
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

/// Get approved comments for a blog post (public)
pub async fn get_blog_comments(
    pool: web::Data<PgPool>,
    blog_id: web::Path<Uuid>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse> {
    let comments = comment_repo::get_comments_by_blog(
        pool.get_ref(),
        *blog_id,
        CommentStatus::Approved,
        query.limit.clamp(1, 200),
        query.offset.max(0),
    )
    .await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Create a comment on a blog post (public, lands in moderation queue)
pub async fn create_comment(
    pool: web::Data<PgPool>,
    blog_id: web::Path<Uuid>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    if blog_repo::get_blog_by_id(pool.get_ref(), *blog_id).await?.is_none() {
        return Err(AppError::NotFound(format!("blog post {} not found", blog_id)));
    }

    let comment = comment_repo::create_comment(
        pool.get_ref(),
        *blog_id,
        req.author_name.trim(),
        req.author_email.trim(),
        req.body.trim(),
    )
    .await?;

    Ok(HttpResponse::Created().json(comment))
}

/// Vote on a comment, keyed by client IP. Re-voting replaces the previous
/// vote.
pub async fn vote_comment(
    http_req: HttpRequest,
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    req: web::Json<VoteRequest>,
) -> Result<HttpResponse> {
    let vote: VoteValue = req.vote.parse().map_err(AppError::Validation)?;

    if comment_repo::get_comment_by_id(pool.get_ref(), *comment_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "comment {} not found",
            comment_id
        )));
    }

    let voter_ip = client_ip(&http_req);
    comment_repo::upsert_vote(pool.get_ref(), *comment_id, &voter_ip, vote).await?;

    let (up, down) = comment_repo::count_votes(pool.get_ref(), *comment_id).await?;
    Ok(HttpResponse::Ok().json(VoteCounts { up, down }))
}

/// List comments across posts, optionally filtered by status (admin)
pub async fn admin_list_comments(
    pool: web::Data<PgPool>,
    query: web::Query<AdminCommentQuery>,
) -> Result<HttpResponse> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(raw.parse::<CommentStatus>().map_err(AppError::Validation)?),
        None => None,
    };

    let comments = comment_repo::list_comments(
        pool.get_ref(),
        status,
        query.limit.clamp(1, 200),
        query.offset.max(0),
    )
    .await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Update a comment's moderation status (admin)
pub async fn update_comment_status(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    req: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse> {
    let status: CommentStatus = req.status.parse().map_err(AppError::Validation)?;

    if comment_repo::update_comment_status(pool.get_ref(), *comment_id, status).await? {
        Ok(HttpResponse::Ok().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

/// Delete a comment (admin)
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    if comment_repo::delete_comment(pool.get_ref(), *comment_id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

/// Request body for creating a comment
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 100))]
    pub author_name: String,
    #[validate(email)]
    pub author_email: String,
    #[validate(length(min = 1, max = 5000))]
    pub body: String,
}

/// Request body for voting on a comment
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub vote: String,
}

/// Request body for updating a comment's moderation status
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Admin comment listing filter
#[derive(Debug, Deserialize)]
pub struct AdminCommentQuery {
    pub status: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

#[derive(Serialize)]
struct VoteCounts {
    up: i64,
    down: i64,
}
