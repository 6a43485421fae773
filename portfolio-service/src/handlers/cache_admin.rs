/// Cache invalidation endpoint (admin)
use crate::cache::{CacheType, Invalidator};
use crate::error::{AppError, Result};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

/// Invalidate one cache type (or `all`). Unknown tags are rejected before
/// anything is cleared.
pub async fn invalidate_cache(
    invalidator: web::Data<Invalidator>,
    req: web::Json<InvalidateRequest>,
) -> Result<HttpResponse> {
    let cache_type: CacheType = req.cache_type.parse().map_err(AppError::BadRequest)?;

    let outcome = invalidator.invalidate(cache_type).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Request body for cache invalidation
#[derive(Debug, Deserialize)]
pub struct InvalidateRequest {
    pub cache_type: String,
}
