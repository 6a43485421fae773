/// Admin authentication handlers
use crate::config::Config;
use crate::db::session_repo;
use crate::error::{AppError, Result};
use crate::middleware::ADMIN_SESSION_COOKIE;
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};
use argon2::password_hash::PasswordHash;
use argon2::{Argon2, PasswordVerifier};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use tracing::{info, warn};

/// Cookie lifetime matches the session row expiry
const COOKIE_DAYS: i64 = 30;

/// Log in with the configured admin credential and receive the session
/// cookie
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let admin = &config.admin;

    if admin.password_hash.trim().is_empty() {
        return Err(AppError::Authentication(
            "admin login is not configured".to_string(),
        ));
    }

    if req.username != admin.username {
        return Err(AppError::Authentication("invalid credentials".to_string()));
    }

    let parsed_hash = PasswordHash::new(&admin.password_hash)
        .map_err(|e| AppError::Internal(format!("invalid admin password hash: {}", e)))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Authentication("invalid credentials".to_string()))?;

    // Housekeeping: drop expired sessions while we are here
    if let Err(e) = session_repo::prune_expired(pool.get_ref()).await {
        warn!(error = %e, "Failed to prune expired admin sessions");
    }

    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect();

    let session = session_repo::create_session(pool.get_ref(), &token).await?;

    let secure = config.app.env.eq_ignore_ascii_case("production");
    let cookie = Cookie::build(ADMIN_SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(CookieDuration::days(COOKIE_DAYS))
        .finish();

    info!("Admin login succeeded");

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "expires_at": session.expires_at })))
}

/// Log out: delete the session row and clear the cookie
pub async fn logout(http_req: HttpRequest, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    if let Some(cookie) = http_req.cookie(ADMIN_SESSION_COOKIE) {
        if let Err(e) = session_repo::delete_session(pool.get_ref(), cookie.value()).await {
            warn!(error = %e, "Failed to delete admin session");
        }
    }

    let mut removal = Cookie::new(ADMIN_SESSION_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();

    Ok(HttpResponse::Ok()
        .cookie(removal)
        .json(json!({ "logged_out": true })))
}

/// Request body for admin login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
