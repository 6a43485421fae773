/// Admin session database operations
use crate::models::AdminSession;
use chrono::Utc;
use sqlx::PgPool;

/// Session lifetime for the admin cookie
const SESSION_DAYS: i64 = 30;

/// Create a new admin session
pub async fn create_session(pool: &PgPool, token: &str) -> Result<AdminSession, sqlx::Error> {
    let expires_at = Utc::now() + chrono::Duration::days(SESSION_DAYS);

    let session = sqlx::query_as::<_, AdminSession>(
        r#"
        INSERT INTO admin_sessions (token, expires_at)
        VALUES ($1, $2)
        RETURNING id, token, expires_at, created_at
        "#,
    )
    .bind(token)
    .bind(expires_at)
    .fetch_one(pool)
    .await?;

    Ok(session)
}

/// Get a non-expired session by token
pub async fn get_valid_session(
    pool: &PgPool,
    token: &str,
) -> Result<Option<AdminSession>, sqlx::Error> {
    let session = sqlx::query_as::<_, AdminSession>(
        r#"
        SELECT id, token, expires_at, created_at
        FROM admin_sessions
        WHERE token = $1 AND expires_at > NOW()
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

/// Delete a session (logout)
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM admin_sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Prune expired sessions. Called opportunistically on login.
pub async fn prune_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM admin_sessions WHERE expires_at <= NOW()")
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
