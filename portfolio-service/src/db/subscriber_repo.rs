use crate::models::Subscriber;
use sqlx::PgPool;

/// Create a subscriber with a fresh unsubscribe token
pub async fn create_subscriber(
    pool: &PgPool,
    email: &str,
    language: Option<&str>,
    unsubscribe_token: &str,
) -> Result<Subscriber, sqlx::Error> {
    let subscriber = sqlx::query_as::<_, Subscriber>(
        r#"
        INSERT INTO subscribers (email, language, unsubscribe_token, active)
        VALUES ($1, $2, $3, TRUE)
        RETURNING id, email, language, unsubscribe_token, active, created_at, updated_at
        "#,
    )
    .bind(email)
    .bind(language)
    .bind(unsubscribe_token)
    .fetch_one(pool)
    .await?;

    Ok(subscriber)
}

/// Look up a subscriber by email
pub async fn get_subscriber_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<Subscriber>, sqlx::Error> {
    let subscriber = sqlx::query_as::<_, Subscriber>(
        r#"
        SELECT id, email, language, unsubscribe_token, active, created_at, updated_at
        FROM subscribers
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(subscriber)
}

/// Reactivate an unsubscribed address, rotating its token
pub async fn reactivate_subscriber(
    pool: &PgPool,
    email: &str,
    language: Option<&str>,
    unsubscribe_token: &str,
) -> Result<Option<Subscriber>, sqlx::Error> {
    let subscriber = sqlx::query_as::<_, Subscriber>(
        r#"
        UPDATE subscribers
        SET active = TRUE, language = $2, unsubscribe_token = $3, updated_at = NOW()
        WHERE email = $1
        RETURNING id, email, language, unsubscribe_token, active, created_at, updated_at
        "#,
    )
    .bind(email)
    .bind(language)
    .bind(unsubscribe_token)
    .fetch_optional(pool)
    .await?;

    Ok(subscriber)
}

/// Deactivate the subscriber holding this unsubscribe token
pub async fn deactivate_by_token(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE subscribers
        SET active = FALSE, updated_at = NOW()
        WHERE unsubscribe_token = $1 AND active = TRUE
        "#,
    )
    .bind(token)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// List active subscribers (newsletter recipients)
pub async fn list_active_subscribers(pool: &PgPool) -> Result<Vec<Subscriber>, sqlx::Error> {
    let subscribers = sqlx::query_as::<_, Subscriber>(
        r#"
        SELECT id, email, language, unsubscribe_token, active, created_at, updated_at
        FROM subscribers
        WHERE active = TRUE
        ORDER BY created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(subscribers)
}

/// List every subscriber for the admin dashboard
pub async fn list_all_subscribers(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<Subscriber>, sqlx::Error> {
    let subscribers = sqlx::query_as::<_, Subscriber>(
        r#"
        SELECT id, email, language, unsubscribe_token, active, created_at, updated_at
        FROM subscribers
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(subscribers)
}
