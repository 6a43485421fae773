use crate::models::ContactMessage;
use sqlx::PgPool;
use uuid::Uuid;

/// Store a contact form submission
pub async fn create_contact(
    pool: &PgPool,
    name: &str,
    email: &str,
    subject: &str,
    body: &str,
    sender_ip: Option<&str>,
) -> Result<ContactMessage, sqlx::Error> {
    let message = sqlx::query_as::<_, ContactMessage>(
        r#"
        INSERT INTO contact_messages (name, email, subject, body, sender_ip)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, email, subject, body, sender_ip, created_at
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(subject)
    .bind(body)
    .bind(sender_ip)
    .fetch_one(pool)
    .await?;

    Ok(message)
}

/// List contact messages, newest first (admin view)
pub async fn list_contacts(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<ContactMessage>, sqlx::Error> {
    let messages = sqlx::query_as::<_, ContactMessage>(
        r#"
        SELECT id, name, email, subject, body, sender_ip, created_at
        FROM contact_messages
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(messages)
}

/// Delete a contact message
pub async fn delete_contact(pool: &PgPool, contact_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
        .bind(contact_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
