use crate::models::{Comment, CommentStatus, CommentVote, VoteValue};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Create a new comment on a blog post. Comments start out pending moderation.
pub async fn create_comment(
    pool: &PgPool,
    blog_id: Uuid,
    author_name: &str,
    author_email: &str,
    body: &str,
) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (blog_id, author_name, author_email, body, status)
        VALUES ($1, $2, $3, $4, 'pending')
        RETURNING id, blog_id, author_name, author_email, body, status,
                  created_at, updated_at
        "#,
    )
    .bind(blog_id)
    .bind(author_name)
    .bind(author_email)
    .bind(body)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Get a single comment by ID
pub async fn get_comment_by_id(
    pool: &PgPool,
    comment_id: Uuid,
) -> Result<Option<Comment>, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, blog_id, author_name, author_email, body, status,
               created_at, updated_at
        FROM comments
        WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

/// Get comments for a blog post filtered by status
pub async fn get_comments_by_blog(
    pool: &PgPool,
    blog_id: Uuid,
    status: CommentStatus,
    limit: i64,
    offset: i64,
) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, blog_id, author_name, author_email, body, status,
               created_at, updated_at
        FROM comments
        WHERE blog_id = $1 AND status = $2
        ORDER BY created_at DESC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(blog_id)
    .bind(status.as_str())
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// List comments across all posts, optionally filtered by status (admin view)
pub async fn list_comments(
    pool: &PgPool,
    status: Option<CommentStatus>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = match status {
        Some(status) => {
            sqlx::query_as::<_, Comment>(
                r#"
                SELECT id, blog_id, author_name, author_email, body, status,
                       created_at, updated_at
                FROM comments
                WHERE status = $1
                ORDER BY created_at DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(status.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Comment>(
                r#"
                SELECT id, blog_id, author_name, author_email, body, status,
                       created_at, updated_at
                FROM comments
                ORDER BY created_at DESC
                LIMIT $1 OFFSET $2
                "#,
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(comments)
}

/// Update a comment's moderation status
pub async fn update_comment_status(
    pool: &PgPool,
    comment_id: Uuid,
    status: CommentStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE comments
        SET status = $1, updated_at = NOW()
        WHERE id = $2
        "#,
    )
    .bind(status.as_str())
    .bind(comment_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a comment (votes go with it via cascade)
pub async fn delete_comment(pool: &PgPool, comment_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Record a vote keyed by voter IP. Voting again from the same IP replaces
/// the previous vote.
pub async fn upsert_vote(
    pool: &PgPool,
    comment_id: Uuid,
    voter_ip: &str,
    vote: VoteValue,
) -> Result<CommentVote, sqlx::Error> {
    let vote = sqlx::query_as::<_, CommentVote>(
        r#"
        INSERT INTO comment_votes (comment_id, voter_ip, vote)
        VALUES ($1, $2, $3)
        ON CONFLICT (comment_id, voter_ip)
        DO UPDATE SET vote = EXCLUDED.vote, updated_at = NOW()
        RETURNING id, comment_id, voter_ip, vote, created_at, updated_at
        "#,
    )
    .bind(comment_id)
    .bind(voter_ip)
    .bind(vote.as_str())
    .fetch_one(pool)
    .await?;

    Ok(vote)
}

/// Count up/down votes for a comment
pub async fn count_votes(pool: &PgPool, comment_id: Uuid) -> Result<(i64, i64), sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT COUNT(*) FILTER (WHERE vote = 'up') AS up_votes,
               COUNT(*) FILTER (WHERE vote = 'down') AS down_votes
        FROM comment_votes
        WHERE comment_id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_one(pool)
    .await?;

    Ok((
        row.get::<i64, _>("up_votes"),
        row.get::<i64, _>("down_votes"),
    ))
}
