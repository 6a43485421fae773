use crate::models::BlogPost;
use crate::services::localization::NormalizedBlog;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a blog post from a normalized payload
pub async fn create_blog(pool: &PgPool, input: &NormalizedBlog) -> Result<BlogPost, sqlx::Error> {
    let post = sqlx::query_as::<_, BlogPost>(
        r#"
        INSERT INTO blog_posts (slug, title_en, title_es, subtitle_en, subtitle_es,
                                content_en, content_es, footer_en, footer_es,
                                bibliography_en, bibliography_es, tags, cover_image,
                                published, published_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14,
                CASE WHEN $14 THEN NOW() ELSE NULL END)
        RETURNING id, slug, title_en, title_es, subtitle_en, subtitle_es,
                  content_en, content_es, footer_en, footer_es,
                  bibliography_en, bibliography_es, tags, cover_image, pdf_attachment,
                  published, published_at, created_at, updated_at
        "#,
    )
    .bind(&input.slug)
    .bind(&input.title_en)
    .bind(&input.title_es)
    .bind(&input.subtitle_en)
    .bind(&input.subtitle_es)
    .bind(&input.content_en)
    .bind(&input.content_es)
    .bind(&input.footer_en)
    .bind(&input.footer_es)
    .bind(&input.bibliography_en)
    .bind(&input.bibliography_es)
    .bind(&input.tags)
    .bind(&input.cover_image)
    .bind(input.published)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Get a blog post by ID (admin view, any publication state)
pub async fn get_blog_by_id(pool: &PgPool, blog_id: Uuid) -> Result<Option<BlogPost>, sqlx::Error> {
    let post = sqlx::query_as::<_, BlogPost>(
        r#"
        SELECT id, slug, title_en, title_es, subtitle_en, subtitle_es,
               content_en, content_es, footer_en, footer_es,
               bibliography_en, bibliography_es, tags, cover_image, pdf_attachment,
               published, published_at, created_at, updated_at
        FROM blog_posts
        WHERE id = $1
        "#,
    )
    .bind(blog_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Get a published blog post by slug
pub async fn get_published_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<BlogPost>, sqlx::Error> {
    let post = sqlx::query_as::<_, BlogPost>(
        r#"
        SELECT id, slug, title_en, title_es, subtitle_en, subtitle_es,
               content_en, content_es, footer_en, footer_es,
               bibliography_en, bibliography_es, tags, cover_image, pdf_attachment,
               published, published_at, created_at, updated_at
        FROM blog_posts
        WHERE slug = $1 AND published = TRUE
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// List published blog posts, newest first
pub async fn list_published(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<BlogPost>, sqlx::Error> {
    let posts = sqlx::query_as::<_, BlogPost>(
        r#"
        SELECT id, slug, title_en, title_es, subtitle_en, subtitle_es,
               content_en, content_es, footer_en, footer_es,
               bibliography_en, bibliography_es, tags, cover_image, pdf_attachment,
               published, published_at, created_at, updated_at
        FROM blog_posts
        WHERE published = TRUE
        ORDER BY published_at DESC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// List every blog post for the admin dashboard
pub async fn list_all_blogs(pool: &PgPool) -> Result<Vec<BlogPost>, sqlx::Error> {
    let posts = sqlx::query_as::<_, BlogPost>(
        r#"
        SELECT id, slug, title_en, title_es, subtitle_en, subtitle_es,
               content_en, content_es, footer_en, footer_es,
               bibliography_en, bibliography_es, tags, cover_image, pdf_attachment,
               published, published_at, created_at, updated_at
        FROM blog_posts
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Replace a blog post with a normalized payload. Flipping `published` on
/// stamps `published_at` once; unpublishing keeps the original timestamp.
pub async fn update_blog(
    pool: &PgPool,
    blog_id: Uuid,
    input: &NormalizedBlog,
) -> Result<Option<BlogPost>, sqlx::Error> {
    let post = sqlx::query_as::<_, BlogPost>(
        r#"
        UPDATE blog_posts
        SET slug = $1, title_en = $2, title_es = $3, subtitle_en = $4, subtitle_es = $5,
            content_en = $6, content_es = $7, footer_en = $8, footer_es = $9,
            bibliography_en = $10, bibliography_es = $11, tags = $12, cover_image = $13,
            published = $14,
            published_at = CASE
                WHEN $14 AND published_at IS NULL THEN NOW()
                ELSE published_at
            END,
            updated_at = NOW()
        WHERE id = $15
        RETURNING id, slug, title_en, title_es, subtitle_en, subtitle_es,
                  content_en, content_es, footer_en, footer_es,
                  bibliography_en, bibliography_es, tags, cover_image, pdf_attachment,
                  published, published_at, created_at, updated_at
        "#,
    )
    .bind(&input.slug)
    .bind(&input.title_en)
    .bind(&input.title_es)
    .bind(&input.subtitle_en)
    .bind(&input.subtitle_es)
    .bind(&input.content_en)
    .bind(&input.content_es)
    .bind(&input.footer_en)
    .bind(&input.footer_es)
    .bind(&input.bibliography_en)
    .bind(&input.bibliography_es)
    .bind(&input.tags)
    .bind(&input.cover_image)
    .bind(input.published)
    .bind(blog_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Attach an uploaded PDF to a blog post
pub async fn set_pdf_attachment(
    pool: &PgPool,
    blog_id: Uuid,
    path: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE blog_posts
        SET pdf_attachment = $1, updated_at = NOW()
        WHERE id = $2
        "#,
    )
    .bind(path)
    .bind(blog_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a blog post
pub async fn delete_blog(pool: &PgPool, blog_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
        .bind(blog_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
