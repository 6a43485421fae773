/// Admin file upload handlers
///
/// - CV upload (PDF)
/// - Profile image upload (re-encoded into JPEG size variants)
/// - Blog PDF attachments
///
/// Files land in the configured upload directory under server-generated
/// names and are served back through `GET /images/{filename}`.
use crate::config::Config;
use crate::db::blog_repo;
use crate::error::{AppError, Result};
use crate::services::image_processing;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

/// Upload the CV as a PDF (admin)
pub async fn upload_cv(config: web::Data<Config>, mut payload: Multipart) -> Result<HttpResponse> {
    let (filename, bytes) = read_file_field(&mut payload, config.uploads.max_bytes).await?;
    require_pdf(&filename, &bytes)?;

    let dir = std::path::Path::new(&config.uploads.dir);
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Internal(format!("failed to create upload dir: {}", e)))?;

    let target = dir.join("cv.pdf");
    tokio::fs::write(&target, &bytes)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store cv: {}", e)))?;

    tracing::info!(bytes = bytes.len(), "CV uploaded");

    Ok(HttpResponse::Created().json(json!({ "path": "/images/cv.pdf" })))
}

/// Upload the profile image (admin). The original is re-encoded into
/// thumbnail, medium, and original JPEG variants.
pub async fn upload_profile_image(
    config: web::Data<Config>,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let (_filename, bytes) = read_file_field(&mut payload, config.uploads.max_bytes).await?;

    let dir = std::path::Path::new(&config.uploads.dir).to_path_buf();
    let variants = image_processing::process_profile_image(bytes, &dir, "profile")
        .await
        .map_err(|e| match e {
            image_processing::ImageProcessingError::InvalidFormat(msg) => {
                AppError::BadRequest(format!("not a decodable image: {}", msg))
            }
            image_processing::ImageProcessingError::ImageTooSmall(w, h, min) => {
                AppError::BadRequest(format!("image {}x{} below minimum {}px", w, h, min))
            }
            other => AppError::Internal(other.to_string()),
        })?;

    Ok(HttpResponse::Created().json(json!({
        "thumbnail": "/images/profile_thumb.jpg",
        "medium": "/images/profile_medium.jpg",
        "original": "/images/profile.jpg",
        "original_width": variants.original.width,
        "original_height": variants.original.height,
    })))
}

/// Attach a PDF to a blog post (admin)
pub async fn upload_blog_pdf(
    config: web::Data<Config>,
    pool: web::Data<PgPool>,
    blog_id: web::Path<Uuid>,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    if blog_repo::get_blog_by_id(pool.get_ref(), *blog_id).await?.is_none() {
        return Err(AppError::NotFound(format!("blog post {} not found", blog_id)));
    }

    let (filename, bytes) = read_file_field(&mut payload, config.uploads.max_bytes).await?;
    require_pdf(&filename, &bytes)?;

    let stored_name = format!("blog-{}.pdf", blog_id);
    let dir = std::path::Path::new(&config.uploads.dir);
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Internal(format!("failed to create upload dir: {}", e)))?;
    tokio::fs::write(dir.join(&stored_name), &bytes)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store pdf: {}", e)))?;

    let public_path = format!("/images/{}", stored_name);
    blog_repo::set_pdf_attachment(pool.get_ref(), *blog_id, &public_path).await?;

    Ok(HttpResponse::Created().json(json!({ "path": public_path })))
}

/// Pull the first file field out of a multipart payload, enforcing the
/// size cap while streaming.
async fn read_file_field(payload: &mut Multipart, max_bytes: usize) -> Result<(String, Vec<u8>)> {
    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::BadRequest(format!("malformed multipart payload: {}", e)))?;

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);

        // Skip non-file fields
        let Some(filename) = filename else { continue };

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk
                .map_err(|e| AppError::BadRequest(format!("upload stream failed: {}", e)))?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::BadRequest(format!(
                    "upload exceeds {} byte limit",
                    max_bytes
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        if bytes.is_empty() {
            return Err(AppError::BadRequest("uploaded file is empty".to_string()));
        }

        return Ok((filename, bytes));
    }

    Err(AppError::BadRequest("file field required".to_string()))
}

/// PDF check: extension plus magic bytes
fn require_pdf(filename: &str, bytes: &[u8]) -> Result<()> {
    let is_pdf_name = filename
        .rsplit('.')
        .next()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);

    if !is_pdf_name || !bytes.starts_with(b"%PDF") {
        return Err(AppError::BadRequest("a PDF file is required".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_pdf_checks_extension_and_magic() {
        assert!(require_pdf("cv.pdf", b"%PDF-1.7 rest").is_ok());
        assert!(require_pdf("cv.PDF", b"%PDF-1.4").is_ok());
        assert!(require_pdf("cv.pdf", b"PK\x03\x04").is_err());
        assert!(require_pdf("cv.docx", b"%PDF-1.7").is_err());
        assert!(require_pdf("cv", b"%PDF-1.7").is_err());
    }
}
