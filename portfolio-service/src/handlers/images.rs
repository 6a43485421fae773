/// Stored file serving with path-traversal sanitization
use crate::config::Config;
use crate::error::{AppError, Result};
use actix_web::{web, HttpResponse};

/// Serve a stored upload by filename. Names carrying path separators or
/// dot-dot components never reach the filesystem.
pub async fn serve_image(config: web::Data<Config>, filename: web::Path<String>) -> Result<HttpResponse> {
    let filename = sanitize_filename(&filename)?;

    let path = std::path::Path::new(&config.uploads.dir).join(filename);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("no such file: {}", filename)));
        }
        Err(e) => {
            return Err(AppError::Internal(format!("failed to read file: {}", e)));
        }
    };

    Ok(HttpResponse::Ok()
        .content_type(content_type_for(filename))
        .body(bytes))
}

/// Reject anything that could escape the upload directory
fn sanitize_filename(raw: &str) -> Result<&str> {
    let name = raw.trim();

    if name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
        || name.starts_with('.')
        || name.contains('\0')
    {
        return Err(AppError::BadRequest("invalid filename".to_string()));
    }

    Ok(name)
}

/// Content type from the file extension
fn content_type_for(filename: &str) -> mime::Mime {
    match filename.rsplit('.').next().map(|e| e.to_lowercase()).as_deref() {
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("png") => mime::IMAGE_PNG,
        Some("gif") => mime::IMAGE_GIF,
        Some("svg") => mime::IMAGE_SVG,
        Some("pdf") => mime::APPLICATION_PDF,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_rejects_traversal() {
        assert!(sanitize_filename("../etc/passwd").is_err());
        assert!(sanitize_filename("..%2Fetc").is_err());
        assert!(sanitize_filename("a/b.png").is_err());
        assert!(sanitize_filename("a\\b.png").is_err());
        assert!(sanitize_filename(".hidden").is_err());
        assert!(sanitize_filename("").is_err());
        assert!(sanitize_filename("  ").is_err());
    }

    #[test]
    fn test_sanitize_accepts_plain_names() {
        assert_eq!(sanitize_filename("profile.jpg").unwrap(), "profile.jpg");
        assert_eq!(sanitize_filename("cv.pdf").unwrap(), "cv.pdf");
        assert_eq!(sanitize_filename("blog-abc123.pdf").unwrap(), "blog-abc123.pdf");
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for("a.jpg"), mime::IMAGE_JPEG);
        assert_eq!(content_type_for("a.PNG"), mime::IMAGE_PNG);
        assert_eq!(content_type_for("a.pdf"), mime::APPLICATION_PDF);
        assert_eq!(content_type_for("a.bin"), mime::APPLICATION_OCTET_STREAM);
    }
}
