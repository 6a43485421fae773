/// Profile image processing
/// Decodes an uploaded image and writes three JPEG size variants:
/// thumbnail (150x150), medium (600x600), original (max 2000x2000)
use image::{imageops::FilterType, DynamicImage, GenericImageView};
use std::path::{Path, PathBuf};
use thiserror::Error;

const THUMBNAIL_SIZE: u32 = 150;
const MEDIUM_SIZE: u32 = 600;
const ORIGINAL_MAX_SIZE: u32 = 2000;

const THUMBNAIL_QUALITY: u8 = 80;
const MEDIUM_QUALITY: u8 = 85;
const ORIGINAL_QUALITY: u8 = 90;

const MIN_IMAGE_SIZE: u32 = 50;

#[derive(Debug, Error)]
pub enum ImageProcessingError {
    #[error("Invalid image format: {0}")]
    InvalidFormat(String),

    #[error("Image too small: {0}x{1}px (minimum: {2}px)")]
    ImageTooSmall(u32, u32, u32),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ProcessingError(#[from] image::ImageError),
}

/// One written size variant
#[derive(Debug, Clone)]
pub struct ImageVariantResult {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub file_size: usize,
}

/// All variants of a processed profile image
#[derive(Debug)]
pub struct ProcessedImageVariants {
    pub thumbnail: ImageVariantResult,
    pub medium: ImageVariantResult,
    pub original: ImageVariantResult,
}

/// Decode uploaded bytes and write the three variants into `output_dir`
/// with names `{base_name}_thumb.jpg`, `{base_name}_medium.jpg`,
/// `{base_name}.jpg`.
pub async fn process_profile_image(
    bytes: Vec<u8>,
    output_dir: &Path,
    base_name: &str,
) -> Result<ProcessedImageVariants, ImageProcessingError> {
    let img = image::load_from_memory(&bytes)
        .map_err(|e| ImageProcessingError::InvalidFormat(e.to_string()))?;

    let (width, height) = img.dimensions();
    if width < MIN_IMAGE_SIZE || height < MIN_IMAGE_SIZE {
        return Err(ImageProcessingError::ImageTooSmall(
            width,
            height,
            MIN_IMAGE_SIZE,
        ));
    }

    tokio::fs::create_dir_all(output_dir).await?;

    let thumbnail = save_variant(
        resize_image(&img, THUMBNAIL_SIZE, THUMBNAIL_SIZE),
        output_dir.join(format!("{}_thumb.jpg", base_name)),
        THUMBNAIL_QUALITY,
    )
    .await?;

    let medium = save_variant(
        resize_image(&img, MEDIUM_SIZE, MEDIUM_SIZE),
        output_dir.join(format!("{}_medium.jpg", base_name)),
        MEDIUM_QUALITY,
    )
    .await?;

    let original = save_variant(
        resize_image(&img, ORIGINAL_MAX_SIZE, ORIGINAL_MAX_SIZE),
        output_dir.join(format!("{}.jpg", base_name)),
        ORIGINAL_QUALITY,
    )
    .await?;

    Ok(ProcessedImageVariants {
        thumbnail,
        medium,
        original,
    })
}

/// Resize to fit within max_width x max_height while preserving aspect
/// ratio; never upscales.
fn resize_image(img: &DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (width, height) = img.dimensions();

    let width_ratio = max_width as f32 / width as f32;
    let height_ratio = max_height as f32 / height as f32;
    let ratio = width_ratio.min(height_ratio);

    if ratio >= 1.0 {
        return img.clone();
    }

    let new_width = (width as f32 * ratio) as u32;
    let new_height = (height as f32 * ratio) as u32;

    // Lanczos3 for high-quality downsampling
    img.resize(new_width, new_height, FilterType::Lanczos3)
}

/// Encode a variant to disk as JPEG with the given quality
async fn save_variant(
    img: DynamicImage,
    output_path: PathBuf,
    quality: u8,
) -> Result<ImageVariantResult, ImageProcessingError> {
    let (width, height) = img.dimensions();

    // JPEG has no alpha channel
    let rgb_img = img.to_rgb8();

    let (path, file_size) = tokio::task::spawn_blocking(move || {
        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
            std::fs::File::create(&output_path)?,
            quality,
        );
        encoder.encode(rgb_img.as_raw(), width, height, image::ColorType::Rgb8)?;

        let metadata = std::fs::metadata(&output_path)?;
        Ok::<_, ImageProcessingError>((output_path, metadata.len() as usize))
    })
    .await
    .map_err(|e| {
        ImageProcessingError::ProcessingError(image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            e,
        )))
    })??;

    Ok(ImageVariantResult {
        path,
        width,
        height,
        file_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(width, height, Rgb::<u8>([120, 30, 200]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(
                &mut std::io::Cursor::new(&mut bytes),
                image::ImageOutputFormat::Png,
            )
            .unwrap();
        bytes
    }

    #[test]
    fn test_resize_never_upscales() {
        let img = DynamicImage::new_rgb8(100, 100);
        let resized = resize_image(&img, 600, 600);
        assert_eq!(resized.dimensions(), (100, 100));
    }

    #[test]
    fn test_resize_preserves_aspect_ratio() {
        let img = DynamicImage::new_rgb8(400, 200);
        let resized = resize_image(&img, 150, 150);
        assert_eq!(resized.dimensions(), (150, 75));
    }

    #[tokio::test]
    async fn test_process_writes_three_variants() {
        let dir = tempfile::tempdir().unwrap();
        let variants = process_profile_image(png_bytes(800, 800), dir.path(), "profile")
            .await
            .unwrap();

        assert_eq!(variants.thumbnail.width, 150);
        assert_eq!(variants.medium.width, 600);
        assert_eq!(variants.original.width, 800);
        assert!(variants.thumbnail.path.exists());
        assert!(variants.medium.path.exists());
        assert!(variants.original.path.exists());
    }

    #[tokio::test]
    async fn test_process_rejects_tiny_images() {
        let dir = tempfile::tempdir().unwrap();
        let result = process_profile_image(png_bytes(20, 20), dir.path(), "profile").await;
        assert!(matches!(
            result,
            Err(ImageProcessingError::ImageTooSmall(20, 20, _))
        ));
    }

    #[tokio::test]
    async fn test_process_rejects_garbage_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let result = process_profile_image(vec![0u8; 64], dir.path(), "profile").await;
        assert!(matches!(
            result,
            Err(ImageProcessingError::InvalidFormat(_))
        ));
    }
}
