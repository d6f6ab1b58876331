//! Photo loading for inline transmission
//!
//! Images larger than the configured maximum edge are downscaled and
//! re-encoded as JPEG so requests stay within the service's size limits;
//! smaller images are sent as-is.

use crate::error::{RecircleError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

/// Inline image payload for an inference request.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub mime_type: String,
    /// Base64-encoded image bytes
    pub data: String,
}

/// MIME type from the file extension; unknown extensions fall back to JPEG.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// Load a photo and prepare it for inline transmission.
pub fn load_image(path: &Path, max_edge: u32) -> Result<ImagePayload> {
    if !path.exists() {
        return Err(RecircleError::FileNotFound(path.display().to_string()));
    }

    let bytes = std::fs::read(path)?;
    let img = image::load_from_memory(&bytes)
        .map_err(|e| RecircleError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    if img.width() <= max_edge && img.height() <= max_edge {
        return Ok(ImagePayload {
            mime_type: mime_type_for(path).to_string(),
            data: STANDARD.encode(&bytes),
        });
    }

    let resized = img.resize(max_edge, max_edge, image::imageops::FilterType::Triangle);
    let mut jpeg = Vec::new();
    resized
        .write_to(&mut std::io::Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
        .map_err(|e| RecircleError::ImageLoad(format!("re-encode failed: {}", e)))?;

    Ok(ImagePayload {
        mime_type: "image/jpeg".to_string(),
        data: STANDARD.encode(&jpeg),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_mime_type_for_extensions() {
        assert_eq!(mime_type_for(Path::new("a.png")), "image/png");
        assert_eq!(mime_type_for(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_type_for(Path::new("a.webp")), "image/webp");
        assert_eq!(mime_type_for(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_type_for(Path::new("noext")), "image/jpeg");
    }

    #[test]
    fn test_load_image_not_found() {
        let result = load_image(&PathBuf::from("/nonexistent/photo.jpg"), 1536);
        assert!(matches!(result, Err(RecircleError::FileNotFound(_))));
    }

    #[test]
    fn test_load_image_rejects_non_image() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("not-an-image.jpg");
        std::fs::write(&path, b"plain text").unwrap();

        let result = load_image(&path, 1536);
        assert!(matches!(result, Err(RecircleError::ImageLoad(_))));
    }

    #[test]
    fn test_load_image_small_passthrough() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("small.png");
        image::RgbImage::new(8, 8).save(&path).expect("save failed");

        let payload = load_image(&path, 1536).expect("load failed");
        assert_eq!(payload.mime_type, "image/png");
        assert!(!payload.data.is_empty());
    }

    #[test]
    fn test_load_image_downscales_large() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        let path = dir.path().join("large.png");
        image::RgbImage::new(64, 32).save(&path).expect("save failed");

        // max edge below the image size forces the JPEG re-encode path
        let payload = load_image(&path, 16).expect("load failed");
        assert_eq!(payload.mime_type, "image/jpeg");
        assert!(!payload.data.is_empty());
    }
}
