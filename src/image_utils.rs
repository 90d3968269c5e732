use crate::error::AppError;
use base64::{engine::general_purpose, Engine as _};

/// Maximum accepted size of a single image
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024; // 10MB

const SUPPORTED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// A single uploaded image
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Build an upload, inferring the MIME type from the file name when missing
    ///
    /// Fails if the result is not an accepted image type or is too large.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<Self, AppError> {
        let file_name = file_name.into();

        let mime_type = match mime_type.map(str::trim).filter(|m| !m.is_empty()) {
            // Browsers send this for unknown types, fall back to the extension
            Some("application/octet-stream") | None => mime_from_extension(&file_name)
                .ok_or_else(|| {
                    AppError::InvalidImage(format!(
                        "Cannot determine image type of '{}'",
                        file_name
                    ))
                })?
                .to_string(),
            Some(mime) => mime.to_lowercase(),
        };

        validate_image(&bytes, &mime_type)?;

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    pub fn to_data_url(&self) -> String {
        to_data_url(&self.bytes, &self.mime_type)
    }
}

/// Map a file extension to an accepted image MIME type
pub fn mime_from_extension(file_name: &str) -> Option<&'static str> {
    let extension = file_name.rsplit_once('.')?.1.to_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Validate image format and size
pub fn validate_image(data: &[u8], mime_type: &str) -> Result<(), AppError> {
    if data.is_empty() {
        return Err(AppError::InvalidImage("Image is empty".to_string()));
    }

    if data.len() > MAX_IMAGE_BYTES {
        return Err(AppError::InvalidImage(format!(
            "Image too large: {} bytes (max: {} bytes)",
            data.len(),
            MAX_IMAGE_BYTES
        )));
    }

    let normalized = mime_type.to_lowercase();
    if !SUPPORTED_MIME_TYPES.contains(&normalized.as_str()) {
        return Err(AppError::InvalidImage(format!(
            "Unsupported image format: {} (supported: jpg, jpeg, png, webp)",
            mime_type
        )));
    }

    Ok(())
}

/// Encode image bytes as a base64 data URL
pub fn to_data_url(data: &[u8], mime_type: &str) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        general_purpose::STANDARD.encode(data)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PNG_PIXEL: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

    fn png_bytes() -> Vec<u8> {
        general_purpose::STANDARD.decode(PNG_PIXEL).unwrap()
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension("car.JPG"), Some("image/jpeg"));
        assert_eq!(mime_from_extension("car.jpeg"), Some("image/jpeg"));
        assert_eq!(mime_from_extension("watch.webp"), Some("image/webp"));
        assert_eq!(mime_from_extension("sofa.bmp"), None);
        assert_eq!(mime_from_extension("noextension"), None);
    }

    #[test]
    fn test_upload_infers_mime() {
        let upload = ImageUpload::new("pixel.png", None, png_bytes()).unwrap();
        assert_eq!(upload.mime_type, "image/png");

        let upload =
            ImageUpload::new("pixel.png", Some("application/octet-stream"), png_bytes()).unwrap();
        assert_eq!(upload.mime_type, "image/png");
    }

    #[test]
    fn test_upload_rejects_unknown_type() {
        let result = ImageUpload::new("notes.txt", None, b"hello".to_vec());
        assert!(matches!(result, Err(AppError::InvalidImage(_))));

        let result = ImageUpload::new("pixel.gif", Some("image/gif"), png_bytes());
        assert!(matches!(result, Err(AppError::InvalidImage(_))));
    }

    #[test]
    fn test_validate_image_size_valid() {
        let data = vec![0u8; 1024 * 1024]; // 1MB
        assert!(validate_image(&data, "image/jpeg").is_ok());
    }

    #[test]
    fn test_validate_image_size_too_large() {
        let data = vec![0u8; 11 * 1024 * 1024]; // 11MB
        assert!(validate_image(&data, "image/jpeg").is_err());
    }

    #[test]
    fn test_validate_image_empty() {
        assert!(validate_image(&[], "image/png").is_err());
    }

    #[test]
    fn test_to_data_url_round_trip() {
        let upload = ImageUpload::new("pixel.png", Some("image/png"), png_bytes()).unwrap();
        assert_eq!(
            upload.to_data_url(),
            format!("data:image/png;base64,{}", PNG_PIXEL)
        );
    }
}
