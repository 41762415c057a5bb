//! Image endpoints
//!
//! Uploads go out as multipart bodies with the binary payload under the
//! `file` field. The transport layer supplies the multipart boundary, so
//! the client's JSON `Content-Type` default never applies to these calls.

use crate::client::SnaplookClient;
use crate::error::{ApiError, ApiResult};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest upload the backend accepts (16 MiB)
///
/// Exceeding it gets a 400 from the server; callers can pre-check against
/// this to avoid shipping a doomed body.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Multipart field name the backend reads the payload from
const UPLOAD_FIELD: &str = "file";

/// Images API interface
#[derive(Clone)]
pub struct ImagesApi {
    client: SnaplookClient,
}

impl ImagesApi {
    /// Create a new images API interface
    pub(crate) fn new(client: SnaplookClient) -> Self {
        Self { client }
    }

    /// Upload an image for recognition
    ///
    /// POST /images/upload
    ///
    /// The backend rejects non-`image/*` payloads, so `content_type` must
    /// name an image type (see [`guess_content_type`]).
    pub async fn upload(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> ApiResult<UploadResult> {
        let part = Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| ApiError::config(format!("invalid content type {content_type:?}: {e}")))?;

        let form = Form::new().part(UPLOAD_FIELD, part);
        self.client.post_multipart("images/upload", form).await
    }

    /// Trigger feature extraction for an already-uploaded image
    ///
    /// POST /images/{image_id}/process
    pub async fn process(&self, image_id: &str) -> ApiResult<ProcessResult> {
        let path = format!("images/{image_id}/process");
        self.client.post_empty(&path).await
    }
}

/// Guess an image content type from a file extension
///
/// Returns `None` for extensions the backend does not recognize as images.
#[must_use]
pub fn guess_content_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// Result of an image upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResult {
    /// Server-assigned image ID, used for subsequent searches
    pub image_id: String,
    /// Search history entry created for the upload, when authenticated
    pub search_id: Option<i64>,
    /// Human-readable status message
    pub message: String,
}

/// Result of a feature-extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResult {
    /// Whether features were extracted
    pub features_extracted: bool,
    /// Dimensionality of the extracted feature vector
    pub vector_dimension: u32,
    /// Human-readable status message
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_result_deserialize() {
        let json = r#"{
            "image_id": "a1b2c3d4.jpg",
            "search_id": 42,
            "message": "Image uploaded successfully"
        }"#;

        let result: UploadResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.image_id, "a1b2c3d4.jpg");
        assert_eq!(result.search_id, Some(42));
    }

    #[test]
    fn test_upload_result_anonymous_user() {
        // search_id is null when nobody is logged in
        let json = r#"{
            "image_id": "a1b2c3d4.jpg",
            "search_id": null,
            "message": "Image uploaded successfully"
        }"#;

        let result: UploadResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.search_id, None);
    }

    #[test]
    fn test_process_result_deserialize() {
        let json = r#"{
            "features_extracted": true,
            "vector_dimension": 512,
            "message": "Image processed successfully"
        }"#;

        let result: ProcessResult = serde_json::from_str(json).unwrap();
        assert!(result.features_extracted);
        assert_eq!(result.vector_dimension, 512);
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(
            guess_content_type(Path::new("photo.jpg")),
            Some("image/jpeg")
        );
        assert_eq!(
            guess_content_type(Path::new("photo.JPEG")),
            Some("image/jpeg")
        );
        assert_eq!(guess_content_type(Path::new("shot.png")), Some("image/png"));
        assert_eq!(
            guess_content_type(Path::new("anim.webp")),
            Some("image/webp")
        );
        assert_eq!(guess_content_type(Path::new("notes.txt")), None);
        assert_eq!(guess_content_type(Path::new("no_extension")), None);
    }
}
