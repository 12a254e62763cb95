use crate::error::ValidationError;
use crate::validation::ImageInfo;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// An image the user picked, with its raw bytes.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Arc<[u8]>,
    /// Filled in by the validator on acceptance
    pub dimensions: Option<ImageInfo>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
            dimensions: None,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ValidationError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| ValidationError::Unreadable("invalid file name".to_string()))?;
        let bytes = fs::read(path).map_err(|e| ValidationError::Unreadable(e.to_string()))?;
        let content_type = guess_content_type(path, &bytes);

        Ok(Self::new(name, content_type, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Sniffs the bytes first, then falls back to the extension.
fn guess_content_type(path: &Path, bytes: &[u8]) -> String {
    image::guess_format(bytes)
        .or_else(|_| image::ImageFormat::from_path(path))
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| FALLBACK_CONTENT_TYPE.to_string())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResponse {
    #[serde(rename = "class")]
    pub label: String,
    pub confidence: f64,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl PredictionResponse {
    pub fn has_valid_confidence(&self) -> bool {
        self.confidence.is_finite() && (0.0..=1.0).contains(&self.confidence)
    }

    /// Confidence as a percentage with two decimals, e.g. `97.00%`.
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }
}

/// Body of a non-2xx response, when the server sends one.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
}

/// A staged file handed to the transport, tagged with the request it belongs to.
#[derive(Debug, Clone)]
pub struct UploadJob {
    pub id: u64,
    pub file: SelectedFile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_and_full_responses() {
        let minimal: PredictionResponse =
            serde_json::from_str(r#"{"class": "Healthy", "confidence": 0.97}"#).unwrap();
        assert_eq!(minimal.label, "Healthy");
        assert_eq!(minimal.filename, None);
        assert_eq!(minimal.confidence_percent(), "97.00%");

        let full: PredictionResponse = serde_json::from_str(
            r#"{"class": "Early Blight", "confidence": 0.5, "filename": "leaf.jpg", "content_type": "image/jpeg"}"#,
        )
        .unwrap();
        assert_eq!(full.filename.as_deref(), Some("leaf.jpg"));
        assert_eq!(full.content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(full.confidence_percent(), "50.00%");
    }

    #[test]
    fn confidence_outside_unit_range_is_invalid() {
        let response = PredictionResponse {
            label: "Late Blight".to_string(),
            confidence: 1.5,
            filename: None,
            content_type: None,
        };
        assert!(!response.has_valid_confidence());
    }

    #[test]
    fn content_type_falls_back_to_extension_then_octet_stream() {
        assert_eq!(
            guess_content_type(Path::new("leaf.png"), b"\x89PNG\r\n\x1a\n"),
            "image/png"
        );
        assert_eq!(guess_content_type(Path::new("leaf.jpg"), b"??"), "image/jpeg");
        assert_eq!(
            guess_content_type(Path::new("leaf.unknown"), b"??"),
            FALLBACK_CONTENT_TYPE
        );
    }

    #[test]
    fn missing_file_is_unreadable() {
        let result = SelectedFile::from_path(Path::new("/definitely/not/here.png"));
        assert!(matches!(result, Err(ValidationError::Unreadable(_))));
    }
}
