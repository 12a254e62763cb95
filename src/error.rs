//! Error types for the classification client.
//!
//! Every variant is recoverable: the controller turns it into a toast via
//! `user_message()` and the window stays interactive.

use thiserror::Error;

/// Reasons the validator refuses a candidate image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The bytes could not be read or decoded as an image
    #[error("failed to load image: {0}")]
    Unreadable(String),
    /// One of the pixel dimensions is below the configured minimum
    #[error("image too small: {width}x{height} (minimum {min}x{min})")]
    TooSmall { width: u32, height: u32, min: u32 },
    /// Every pixel shares the first pixel's RGB value
    #[error("blank or uniform image")]
    Uniform,
}

impl ValidationError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Unreadable(_) => "Failed to load image. Please choose a valid image file.".to_string(),
            Self::TooSmall { min, .. } => format!(
                "Image is too small. Please select an image of at least {}x{} pixels.",
                min, min
            ),
            Self::Uniform => {
                "The image appears to be blank or a single color. Please select a real leaf photo."
                    .to_string()
            }
        }
    }
}

/// Failures of the submit path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("no file selected")]
    NoFileSelected,
    #[error("an upload is already in flight")]
    Busy,
    /// 400 and 500 both mean the service rejected the image
    #[error("server rejected the image with status {status}")]
    InvalidImage { status: u16 },
    #[error("unexpected status {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Server {
        status: u16,
        message: Option<String>,
    },
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    TimedOut,
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl UploadError {
    pub fn user_message(&self) -> String {
        match self {
            Self::NoFileSelected => "Please select a file first.".to_string(),
            Self::Busy => "Please wait for the current upload to finish.".to_string(),
            Self::InvalidImage { .. } => {
                "Invalid image. Please upload a clear image of a potato leaf.".to_string()
            }
            Self::Server {
                message: Some(message),
                ..
            } => format!("An unexpected error occurred: {}", message),
            Self::Server {
                status,
                message: None,
            } => format!("An unexpected error occurred (status {}).", status),
            Self::Network(_) => {
                "Network error. Please check your connection and try again.".to_string()
            }
            Self::TimedOut => "The request timed out. Please try again.".to_string(),
            Self::MalformedResponse(_) => {
                "An unexpected error occurred: the server sent an unreadable response.".to_string()
            }
        }
    }
}

/// Either kind of failure, for operations that can hit both.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Upload(#[from] UploadError),
}
