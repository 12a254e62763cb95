use super::types::{PredictionResponse, SelectedFile};
use crate::error::UploadError;

/// Lifecycle of one staged image.
///
/// The staged file lives inside the variants that have one, and the response
/// and modal flag only exist once a prediction succeeded.
#[derive(Debug, Clone, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Validating {
        ticket: u64,
    },
    Ready {
        file: SelectedFile,
    },
    Submitting {
        request_id: u64,
        file: SelectedFile,
    },
    Succeeded {
        file: SelectedFile,
        response: PredictionResponse,
        modal_visible: bool,
    },
    Failed {
        file: SelectedFile,
        error: UploadError,
    },
}

impl UploadState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating { .. } => "validating",
            Self::Ready { .. } => "ready",
            Self::Submitting { .. } => "submitting",
            Self::Succeeded { .. } => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }

    pub fn staged_file(&self) -> Option<&SelectedFile> {
        match self {
            Self::Ready { file }
            | Self::Submitting { file, .. }
            | Self::Succeeded { file, .. }
            | Self::Failed { file, .. } => Some(file),
            Self::Idle | Self::Validating { .. } => None,
        }
    }

    pub fn response(&self) -> Option<&PredictionResponse> {
        match self {
            Self::Succeeded { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn modal_visible(&self) -> bool {
        matches!(
            self,
            Self::Succeeded {
                modal_visible: true,
                ..
            }
        )
    }

    pub fn is_validating(&self) -> bool {
        matches!(self, Self::Validating { .. })
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting { .. })
    }

    pub fn last_error(&self) -> Option<&UploadError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
