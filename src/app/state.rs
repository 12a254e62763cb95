use crate::error::{UploadError, ValidationError};
use crate::upload::{PredictionResponse, SelectedFile};
use eframe::egui::TextureHandle;
use std::sync::mpsc::Receiver;

/// A request running on the worker thread.
pub struct PendingRequest {
    pub job_id: u64,
    pub receiver: Receiver<Result<PredictionResponse, UploadError>>,
}

/// A file being read and validated on the worker thread.
pub struct PendingSelection {
    pub ticket: u64,
    pub receiver: Receiver<Result<SelectedFile, ValidationError>>,
}

/// Window-only state that the controller does not need to know about.
#[derive(Default)]
pub struct ShellState {
    pub pending: Option<PendingRequest>,
    pub pending_selection: Option<PendingSelection>,
    pub thumbnail: Option<TextureHandle>,
}

impl ShellState {
    pub fn forget_selection(&mut self) {
        self.thumbnail = None;
    }
}
