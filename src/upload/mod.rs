mod client;
mod controller;
mod state;
mod types;

pub use client::{HttpPredictionClient, PredictionClient};
pub use controller::{prepare_file, UploadController};
pub use state::UploadState;
pub use types::{PredictionResponse, SelectedFile};
