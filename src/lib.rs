//! Desktop client that validates a leaf photo locally and asks a remote
//! service to classify it.

pub mod app;
pub mod config;
pub mod error;
pub mod notifications;
pub mod upload;
pub mod utils;
pub mod validation;
