use super::types::{ErrorBody, PredictionResponse, SelectedFile};
use crate::error::UploadError;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Sends a staged image to the prediction endpoint.
#[allow(async_fn_in_trait)]
pub trait PredictionClient {
    async fn predict(&self, file: &SelectedFile) -> Result<PredictionResponse, UploadError>;
}

#[derive(Clone)]
pub struct HttpPredictionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPredictionClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| UploadError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    fn form_for(file: &SelectedFile) -> Result<Form, UploadError> {
        let part = Part::bytes(file.bytes.to_vec())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| UploadError::Network(format!("invalid content type: {}", e)))?;

        Ok(Form::new().part("file", part))
    }
}

impl PredictionClient for HttpPredictionClient {
    async fn predict(&self, file: &SelectedFile) -> Result<PredictionResponse, UploadError> {
        info!(
            "Uploading '{}' ({} bytes, {}) to {}",
            file.name,
            file.size(),
            file.content_type,
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(Self::form_for(file)?)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_error)?;
        debug!("Prediction endpoint answered {} ({} bytes)", status, body.len());

        if (200..300).contains(&status) {
            parse_prediction(&body)
        } else {
            let err = classify_failure(status, &body);
            warn!("Upload of '{}' failed: {}", file.name, err);
            Err(err)
        }
    }
}

fn transport_error(e: reqwest::Error) -> UploadError {
    if e.is_timeout() {
        warn!("Prediction request timed out: {}", e);
        UploadError::TimedOut
    } else {
        error!("Error uploading the file: {}", e);
        UploadError::Network(e.to_string())
    }
}

pub(crate) fn parse_prediction(body: &[u8]) -> Result<PredictionResponse, UploadError> {
    let prediction: PredictionResponse = serde_json::from_slice(body)
        .map_err(|e| UploadError::MalformedResponse(e.to_string()))?;

    if !prediction.has_valid_confidence() {
        return Err(UploadError::MalformedResponse(format!(
            "confidence {} outside [0, 1]",
            prediction.confidence
        )));
    }
    Ok(prediction)
}

/// Maps a non-2xx status and its body to an error.
pub(crate) fn classify_failure(status: u16, body: &[u8]) -> UploadError {
    match status {
        400 | 500 => UploadError::InvalidImage { status },
        _ => {
            let message = serde_json::from_slice::<ErrorBody>(body)
                .ok()
                .and_then(|b| b.error)
                .filter(|m| !m.trim().is_empty());
            UploadError::Server { status, message }
        }
    }
}
