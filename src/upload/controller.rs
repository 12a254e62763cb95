use super::client::PredictionClient;
use super::state::UploadState;
use super::types::{PredictionResponse, SelectedFile, UploadJob};
use crate::error::{ClientError, UploadError, ValidationError};
use crate::notifications::NotificationFeed;
use crate::validation::{ImageDecoder, ImageValidator};
use std::path::Path;
use tracing::{debug, info, warn};

/// Reads `path` and runs the validator over it, returning the file with its
/// dimensions filled in.
pub fn prepare_file<D: ImageDecoder>(
    validator: &ImageValidator<D>,
    path: &Path,
) -> Result<SelectedFile, ValidationError> {
    let mut file = SelectedFile::from_path(path)?;
    file.dimensions = Some(validator.validate(&file.bytes)?);
    Ok(file)
}

/// Owns the upload state machine and the toast feed it reports to.
pub struct UploadController<D: ImageDecoder> {
    validator: ImageValidator<D>,
    state: UploadState,
    notifications: NotificationFeed,
    next_id: u64,
}

impl<D: ImageDecoder> UploadController<D> {
    pub fn new(validator: ImageValidator<D>) -> Self {
        Self {
            validator,
            state: UploadState::default(),
            notifications: NotificationFeed::default(),
            next_id: 1,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn validator(&self) -> &ImageValidator<D> {
        &self.validator
    }

    pub fn notifications(&self) -> &NotificationFeed {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationFeed {
        &mut self.notifications
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reads `path` from disk and stages it if it validates.
    pub fn select_path(&mut self, path: &Path) -> Result<(), ClientError> {
        self.begin_validation()?;
        let result = prepare_file(&self.validator, path);
        if let Err(e) = &result {
            warn!("Could not stage {}: {}", path.display(), e);
        }
        self.complete_validation(result)
    }

    pub fn select_file(&mut self, mut file: SelectedFile) -> Result<(), ClientError> {
        self.begin_validation()?;

        info!("Validating '{}' ({} bytes)", file.name, file.size());
        let result = self.validator.validate(&file.bytes).map(|dimensions| {
            file.dimensions = Some(dimensions);
            file
        });
        self.complete_validation(result)
    }

    /// Moves to `Validating` and returns the ticket the result must carry.
    /// Any earlier selection is dropped.
    pub fn begin_validation(&mut self) -> Result<u64, UploadError> {
        self.ensure_not_submitting()?;
        let ticket = self.take_id();
        self.state = UploadState::Validating { ticket };
        Ok(ticket)
    }

    /// Applies a validation result produced off the UI thread. Returns
    /// `false` when `ticket` was superseded by a newer selection or a clear.
    pub fn finish_validation(
        &mut self,
        ticket: u64,
        result: Result<SelectedFile, ValidationError>,
    ) -> bool {
        match &self.state {
            UploadState::Validating { ticket: current } if *current == ticket => {
                // Failures are reported through the notification feed.
                let _ = self.complete_validation(result);
                true
            }
            other => {
                debug!(
                    "Dropping validation {} received in state {}",
                    ticket,
                    other.name()
                );
                false
            }
        }
    }

    fn complete_validation(
        &mut self,
        result: Result<SelectedFile, ValidationError>,
    ) -> Result<(), ClientError> {
        match result {
            Ok(file) => {
                if let Some(dimensions) = file.dimensions {
                    info!(
                        "Staged '{}' ({}x{})",
                        file.name, dimensions.width, dimensions.height
                    );
                }
                self.state = UploadState::Ready { file };
                self.notifications.success("Image selected successfully.");
                Ok(())
            }
            Err(e) => {
                warn!("Rejected selection: {}", e);
                self.state = UploadState::Idle;
                self.notifications.error(e.user_message());
                Err(e.into())
            }
        }
    }

    fn ensure_not_submitting(&mut self) -> Result<(), UploadError> {
        if self.state.is_submitting() {
            let err = UploadError::Busy;
            self.notifications.error(err.user_message());
            return Err(err);
        }
        Ok(())
    }

    /// Moves the staged file into `Submitting` and hands back the job to send.
    ///
    /// Succeeded and Failed still hold the staged file, so a resubmit from
    /// either goes through here like a fresh `Ready`.
    pub fn begin_submit(&mut self) -> Result<UploadJob, UploadError> {
        self.ensure_not_submitting()?;

        let Some(file) = self.state.staged_file().cloned() else {
            let err = UploadError::NoFileSelected;
            debug!("Submit requested in state {}", self.state.name());
            self.notifications.error(err.user_message());
            return Err(err);
        };

        let request_id = self.take_id();
        info!("Submitting '{}' as request {}", file.name, request_id);

        self.state = UploadState::Submitting {
            request_id,
            file: file.clone(),
        };
        Ok(UploadJob {
            id: request_id,
            file,
        })
    }

    /// Applies the outcome of request `job_id`. Returns `false` when the
    /// outcome does not belong to the in-flight request and was dropped.
    pub fn finish_submit(
        &mut self,
        job_id: u64,
        outcome: Result<PredictionResponse, UploadError>,
    ) -> bool {
        let file = match &self.state {
            UploadState::Submitting { request_id, file } if *request_id == job_id => file.clone(),
            other => {
                debug!(
                    "Dropping outcome of request {} received in state {}",
                    job_id,
                    other.name()
                );
                return false;
            }
        };

        match outcome {
            Ok(response) => {
                info!(
                    "'{}' classified as {} ({})",
                    file.name,
                    response.label,
                    response.confidence_percent()
                );
                self.state = UploadState::Succeeded {
                    file,
                    response,
                    modal_visible: true,
                };
                self.notifications.success("Image classified successfully.");
            }
            Err(error) => {
                warn!("Request {} failed: {}", job_id, error);
                self.notifications.error(error.user_message());
                self.state = UploadState::Failed { file, error };
            }
        }
        true
    }

    /// Sends the staged file and waits for the answer.
    pub async fn submit<C: PredictionClient>(&mut self, client: &C) -> Result<(), UploadError> {
        let job = self.begin_submit()?;
        let outcome = client.predict(&job.file).await;
        let result = outcome.as_ref().map(|_| ()).map_err(|e| e.clone());
        self.finish_submit(job.id, outcome);
        result
    }

    /// Resets to `Idle`. Refused while a request is in flight, since the
    /// request cannot be cancelled.
    pub fn clear(&mut self) -> Result<(), UploadError> {
        self.ensure_not_submitting()?;
        self.state = UploadState::Idle;
        self.notifications.info("Selection cleared.");
        Ok(())
    }

    pub fn close_modal(&mut self) {
        if let UploadState::Succeeded { modal_visible, .. } = &mut self.state {
            *modal_visible = false;
        }
    }
}
