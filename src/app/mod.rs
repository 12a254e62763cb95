mod state;
mod ui;

use crate::config::ClientConfig;
use crate::error::{UploadError, ValidationError};
use crate::upload::{
    prepare_file, HttpPredictionClient, PredictionClient, SelectedFile, UploadController,
    UploadState,
};
use crate::validation::{ImageCrateDecoder, ImageValidator};
use eframe::{egui, App};
use state::{PendingRequest, PendingSelection, ShellState};
use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};
use std::time::{Duration, Instant};
use tracing::{error, info};

const THUMBNAIL_SIZE: u32 = 256;

pub struct LeafHealthApp {
    config: ClientConfig,
    controller: UploadController<ImageCrateDecoder>,
    client: Option<HttpPredictionClient>,
    shell: ShellState,
}

impl LeafHealthApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ClientConfig) -> Self {
        info!("Initializing LeafHealth window");
        let validator = ImageValidator::new(ImageCrateDecoder, config.min_dimension);
        let client = match HttpPredictionClient::new(&config.endpoint, config.request_timeout) {
            Ok(client) => Some(client),
            Err(e) => {
                error!("HTTP client unavailable: {}", e);
                None
            }
        };

        Self {
            config,
            controller: UploadController::new(validator),
            client,
            shell: ShellState::default(),
        }
    }

    pub fn select_image(&mut self, ctx: &egui::Context, path: PathBuf) {
        info!("Selected {}", path.display());
        let Ok(ticket) = self.controller.begin_validation() else {
            return;
        };
        self.shell.forget_selection();

        let validator = self.controller.validator().clone();
        let (sender, receiver) = mpsc::channel();
        self.shell.pending_selection = Some(PendingSelection { ticket, receiver });

        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let _ = sender.send(prepare_file(&validator, &path));
            ctx.request_repaint();
        });
    }

    pub fn start_upload(&mut self, ctx: &egui::Context) {
        let Ok(job) = self.controller.begin_submit() else {
            return;
        };

        let Some(client) = self.client.clone() else {
            self.controller.finish_submit(
                job.id,
                Err(UploadError::Network("HTTP client unavailable".to_string())),
            );
            return;
        };

        let (sender, receiver) = mpsc::channel();
        self.shell.pending = Some(PendingRequest {
            job_id: job.id,
            receiver,
        });

        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let outcome = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt.block_on(client.predict(&job.file)),
                Err(e) => Err(UploadError::Network(format!(
                    "failed to start async runtime: {}",
                    e
                ))),
            };
            let _ = sender.send(outcome);
            ctx.request_repaint();
        });
    }

    pub fn clear(&mut self) {
        if self.controller.clear().is_ok() {
            self.shell.pending_selection = None;
            self.shell.forget_selection();
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if let Some(pending) = self.shell.pending_selection.take() {
            let ticket = pending.ticket;
            let result = match pending.receiver.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => {
                    self.shell.pending_selection = Some(pending);
                    None
                }
                Err(TryRecvError::Disconnected) => Some(Err(ValidationError::Unreadable(
                    "validation worker stopped unexpectedly".to_string(),
                ))),
            };

            if let Some(result) = result {
                self.controller.finish_validation(ticket, result);
            }
        }

        if let Some(pending) = self.shell.pending.take() {
            let job_id = pending.job_id;
            let outcome = match pending.receiver.try_recv() {
                Ok(outcome) => Some(outcome),
                Err(TryRecvError::Empty) => {
                    self.shell.pending = Some(pending);
                    None
                }
                Err(TryRecvError::Disconnected) => Some(Err(UploadError::Network(
                    "upload worker stopped unexpectedly".to_string(),
                ))),
            };

            if let Some(outcome) = outcome {
                if self.controller.finish_submit(job_id, outcome) {
                    self.load_thumbnail(ctx);
                }
            }
        }

        self.controller
            .notifications_mut()
            .expire(Instant::now(), self.config.notification_ttl);

        if self.shell.pending.is_some()
            || self.shell.pending_selection.is_some()
            || !self.controller.notifications().is_empty()
        {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }

    fn load_thumbnail(&mut self, ctx: &egui::Context) {
        let UploadState::Succeeded { file, .. } = self.controller.state() else {
            return;
        };
        self.shell.thumbnail = thumbnail_texture(ctx, file);
    }
}

fn thumbnail_texture(ctx: &egui::Context, file: &SelectedFile) -> Option<egui::TextureHandle> {
    let image = match image::load_from_memory(&file.bytes) {
        Ok(image) => image,
        Err(e) => {
            error!("Could not build thumbnail for '{}': {}", file.name, e);
            return None;
        }
    };
    let rgba = image.thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE).to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());

    Some(ctx.load_texture(
        "result-thumbnail",
        color_image,
        egui::TextureOptions::LINEAR,
    ))
}

impl App for LeafHealthApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
