use super::LeafHealthApp;
use crate::notifications::NotificationLevel;
use crate::upload::UploadState;
use crate::utils::format::{format_dimensions, format_size};
use eframe::egui::{self, load::SizedTexture, Align, Align2, Color32, RichText};
use rfd::FileDialog;

const ACCENT: Color32 = Color32::from_rgb(46, 139, 87);
const VERSION_LABEL: &str = concat!("LeafHealth v", env!("CARGO_PKG_VERSION"));
const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "webp", "bmp", "gif", "tiff"];

impl LeafHealthApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("🍃").size(26.0).color(ACCENT));
                ui.heading("LeafHealth");
            });
            ui.add_space(8.0);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(8.0);
                ui.label(
                    RichText::new("© 2024 LeafHealth. All Rights Reserved.")
                        .color(ui.visuals().text_color().gamma_multiply(0.7)),
                );
                ui.add_space(8.0);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(30.0);
            ui.vertical_centered(|ui| {
                ui.heading("Please select a potato leaf image to classify");
            });
            ui.add_space(20.0);

            self.render_picker(ui);

            ui.add_space(20.0);
            self.render_actions(ui, ctx);
        });

        self.render_result_modal(ctx);
        self.render_notifications(ctx);
    }

    fn render_picker(&mut self, ui: &mut egui::Ui) {
        let submitting = self.controller.state().is_submitting();

        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.add_enabled_ui(!submitting, |ui| {
                    if ui.button("📁 Select Image").clicked() {
                        if let Some(path) = FileDialog::new()
                            .add_filter("Images", &IMAGE_EXTENSIONS)
                            .pick_file()
                        {
                            self.select_image(ui.ctx(), path);
                        }
                    }
                });

                match self.controller.state().staged_file() {
                    Some(file) => {
                        ui.label(format!("{} ({})", file.name, format_size(file.size())));
                    }
                    None => {
                        ui.label(
                            RichText::new("No file selected")
                                .color(ui.visuals().text_color().gamma_multiply(0.6)),
                        );
                    }
                }
            });
        });
    }

    fn render_actions(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let submitting = self.controller.state().is_submitting();
        let busy = submitting || self.controller.state().is_validating();

        ui.vertical_centered(|ui| {
            ui.horizontal(|ui| {
                ui.add_enabled_ui(!busy, |ui| {
                    let button =
                        egui::Button::new("📤 Upload File").min_size(egui::vec2(160.0, 36.0));
                    if ui.add(button).clicked() {
                        self.start_upload(ctx);
                    }
                });
                if busy {
                    ui.add(egui::Spinner::new());
                }

                ui.add_space(12.0);
                ui.add_enabled_ui(!submitting, |ui| {
                    let button = egui::Button::new("🗑 Clear").min_size(egui::vec2(100.0, 36.0));
                    if ui.add(button).clicked() {
                        self.clear();
                    }
                });
            });
        });

        if let Some(error) = self.controller.state().last_error() {
            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                ui.colored_label(Color32::from_rgb(220, 50, 50), error.user_message());
            });
        }
    }

    fn render_result_modal(&mut self, ctx: &egui::Context) {
        let UploadState::Succeeded {
            file,
            response,
            modal_visible: true,
        } = self.controller.state()
        else {
            return;
        };

        let mut open = true;
        egui::Window::new("Prediction Result")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    if let Some(texture) = &self.shell.thumbnail {
                        ui.add(
                            egui::Image::new(SizedTexture::from_handle(texture)).max_width(240.0),
                        );
                        ui.add_space(10.0);
                    }
                });

                egui::Grid::new("prediction-details")
                    .num_columns(2)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Label:").strong());
                        ui.label(RichText::new(&response.label).color(ACCENT).strong());
                        ui.end_row();

                        ui.label(RichText::new("Confidence:").strong());
                        ui.label(response.confidence_percent());
                        ui.end_row();

                        ui.label(RichText::new("Filename:").strong());
                        ui.label(response.filename.as_deref().unwrap_or(&file.name));
                        ui.end_row();

                        ui.label(RichText::new("Size:").strong());
                        ui.label(format_size(file.size()));
                        ui.end_row();

                        ui.label(RichText::new("Content type:").strong());
                        ui.label(
                            response
                                .content_type
                                .as_deref()
                                .unwrap_or(&file.content_type),
                        );
                        ui.end_row();

                        if let Some(dimensions) = file.dimensions {
                            ui.label(RichText::new("Dimensions:").strong());
                            ui.label(format_dimensions(dimensions.width, dimensions.height));
                            ui.end_row();
                        }
                    });

                ui.add_space(8.0);
                ui.label(
                    RichText::new(VERSION_LABEL)
                        .small()
                        .color(ui.visuals().text_color().gamma_multiply(0.6)),
                );
            });

        if !open {
            self.controller.close_modal();
        }
    }

    fn render_notifications(&mut self, ctx: &egui::Context) {
        let mut dismissed = Vec::new();

        egui::Area::new("notifications")
            .anchor(Align2::RIGHT_TOP, [-12.0, 12.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.set_max_width(300.0);
                for notification in self.controller.notifications().iter() {
                    let fill = match notification.level {
                        NotificationLevel::Info => Color32::from_rgb(60, 90, 140),
                        NotificationLevel::Success => Color32::from_rgb(0, 140, 70),
                        NotificationLevel::Error => Color32::from_rgb(190, 45, 45),
                    };

                    egui::Frame::none()
                        .fill(fill)
                        .rounding(6.0)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(&notification.message).color(Color32::WHITE));
                                if ui.small_button("✕").clicked() {
                                    dismissed.push(notification.id);
                                }
                            });
                        });
                    ui.add_space(6.0);
                }
            });

        for id in dismissed {
            self.controller.notifications_mut().dismiss(id);
        }
    }
}
