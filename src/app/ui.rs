use super::MosaicUploader;
use crate::config::Variant;
use crate::utils::file_size::human_size;
use egui::{self, Align, Color32, RichText};
use rfd::FileDialog;

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const ERROR_RED: Color32 = Color32::from_rgb(220, 50, 50);
const SUCCESS_GREEN: Color32 = Color32::from_rgb(0, 180, 0);

impl MosaicUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let total_height = ui.available_height();
            let footer_height = 30.0;
            let footer_margin = 10.0;
            let content_height = total_height - footer_height - footer_margin;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Diamond Mosaic Generator");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Turn a picture into a diamond painting scheme")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);
                    self.render_file_picker(ui);

                    ui.add_space(10.0);
                    self.render_size_fields(ui);

                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.add_enabled_ui(!self.state.is_submitting, |ui| {
                            let button = egui::Button::new("🧩 Generate")
                                .min_size(egui::vec2(200.0, 40.0));
                            if ui.add(button).clicked() {
                                self.start_submit();
                            }
                        });

                        if !self.state.is_submitting
                            && (self.image_path.is_some() || self.state.last_artifact.is_some())
                        {
                            ui.add_space(5.0);
                            if ui.button("🗑 Clear").clicked() {
                                self.reset();
                            }
                        }
                    });

                    ui.add_space(20.0);
                    self.render_status(ui);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(footer_margin);
                self.render_footer(ui);
            });
        });
    }

    fn render_file_picker(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                if ui.button("📁 Select Image").clicked() {
                    let extensions: &[&str] = match self.config.variant {
                        Variant::Image => &["png"],
                        Variant::Document => &["png", "jpg", "jpeg", "bmp", "gif", "webp"],
                    };
                    if let Some(path) = FileDialog::new()
                        .add_filter("Images", extensions)
                        .pick_file()
                    {
                        self.select_image(path);
                    }
                }

                match &self.image_path {
                    Some(path) => {
                        let size = self
                            .image_size
                            .map(human_size)
                            .unwrap_or_default();
                        ui.label(format!("Selected: {} {}", path.display(), size));
                    }
                    None => {
                        ui.label(
                            RichText::new("No image selected")
                                .color(ui.visuals().text_color().gamma_multiply(0.6)),
                        );
                    }
                }
            });
        });
    }

    fn render_size_fields(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label("Base size, cm:");
                ui.add(egui::TextEdit::singleline(&mut self.width_cm).desired_width(50.0));
                ui.label("×");
                ui.add(egui::TextEdit::singleline(&mut self.height_cm).desired_width(50.0));
                ui.add_space(4.0);
                ui.label("ℹ").on_hover_text_at_pointer(
                    "Width and height of the canvas.\nThe server fits the picture inside it.",
                );
            });
        });
    }

    fn render_status(&mut self, ui: &mut egui::Ui) {
        let text = self.state.status_text(self.config.language);
        if text.is_empty() {
            return;
        }

        ui.vertical_centered(|ui| {
            let status = self.state.status;
            if status.is_error() {
                ui.colored_label(ERROR_RED, text);
            } else if status.is_terminal() {
                ui.colored_label(SUCCESS_GREEN, text);
            } else {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(text);
                });
            }

            if let Some(meta) = &self.state.last_artifact {
                ui.add_space(5.0);
                ui.label(format!(
                    "{} ({})",
                    meta.path.display(),
                    human_size(meta.size)
                ));
                if ui.button("📂 Open file").clicked() {
                    self.open_artifact();
                }
            }
        });
    }

    fn render_footer(&self, ui: &mut egui::Ui) {
        ui.horizontal_centered(|ui| {
            ui.label(
                RichText::new(format!("Server: {}", self.config.server_url))
                    .small()
                    .color(ui.visuals().text_color().gamma_multiply(0.6)),
            );
            ui.colored_label(ACCENT, "●");
        });
    }
}
