mod state;
mod ui;

use crate::config::UploaderConfig;
use crate::upload::{SelectedFile, StatusMessage, SubmitOutcome, UploadController, UploadForm};
use eframe::{egui, App};
use log::{error, info};
use state::SubmitState;
use std::path::PathBuf;
use std::sync::mpsc as std_mpsc;

pub const DEFAULT_WIDTH_CM: &str = "30";
pub const DEFAULT_HEIGHT_CM: &str = "40";

pub struct MosaicUploader {
    config: UploaderConfig,
    image_path: Option<PathBuf>,
    image_size: Option<u64>,
    width_cm: String,
    height_cm: String,
    state: SubmitState,
}

impl MosaicUploader {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: UploaderConfig) -> Self {
        info!(
            "Initializing mosaic uploader ({:?} variant, server {})",
            config.variant, config.server_url
        );
        Self {
            config,
            image_path: None,
            image_size: None,
            width_cm: DEFAULT_WIDTH_CM.to_string(),
            height_cm: DEFAULT_HEIGHT_CM.to_string(),
            state: SubmitState::default(),
        }
    }

    pub fn select_image(&mut self, path: PathBuf) {
        self.image_size = std::fs::metadata(&path).ok().map(|m| m.len());
        info!("Selected image: {}", path.display());
        self.image_path = Some(path);
    }

    pub fn reset(&mut self) {
        info!("Resetting form");
        self.image_path = None;
        self.image_size = None;
        self.width_cm = DEFAULT_WIDTH_CM.to_string();
        self.height_cm = DEFAULT_HEIGHT_CM.to_string();
        self.state.clear();
    }

    /// Hands the current form to a background worker. The UI keeps running
    /// and picks up status changes in `update_state`.
    pub fn start_submit(&mut self) {
        let (status_sender, status_receiver) = std_mpsc::channel();
        let (artifact_sender, artifact_receiver) = std_mpsc::channel();
        self.state.begin(status_receiver, artifact_receiver);

        let config = self.config.clone();
        let image_path = self.image_path.clone();
        let fields = vec![
            ("width".to_string(), self.width_cm.trim().to_string()),
            ("height".to_string(), self.height_cm.trim().to_string()),
        ];

        let spawned = std::thread::Builder::new()
            .name("mosaic-submit".to_string())
            .spawn(move || {
                let rt = match tokio::runtime::Runtime::new() {
                    Ok(rt) => rt,
                    Err(e) => {
                        error!("Failed to start async runtime: {}", e);
                        status_sender.send(StatusMessage::Failed).unwrap_or_default();
                        return;
                    }
                };

                rt.block_on(async {
                    let controller = match UploadController::new(&config) {
                        Ok(controller) => controller,
                        Err(e) => {
                            error!("Invalid configuration: {}", e);
                            status_sender.send(StatusMessage::Failed).unwrap_or_default();
                            return;
                        }
                    };

                    let mut form = fields
                        .into_iter()
                        .fold(UploadForm::new(), |form, (name, value)| form.field(name, value));
                    if let Some(path) = image_path {
                        match SelectedFile::load(&path).await {
                            Ok(file) => form = form.with_file(file),
                            Err(e) => {
                                error!("Failed to read {}: {}", path.display(), e);
                                status_sender.send(StatusMessage::Failed).unwrap_or_default();
                                return;
                            }
                        }
                    }

                    if let SubmitOutcome::Success(meta) =
                        controller.submit(form, &status_sender).await
                    {
                        artifact_sender.send(meta).unwrap_or_default();
                    }
                });
            });

        if let Err(e) = spawned {
            error!("Failed to spawn submit worker: {}", e);
            self.state.apply(StatusMessage::Failed);
        }
    }

    pub fn open_artifact(&mut self) {
        if let Some(meta) = &self.state.last_artifact {
            if let Err(e) = open::that(&meta.path) {
                error!("Failed to open {}: {}", meta.path.display(), e);
            }
        }
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.state.poll() {
            ctx.request_repaint();
        }
        // Keep polling while a worker may still report back.
        if self.state.is_submitting || self.state.artifact_receiver.is_some() {
            ctx.request_repaint();
        }
    }
}

impl App for MosaicUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
