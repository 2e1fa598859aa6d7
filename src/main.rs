mod app;
mod config;
mod upload;
mod utils;

use app::MosaicUploader;
use clap::{Parser, Subcommand};
use config::{Language, UploaderConfig, Variant, DEFAULT_ENDPOINT, DEFAULT_SERVER_URL};
use log::{error, info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;
use upload::{SelectedFile, SubmitOutcome, UploadController, UploadForm};

#[derive(Parser)]
#[command(author, version, about = "Send a picture to the mosaic generator and save the result")]
struct Cli {
    /// Base URL of the generation server
    #[arg(long, env = "MOSAIC_SERVER_URL", default_value = DEFAULT_SERVER_URL, global = true)]
    server_url: String,

    /// Path the form is posted to
    #[arg(long, env = "MOSAIC_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    endpoint: String,

    #[arg(long, env = "MOSAIC_VARIANT", value_enum, default_value_t = Variant::Document, global = true)]
    variant: Variant,

    /// Directory the generated file is saved into
    #[arg(long, env = "MOSAIC_OUTPUT_DIR", default_value = ".", global = true)]
    output_dir: PathBuf,

    #[arg(long, env = "MOSAIC_LANGUAGE", value_enum, default_value_t = Language::En, global = true)]
    language: Language,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit one image without opening the window
    Submit {
        /// Image to upload
        file: Option<PathBuf>,
        /// Extra form field, e.g. --field width=30
        #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    fn config(&self) -> UploaderConfig {
        UploaderConfig::new()
            .server_url(&self.server_url)
            .endpoint(&self.endpoint)
            .variant(self.variant)
            .output_dir(&self.output_dir)
            .language(self.language)
    }
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    if name.trim().is_empty() {
        return Err(format!("empty field name in '{}'", raw));
    }
    Ok((name.trim().to_string(), value.to_string()))
}

fn run_gui(config: UploaderConfig) -> ExitCode {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([520.0, 480.0])
            .with_min_inner_size([400.0, 380.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Diamond Mosaic Generator",
        options,
        Box::new(move |cc: &eframe::CreationContext<'_>| {
            Box::new(MosaicUploader::new(cc, config))
        }),
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Failed to open window: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_submit(
    config: UploaderConfig,
    file: Option<PathBuf>,
    fields: Vec<(String, String)>,
    json: bool,
) -> ExitCode {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            error!("Failed to start async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = rt.block_on(async {
        let controller = match UploadController::new(&config) {
            Ok(controller) => controller,
            Err(e) => {
                error!("Invalid configuration: {}", e);
                return None;
            }
        };

        info!("Posting to {}", controller.endpoint());

        let mut form = fields
            .into_iter()
            .fold(UploadForm::new(), |form, (name, value)| form.field(name, value));
        if let Some(path) = file {
            match SelectedFile::load(&path).await {
                Ok(selected) => form = form.with_file(selected),
                Err(e) => {
                    error!("Failed to read {}: {}", path.display(), e);
                    return None;
                }
            }
        }

        let (sender, receiver) = mpsc::channel();
        let outcome = controller.submit(form, &sender).await;
        drop(sender);

        if !json {
            for status in receiver.iter() {
                let text = status.text(config.language);
                if !text.is_empty() {
                    println!("{}", text);
                }
            }
        }
        Some(outcome)
    });

    let Some(outcome) = outcome else {
        return ExitCode::FAILURE;
    };

    if json {
        println!("{}", outcome.to_json());
    } else if let SubmitOutcome::Success(meta) = &outcome {
        println!("{}", meta.path.display());
    }

    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.config();
    if let Err(e) = config.validate() {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    match cli.command {
        Some(Commands::Submit { file, fields, json }) => run_submit(config, file, fields, json),
        None => run_gui(config),
    }
}
