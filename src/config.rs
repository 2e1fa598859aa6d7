//! Client configuration

use crate::upload::ArtifactKind;
use clap::ValueEnum;
use reqwest::Url;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
pub const DEFAULT_ENDPOINT: &str = "/generate";

/// Which flavour of the web client to reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Variant {
    /// Only PNG uploads are accepted; the result is saved as `mosaic.png`
    Image,
    /// Any file is forwarded; the result is saved as `mosaic.pdf`
    #[default]
    Document,
}

impl Variant {
    pub fn validates_file_type(&self) -> bool {
        matches!(self, Variant::Image)
    }

    pub fn artifact_kind(&self) -> ArtifactKind {
        match self {
            Variant::Image => ArtifactKind::Png,
            Variant::Document => ArtifactKind::Pdf,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Language {
    #[default]
    En,
    Ru,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("output path is not a directory: {0}")]
    OutputNotDirectory(PathBuf),
}

#[derive(Debug, Clone)]
pub struct UploaderConfig {
    /// Base URL of the generation server (e.g. "http://localhost:8080")
    pub server_url: String,
    pub endpoint: String,
    pub variant: Variant,
    /// Directory the generated artifact is saved into
    pub output_dir: PathBuf,
    pub language: Language,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            variant: Variant::default(),
            output_dir: PathBuf::from("."),
            language: Language::default(),
        }
    }
}

impl UploaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Full URL the form is posted to.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let joined = format!(
            "{}/{}",
            self.server_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|e| ConfigError::InvalidUrl {
            url: joined.clone(),
            reason: e.to_string(),
        })
    }

    /// Checks everything that can be checked before the first submission.
    /// A missing output directory is fine; it is created on first save.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint_url()?;
        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(ConfigError::OutputNotDirectory(self.output_dir.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UploaderConfig::default();
        assert_eq!(config.variant, Variant::Document);
        assert_eq!(config.language, Language::En);
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "http://localhost:8080/generate"
        );
    }

    #[test]
    fn test_endpoint_url_joins_slashes() {
        let config = UploaderConfig::new()
            .server_url("https://mosaic.example.com/api/")
            .endpoint("generate");
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "https://mosaic.example.com/api/generate"
        );
    }

    #[test]
    fn test_invalid_server_url() {
        let config = UploaderConfig::new().server_url("not a url");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_output_dir_must_be_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = UploaderConfig::new().output_dir(file.path());
        assert_eq!(
            config.validate(),
            Err(ConfigError::OutputNotDirectory(file.path().to_path_buf()))
        );
    }

    #[test]
    fn test_variant_behaviour() {
        assert!(Variant::Image.validates_file_type());
        assert!(!Variant::Document.validates_file_type());
        assert_eq!(Variant::Image.artifact_kind(), ArtifactKind::Png);
        assert_eq!(Variant::Document.artifact_kind(), ArtifactKind::Pdf);
    }
}
