use super::error::{SubmitError, ValidationError};
use crate::utils::mime::mime_from_path;
use serde::Serialize;
use serde_json::{json, Value};
use std::io;
use std::path::{Path, PathBuf};

/// Multipart field name the server reads the image from.
pub const FILE_FIELD: &str = "file";
pub const PNG_MIME: &str = "image/png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Reads a file from disk, declaring its MIME type from the extension.
    pub async fn load(path: &Path) -> io::Result<Self> {
        let name = path
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?
            .to_string_lossy()
            .to_string();
        let bytes = tokio::fs::read(path).await?;

        Ok(Self::new(name, mime_from_path(path), bytes))
    }
}

/// One submission's payload: at most one file plus extra text fields.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub file: Option<SelectedFile>,
    pub fields: Vec<(String, String)>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file: SelectedFile) -> Self {
        self.file = Some(file);
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Png,
    Pdf,
}

impl ArtifactKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            ArtifactKind::Png => "mosaic.png",
            ArtifactKind::Pdf => "mosaic.pdf",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ArtifactKind::Png => PNG_MIME,
            ArtifactKind::Pdf => "application/pdf",
        }
    }
}

/// Response body of a successful generation, not yet saved.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactMeta {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub size: u64,
    pub path: PathBuf,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Success(ArtifactMeta),
    ValidationError(ValidationError),
    TransportError(SubmitError),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Success(_))
    }

    pub fn to_json(&self) -> Value {
        match self {
            SubmitOutcome::Success(meta) => json!({
                "outcome": "success",
                "artifact": meta,
            }),
            SubmitOutcome::ValidationError(e) => json!({
                "outcome": "validation_error",
                "error": e.to_string(),
            }),
            SubmitOutcome::TransportError(e) => json!({
                "outcome": "transport_error",
                "category": format!("{:?}", e.category()).to_lowercase(),
                "error": e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_file_names() {
        assert_eq!(ArtifactKind::Png.file_name(), "mosaic.png");
        assert_eq!(ArtifactKind::Pdf.file_name(), "mosaic.pdf");
        assert_eq!(ArtifactKind::Pdf.mime(), "application/pdf");
    }

    #[test]
    fn test_form_builder_keeps_field_order() {
        let form = UploadForm::new()
            .field("width", "30")
            .field("height", "40")
            .with_file(SelectedFile::new("cat.png", PNG_MIME, vec![1, 2, 3]));

        assert_eq!(
            form.fields,
            vec![
                ("width".to_string(), "30".to_string()),
                ("height".to_string(), "40".to_string())
            ]
        );
        assert_eq!(form.file.map(|f| f.name), Some("cat.png".to_string()));
    }

    #[tokio::test]
    async fn test_load_declares_mime_from_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("photo.JPG");
        std::fs::write(&path, b"jpeg-bytes").unwrap();

        let file = SelectedFile::load(&path).await.unwrap();
        assert_eq!(file.name, "photo.JPG");
        assert_eq!(file.mime, "image/jpeg");
        assert_eq!(file.bytes, b"jpeg-bytes");
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = SelectedFile::load(&dir.path().join("missing.png")).await;
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_outcome_json() {
        let outcome = SubmitOutcome::ValidationError(ValidationError::NoFileSelected);
        let value = outcome.to_json();
        assert_eq!(value["outcome"], "validation_error");
        assert_eq!(value["error"], "no file selected");

        let outcome = SubmitOutcome::Success(ArtifactMeta {
            kind: ArtifactKind::Png,
            file_name: "mosaic.png".to_string(),
            size: 3,
            path: PathBuf::from("/tmp/mosaic.png"),
        });
        let value = outcome.to_json();
        assert_eq!(value["outcome"], "success");
        assert_eq!(value["artifact"]["kind"], "png");
        assert_eq!(value["artifact"]["size"], 3);
    }
}
