use super::error::ValidationError;
use super::types::{ArtifactKind, SubmitOutcome};
use crate::config::Language;

/// The single user-facing status slot. Every transition overwrites it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusMessage {
    #[default]
    Idle,
    Validating,
    Processing,
    Success(ArtifactKind),
    NoFileSelected,
    InvalidFileType,
    Failed,
}

impl StatusMessage {
    pub fn text(&self, language: Language) -> &'static str {
        match language {
            Language::En => match self {
                StatusMessage::Idle => "",
                StatusMessage::Validating => "Checking file…",
                StatusMessage::Processing => "Processing image…",
                StatusMessage::Success(ArtifactKind::Png) => "Done! PNG file downloaded.",
                StatusMessage::Success(ArtifactKind::Pdf) => "Done! PDF file downloaded.",
                StatusMessage::NoFileSelected => "No file selected",
                StatusMessage::InvalidFileType => "Please upload a PNG file",
                StatusMessage::Failed => "An error occurred while generating the schema",
            },
            Language::Ru => match self {
                StatusMessage::Idle => "",
                StatusMessage::Validating => "Проверка файла...",
                StatusMessage::Processing => "Обработка изображения...",
                StatusMessage::Success(ArtifactKind::Png) => "Готово! PNG-файл скачан.",
                StatusMessage::Success(ArtifactKind::Pdf) => "Готово! PDF-файл скачан.",
                StatusMessage::NoFileSelected => "Файл не выбран.",
                StatusMessage::InvalidFileType => "Пожалуйста, загрузите PNG-файл.",
                StatusMessage::Failed => "Произошла ошибка при генерации схемы.",
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            StatusMessage::NoFileSelected | StatusMessage::InvalidFileType | StatusMessage::Failed
        )
    }

    /// A terminal status ends a submission.
    pub fn is_terminal(&self) -> bool {
        self.is_error() || matches!(self, StatusMessage::Success(_))
    }
}

impl From<&SubmitOutcome> for StatusMessage {
    fn from(outcome: &SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Success(meta) => StatusMessage::Success(meta.kind),
            SubmitOutcome::ValidationError(ValidationError::NoFileSelected) => {
                StatusMessage::NoFileSelected
            }
            SubmitOutcome::ValidationError(ValidationError::InvalidFileType { .. }) => {
                StatusMessage::InvalidFileType
            }
            SubmitOutcome::TransportError(_) => StatusMessage::Failed,
        }
    }
}
