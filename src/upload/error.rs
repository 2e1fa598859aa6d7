use reqwest::StatusCode;
use thiserror::Error;

/// Problems with the selected file, detected before anything is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no file selected")]
    NoFileSelected,

    #[error("expected an image/png file, got {mime}")]
    InvalidFileType { mime: String },
}

/// Failures of the network/response/delivery phase of a submission.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// The server answered with a non-2xx status
    #[error("server responded with status {status}")]
    Server { status: StatusCode },

    /// Transport-level failure (connect, send, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The artifact could not be written to the output directory
    #[error("failed to save artifact: {0}")]
    Delivery(#[from] std::io::Error),
}

/// Coarse classification used only in diagnostics; users see one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitErrorCategory {
    Request,
    Network,
    Server,
    Delivery,
}

impl SubmitError {
    pub fn category(&self) -> SubmitErrorCategory {
        match self {
            SubmitError::Server { .. } => SubmitErrorCategory::Server,
            SubmitError::Network(e) if e.is_builder() => SubmitErrorCategory::Request,
            SubmitError::Network(_) => SubmitErrorCategory::Network,
            SubmitError::Delivery(_) => SubmitErrorCategory::Delivery,
        }
    }
}
