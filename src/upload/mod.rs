mod controller;
mod delivery;
mod error;
mod status;
mod types;

pub use controller::UploadController;
pub use status::StatusMessage;
pub use types::{ArtifactKind, ArtifactMeta, SelectedFile, SubmitOutcome, UploadForm};
