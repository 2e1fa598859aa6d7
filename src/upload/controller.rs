use super::delivery::{ArtifactSink, FileSink};
use super::error::{SubmitError, ValidationError};
use super::status::StatusMessage;
use super::types::{
    Artifact, ArtifactMeta, SelectedFile, SubmitOutcome, UploadForm, FILE_FIELD, PNG_MIME,
};
use crate::config::{ConfigError, UploaderConfig, Variant};
use log::{debug, error, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::Url;
use std::sync::mpsc::Sender;

/// Runs one upload-and-download cycle per call to [`UploadController::submit`].
pub struct UploadController<S = FileSink> {
    client: reqwest::Client,
    endpoint: Url,
    variant: Variant,
    sink: S,
}

impl UploadController<FileSink> {
    pub fn new(config: &UploaderConfig) -> Result<Self, ConfigError> {
        Self::with_sink(config, FileSink::new(config.output_dir.clone()))
    }
}

impl<S: ArtifactSink> UploadController<S> {
    pub fn with_sink(config: &UploaderConfig, sink: S) -> Result<Self, ConfigError> {
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint_url()?,
            variant: config.variant,
            sink,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Validates the form, posts it and saves the returned artifact.
    ///
    /// Phase changes are pushed to `status_sender` as they happen; the last
    /// message sent always matches the returned outcome. Network, server and
    /// save failures are logged here and collapse into one generic status.
    pub async fn submit(
        &self,
        form: UploadForm,
        status_sender: &Sender<StatusMessage>,
    ) -> SubmitOutcome {
        status_sender
            .send(StatusMessage::Validating)
            .unwrap_or_default();

        let UploadForm { file, fields } = form;
        let file = match self.validate(file) {
            Ok(file) => file,
            Err(e) => {
                warn!("Submission rejected: {}", e);
                let outcome = SubmitOutcome::ValidationError(e);
                status_sender
                    .send(StatusMessage::from(&outcome))
                    .unwrap_or_default();
                return outcome;
            }
        };

        status_sender
            .send(StatusMessage::Processing)
            .unwrap_or_default();
        info!("Submitting '{}' to {}", file.name, self.endpoint);

        let outcome = match self.generate(file, fields).await {
            Ok(meta) => SubmitOutcome::Success(meta),
            Err(e) => {
                error!("Generation failed ({:?}): {}", e.category(), e);
                SubmitOutcome::TransportError(e)
            }
        };

        status_sender
            .send(StatusMessage::from(&outcome))
            .unwrap_or_default();
        outcome
    }

    fn validate(&self, file: Option<SelectedFile>) -> Result<SelectedFile, ValidationError> {
        let file = file.ok_or(ValidationError::NoFileSelected)?;

        if self.variant.validates_file_type() && file.mime != PNG_MIME {
            return Err(ValidationError::InvalidFileType { mime: file.mime });
        }

        Ok(file)
    }

    async fn generate(
        &self,
        file: SelectedFile,
        fields: Vec<(String, String)>,
    ) -> Result<ArtifactMeta, SubmitError> {
        debug!(
            "POST {} ({} bytes, {}, {} extra fields)",
            self.endpoint,
            file.bytes.len(),
            file.mime,
            fields.len()
        );

        let mut form = Form::new();
        for (name, value) in fields {
            form = form.text(name, value);
        }
        let part = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str(&file.mime)?;
        form = form.part(FILE_FIELD, part);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Server { status });
        }

        let bytes = response.bytes().await?.to_vec();
        let kind = self.variant.artifact_kind();
        debug!("Received {} bytes ({}), saving as {}", bytes.len(), status, kind.mime());

        let artifact = Artifact { kind, bytes };
        Ok(self.sink.deliver(artifact)?)
    }
}
