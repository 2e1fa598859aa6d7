use crate::config::Language;
use crate::upload::{ArtifactMeta, StatusMessage};
use std::sync::mpsc::{Receiver, TryRecvError};

#[derive(Default)]
pub struct SubmitState {
    pub status: StatusMessage,
    pub last_artifact: Option<ArtifactMeta>,
    pub is_submitting: bool,
    pub status_receiver: Option<Receiver<StatusMessage>>,
    pub artifact_receiver: Option<Receiver<ArtifactMeta>>,
}

impl SubmitState {
    pub fn clear(&mut self) {
        *self = SubmitState::default();
    }

    /// Resets the slot for a new submission and attaches its channels.
    pub fn begin(
        &mut self,
        status_receiver: Receiver<StatusMessage>,
        artifact_receiver: Receiver<ArtifactMeta>,
    ) {
        self.status = StatusMessage::Validating;
        self.last_artifact = None;
        self.is_submitting = true;
        self.status_receiver = Some(status_receiver);
        self.artifact_receiver = Some(artifact_receiver);
    }

    /// Overwrites the status slot. Returns true once the submission is over.
    pub fn apply(&mut self, status: StatusMessage) -> bool {
        self.status = status;
        if status.is_terminal() {
            self.is_submitting = false;
        }
        status.is_terminal()
    }

    /// Drains pending updates; returns whether anything changed.
    pub fn poll(&mut self) -> bool {
        let mut had_updates = false;

        if let Some(receiver) = &self.status_receiver {
            let mut finished = false;
            loop {
                match receiver.try_recv() {
                    Ok(status) => {
                        had_updates = true;
                        let terminal = status.is_terminal();
                        self.status = status;
                        if terminal {
                            finished = true;
                            break;
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        // Worker went away without a final word.
                        if self.is_submitting && !self.status.is_terminal() {
                            self.status = StatusMessage::Failed;
                            had_updates = true;
                        }
                        finished = true;
                        break;
                    }
                }
            }
            if finished {
                self.is_submitting = false;
                self.status_receiver = None;
            }
        }

        if let Some(receiver) = &self.artifact_receiver {
            match receiver.try_recv() {
                Ok(meta) => {
                    self.last_artifact = Some(meta);
                    self.artifact_receiver = None;
                    had_updates = true;
                }
                Err(TryRecvError::Disconnected) => self.artifact_receiver = None,
                Err(TryRecvError::Empty) => {}
            }
        }

        had_updates
    }

    pub fn status_text(&self, language: Language) -> &'static str {
        self.status.text(language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::ArtifactKind;
    use std::path::PathBuf;
    use std::sync::mpsc;

    #[test]
    fn test_poll_applies_last_status() {
        let mut state = SubmitState::default();
        let (status_sender, status_receiver) = mpsc::channel();
        let (artifact_sender, artifact_receiver) = mpsc::channel();
        state.begin(status_receiver, artifact_receiver);

        status_sender.send(StatusMessage::Processing).unwrap();
        assert!(state.poll());
        assert_eq!(state.status, StatusMessage::Processing);
        assert!(state.is_submitting);

        status_sender
            .send(StatusMessage::Success(ArtifactKind::Png))
            .unwrap();
        artifact_sender
            .send(ArtifactMeta {
                kind: ArtifactKind::Png,
                file_name: "mosaic.png".to_string(),
                size: 10,
                path: PathBuf::from("mosaic.png"),
            })
            .unwrap();
        assert!(state.poll());
        assert!(!state.is_submitting);
        assert_eq!(
            state.status_text(Language::En),
            "Done! PNG file downloaded."
        );
        assert_eq!(
            state.last_artifact.as_ref().map(|m| m.size),
            Some(10)
        );
        assert!(state.status_receiver.is_none());
    }

    #[test]
    fn test_dropped_worker_marks_failure() {
        let mut state = SubmitState::default();
        let (status_sender, status_receiver) = mpsc::channel();
        let (_artifact_sender, artifact_receiver) = mpsc::channel();
        state.begin(status_receiver, artifact_receiver);

        status_sender.send(StatusMessage::Processing).unwrap();
        drop(status_sender);

        assert!(state.poll());
        assert_eq!(state.status, StatusMessage::Failed);
        assert!(!state.is_submitting);
    }

    #[test]
    fn test_apply_overwrites_slot() {
        let mut state = SubmitState::default();
        assert!(!state.apply(StatusMessage::Processing));
        assert!(state.apply(StatusMessage::NoFileSelected));
        assert_eq!(state.status_text(Language::Ru), "Файл не выбран.");
    }
}
