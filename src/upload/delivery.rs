use super::types::{Artifact, ArtifactMeta};
use log::info;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

/// Where a generated artifact ends up once the response body is read.
pub trait ArtifactSink: Send + Sync {
    fn deliver(&self, artifact: Artifact) -> io::Result<ArtifactMeta>;
}

/// Saves artifacts under their fixed file name in one directory,
/// replacing the previous artifact of the same kind.
#[derive(Debug, Clone)]
pub struct FileSink {
    output_dir: PathBuf,
}

impl FileSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl ArtifactSink for FileSink {
    fn deliver(&self, artifact: Artifact) -> io::Result<ArtifactMeta> {
        fs::create_dir_all(&self.output_dir)?;
        let file_name = artifact.kind.file_name();
        let target = self.output_dir.join(file_name);

        // Staged next to the target so the final rename stays on one filesystem.
        // Dropping the handle on any error removes the staged file.
        let mut staged = tempfile::Builder::new()
            .prefix(".mosaic-")
            .suffix(".part")
            .tempfile_in(&self.output_dir)?;
        staged.write_all(&artifact.bytes)?;
        staged.flush()?;
        staged.persist(&target).map_err(|e| e.error)?;

        info!(
            "Saved {} ({} bytes) to {}",
            file_name,
            artifact.bytes.len(),
            target.display()
        );

        Ok(ArtifactMeta {
            kind: artifact.kind,
            file_name: file_name.to_string(),
            size: artifact.bytes.len() as u64,
            path: target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::types::ArtifactKind;
    use tempfile::TempDir;

    fn dir_entries(dir: &std::path::Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_deliver_writes_fixed_name() {
        let dir = TempDir::new().unwrap();
        let sink = FileSink::new(dir.path());

        let meta = sink
            .deliver(Artifact {
                kind: ArtifactKind::Pdf,
                bytes: b"%PDF-1.3".to_vec(),
            })
            .unwrap();

        assert_eq!(meta.file_name, "mosaic.pdf");
        assert_eq!(meta.size, 8);
        assert_eq!(fs::read(&meta.path).unwrap(), b"%PDF-1.3");
        assert_eq!(dir_entries(dir.path()), vec!["mosaic.pdf"]);
    }

    #[test]
    fn test_deliver_replaces_previous_artifact() {
        let dir = TempDir::new().unwrap();
        let sink = FileSink::new(dir.path());

        for body in [b"first".to_vec(), b"second".to_vec()] {
            sink.deliver(Artifact {
                kind: ArtifactKind::Png,
                bytes: body,
            })
            .unwrap();
        }

        assert_eq!(dir_entries(dir.path()), vec!["mosaic.png"]);
        assert_eq!(fs::read(dir.path().join("mosaic.png")).unwrap(), b"second");
    }

    #[test]
    fn test_deliver_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("out").join("mosaics");
        let sink = FileSink::new(&nested);

        let meta = sink
            .deliver(Artifact {
                kind: ArtifactKind::Png,
                bytes: vec![0x89, b'P', b'N', b'G'],
            })
            .unwrap();

        assert_eq!(meta.path, nested.join("mosaic.png"));
    }

    #[test]
    fn test_failed_persist_leaves_no_staged_file() {
        let dir = TempDir::new().unwrap();
        // The target name is taken by a non-empty directory, so the rename fails.
        fs::create_dir(dir.path().join("mosaic.png")).unwrap();
        fs::write(dir.path().join("mosaic.png").join("keep"), b"x").unwrap();
        let sink = FileSink::new(dir.path());

        let result = sink.deliver(Artifact {
            kind: ArtifactKind::Png,
            bytes: b"mosaic".to_vec(),
        });

        assert!(result.is_err());
        assert_eq!(dir_entries(dir.path()), vec!["mosaic.png"]);
        assert!(dir.path().join("mosaic.png").is_dir());
    }
}
