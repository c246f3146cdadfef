use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use verifix_core::{Artifact, ArtifactId};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("artifact unreadable: {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

/// Where artifact text comes from. Implementations resolve a suite-relative
/// path to content; every failure mode surfaces as a `SourceError` so the
/// evaluator can turn it into a failed check instead of aborting the run.
pub trait ArtifactSource: Send + Sync {
    fn load(&self, id: &ArtifactId, path: &Path) -> Result<Artifact, SourceError>;
}

/// Reads artifacts from disk under a fixed root.
#[derive(Clone)]
pub struct FsSource {
    pub root: PathBuf,
}

impl FsSource {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl ArtifactSource for FsSource {
    fn load(&self, id: &ArtifactId, path: &Path) -> Result<Artifact, SourceError> {
        let full = self.root.join(path);
        match std::fs::read_to_string(&full) {
            Ok(text) => Ok(Artifact::new(id.clone(), text)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(full.display().to_string()))
            }
            Err(err) => Err(SourceError::Unreadable {
                path: full.display().to_string(),
                reason: err.to_string(),
            }),
        }
    }
}

/// In-memory source keyed by path, for tests and embedding.
#[derive(Clone, Default)]
pub struct MemSource {
    files: BTreeMap<String, String>,
}

impl MemSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }
}

impl ArtifactSource for MemSource {
    fn load(&self, id: &ArtifactId, path: &Path) -> Result<Artifact, SourceError> {
        let key = path.to_string_lossy();
        match self.files.get(key.as_ref()) {
            Some(text) => Ok(Artifact::new(id.clone(), text.clone())),
            None => Err(SourceError::NotFound(key.into_owned())),
        }
    }
}
