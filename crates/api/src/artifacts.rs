//! Generated page storage on the local filesystem.

use std::path::{Path, PathBuf};

use formbridge_core::naming::is_artifact_filename;

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Invalid artifact file name: {0}")]
    InvalidName(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Flat directory of generated registration pages.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write (or overwrite) `filename`, creating the directory if needed.
    pub async fn write(&self, filename: &str, html: &str) -> Result<PathBuf, ArtifactError> {
        let path = self.path_of(filename)?;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ArtifactError::Io {
                path: self.dir.clone(),
                source,
            })?;
        tokio::fs::write(&path, html)
            .await
            .map_err(|source| ArtifactError::Io {
                path: path.clone(),
                source,
            })?;
        tracing::info!(filename, path = %path.display(), "Artifact written");
        Ok(path)
    }

    /// Read `filename`. Returns `Ok(None)` if it does not exist.
    pub async fn read(&self, filename: &str) -> Result<Option<String>, ArtifactError> {
        let path = self.path_of(filename)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ArtifactError::Io { path, source }),
        }
    }

    fn path_of(&self, filename: &str) -> Result<PathBuf, ArtifactError> {
        if !is_artifact_filename(filename) {
            return Err(ArtifactError::InvalidName(filename.to_string()));
        }
        Ok(self.dir.join(filename))
    }
}
