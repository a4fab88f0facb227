//! Legacy flat-file persistence.
//!
//! Two whole JSON documents (`forms.json`, `settings.json`) in one directory.
//! Reads return the full document; writes replace it. A write lands in a
//! temporary sibling file first and is renamed over the target, so readers
//! see either the previous document or the new one, never a partial file.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_json::Value;

/// The documents the legacy store knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyDocument {
    Forms,
    Settings,
}

impl LegacyDocument {
    pub fn name(self) -> &'static str {
        match self {
            LegacyDocument::Forms => "forms",
            LegacyDocument::Settings => "settings",
        }
    }

    fn file_name(self) -> String {
        format!("{}.json", self.name())
    }
}

impl FromStr for LegacyDocument {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forms" => Ok(LegacyDocument::Forms),
            "settings" => Ok(LegacyDocument::Settings),
            _ => Err(()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LegacyStoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Whole-document JSON store rooted at a directory.
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    dir: PathBuf,
}

impl JsonDocumentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, doc: LegacyDocument) -> PathBuf {
        self.dir.join(doc.file_name())
    }

    /// Read a whole document. A missing or blank file reads as `{}`.
    pub async fn read(&self, doc: LegacyDocument) -> Result<Value, LegacyStoreError> {
        let path = self.path_of(doc);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(empty_document()),
            Err(source) => return Err(LegacyStoreError::Io { path, source }),
        };

        if content.trim().is_empty() {
            return Ok(empty_document());
        }

        serde_json::from_str(&content).map_err(|source| LegacyStoreError::Json { path, source })
    }

    /// Replace a whole document with `value`, all or nothing.
    pub async fn write(
        &self,
        doc: LegacyDocument,
        value: &Value,
    ) -> Result<(), LegacyStoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| LegacyStoreError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.path_of(doc);
        let body = serde_json::to_string_pretty(value).map_err(|source| LegacyStoreError::Json {
            path: path.clone(),
            source,
        })?;

        let tmp = self
            .dir
            .join(format!(".{}.{}.tmp", doc.file_name(), uuid::Uuid::new_v4()));

        if let Err(source) = tokio::fs::write(&tmp, body).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(LegacyStoreError::Io { path: tmp, source });
        }

        if let Err(source) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(LegacyStoreError::Io { path, source });
        }

        tracing::debug!(document = doc.name(), path = %path.display(), "Legacy document saved");
        Ok(())
    }
}

fn empty_document() -> Value {
    Value::Object(serde_json::Map::new())
}
