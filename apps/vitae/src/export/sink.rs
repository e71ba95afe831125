//! Artifact sinks: where a finished export goes.
//!
//! `AppState` holds an `Arc<dyn ArtifactSink>`; the default writes into the export
//! directory. The filesystem sink writes to a temporary file in the target directory
//! and renames it into place only once every byte is written, so an interrupted
//! export never leaves a partial file behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// A rendered export ready to be saved.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Bytes,
}

/// Receipt for a saved artifact.
#[derive(Debug, Clone, Serialize)]
pub struct SavedArtifact {
    pub id: Uuid,
    pub filename: String,
    /// Where the sink put it (a path for the filesystem sink).
    pub location: String,
    pub size_bytes: usize,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("invalid artifact filename: {0:?}")]
    InvalidFilename(String),

    #[error("could not write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("sink worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Carried in `AppState` as `Arc<dyn ArtifactSink>`.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn save(&self, artifact: &Artifact) -> Result<SavedArtifact, SinkError>;
}

/// Filenames come from user input (the person's name); keep them inside the sink.
fn check_filename(filename: &str) -> Result<(), SinkError> {
    let bad = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\', '\0']);
    if bad {
        Err(SinkError::InvalidFilename(filename.to_string()))
    } else {
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Filesystem sink
// ────────────────────────────────────────────────────────────────────────────

pub struct FsSink {
    dir: PathBuf,
}

impl FsSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FsSink { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SinkError + '_ {
    move |source| SinkError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Blocking write-then-rename. The temp file is removed on drop if anything fails.
fn write_atomically(dir: &Path, filename: &str, body: &[u8]) -> Result<PathBuf, SinkError> {
    std::fs::create_dir_all(dir).map_err(io_error(dir))?;
    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_error(dir))?;
    tmp.write_all(body).map_err(io_error(&target))?;
    tmp.as_file().sync_all().map_err(io_error(&target))?;
    tmp.persist(&target)
        .map_err(|err| io_error(&target)(err.error))?;
    Ok(target)
}

#[async_trait]
impl ArtifactSink for FsSink {
    async fn save(&self, artifact: &Artifact) -> Result<SavedArtifact, SinkError> {
        check_filename(&artifact.filename)?;
        let dir = self.dir.clone();
        let filename = artifact.filename.clone();
        let body = artifact.body.clone();

        let path = tokio::task::spawn_blocking(move || write_atomically(&dir, &filename, &body))
            .await??;

        let saved = SavedArtifact {
            id: Uuid::new_v4(),
            filename: artifact.filename.clone(),
            location: path.display().to_string(),
            size_bytes: artifact.body.len(),
            saved_at: Utc::now(),
        };
        info!(
            id = %saved.id,
            location = %saved.location,
            bytes = saved.size_bytes,
            "Artifact saved"
        );
        Ok(saved)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory sink (tests)
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[derive(Default)]
pub struct MemorySink {
    pub saved: std::sync::Mutex<Vec<Artifact>>,
}

#[cfg(test)]
#[async_trait]
impl ArtifactSink for MemorySink {
    async fn save(&self, artifact: &Artifact) -> Result<SavedArtifact, SinkError> {
        check_filename(&artifact.filename)?;
        self.saved.lock().unwrap().push(artifact.clone());
        Ok(SavedArtifact {
            id: Uuid::new_v4(),
            filename: artifact.filename.clone(),
            location: format!("memory://{}", artifact.filename),
            size_bytes: artifact.body.len(),
            saved_at: Utc::now(),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
