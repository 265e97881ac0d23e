//! Single-file snapshot storage.
//!
//! # Responsibility
//! - Back the server's word collection with one JSON file.
//! - Create the file holding an empty array on first read.
//!
//! # Invariants
//! - Every write replaces the whole file.
//! - Emits `snapshot_read` / `snapshot_write` events with duration and status.

use super::{SnapshotStore, StorageError, StorageResult};
use log::{debug, error, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

const EMPTY_COLLECTION: &str = "[]";

/// JSON file holding the full word collection.
#[derive(Debug, Clone)]
pub struct FileSnapshot {
    path: PathBuf,
}

impl FileSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn create_empty(&self) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }
        fs::write(&self.path, EMPTY_COLLECTION).map_err(|err| self.io_error(err))?;
        info!(
            "event=snapshot_create module=storage status=ok path={}",
            self.path.display()
        );
        Ok(())
    }
}

impl SnapshotStore for FileSnapshot {
    fn read(&self) -> StorageResult<Option<String>> {
        let started_at = Instant::now();
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                debug!(
                    "event=snapshot_read module=storage status=ok bytes={} duration_ms={}",
                    contents.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(Some(contents))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                self.create_empty()?;
                Ok(Some(EMPTY_COLLECTION.to_string()))
            }
            Err(err) => {
                error!(
                    "event=snapshot_read module=storage status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(self.io_error(err))
            }
        }
    }

    fn write(&self, contents: &str) -> StorageResult<()> {
        let started_at = Instant::now();
        match fs::write(&self.path, contents) {
            Ok(()) => {
                debug!(
                    "event=snapshot_write module=storage status=ok bytes={} duration_ms={}",
                    contents.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=snapshot_write module=storage status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(self.io_error(err))
            }
        }
    }
}
