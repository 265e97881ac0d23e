use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use wordcard_core::{open_file_service, FileWordRepository, WordService};

use super::error::ApiError;

pub type SharedState = Arc<State>;

/// Shared handler state. The mutex serializes each read-modify-write of the
/// word file.
pub struct State {
    pub db_file: PathBuf,
    words: Mutex<WordService<FileWordRepository>>,
}

impl State {
    pub fn new(db_file: impl Into<PathBuf>) -> SharedState {
        let db_file = db_file.into();
        let words = Mutex::new(open_file_service(db_file.clone()));
        Arc::new(Self { db_file, words })
    }

    pub fn words(&self) -> Result<MutexGuard<'_, WordService<FileWordRepository>>, ApiError> {
        self.words.lock().map_err(|_| ApiError::LockPoisoned)
    }
}
