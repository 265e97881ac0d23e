//! Word repository contracts and JSON snapshot implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical word collection.
//! - Keep serialization details inside the core persistence boundary.
//!
//! # Invariants
//! - Every mutation is a read-modify-rewrite of the whole collection.
//! - `create_word` is the only place `id` and `date` are assigned.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::model::word::{
    today_word_date, NewWord, WordId, WordPatch, WordRecord, WordValidationError,
};
use crate::storage::{SnapshotStore, StorageError};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for word persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(WordValidationError),
    Storage(StorageError),
    NotFound(WordId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "word not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted word data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<WordValidationError> for RepoError {
    fn from(value: WordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Repository interface for word CRUD operations.
pub trait WordRepository {
    /// Returns all words in insertion order.
    fn list_words(&self) -> RepoResult<Vec<WordRecord>>;
    fn get_word(&self, id: WordId) -> RepoResult<Option<WordRecord>>;
    /// Persists a new word, assigning `id` and `date`.
    fn create_word(&self, word: NewWord) -> RepoResult<WordRecord>;
    /// Replaces supplied fields; `id` and `date` are never touched.
    fn update_word(&self, id: WordId, patch: &WordPatch) -> RepoResult<WordRecord>;
    fn delete_word(&self, id: WordId) -> RepoResult<()>;
}

/// Word repository over one JSON array snapshot.
///
/// Used with [`crate::storage::FileSnapshot`] by the server and with
/// [`crate::storage::KeyValueSnapshot`] for local storage, so both layouts
/// are byte-compatible.
#[derive(Debug)]
pub struct JsonWordRepository<S: SnapshotStore> {
    snapshot: S,
}

impl<S: SnapshotStore> JsonWordRepository<S> {
    pub fn new(snapshot: S) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &S {
        &self.snapshot
    }

    fn load(&self) -> RepoResult<Vec<WordRecord>> {
        match self.snapshot.read()? {
            Some(contents) if !contents.trim().is_empty() => decode_words(&contents),
            _ => Ok(Vec::new()),
        }
    }

    fn save(&self, words: &[WordRecord]) -> RepoResult<()> {
        let contents = serde_json::to_string_pretty(words).map_err(StorageError::from)?;
        self.snapshot.write(&contents)?;
        Ok(())
    }
}

impl<S: SnapshotStore> WordRepository for JsonWordRepository<S> {
    fn list_words(&self) -> RepoResult<Vec<WordRecord>> {
        self.load()
    }

    fn get_word(&self, id: WordId) -> RepoResult<Option<WordRecord>> {
        Ok(self.load()?.into_iter().find(|word| word.id == id))
    }

    fn create_word(&self, word: NewWord) -> RepoResult<WordRecord> {
        let mut words = self.load()?;
        let id = next_word_id(&words, epoch_millis());
        let record = WordRecord::from_new(id, today_word_date(), word);
        words.push(record.clone());
        self.save(&words)?;
        Ok(record)
    }

    fn update_word(&self, id: WordId, patch: &WordPatch) -> RepoResult<WordRecord> {
        let mut words = self.load()?;
        let record = words
            .iter_mut()
            .find(|word| word.id == id)
            .ok_or(RepoError::NotFound(id))?;
        patch.apply(record)?;
        let updated = record.clone();
        self.save(&words)?;
        Ok(updated)
    }

    fn delete_word(&self, id: WordId) -> RepoResult<()> {
        let mut words = self.load()?;
        let before = words.len();
        words.retain(|word| word.id != id);
        if words.len() == before {
            return Err(RepoError::NotFound(id));
        }
        self.save(&words)
    }
}

/// Decodes a stored collection, rejecting duplicate ids.
pub fn decode_words(contents: &str) -> RepoResult<Vec<WordRecord>> {
    let words: Vec<WordRecord> = serde_json::from_str(contents)
        .map_err(|err| RepoError::InvalidData(format!("expected an array of words: {err}")))?;

    let mut seen = HashSet::with_capacity(words.len());
    for word in &words {
        if !seen.insert(word.id) {
            return Err(RepoError::InvalidData(format!("duplicate word id `{}`", word.id)));
        }
    }

    Ok(words)
}

/// Picks the id for a new word.
///
/// Uses the creation time in epoch milliseconds, bumped past the largest
/// existing id when two creates land in the same millisecond.
pub fn next_word_id(existing: &[WordRecord], now_millis: u64) -> WordId {
    let floor = existing
        .iter()
        .map(|word| word.id.as_u64().saturating_add(1))
        .max()
        .unwrap_or(0);
    WordId(now_millis.max(floor))
}

fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
