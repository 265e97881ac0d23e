//! In-memory word cache for one session.
//!
//! # Responsibility
//! - Hold the authoritative word list for the active session.
//! - Keep it consistent with the backend by reloading after every mutation.
//! - Degrade to a local snapshot, then to built-in samples, when loading fails.
//!
//! # Invariants
//! - Input is validated before any backend call.
//! - A failed call leaves the in-memory list exactly as it was.
//! - `load_all` never leaves the list empty because of a failure.

use crate::model::word::{
    WordDraft, WordId, WordPatch, WordRecord, WordType, WordValidationError,
};
use crate::repo::word_repo::decode_words;
use crate::storage::{KeyValueStore, LOCAL_WORDS_KEY};
use crate::store::backend::{BackendError, WordBackend};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error returned by Word Store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Missing or blank required field; raised before any backend call.
    Validation(WordValidationError),
    /// Operation targets a nonexistent id.
    NotFound(WordId),
    /// Backend could not be reached or refused the request.
    Transport(BackendError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "word not found: {id}"),
            Self::Transport(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Transport(err) => Some(err),
        }
    }
}

impl From<WordValidationError> for StoreError {
    fn from(value: WordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<BackendError> for StoreError {
    fn from(value: BackendError) -> Self {
        match value {
            BackendError::NotFound(id) => Self::NotFound(id),
            other => Self::Transport(other),
        }
    }
}

/// Where the current in-memory list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Nothing loaded yet.
    Empty,
    Backend,
    /// Last snapshot saved in local storage.
    Snapshot,
    /// Built-in sample words.
    Samples,
}

/// Session cache over a [`WordBackend`].
pub struct WordStore<B: WordBackend> {
    backend: B,
    fallback: Option<Box<dyn KeyValueStore>>,
    words: Vec<WordRecord>,
    source: LoadSource,
}

impl<B: WordBackend> WordStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            fallback: None,
            words: Vec::new(),
            source: LoadSource::Empty,
        }
    }

    /// Uses `store` to keep the last good list for offline fallback.
    pub fn with_fallback(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.fallback = Some(Box::new(store));
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current in-memory list, in backend order.
    pub fn words(&self) -> &[WordRecord] {
        &self.words
    }

    pub fn load_source(&self) -> LoadSource {
        self.source
    }

    /// Looks up a cached word without calling the backend.
    pub fn get(&self, id: WordId) -> Option<&WordRecord> {
        self.words.iter().find(|word| word.id == id)
    }

    /// Replaces the in-memory list with the backend's full collection.
    ///
    /// On failure falls back to the local snapshot, then to sample words.
    pub fn load_all(&mut self) -> &[WordRecord] {
        match self.backend.fetch_all() {
            Ok(words) => self.accept(words),
            Err(err) => {
                warn!("event=store_load module=store status=error error={err}");
                let (words, source) = match self.read_snapshot() {
                    Some(words) => (words, LoadSource::Snapshot),
                    None => (sample_words(), LoadSource::Samples),
                };
                info!(
                    "event=store_load module=store status=fallback source={:?} count={}",
                    source,
                    words.len()
                );
                self.words = words;
                self.source = source;
            }
        }
        &self.words
    }

    /// Fetches one word from the backend, e.g. to prefill an edit form.
    pub fn fetch(&self, id: WordId) -> StoreResult<WordRecord> {
        Ok(self.backend.fetch_one(id)?)
    }

    /// Validates and creates a word, then reloads the list.
    pub fn create(&mut self, draft: &WordDraft) -> StoreResult<WordRecord> {
        let word = draft.validate()?;
        let created = self.backend.create(&WordDraft::from(word))?;
        self.refresh();
        Ok(created)
    }

    /// Replaces supplied fields of `id`, then reloads the list.
    pub fn update(&mut self, id: WordId, patch: &WordPatch) -> StoreResult<WordRecord> {
        let patch = patch.validate()?;
        let updated = self.backend.update(id, &patch)?;
        self.refresh();
        Ok(updated)
    }

    /// Deletes `id`, then reloads the list.
    pub fn remove(&mut self, id: WordId) -> StoreResult<()> {
        self.backend.remove(id)?;
        self.refresh();
        Ok(())
    }

    fn refresh(&mut self) {
        match self.backend.fetch_all() {
            Ok(words) => self.accept(words),
            Err(err) => {
                warn!("event=store_refresh module=store status=error error={err}");
            }
        }
    }

    fn accept(&mut self, words: Vec<WordRecord>) {
        info!(
            "event=store_load module=store status=ok source=backend count={}",
            words.len()
        );
        self.write_snapshot(&words);
        self.words = words;
        self.source = LoadSource::Backend;
    }

    fn read_snapshot(&self) -> Option<Vec<WordRecord>> {
        let store = self.fallback.as_ref()?;
        let contents = match store.get_item(LOCAL_WORDS_KEY) {
            Ok(contents) => contents?,
            Err(err) => {
                warn!("event=snapshot_load module=store status=error error={err}");
                return None;
            }
        };
        match decode_words(&contents) {
            Ok(words) if !words.is_empty() => Some(words),
            Ok(_) => None,
            Err(err) => {
                warn!("event=snapshot_load module=store status=error error={err}");
                None
            }
        }
    }

    fn write_snapshot(&self, words: &[WordRecord]) {
        let Some(store) = self.fallback.as_ref() else {
            return;
        };
        let result = serde_json::to_string(words)
            .map_err(|err| err.to_string())
            .and_then(|contents| {
                store
                    .set_item(LOCAL_WORDS_KEY, &contents)
                    .map_err(|err| err.to_string())
            });
        if let Err(err) = result {
            warn!("event=snapshot_save module=store status=error error={err}");
        }
    }
}

/// Built-in words shown when neither the backend nor a snapshot is available.
pub fn sample_words() -> Vec<WordRecord> {
    vec![
        WordRecord {
            id: WordId(1),
            text: "Ephemeral".to_string(),
            definition: "Lasting for a very short time.".to_string(),
            example: "The beauty of the cherry blossoms is ephemeral.".to_string(),
            word_type: WordType::Adjective,
            date: "15 Jul 2023".to_string(),
        },
        WordRecord {
            id: WordId(2),
            text: "Ubiquitous".to_string(),
            definition: "Present, appearing, or found everywhere.".to_string(),
            example: "Mobile phones are now ubiquitous.".to_string(),
            word_type: WordType::Adjective,
            date: "16 Jul 2023".to_string(),
        },
    ]
}
