//! Persistence backend contract used by the Word Store.
//!
//! # Responsibility
//! - Abstract over the REST API and local storage behind one CRUD trait.
//! - Translate repository errors into backend error kinds.
//!
//! # Invariants
//! - Backends assign `id` and `date` on create; callers never do.
//! - An unknown id is always reported as `BackendError::NotFound`.

use crate::model::word::{WordDraft, WordId, WordPatch, WordRecord};
use crate::repo::word_repo::{RepoError, WordRepository};
use crate::service::word_service::WordService;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BackendResult<T> = Result<T, BackendError>;

/// Failure reported by a persistence backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Target id does not exist.
    NotFound(WordId),
    /// Backend refused the request (e.g. HTTP 400).
    Rejected {
        status: Option<u16>,
        message: String,
    },
    /// Network or storage failure.
    Transport(String),
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "word not found: {id}"),
            Self::Rejected {
                status: Some(status),
                message,
            } => write!(f, "request rejected with status {status}: {message}"),
            Self::Rejected {
                status: None,
                message,
            } => write!(f, "request rejected: {message}"),
            Self::Transport(message) => write!(f, "transport failure: {message}"),
        }
    }
}

impl Error for BackendError {}

/// Durable storage behind a Word Store session.
pub trait WordBackend {
    fn fetch_all(&self) -> BackendResult<Vec<WordRecord>>;
    fn fetch_one(&self, id: WordId) -> BackendResult<WordRecord>;
    fn create(&self, draft: &WordDraft) -> BackendResult<WordRecord>;
    fn update(&self, id: WordId, patch: &WordPatch) -> BackendResult<WordRecord>;
    fn remove(&self, id: WordId) -> BackendResult<()>;
}

impl<R: WordRepository> WordBackend for WordService<R> {
    fn fetch_all(&self) -> BackendResult<Vec<WordRecord>> {
        self.list_words().map_err(BackendError::from)
    }

    fn fetch_one(&self, id: WordId) -> BackendResult<WordRecord> {
        self.get_word(id)?.ok_or(BackendError::NotFound(id))
    }

    fn create(&self, draft: &WordDraft) -> BackendResult<WordRecord> {
        self.create_word(draft).map_err(BackendError::from)
    }

    fn update(&self, id: WordId, patch: &WordPatch) -> BackendResult<WordRecord> {
        self.update_word(id, patch).map_err(BackendError::from)
    }

    fn remove(&self, id: WordId) -> BackendResult<()> {
        self.delete_word(id).map_err(BackendError::from)
    }
}

impl From<RepoError> for BackendError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Rejected {
                status: None,
                message: err.to_string(),
            },
            other => Self::Transport(other.to_string()),
        }
    }
}
