//! Word use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for the server and local-storage
//!   sessions.
//! - Validate user input before it reaches a repository.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.
//! - Log events carry ids and counts only, never word text.

use crate::model::word::{WordDraft, WordId, WordPatch, WordRecord};
use crate::repo::word_repo::{RepoError, RepoResult, WordRepository};
use log::{info, warn};

/// Use-case service wrapper for word CRUD operations.
pub struct WordService<R: WordRepository> {
    repo: R,
}

impl<R: WordRepository> WordService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Lists all words in insertion order.
    pub fn list_words(&self) -> RepoResult<Vec<WordRecord>> {
        self.repo.list_words()
    }

    /// Gets one word by id.
    pub fn get_word(&self, id: WordId) -> RepoResult<Option<WordRecord>> {
        self.repo.get_word(id)
    }

    /// Validates and persists a new word.
    ///
    /// # Contract
    /// - All four fields must be non-empty after trim and `type` must be known.
    /// - Returns the stored record with backend-assigned `id` and `date`.
    pub fn create_word(&self, draft: &WordDraft) -> RepoResult<WordRecord> {
        let word = draft.validate().inspect_err(|err| {
            warn!("event=word_create module=service status=rejected reason={err}");
        })?;
        let created = self.repo.create_word(word)?;
        info!(
            "event=word_create module=service status=ok id={}",
            created.id
        );
        Ok(created)
    }

    /// Replaces supplied fields of an existing word.
    ///
    /// Returns repository-level not-found errors unchanged.
    pub fn update_word(&self, id: WordId, patch: &WordPatch) -> RepoResult<WordRecord> {
        let patch = patch.validate().inspect_err(|err| {
            warn!("event=word_update module=service status=rejected id={id} reason={err}");
        })?;
        let updated = self.repo.update_word(id, &patch).inspect_err(|err| {
            if matches!(err, RepoError::NotFound(_)) {
                info!("event=word_update module=service status=not_found id={id}");
            }
        })?;
        info!("event=word_update module=service status=ok id={id}");
        Ok(updated)
    }

    /// Hard-deletes a word by id.
    pub fn delete_word(&self, id: WordId) -> RepoResult<()> {
        self.repo.delete_word(id).inspect_err(|err| {
            if matches!(err, RepoError::NotFound(_)) {
                info!("event=word_delete module=service status=not_found id={id}");
            }
        })?;
        info!("event=word_delete module=service status=ok id={id}");
        Ok(())
    }
}
