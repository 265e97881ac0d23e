//! Core domain logic for Wordcard.
//! This crate is the single source of truth for word-list invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod store;
pub mod view;

pub use logging::{
    default_log_level, init_logging, init_logging_to, init_stderr_logging, logging_status,
    LogTarget,
};
pub use model::word::{
    format_word_date, is_word_date, parse_word_date, today_word_date, NewWord, WordDraft,
    WordField, WordId, WordPatch, WordRecord, WordType, WordValidationError, WORD_DATE_FORMAT,
};
pub use repo::word_repo::{JsonWordRepository, RepoError, RepoResult, WordRepository};
pub use service::word_service::WordService;
pub use storage::{
    DirKeyValueStore, FileSnapshot, KeyValueSnapshot, KeyValueStore, MemoryKeyValueStore,
    SnapshotStore, StorageError, StorageResult, LOCAL_WORDS_KEY,
};
pub use store::backend::{BackendError, BackendResult, WordBackend};
pub use store::word_store::{sample_words, LoadSource, StoreError, StoreResult, WordStore};
pub use view::query::{filter_words, page_count, paginate, sort_words, SortMode, PAGE_SIZE};
pub use view::session::{ViewSession, WordPage};

/// File-backed repository used by the REST server.
pub type FileWordRepository = JsonWordRepository<FileSnapshot>;

/// Local-storage repository over any key-value store.
pub type LocalWordRepository<K> = JsonWordRepository<KeyValueSnapshot<K>>;

/// Opens the file-backed word service for `path`.
pub fn open_file_service(path: impl Into<std::path::PathBuf>) -> WordService<FileWordRepository> {
    WordService::new(JsonWordRepository::new(FileSnapshot::new(path)))
}

/// Opens a local-storage word service over `store`.
pub fn open_local_service<K: KeyValueStore>(store: K) -> WordService<LocalWordRepository<K>> {
    WordService::new(JsonWordRepository::new(KeyValueSnapshot::words(store)))
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
