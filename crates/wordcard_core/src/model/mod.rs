//! Vocabulary domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one record shape for file storage, local storage and HTTP bodies.
//!
//! # Invariants
//! - Every record is identified by a stable `WordId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod word;
