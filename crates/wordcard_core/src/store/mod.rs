//! Client-side Word Store.
//!
//! # Responsibility
//! - Cache the full word list for one session.
//! - Synchronize with a persistence backend (REST API or local storage).
//!
//! # Invariants
//! - Every successful mutation is followed by a full reload; there is no
//!   local merge logic.

pub mod backend;
pub mod word_store;
