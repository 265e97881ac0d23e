//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate snapshot serialization from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must validate input before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to
//!   storage transport errors.

pub mod word_repo;
