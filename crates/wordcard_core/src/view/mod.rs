//! Query/View Engine.
//!
//! # Responsibility
//! - Derive the displayed subset of words from the full list: filter, sort,
//!   then paginate.
//! - Hold the user's search/sort/page selection as an explicit session value.
//!
//! # Invariants
//! - Stateless over the Word Store snapshot; never mutates records.
//! - Changing the search text resets the page to 1; changing sort does not.

pub mod query;
pub mod session;
