//! Filter, sort and pagination primitives.
//!
//! # Invariants
//! - Every function here is pure; records are borrowed, never mutated.
//! - Page numbers are 1-based; page 0 and pages past the end are empty.

use crate::model::word::WordRecord;
use std::cmp::Ordering;
use std::str::FromStr;

/// Records shown per page.
pub const PAGE_SIZE: usize = 6;

/// Display order of the filtered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Keep backend (insertion) order.
    #[default]
    Insertion,
    /// Ascending by `text`, ignoring case.
    Alphabetical,
    /// Newest `date` first.
    Date,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insertion => "",
            Self::Alphabetical => "alphabetical",
            Self::Date => "date",
        }
    }
}

impl FromStr for SortMode {
    type Err = std::convert::Infallible;

    /// Any value other than `alphabetical` or `date` keeps insertion order.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value.trim().to_ascii_lowercase().as_str() {
            "alphabetical" => Self::Alphabetical,
            "date" => Self::Date,
            _ => Self::Insertion,
        })
    }
}

/// Keeps words whose `text` or `definition` contains `search`, ignoring case.
///
/// An empty search returns every word.
pub fn filter_words<'a>(words: &'a [WordRecord], search: &str) -> Vec<&'a WordRecord> {
    let needle = search.to_lowercase();
    if needle.is_empty() {
        return words.iter().collect();
    }
    words
        .iter()
        .filter(|word| {
            word.text.to_lowercase().contains(&needle)
                || word.definition.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Sorts in place. Stable, so equal keys keep their filtered order.
pub fn sort_words(words: &mut [&WordRecord], mode: SortMode) {
    match mode {
        SortMode::Insertion => {}
        SortMode::Alphabetical => words.sort_by(|a, b| compare_text(a, b)),
        SortMode::Date => words.sort_by(|a, b| compare_date_desc(a, b)),
    }
}

fn compare_text(a: &WordRecord, b: &WordRecord) -> Ordering {
    a.text
        .to_lowercase()
        .cmp(&b.text.to_lowercase())
        .then_with(|| a.text.cmp(&b.text))
}

// Undated records sort after every dated one.
fn compare_date_desc(a: &WordRecord, b: &WordRecord) -> Ordering {
    match (a.parsed_date(), b.parsed_date()) {
        (Some(left), Some(right)) => right.cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Returns the slice for 1-based `page`.
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// `ceil(total / page_size)`.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
