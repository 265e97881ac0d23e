//! Explicit view state for one UI session.

use crate::model::word::WordRecord;
use crate::view::query::{filter_words, page_count, paginate, sort_words, SortMode, PAGE_SIZE};

/// Search text, sort mode and page number currently selected by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSession {
    search: String,
    sort: SortMode,
    page: usize,
    page_size: usize,
}

impl Default for ViewSession {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortMode::default(),
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

/// One rendered page of the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPage {
    pub items: Vec<WordRecord>,
    /// 1-based page that was requested.
    pub page: usize,
    /// Number of records after filtering.
    pub total: usize,
    pub page_count: usize,
    /// Pagination controls are omitted when everything fits on one page.
    pub show_pagination: bool,
}

impl WordPage {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ViewSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Changes the search text and returns to the first page.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Changes the sort mode. The current page is kept.
    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Computes the visible page from the full word list.
    pub fn view(&self, words: &[WordRecord]) -> WordPage {
        let mut matched = filter_words(words, &self.search);
        sort_words(&mut matched, self.sort);

        let total = matched.len();
        let items = paginate(&matched, self.page_size, self.page)
            .iter()
            .map(|word| (*word).clone())
            .collect();

        WordPage {
            items,
            page: self.page,
            total,
            page_count: page_count(total, self.page_size),
            show_pagination: total > self.page_size,
        }
    }
}
