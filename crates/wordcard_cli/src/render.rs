//! Plain-text rendering of word cards and pages.

use std::fmt::Write;
use wordcard_core::{WordPage, WordRecord};

pub const EMPTY_LIST_MESSAGE: &str = "No words found. Add some vocabulary!";

/// Renders one word as a card.
pub fn render_card(word: &WordRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {} ({})", word.id, word.text, word.word_type);
    let _ = writeln!(out, "    {}", word.definition);
    let _ = writeln!(out, "    \"{}\"", word.example);
    let _ = writeln!(out, "    added {}", word.date);
    out
}

/// Renders a page of cards, followed by a footer when pagination is shown.
pub fn render_page(page: &WordPage) -> String {
    if page.total == 0 {
        return format!("{EMPTY_LIST_MESSAGE}\n");
    }

    let mut out = if page.is_empty() {
        format!("No words on page {}.\n", page.page)
    } else {
        let cards: Vec<String> = page.items.iter().map(render_card).collect();
        cards.join("\n")
    };
    if page.show_pagination {
        if !page.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "Page {} of {}", page.page, page.page_count);
    }
    out
}
