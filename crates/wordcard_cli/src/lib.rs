//! Terminal client for the Wordcard vocabulary list.
//!
//! Talks to `wordcard-server` over HTTP, or keeps words in a local data
//! directory with `--local`.

pub mod backend;
pub mod cli;
pub mod render;

pub use backend::{HttpWordBackend, DEFAULT_API_URL};
pub use cli::{execute, run, Cli, CliError, Command};
pub use render::{render_card, render_page, EMPTY_LIST_MESSAGE};
