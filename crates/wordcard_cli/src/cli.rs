//! Command-line surface of the `wordcard` client.
//!
//! # Responsibility
//! - Parse flags and subcommands.
//! - Drive one Word Store session per invocation and print the outcome.
//!
//! # Invariants
//! - Every action goes through the Word Store, so input is validated before
//!   any backend call.
//! - A failed action returns `CliError`; nothing is printed for it on `out`.

use crate::backend::{HttpWordBackend, DEFAULT_API_URL};
use crate::render::{render_card, render_page};
use clap::{Parser, Subcommand};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};
use std::path::PathBuf;
use wordcard_core::{
    open_local_service, DirKeyValueStore, LoadSource, StoreError, ViewSession, WordBackend,
    WordDraft, WordId, WordPatch, WordStore,
};

/// Default log level for the client; keeps stderr quiet.
pub const DEFAULT_CLI_LOG_LEVEL: &str = "warn";

const SNAPSHOT_DIR_NAME: &str = "snapshot";

#[derive(Debug, Clone, Parser)]
#[command(name = "wordcard", version, about = "Manage a personal vocabulary list")]
pub struct Cli {
    /// Base URL of the words collection
    #[arg(long, env = "WORDCARD_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,
    /// Keep words in local storage only, without a server
    #[arg(long, global = true)]
    pub local: bool,
    /// Directory for local storage and the offline snapshot
    #[arg(long, env = "WORDCARD_DATA_DIR", default_value = ".wordcard", global = true)]
    pub data_dir: PathBuf,
    /// trace|debug|info|warn|error
    #[arg(long, env = "WORDCARD_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,
    /// Absolute directory for rotating log files; stderr when unset
    #[arg(long, env = "WORDCARD_LOG_DIR", global = true)]
    pub log_dir: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_CLI_LOG_LEVEL)
    }

    /// Directory holding the last good server list for offline use.
    pub fn snapshot_dir(&self) -> PathBuf {
        self.data_dir.join(SNAPSHOT_DIR_NAME)
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List words as cards, one page at a time
    List {
        /// Case-insensitive match on word or definition
        #[arg(long, default_value = "")]
        search: String,
        /// alphabetical|date; anything else keeps insertion order
        #[arg(long)]
        sort: Option<String>,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one word
    Show { id: WordId },
    /// Add a word
    Add {
        #[arg(long, default_value = "")]
        text: String,
        #[arg(long, default_value = "")]
        definition: String,
        #[arg(long, default_value = "")]
        example: String,
        /// Part of speech, e.g. noun, verb, adjective
        #[arg(long = "type", default_value = "")]
        word_type: String,
    },
    /// Replace the given fields of a word
    Edit {
        id: WordId,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        definition: Option<String>,
        #[arg(long)]
        example: Option<String>,
        #[arg(long = "type")]
        word_type: Option<String>,
    },
    /// Delete a word
    Delete { id: WordId },
}

/// Failure of one CLI invocation.
#[derive(Debug)]
pub enum CliError {
    /// A Word Store action failed; `action` names it for the user.
    Action {
        action: &'static str,
        source: StoreError,
    },
    Output(io::Error),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Action {
                source: StoreError::Validation(err),
                ..
            } => write!(f, "Please fill in all fields: {err}"),
            Self::Action { action, source } => write!(f, "Failed to {action} word: {source}"),
            Self::Output(err) => write!(f, "failed to write output: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Action { source, .. } => Some(source),
            Self::Output(err) => Some(err),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Output(value)
    }
}

fn action(action: &'static str) -> impl FnOnce(StoreError) -> CliError {
    move |source| CliError::Action { action, source }
}

/// Runs `cli` against the configured backend, printing to `out`.
///
/// With `--local` words live under `data_dir`; otherwise the REST API is
/// used and the offline snapshot lives under `data_dir/snapshot`, apart from
/// the local word list.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), CliError> {
    if cli.local {
        info!(
            "event=cli_start module=cli status=ok backend=local data_dir={}",
            cli.data_dir.display()
        );
        let mut store = WordStore::new(open_local_service(DirKeyValueStore::new(&cli.data_dir)));
        execute(&mut store, &cli.command, out)
    } else {
        info!("event=cli_start module=cli status=ok backend=http");
        let snapshot = DirKeyValueStore::new(cli.snapshot_dir());
        let mut store = WordStore::new(HttpWordBackend::new(&cli.api_url)).with_fallback(snapshot);
        execute(&mut store, &cli.command, out)
    }
}

/// Applies `command` to `store` and prints the result.
pub fn execute<B: WordBackend, W: Write>(
    store: &mut WordStore<B>,
    command: &Command,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        Command::List { search, sort, page } => {
            store.load_all();
            match store.load_source() {
                LoadSource::Snapshot => writeln!(out, "Server unavailable; showing saved words.")?,
                LoadSource::Samples => writeln!(out, "Server unavailable; showing sample words.")?,
                LoadSource::Empty | LoadSource::Backend => {}
            }

            let mut session = ViewSession::new();
            session.set_search(search.as_str());
            if let Some(sort) = sort {
                session.set_sort(sort.parse().unwrap_or_default());
            }
            session.set_page(*page);
            write!(out, "{}", render_page(&session.view(store.words())))?;
        }
        Command::Show { id } => {
            let word = store.fetch(*id).map_err(action("load"))?;
            write!(out, "{}", render_card(&word))?;
        }
        Command::Add {
            text,
            definition,
            example,
            word_type,
        } => {
            let draft = WordDraft::new(text, definition, example, word_type);
            let created = store.create(&draft).map_err(action("save"))?;
            writeln!(out, "Word added successfully!")?;
            write!(out, "{}", render_card(&created))?;
        }
        Command::Edit {
            id,
            text,
            definition,
            example,
            word_type,
        } => {
            let patch = WordPatch {
                text: text.clone(),
                definition: definition.clone(),
                example: example.clone(),
                word_type: word_type.clone(),
            };
            let updated = store.update(*id, &patch).map_err(action("update"))?;
            writeln!(out, "Word updated successfully!")?;
            write!(out, "{}", render_card(&updated))?;
        }
        Command::Delete { id } => {
            store.remove(*id).map_err(action("delete"))?;
            writeln!(out, "Word deleted.")?;
        }
    }
    Ok(())
}
