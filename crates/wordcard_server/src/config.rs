//! Server configuration from command-line flags and environment.

use clap::Parser;
use std::path::PathBuf;
use wordcard_core::default_log_level;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "wordcard-server",
    version,
    about = "REST API for a vocabulary word list stored in one JSON file"
)]
pub struct Config {
    /// Bind address
    #[arg(long, env = "WORDCARD_HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// HTTP port
    #[arg(long, env = "WORDCARD_PORT", default_value_t = 3000)]
    pub port: u16,
    /// JSON file holding the word list; created when missing
    #[arg(long, env = "WORDCARD_DB_FILE", default_value = "./db.json")]
    pub db_file: PathBuf,
    /// trace|debug|info|warn|error; defaults by build mode
    #[arg(long, env = "WORDCARD_LOG_LEVEL")]
    pub log_level: Option<String>,
    /// Absolute directory for rotating log files; stderr when unset
    #[arg(long, env = "WORDCARD_LOG_DIR")]
    pub log_dir: Option<String>,
}

impl Config {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }
}
