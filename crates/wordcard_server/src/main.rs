//! Server entry point.

use std::process::ExitCode;

use clap::Parser;
use log::error;
use wordcard_core::{init_logging, init_stderr_logging};
use wordcard_server::{config::Config, start_server};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    let logging = match config.log_dir.as_deref() {
        Some(dir) => init_logging(config.log_level(), dir),
        None => init_stderr_logging(config.log_level()),
    };
    if let Err(err) = logging {
        eprintln!("wordcard-server: {err}");
        return ExitCode::FAILURE;
    }

    match start_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=server status=error error={err}");
            ExitCode::FAILURE
        }
    }
}
