//! CLI entry point.
//!
//! # Responsibility
//! - Parse arguments, start logging and run one command.
//! - Map failures to a one-line notice and a non-zero exit status.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use log::warn;
use wordcard_cli::{run, Cli};
use wordcard_core::{init_logging, init_stderr_logging};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = match cli.log_dir.as_deref() {
        Some(dir) => init_logging(cli.log_level(), dir),
        None => init_stderr_logging(cli.log_level()),
    };
    if let Err(err) = logging {
        eprintln!("wordcard: {err}");
        return ExitCode::FAILURE;
    }

    let stdout = io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            warn!("event=cli_exit module=cli status=error");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
