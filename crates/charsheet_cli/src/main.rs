//! `charsheet` entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Own the store lifecycle: open at start, close before exit.
//! - Translate failures into a status line and a non-zero exit code.

mod cli;
mod commands;
mod output;

use charsheet_core::{init_logging, Store};
use clap::Parser;
use cli::Cli;
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(message) = init_logging(cli.resolved_log_level(), log_dir) {
            eprintln!("warning: logging disabled: {message}");
        }
    }

    let store = match Store::open(&cli.db) {
        Ok(store) => store,
        Err(err) => {
            error!("event=cli_start module=cli status=error error={err}");
            eprintln!("error 500: cannot open `{}`: {err}", cli.db.display());
            return ExitCode::FAILURE;
        }
    };

    let outcome = commands::run(&store, cli.command, cli.json);
    if let Err(err) = store.close() {
        eprintln!("warning: closing store failed: {err}");
    }

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error {}: {err}", err.status());
            ExitCode::FAILURE
        }
    }
}
