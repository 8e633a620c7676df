//! AI-assisted review of locale-file changes in GitHub pull requests.
//!
//! The binary wires four pieces together: the unified-diff parser
//! (`i18n-diff`), the GitHub client (`i18n-gh-client`), configuration and
//! caching (`i18n-config`), and the review model plus report store in
//! this crate.

mod cli;
mod commands;
mod model;
mod prompt;
mod report;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match commands::dispatch(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
