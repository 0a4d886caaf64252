//! Bistro ordering client CLI

use std::process::ExitCode;

use bistro_app::{config::AppConfig, logging::init_subscriber};
use clap::Parser;

use crate::cli::Cli;

mod cli;

#[tokio::main]
#[expect(clippy::print_stderr, reason = "errors are reported to the terminal")]
async fn main() -> ExitCode {
    AppConfig::load_dotenv();

    let cli = Cli::parse();

    if let Err(error) = init_subscriber(&cli.config.logging) {
        eprintln!("{error}");

        return ExitCode::FAILURE;
    }

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");

            ExitCode::FAILURE
        }
    }
}
