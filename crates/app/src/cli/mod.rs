use std::{error::Error, io};

use bistro_app::{config::AppConfig, context::AppContext};
use clap::{Parser, Subcommand};

mod cart;
mod menu;
mod post;
mod table;

#[derive(Debug, Parser)]
#[command(name = "bistro", about = "Bistro ordering client", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the menu
    Menu(menu::MenuArgs),

    /// Show or edit the cart
    Cart(cart::CartCommand),

    /// Read a news post
    Post(post::PostArgs),

    /// Start ordering for one or more tables
    Table(table::TableArgs),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        let context = AppContext::from_config(&self.config)
            .map_err(|error| report("failed to start", &error))?;

        match self.command {
            Commands::Menu(args) => menu::run(&context, &self.config.menu, args).await,
            Commands::Cart(command) => cart::run(&context, command).await,
            Commands::Post(args) => post::run(&context, &args).await,
            Commands::Table(args) => table::run(&context, &args),
        }
    }
}

/// Render an error and its sources on one line.
pub(crate) fn report(context: &str, error: &dyn Error) -> String {
    let mut message = format!("{context}: {error}");
    let mut source = error.source();

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}

pub(crate) fn write_failed(error: io::Error) -> String {
    format!("failed to write output: {error}")
}
