//! Bookstore catalog migration CLI

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{migrate, rollback, status, validate};

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        cli::Commands::Migrate(args) => migrate::execute(args, &cli.global),
        cli::Commands::Status(args) => status::execute(args, &cli.global),
        cli::Commands::Rollback(args) => rollback::execute(args, &cli.global),
        cli::Commands::Validate(args) => validate::execute(args, &cli.global),
    };

    if let Err(err) = result {
        // ExitCode errors have already printed their message
        if let Some(code) = err.downcast_ref::<commands::common::ExitCode>() {
            std::process::exit(code.0);
        }
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
