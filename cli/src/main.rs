#![deny(missing_docs)]

//! # apiflow CLI
//!
//! Command Line Interface over `apiflow-core`.
//!
//! Supported Commands:
//! - `tree`: Prints the group tree of a Swagger 2.0 document.
//! - `requests`: Lists every request with a rendered URL.
//! - `detect`: Scores how likely a file is a Swagger 2.0 document.

use clap::{Parser, Subcommand};
use env_logger::Env;

use crate::error::CliResult;

mod detect;
mod document;
mod error;
mod requests;
mod tree;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Swagger 2.0 to API model inspector")]
struct Cli {
    /// Log parser activity at debug level.
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the group tree of a document.
    Tree(tree::TreeArgs),
    /// List the requests of a document.
    Requests(requests::RequestsArgs),
    /// Score a file as a Swagger 2.0 document.
    Detect(detect::DetectArgs),
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    match &cli.command {
        Commands::Tree(args) => tree::execute(args)?,
        Commands::Requests(args) => requests::execute(args)?,
        Commands::Detect(args) => detect::execute(args)?,
    }

    Ok(())
}
