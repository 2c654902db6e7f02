#![deny(missing_docs)]

//! # Detect Command
//!
//! Reports how likely a file is to be a Swagger 2.0 document.

use std::path::PathBuf;

use apiflow_core::SwaggerParser;

use crate::document::read_document;
use crate::error::CliResult;

/// Arguments for the detect command.
#[derive(clap::Args, Debug, Clone)]
pub struct DetectArgs {
    /// Path to the candidate document.
    pub file: PathBuf,
}

/// Executes the detect command.
pub fn execute(args: &DetectArgs) -> CliResult<()> {
    let text = read_document(&args.file)?;
    println!("{}", describe(&text));
    Ok(())
}

/// Score and API name, one per line.
pub fn describe(text: &str) -> String {
    let score = SwaggerParser::detect(text);
    let name = SwaggerParser::api_name(text).unwrap_or_else(|| "-".to_string());
    format!("score: {score:.2}\nname: {name}")
}
