#![deny(missing_docs)]

//! # Requests Command
//!
//! Lists every request of a document with a concrete URL.

use std::path::PathBuf;

use apiflow_core::{Context, ValueGenerator};

use crate::document::parse_file;
use crate::error::CliResult;

/// Arguments for the requests command.
#[derive(clap::Args, Debug, Clone)]
pub struct RequestsArgs {
    /// Path to the Swagger 2.0 document (JSON or YAML).
    pub file: PathBuf,

    /// Preferred scheme. Ignored when the request does not declare it.
    #[clap(long)]
    pub scheme: Option<String>,
}

/// Executes the requests command.
pub fn execute(args: &RequestsArgs) -> CliResult<()> {
    let (parser, context) = parse_file(&args.file)?;
    for line in request_lines(&context, args.scheme.as_deref(), parser.generator()) {
        println!("{line}");
    }
    Ok(())
}

/// One `METHOD url  name` line per request, in group tree order.
///
/// Path parameters render as `{name}` markers.
pub fn request_lines(
    context: &Context,
    scheme: Option<&str>,
    generator: &dyn ValueGenerator,
) -> Vec<String> {
    context
        .requests_in_tree_order()
        .map(|request| {
            format!(
                "{} {}  {}",
                request.method.to_uppercase(),
                request.url.get_url(scheme, generator),
                request.name
            )
        })
        .collect()
}
