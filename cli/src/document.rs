#![deny(missing_docs)]

//! # Document Loading
//!
//! Reads documents from disk and builds a parser able to follow file references.

use std::fs;
use std::path::{Path, PathBuf};

use apiflow_core::pointer::lookup;
use apiflow_core::swagger::load_document;
use apiflow_core::{Context, FileReader, SwaggerParser};
use serde_json::Value;

use crate::error::{CliError, CliResult};

/// Resolves file references relative to a directory.
#[derive(Debug, Clone)]
pub struct DirectoryReader {
    root: PathBuf,
}

impl DirectoryReader {
    /// A reader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileReader for DirectoryReader {
    fn read(&self, reference: &str) -> Option<Value> {
        let (path, fragment) = match reference.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (reference, None),
        };
        let path = path.strip_prefix("file://").unwrap_or(path);

        let text = fs::read_to_string(self.root.join(path)).ok()?;
        let document = load_document(&text).ok()?;
        match fragment {
            Some(fragment) if !fragment.is_empty() => lookup(&document, fragment).cloned(),
            _ => Some(document),
        }
    }
}

/// Reads the text of `path`.
pub fn read_document(path: &Path) -> CliResult<String> {
    if !path.exists() {
        return Err(CliError::General(format!("File not found: {:?}", path)));
    }
    Ok(fs::read_to_string(path)?)
}

/// Parses the document at `path`, following file references next to it.
pub fn parse_file(path: &Path) -> CliResult<(SwaggerParser, Context)> {
    let text = read_document(path)?;
    let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let parser = SwaggerParser::default().with_file_reader(DirectoryReader::new(directory));
    let context = parser.parse(&text)?;
    log::info!("parsed {:?}: {} requests", path, context.requests.len());
    Ok((parser, context))
}
