#![deny(missing_docs)]

//! # Tree Command
//!
//! Prints the group tree of a document.

use std::path::PathBuf;

use apiflow_core::{Context, Group, GroupChild};

use crate::document::parse_file;
use crate::error::CliResult;

/// Arguments for the tree command.
#[derive(clap::Args, Debug, Clone)]
pub struct TreeArgs {
    /// Path to the Swagger 2.0 document (JSON or YAML).
    pub file: PathBuf,
}

/// Executes the tree command.
pub fn execute(args: &TreeArgs) -> CliResult<()> {
    let (_, context) = parse_file(&args.file)?;
    print!("{}", render_tree(&context));
    Ok(())
}

/// Renders the group tree, two spaces of indentation per level.
pub fn render_tree(context: &Context) -> String {
    let mut out = format!("{}\n", context.group.name);
    render_group(context, &context.group, 1, &mut out);
    out
}

fn render_group(context: &Context, group: &Group, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for child in group.children.values() {
        match child {
            GroupChild::Group(subgroup) => {
                out.push_str(&format!("{indent}{}\n", subgroup.name));
                render_group(context, subgroup, depth + 1, out);
            }
            GroupChild::Request(id) => match context.request(id) {
                Some(request) => out.push_str(&format!(
                    "{indent}{} {}\n",
                    request.method.to_uppercase(),
                    request.name
                )),
                None => log::warn!("group tree points at unknown request {id}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiflow_core::SwaggerParser;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_path_tree() {
        let text = r#"{
            "swagger": "2.0",
            "info": { "title": "Pets", "version": "1" },
            "paths": {
                "/pets": {
                    "get": { "summary": "List pets" },
                    "post": { "summary": "Add pet" }
                },
                "/pets/{id}": { "get": { "summary": "Show pet" } }
            }
        }"#;
        let context = SwaggerParser::default().parse(text).unwrap();

        assert_eq!(
            render_tree(&context),
            "Pets\n  /pets\n    GET List pets\n    POST Add pet\n    /{id}\n      GET Show pet\n"
        );
    }
}
