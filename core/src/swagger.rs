#![deny(missing_docs)]

//! # Swagger 2.0 Parsing
//!
//! Turns a Swagger 2.0 document (JSON or YAML text) into a [`Context`].
//!
//! Parsing runs in fixed stages:
//! 1. decode the text (JSON, then YAML);
//! 2. validate the decoded document;
//! 3. index every `$ref` of the document;
//! 4. build one [`Request`](crate::model::Request) per path and method;
//! 5. partition the requests into a group tree, by tag or by path.
//!
//! Any fatal condition aborts the whole parse; no partial context is returned.

use crate::error::{AppError, AppResult};
use crate::generator::{ExampleGenerator, ValueGenerator};
use crate::model::{
    Contact, Context, FileReader, Group, Info, License, RemoteFetcher, ResolveContext, Schema,
};
use serde_json::Value as JsonValue;

/// Text decoding.
pub mod loader;

/// Validity check collaborators.
pub mod validation;

mod groups;
mod params;
mod references;
mod requests;
mod responses;
mod security;

pub use groups::create_group_tree;
pub use loader::load_document;
pub use validation::{DocumentValidator, PermissiveValidator, SwaggerValidator};

/// Tunables of a parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserOptions {
    /// When set, the context schema and body schemas are expanded this many
    /// reference hops (plus one). When unset they are kept unresolved.
    pub resolve_depth: Option<u32>,
    /// Host used when the document declares none.
    pub default_host: String,
    /// Scheme used when neither the operation nor the document declares one.
    pub default_scheme: String,
    /// Share of tagged requests from which the tree is built by tag.
    ///
    /// The comparison is strict: with exactly this share, requests are grouped by path.
    pub tag_threshold: f64,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            resolve_depth: None,
            default_host: "localhost".into(),
            default_scheme: "http".into(),
            tag_threshold: 0.5,
        }
    }
}

/// State shared by the extraction stages of one parse.
pub(crate) struct Scope<'a> {
    /// The decoded document.
    pub(crate) document: &'a JsonValue,
    /// The document root and the injected capabilities.
    pub(crate) resolver: ResolveContext<'a>,
    /// Parse options.
    pub(crate) options: &'a ParserOptions,
}

/// Swagger 2.0 parser.
///
/// Collaborators are injected with the `with_*` builder methods. Without
/// them, documents are checked by [`SwaggerValidator`], example values come
/// from [`ExampleGenerator`] and file or remote references stay unresolved.
pub struct SwaggerParser {
    options: ParserOptions,
    validator: Box<dyn DocumentValidator>,
    generator: Box<dyn ValueGenerator>,
    files: Option<Box<dyn FileReader>>,
    remote: Option<Box<dyn RemoteFetcher>>,
}

impl Default for SwaggerParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl SwaggerParser {
    /// A parser with default collaborators.
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            validator: Box::new(SwaggerValidator),
            generator: Box::new(ExampleGenerator),
            files: None,
            remote: None,
        }
    }

    /// Replaces the validity check.
    pub fn with_validator(mut self, validator: impl DocumentValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    /// Replaces the example value generator.
    pub fn with_generator(mut self, generator: impl ValueGenerator + 'static) -> Self {
        self.generator = Box::new(generator);
        self
    }

    /// Enables resolution of file references.
    pub fn with_file_reader(mut self, files: impl FileReader + 'static) -> Self {
        self.files = Some(Box::new(files));
        self
    }

    /// Enables resolution of remote references.
    pub fn with_remote_fetcher(mut self, remote: impl RemoteFetcher + 'static) -> Self {
        self.remote = Some(Box::new(remote));
        self
    }

    /// The parse options.
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// The example value generator, for rendering parsed URLs.
    pub fn generator(&self) -> &dyn ValueGenerator {
        self.generator.as_ref()
    }

    /// Scores how likely `text` is a Swagger 2.0 document, in `[0, 1]`.
    ///
    /// A third each for a `swagger` field, `swagger == "2.0"`, an `info` field
    /// and a `paths` field, capped at one. Undecodable text scores zero.
    pub fn detect(text: &str) -> f64 {
        let Some(document) = loader::try_load_document(text) else {
            return 0.0;
        };

        let third = 1.0 / 3.0;
        let mut score = 0.0;
        if document.get("swagger").is_some_and(is_truthy) {
            score += third;
        }
        if document.get("swagger").and_then(JsonValue::as_str) == Some("2.0") {
            score += third;
        }
        if document.get("info").is_some_and(is_truthy) {
            score += third;
        }
        if document.get("paths").is_some_and(is_truthy) {
            score += third;
        }
        f64::min(score, 1.0)
    }

    /// The `info.title` of the document, if it decodes and declares one.
    pub fn api_name(text: &str) -> Option<String> {
        loader::try_load_document(text)?
            .get("info")?
            .get("title")?
            .as_str()
            .map(str::to_string)
    }

    /// Parses `text` into a context.
    pub fn parse(&self, text: &str) -> AppResult<Context> {
        let document = loader::load_document(text)?;
        self.validator
            .validate(&document)
            .map_err(AppError::InvalidDocument)?;

        let root = Schema::from_value(&document);
        let resolver = ResolveContext {
            schema: Some(&root),
            files: self.files.as_deref(),
            remote: self.remote.as_deref(),
        };
        let scope = Scope {
            document: &document,
            resolver,
            options: &self.options,
        };

        let references = references::extract_references(&root, &scope.resolver);
        let requests = requests::extract_requests(&scope)?;
        log::debug!("extracted {} requests", requests.len());

        let title = document
            .pointer("/info/title")
            .and_then(JsonValue::as_str)
            .unwrap_or_default();
        let group = create_group_tree(Group::new(title), &requests, self.options.tag_threshold);
        let info = extract_info(document.get("info"));

        let schema = match self.options.resolve_depth {
            Some(depth) => root.resolve_with(depth, &scope.resolver),
            None => root.clone(),
        };

        Ok(Context {
            schema,
            requests,
            group,
            references,
            environments: Vec::new(),
            info,
        })
    }
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}

fn text(value: &JsonValue, key: &str) -> Option<String> {
    value.get(key).and_then(JsonValue::as_str).map(str::to_string)
}

fn extract_info(info: Option<&JsonValue>) -> Info {
    let Some(info) = info else {
        return Info::default();
    };

    Info {
        title: text(info, "title"),
        description: text(info, "description"),
        tos: text(info, "termsOfService"),
        contact: info.get("contact").map(|contact| Contact {
            name: text(contact, "name"),
            url: text(contact, "url"),
            email: text(contact, "email"),
        }),
        license: info.get("license").map(|license| License {
            name: text(license, "name"),
            url: text(license, "url"),
        }),
        version: text(info, "version"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detect_scores() {
        let full = r#"{"swagger": "2.0", "info": {}, "paths": {}}"#;
        assert_eq!(SwaggerParser::detect(full), 1.0);

        let openapi = "openapi: 3.0.0\ninfo: {}\npaths: {}\n";
        assert!((SwaggerParser::detect(openapi) - 2.0 / 3.0).abs() < 1e-9);

        let legacy = r#"{"swagger": "1.2"}"#;
        assert!((SwaggerParser::detect(legacy) - 1.0 / 3.0).abs() < 1e-9);

        assert_eq!(SwaggerParser::detect("{ [ nope"), 0.0);
    }

    #[test]
    fn test_api_name() {
        assert_eq!(
            SwaggerParser::api_name("info:\n  title: Petstore\n"),
            Some("Petstore".to_string())
        );
        assert_eq!(SwaggerParser::api_name(r#"{"info": {}}"#), None);
        assert_eq!(SwaggerParser::api_name("{ [ nope"), None);
    }

    #[test]
    fn test_extract_info() {
        let info = extract_info(Some(&json!({
            "title": "Petstore",
            "version": "1.0.0",
            "termsOfService": "http://example.com/terms",
            "contact": { "name": "API Team", "email": "api@example.com" },
            "license": { "name": "MIT" }
        })));

        assert_eq!(info.title.as_deref(), Some("Petstore"));
        assert_eq!(info.tos.as_deref(), Some("http://example.com/terms"));
        assert_eq!(
            info.contact,
            Some(Contact {
                name: Some("API Team".into()),
                url: None,
                email: Some("api@example.com".into()),
            })
        );
        assert_eq!(info.license.and_then(|l| l.name), Some("MIT".into()));
        assert_eq!(extract_info(None), Info::default());
    }

    #[test]
    fn test_default_options() {
        let parser = SwaggerParser::default();
        assert_eq!(parser.options().default_host, "localhost");
        assert_eq!(parser.options().default_scheme, "http");
        assert_eq!(parser.options().tag_threshold, 0.5);
        assert_eq!(parser.options().resolve_depth, None);
    }
}
