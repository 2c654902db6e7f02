#![deny(missing_docs)]

//! # References
//!
//! `$ref` values found in a document, resolvable on demand.
//!
//! A reference never points at its target directly. It carries the target's
//! URI and is re-resolved against whatever root the caller supplies, so cyclic
//! schema graphs never become cyclic ownership graphs.

use crate::model::schema::{Schema, SchemaNode};
use crate::pointer::split_pointer;
use serde_json::Value as JsonValue;
use url::{ParseError, Url};

/// Capability used to resolve [`ReferenceKind::File`] references.
pub trait FileReader {
    /// Reads and decodes the document designated by `reference`.
    ///
    /// `reference` is the raw `$ref` string (fragment included). Returning
    /// `None` leaves the reference unresolved.
    fn read(&self, reference: &str) -> Option<JsonValue>;
}

/// Capability used to resolve [`ReferenceKind::Remote`] references.
pub trait RemoteFetcher {
    /// Fetches and decodes the document designated by `reference`.
    ///
    /// The result must already be available; the core never waits or retries.
    fn get(&self, reference: &str) -> Option<JsonValue>;
}

/// The variant of a reference, which selects its resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// A `$ref` inside a schema tree, resolved by JSON pointer in the local document.
    Schema,
    /// A `$ref` outside of schemas (parameters, responses), resolved by JSON pointer.
    Json,
    /// A relative path or `file:` URI, resolved through a [`FileReader`].
    File,
    /// An `http(s)` URI, resolved through a [`RemoteFetcher`].
    Remote,
    /// Any other URI. Kept opaque and never dereferenced.
    Uri,
}

impl ReferenceKind {
    /// Classifies a `$ref` string. Local pointers (`#/…`) become [`ReferenceKind::Json`].
    pub fn classify(uri: &str) -> Self {
        if uri.starts_with('#') {
            return ReferenceKind::Json;
        }

        match Url::parse(uri) {
            Ok(url) => match url.scheme() {
                "http" | "https" => ReferenceKind::Remote,
                "file" => ReferenceKind::File,
                _ => ReferenceKind::Uri,
            },
            Err(ParseError::RelativeUrlWithoutBase) => ReferenceKind::File,
            Err(_) => ReferenceKind::Uri,
        }
    }
}

/// Lookup roots and capabilities a reference may be resolved against.
///
/// Each field is optional; a reference whose kind has no matching entry is
/// returned unchanged.
#[derive(Default, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Root of the local document for [`ReferenceKind::Schema`] and [`ReferenceKind::Json`].
    pub schema: Option<&'a Schema>,
    /// Reader for [`ReferenceKind::File`].
    pub files: Option<&'a dyn FileReader>,
    /// Fetcher for [`ReferenceKind::Remote`].
    pub remote: Option<&'a dyn RemoteFetcher>,
}

impl<'a> ResolveContext<'a> {
    /// A context that only knows the local document.
    pub fn schema(root: &'a Schema) -> Self {
        Self {
            schema: Some(root),
            ..Self::default()
        }
    }

    /// Adds a file reader.
    pub fn with_files(mut self, files: &'a dyn FileReader) -> Self {
        self.files = Some(files);
        self
    }

    /// Adds a remote fetcher.
    pub fn with_remote(mut self, remote: &'a dyn RemoteFetcher) -> Self {
        self.remote = Some(remote);
        self
    }
}

/// A possibly-resolved `$ref`.
///
/// Invariant: `value` is `None` while `resolved` is `false`. Once resolved a
/// reference is never unresolved again.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    kind: ReferenceKind,
    reference: String,
    resolved: bool,
    value: Option<Box<SchemaNode>>,
}

impl Reference {
    /// Creates an unresolved reference of an explicit kind.
    pub fn new(kind: ReferenceKind, reference: impl Into<String>) -> Self {
        Self {
            kind,
            reference: reference.into(),
            resolved: false,
            value: None,
        }
    }

    /// Creates a reference found inside a schema tree.
    ///
    /// Local pointers become [`ReferenceKind::Schema`]; other URIs are classified.
    pub fn schema(reference: impl Into<String>) -> Self {
        let reference = reference.into();
        let kind = match ReferenceKind::classify(&reference) {
            ReferenceKind::Json => ReferenceKind::Schema,
            other => other,
        };
        Self::new(kind, reference)
    }

    /// Creates a reference found outside of a schema tree, kind inferred from the URI.
    pub fn from_uri(reference: impl Into<String>) -> Self {
        let reference = reference.into();
        Self::new(ReferenceKind::classify(&reference), reference)
    }

    /// The variant of this reference.
    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    /// The raw `$ref` string.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Whether the reference has been dereferenced.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// The dereferenced node, if any.
    pub fn value(&self) -> Option<&SchemaNode> {
        self.value.as_deref()
    }

    /// Returns a resolved copy holding `node`.
    pub(crate) fn with_value(&self, node: SchemaNode) -> Self {
        Self {
            kind: self.kind,
            reference: self.reference.clone(),
            resolved: true,
            value: Some(Box::new(node)),
        }
    }

    /// Dereferences against `context`.
    ///
    /// Resolving an already resolved reference, or one whose kind has no
    /// matching capability in `context`, returns an identical copy. A pointer
    /// that does not lead anywhere also returns an identical copy: failing to
    /// resolve is a state, not an error.
    pub fn resolve(&self, context: &ResolveContext<'_>) -> Reference {
        if self.resolved {
            return self.clone();
        }

        let found = match self.kind {
            ReferenceKind::Schema | ReferenceKind::Json => context
                .schema
                .and_then(|root| root.get_in(&split_pointer(&self.reference))),
            ReferenceKind::File => context
                .files
                .and_then(|files| files.read(&self.reference))
                .map(|raw| self.external_node(&raw)),
            ReferenceKind::Remote => context
                .remote
                .and_then(|remote| remote.get(&self.reference))
                .map(|raw| self.external_node(&raw)),
            ReferenceKind::Uri => None,
        };

        match found {
            Some(node) => self.with_value(node),
            None => {
                log::trace!("reference '{}' left unresolved", self.reference);
                self.clone()
            }
        }
    }

    fn external_node(&self, raw: &JsonValue) -> SchemaNode {
        SchemaNode::Schema(Schema::at(self.reference.clone()).merge_schema(raw))
    }
}
