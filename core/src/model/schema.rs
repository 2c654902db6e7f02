#![deny(missing_docs)]

//! # Schema Trees
//!
//! A recursive mirror of a decoded JSON/YAML document where `$ref` entries
//! become [`Reference`] leaves.
//!
//! Every node knows its escaped JSON-pointer `uri` from the document root, so
//! references are resolved by path lookup against a root the caller supplies.
//! Self-referential definitions are therefore plain data; [`Schema::resolve`]
//! bounds how many reference hops are expanded.

use crate::model::reference::{Reference, ResolveContext};
use crate::pointer::join_pointer;
use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

/// A child of a structured schema.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    /// A nested schema.
    Schema(Schema),
    /// A `$ref` leaf.
    Reference(Reference),
}

impl SchemaNode {
    /// Renders the node back into JSON.
    ///
    /// Resolved references render as their target; unresolved ones as `{"$ref": …}`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            SchemaNode::Schema(schema) => schema.to_json(),
            SchemaNode::Reference(reference) => match reference.value() {
                Some(node) => node.to_json(),
                None => {
                    let mut map = Map::new();
                    map.insert("$ref".into(), JsonValue::String(reference.reference().into()));
                    JsonValue::Object(map)
                }
            },
        }
    }

    /// The nested schema, if this node is one.
    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            SchemaNode::Schema(schema) => Some(schema),
            SchemaNode::Reference(_) => None,
        }
    }

    /// The reference, if this node is one.
    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            SchemaNode::Reference(reference) => Some(reference),
            SchemaNode::Schema(_) => None,
        }
    }
}

/// What a schema node holds. Exactly one shape at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaContent {
    /// A scalar leaf (string, number, boolean, null).
    Value(JsonValue),
    /// An object, keyed by the unescaped property name, in document order.
    Map(IndexMap<String, SchemaNode>),
    /// An array, index addressed.
    List(Vec<SchemaNode>),
    /// Pass-through JSON that is never walked or resolved.
    Raw(JsonValue),
}

/// A node of a schema tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Escaped JSON pointer of this node, `#` for the root.
    pub uri: String,
    /// The node content.
    pub content: SchemaContent,
}

impl Default for Schema {
    fn default() -> Self {
        Self::at("#")
    }
}

impl Schema {
    /// An empty structured node at `uri`.
    pub fn at(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            content: SchemaContent::Map(IndexMap::new()),
        }
    }

    /// A pass-through node at `uri`.
    pub fn raw(uri: impl Into<String>, value: JsonValue) -> Self {
        Self {
            uri: uri.into(),
            content: SchemaContent::Raw(value),
        }
    }

    /// Builds a root schema (`#`) from a decoded document.
    pub fn from_value(value: &JsonValue) -> Self {
        Self::default().merge_schema(value)
    }

    /// Merges a decoded JSON value into this node and returns the result.
    ///
    /// Objects extend the existing map (a new property replaces an existing
    /// one of the same name). A string `$ref` property becomes a
    /// [`Reference`] leaf. Arrays become index-addressed lists and scalars
    /// become value leaves.
    pub fn merge_schema(&self, value: &JsonValue) -> Schema {
        let content = match value {
            JsonValue::Object(object) => {
                let mut map = match &self.content {
                    SchemaContent::Map(existing) => existing.clone(),
                    _ => IndexMap::new(),
                };
                for (key, child) in object {
                    let node = match (key.as_str(), child) {
                        ("$ref", JsonValue::String(target)) => {
                            SchemaNode::Reference(Reference::schema(target.clone()))
                        }
                        _ => SchemaNode::Schema(
                            Schema::at(join_pointer(&self.uri, key)).merge_schema(child),
                        ),
                    };
                    map.insert(key.clone(), node);
                }
                SchemaContent::Map(map)
            }
            JsonValue::Array(items) => SchemaContent::List(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| {
                        SchemaNode::Schema(
                            Schema::at(join_pointer(&self.uri, &index.to_string()))
                                .merge_schema(item),
                        )
                    })
                    .collect(),
            ),
            scalar => SchemaContent::Value(scalar.clone()),
        };

        Schema {
            uri: self.uri.clone(),
            content,
        }
    }

    /// Direct child lookup by unescaped key (or index for lists).
    pub fn child(&self, key: &str) -> Option<&SchemaNode> {
        match &self.content {
            SchemaContent::Map(map) => map.get(key),
            SchemaContent::List(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            SchemaContent::Value(_) | SchemaContent::Raw(_) => None,
        }
    }

    /// Walks unescaped path segments from this node.
    ///
    /// An empty path yields this node. The walk stops (returning `None`) when
    /// a segment is missing or when it would have to pass through a reference.
    pub fn get_in(&self, path: &[String]) -> Option<SchemaNode> {
        let Some((last, parents)) = path.split_last() else {
            return Some(SchemaNode::Schema(self.clone()));
        };

        let mut current = self;
        for key in parents {
            current = current.child(key)?.as_schema()?;
        }
        current.child(last).cloned()
    }

    /// Expands references reachable within `depth` hops, against `base`.
    ///
    /// Every reference child is resolved against `base`. When that changed
    /// the node and `depth > 0`, the referent is itself resolved at
    /// `depth - 1`. Non-reference children are resolved at the same depth.
    /// `base` is never modified.
    pub fn resolve(&self, depth: u32, base: &Schema) -> Schema {
        let context = ResolveContext::schema(base);
        self.resolve_with(depth, &context)
    }

    /// Same as [`Schema::resolve`], with a full resolution context so that
    /// file and remote references may be expanded too.
    pub fn resolve_with(&self, depth: u32, context: &ResolveContext<'_>) -> Schema {
        let content = match &self.content {
            SchemaContent::Map(map) => SchemaContent::Map(
                map.iter()
                    .map(|(key, node)| (key.clone(), resolve_node(node, depth, context)))
                    .collect(),
            ),
            SchemaContent::List(items) => SchemaContent::List(
                items
                    .iter()
                    .map(|node| resolve_node(node, depth, context))
                    .collect(),
            ),
            other => other.clone(),
        };

        Schema {
            uri: self.uri.clone(),
            content,
        }
    }

    /// Collects every reference leaf in document order.
    pub fn references(&self) -> Vec<&Reference> {
        let mut found = Vec::new();
        self.collect_references(&mut found);
        found
    }

    fn collect_references<'a>(&'a self, found: &mut Vec<&'a Reference>) {
        let children: Box<dyn Iterator<Item = &'a SchemaNode> + 'a> = match &self.content {
            SchemaContent::Map(map) => Box::new(map.values()),
            SchemaContent::List(items) => Box::new(items.iter()),
            SchemaContent::Value(_) | SchemaContent::Raw(_) => return,
        };

        for child in children {
            match child {
                SchemaNode::Schema(schema) => schema.collect_references(found),
                SchemaNode::Reference(reference) => found.push(reference),
            }
        }
    }

    /// Renders the tree back into JSON.
    ///
    /// A resolved `$ref` property whose target is an object is replaced by
    /// the target's properties; an unresolved one stays a `$ref` string.
    pub fn to_json(&self) -> JsonValue {
        match &self.content {
            SchemaContent::Value(value) | SchemaContent::Raw(value) => value.clone(),
            SchemaContent::List(items) => {
                JsonValue::Array(items.iter().map(SchemaNode::to_json).collect())
            }
            SchemaContent::Map(map) => {
                let mut object = Map::new();
                for (key, node) in map {
                    match node {
                        SchemaNode::Reference(reference) if key == "$ref" => {
                            match reference.value().map(SchemaNode::to_json) {
                                Some(JsonValue::Object(target)) => object.extend(target),
                                Some(other) => {
                                    object.insert(key.clone(), other);
                                }
                                None => {
                                    object.insert(
                                        key.clone(),
                                        JsonValue::String(reference.reference().into()),
                                    );
                                }
                            }
                        }
                        _ => {
                            object.insert(key.clone(), node.to_json());
                        }
                    }
                }
                JsonValue::Object(object)
            }
        }
    }
}

impl Reference {
    /// Resolves this reference, then expands the references of its target
    /// within `depth - 1` further hops.
    ///
    /// When resolving does not change the reference (already resolved, no
    /// capability, dangling pointer) or `depth` is `0`, the target is left as is.
    pub fn resolve_to_depth(&self, depth: u32, context: &ResolveContext<'_>) -> Reference {
        let resolved = self.resolve(context);
        if resolved == *self || depth == 0 {
            return resolved;
        }

        match resolved.value() {
            Some(SchemaNode::Schema(target)) => {
                let expanded = target.resolve_with(depth - 1, context);
                resolved.with_value(SchemaNode::Schema(expanded))
            }
            _ => resolved,
        }
    }
}

fn resolve_node(node: &SchemaNode, depth: u32, context: &ResolveContext<'_>) -> SchemaNode {
    match node {
        SchemaNode::Schema(schema) => SchemaNode::Schema(schema.resolve_with(depth, context)),
        SchemaNode::Reference(reference) => {
            SchemaNode::Reference(reference.resolve_to_depth(depth, context))
        }
    }
}
