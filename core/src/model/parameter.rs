#![deny(missing_docs)]

//! # Parameters
//!
//! A named, typed value slot with the constraints its own value must satisfy
//! (internals) and the parameters it may be matched against (externals).

use crate::generator::ValueGenerator;
use crate::model::constraint::Constraint;
use crate::model::reference::Reference;
use crate::pointer::decode_pointer_segment;
use serde_json::{json, Map, Value as JsonValue};

/// JSON-Schema primitive types. Anything else is inferred by [`infer_type`].
const SCHEMA_TYPES: [&str; 7] = [
    "integer", "number", "array", "string", "object", "boolean", "null",
];

/// The `format` marking a parameter whose value is a fragment list.
pub const SEQUENCE_FORMAT: &str = "sequence";

/// What a parameter holds besides its constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// A plain default or literal value.
    Json(JsonValue),
    /// A body schema (`type` is `reference`).
    Reference(Reference),
    /// The element description of an array parameter.
    Items(Box<Parameter>),
    /// Ordered literal/variable fragments (`format` is `sequence`).
    Sequence(Vec<Parameter>),
}

/// A declared parameter.
///
/// Values are never mutated after parsing; helpers return new instances.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameter {
    /// Lookup key (header name, query key, path variable).
    pub key: Option<String>,
    /// Display name as declared.
    pub name: Option<String>,
    /// Default/literal value, schema reference, array items or fragments.
    pub value: Option<ParameterValue>,
    /// Declared type (`string`, `integer`, …, or `reference`).
    pub param_type: Option<String>,
    /// Declared format (`int64`, `sequence`, collection format for arrays, …).
    pub format: Option<String>,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Free-form description.
    pub description: Option<String>,
    /// Example value (`x-example`).
    pub example: Option<JsonValue>,
    /// Rules the parameter's own value must satisfy (ANDed).
    pub internals: Vec<Constraint>,
    /// Parameters this one may be matched against (ORed). Empty means unrestricted.
    pub externals: Vec<Parameter>,
}

impl Parameter {
    /// A string literal fragment: its value and its only allowed value are `text`.
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            param_type: Some("string".into()),
            value: Some(ParameterValue::Json(JsonValue::String(text.clone()))),
            internals: vec![Constraint::Enum(vec![JsonValue::String(text)])],
            ..Self::default()
        }
    }

    /// A keyed string parameter restricted to `choices`.
    pub fn string_enum(key: impl Into<String>, choices: &[String]) -> Self {
        Self {
            key: Some(key.into()),
            param_type: Some("string".into()),
            internals: vec![Constraint::Enum(
                choices.iter().cloned().map(JsonValue::String).collect(),
            )],
            ..Self::default()
        }
    }

    /// A `Content-Type` header pinned to `content_type`, matchable only
    /// against that same content type.
    pub fn content_type(content_type: &str) -> Self {
        let choices = [content_type.to_string()];
        Self {
            name: Some("Content-Type".into()),
            value: Some(ParameterValue::Json(JsonValue::String(content_type.into()))),
            externals: vec![Self::string_enum("Content-Type", &choices)],
            ..Self::string_enum("Content-Type", &choices)
        }
    }

    /// Returns a copy with `required` set.
    pub fn with_required(&self, required: bool) -> Self {
        Self {
            required,
            ..self.clone()
        }
    }

    /// Returns a copy with a different `name`.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self.clone()
        }
    }

    /// Whether this parameter is a fragment sequence.
    pub fn is_sequence(&self) -> bool {
        self.format.as_deref() == Some(SEQUENCE_FORMAT)
    }

    /// The fragments of a sequence parameter.
    pub fn fragments(&self) -> &[Parameter] {
        match &self.value {
            Some(ParameterValue::Sequence(fragments)) => fragments,
            _ => &[],
        }
    }

    /// The plain value as JSON (`null` for references, items and sequences).
    pub fn value_json(&self) -> JsonValue {
        match &self.value {
            Some(ParameterValue::Json(value)) => value.clone(),
            _ => JsonValue::Null,
        }
    }

    /// `true` iff `value` satisfies every internal constraint.
    pub fn validate(&self, value: &JsonValue) -> bool {
        self.internals.iter().all(|c| c.evaluate(value))
    }

    /// Constraint compatibility with another parameter.
    ///
    /// Without externals this is always `true`. Otherwise at least one
    /// external must share `param`'s key and accept its value.
    pub fn is_valid(&self, param: &Parameter) -> bool {
        if self.externals.is_empty() {
            return true;
        }

        let value = param.value_json();
        self.externals
            .iter()
            .any(|external| external.key == param.key && external.validate(&value))
    }

    /// Renders the parameter as a JSON-Schema constraint object.
    ///
    /// With `replace_refs`, any unresolved `$ref` left in the output is turned
    /// into a string placeholder named after the referenced definition.
    pub fn json_schema(&self, replace_refs: bool) -> JsonValue {
        let mut set = Map::new();

        if let Some(ty) = self.param_type.as_deref() {
            set.insert("type".into(), JsonValue::String(infer_type(ty)));
        }

        for constraint in &self.internals {
            if let JsonValue::Object(fragment) = constraint.to_constraint_object() {
                set.extend(fragment);
            }
        }

        let mut value_is_default = true;

        if self.is_sequence() {
            let fragments = self
                .fragments()
                .iter()
                .map(|fragment| fragment.json_schema(replace_refs))
                .collect();
            set.insert("x-sequence".into(), JsonValue::Array(fragments));
            value_is_default = false;
        }

        match &self.value {
            Some(ParameterValue::Items(items)) => {
                set.insert("items".into(), items.json_schema(replace_refs));
                value_is_default = false;
            }
            Some(ParameterValue::Reference(reference)) => {
                set.remove("type");
                match reference.value().map(|node| node.to_json()) {
                    Some(JsonValue::String(text)) => {
                        set.insert("type".into(), json!("string"));
                        set.insert("default".into(), JsonValue::String(text));
                    }
                    Some(JsonValue::Object(target)) => set.extend(target),
                    _ => {
                        set.insert("$ref".into(), json!(reference.reference()));
                    }
                }
                value_is_default = false;
            }
            Some(ParameterValue::Sequence(_)) => value_is_default = false,
            Some(ParameterValue::Json(_)) | None => {}
        }

        if let Some(key) = &self.key {
            set.insert("x-title".into(), JsonValue::String(key.clone()));
        }

        if value_is_default {
            if let Some(ParameterValue::Json(value)) = &self.value {
                if !value.is_null() {
                    set.insert("default".into(), value.clone());
                }
            }
        }

        if let Some(format) = &self.format {
            set.insert("format".into(), JsonValue::String(format.clone()));
        }

        let schema = JsonValue::Object(set);
        if replace_refs {
            replace_refs_with_names(schema)
        } else {
            schema
        }
    }

    /// Generates a concrete value for this parameter.
    ///
    /// With `use_default`, a plain non-null value is returned as is. A
    /// supplied `constraints` object replaces the parameter's own schema.
    /// Sequences generate each fragment and concatenate the results.
    pub fn generate(
        &self,
        use_default: bool,
        constraints: Option<JsonValue>,
        generator: &dyn ValueGenerator,
    ) -> JsonValue {
        if use_default {
            if let Some(ParameterValue::Json(value)) = &self.value {
                if !value.is_null() {
                    return value.clone();
                }
            }
        }

        let schema = replace_refs_with_names(constraints.unwrap_or_else(|| self.json_schema(true)));
        generate_from_schema(&schema, generator)
    }
}

/// Generates a value from a constraint object, expanding `x-sequence`.
fn generate_from_schema(schema: &JsonValue, generator: &dyn ValueGenerator) -> JsonValue {
    if let Some(object) = schema.as_object() {
        let is_sequence = object.get("format").and_then(JsonValue::as_str) == Some(SEQUENCE_FORMAT);
        if let (true, Some(JsonValue::Array(items))) = (is_sequence, object.get("x-sequence")) {
            let text: String = items
                .iter()
                .map(|item| match generate_from_schema(item, generator) {
                    JsonValue::String(s) => s,
                    JsonValue::Null => String::new(),
                    other => other.to_string(),
                })
                .collect();
            return JsonValue::String(text);
        }
    }

    generator.generate(schema)
}

/// Maps custom type names onto JSON-Schema types.
pub fn infer_type(ty: &str) -> String {
    if SCHEMA_TYPES.contains(&ty) {
        return ty.to_string();
    }
    if ty.contains("double") || ty.contains("float") {
        return "number".into();
    }
    if ty.contains("date") {
        return "string".into();
    }
    ty.to_string()
}

/// Replaces `{"$ref": "#/definitions/User"}` with `{"type": "string", "default": "User"}`, recursively.
fn replace_refs_with_names(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Array(items) => {
            JsonValue::Array(items.into_iter().map(replace_refs_with_names).collect())
        }
        JsonValue::Object(object) => {
            let mut out: Map<String, JsonValue> = object
                .into_iter()
                .map(|(key, child)| (key, replace_refs_with_names(child)))
                .collect();

            if let Some(JsonValue::String(target)) = out.remove("$ref") {
                let name = target.rsplit('/').next().unwrap_or_default();
                out.insert("default".into(), JsonValue::String(decode_pointer_segment(name)));
                out.insert("type".into(), json!("string"));
            }
            JsonValue::Object(out)
        }
        other => other,
    }
}
