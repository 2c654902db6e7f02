#![deny(missing_docs)]

//! # Parameter Extraction
//!
//! Declared parameter objects to [`Parameter`] values, with their constraints.

use crate::model::{
    Body, BodyType, Constraint, Parameter, ParameterContainer, ParameterValue, Reference,
};
use crate::pointer::{join_pointer, lookup};
use crate::swagger::Scope;
use serde_json::Value as JsonValue;

/// Header carrying the body content type.
pub(crate) const CONTENT_TYPE: &str = "Content-Type";

/// A declared parameter object and its JSON pointer in the document.
#[derive(Debug, Clone)]
pub(crate) struct RawParam<'a> {
    pub(crate) pointer: String,
    pub(crate) value: &'a JsonValue,
}

impl RawParam<'_> {
    fn name(&self) -> Option<&str> {
        self.value.get("name").and_then(JsonValue::as_str)
    }

    pub(crate) fn location(&self) -> Option<&str> {
        self.value.get("in").and_then(JsonValue::as_str)
    }
}

/// Lists the parameter objects of `list` (located at `pointer`).
///
/// `$ref` entries are replaced by the object they point to. Entries whose
/// reference does not lead to a local object are dropped.
pub(crate) fn get_parameters<'a>(
    document: &'a JsonValue,
    pointer: &str,
    list: Option<&'a JsonValue>,
) -> Vec<RawParam<'a>> {
    let Some(items) = list.and_then(JsonValue::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item.get("$ref").and_then(JsonValue::as_str) {
            Some(target) => {
                let found = target
                    .starts_with('#')
                    .then(|| lookup(document, target))
                    .flatten()
                    .filter(|value| value.is_object());
                if found.is_none() {
                    log::debug!("dropping parameter reference '{target}'");
                }
                found.map(|value| RawParam {
                    pointer: target.to_string(),
                    value,
                })
            }
            None => Some(RawParam {
                pointer: join_pointer(pointer, &index.to_string()),
                value: item,
            }),
        })
        .collect()
}

/// Applies operation parameters over path-level ones.
///
/// An operation parameter replaces every path-level parameter of the same
/// name in place; the others are appended.
pub(crate) fn merge_path_parameters<'a>(
    base: &[RawParam<'a>],
    operation: Vec<RawParam<'a>>,
) -> Vec<RawParam<'a>> {
    let mut merged = base.to_vec();
    for param in operation {
        let mut used = false;
        for slot in merged.iter_mut().take(base.len()) {
            if slot.name().is_some() && slot.name() == param.name() {
                *slot = param.clone();
                used = true;
            }
        }
        if !used {
            merged.push(param);
        }
    }
    merged
}

/// Content types from the operation's `key` (`consumes`/`produces`), else the document's.
pub(crate) fn content_types(scope: &Scope<'_>, operation: &JsonValue, key: &str) -> Vec<String> {
    let declared = |value: &JsonValue| -> Vec<String> {
        value
            .get(key)
            .and_then(JsonValue::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(JsonValue::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };

    let own = declared(operation);
    if own.is_empty() {
        declared(scope.document)
    } else {
        own
    }
}

/// The `Content-Type` parameter every extracted parameter may be matched against.
///
/// Empty when no content type applies.
pub(crate) fn content_type_externals(content_types: &[String]) -> Vec<Parameter> {
    if content_types.is_empty() {
        return Vec::new();
    }
    vec![Parameter::string_enum(CONTENT_TYPE, content_types)]
}

/// Body parameter pinning one content type.
fn content_type_constraint(content_type: &str) -> Parameter {
    Parameter {
        key: Some(CONTENT_TYPE.into()),
        param_type: Some("string".into()),
        value: Some(ParameterValue::Json(JsonValue::String(content_type.into()))),
        ..Parameter::default()
    }
}

/// One body per content type.
pub(crate) fn extract_bodies(content_types: &[String]) -> Vec<Body> {
    content_types
        .iter()
        .map(|content_type| Body {
            body_type: BodyType::from_content_type(content_type),
            constraints: vec![content_type_constraint(content_type)],
        })
        .collect()
}

/// Groups the operation parameters by channel.
///
/// A `Content-Type` header is added for each consumable content type.
/// Parameters with an unknown `in` are ignored.
pub(crate) fn extract_params(
    scope: &Scope<'_>,
    params: &[RawParam<'_>],
    content_types: &[String],
) -> ParameterContainer {
    let externals = content_type_externals(content_types);
    let mut container = ParameterContainer {
        headers: content_types
            .iter()
            .map(|ct| Parameter::content_type(ct))
            .collect(),
        ..ParameterContainer::default()
    };

    for raw in params {
        let channel = match raw.location() {
            Some("query") => &mut container.queries,
            Some("header") => &mut container.headers,
            Some("formData") | Some("body") => &mut container.body,
            Some("path") => &mut container.path,
            _ => continue,
        };
        channel.push(extract_param(scope, raw, &externals));
    }
    container
}

/// Converts one declared parameter object.
///
/// Constraint keywords become internals in declaration order. A `schema`
/// turns the parameter into a `reference` parameter keyed by its name, or
/// `schema` when unnamed; arrays recurse
/// into `items`; `x-use-with` replaces `externals` with its own parameters,
/// which never get externals themselves.
pub(crate) fn extract_param(
    scope: &Scope<'_>,
    raw: &RawParam<'_>,
    externals: &[Parameter],
) -> Parameter {
    let param = raw.value;
    let text = |key: &str| param.get(key).and_then(JsonValue::as_str).map(str::to_string);

    let mut key = text("name");
    let mut param_type = text("type");
    let mut format = text("format").or_else(|| text("x-format"));
    let mut value = param
        .get("default")
        .filter(|v| !v.is_null())
        .cloned()
        .map(ParameterValue::Json);

    let mut internals = Vec::new();
    if let Some(object) = param.as_object() {
        for (keyword, rule) in object {
            let constraint = match keyword.as_str() {
                "exclusiveMaximum" => {
                    Constraint::from_exclusive_flag(keyword, rule, object.get("maximum"))
                }
                "exclusiveMinimum" => {
                    Constraint::from_exclusive_flag(keyword, rule, object.get("minimum"))
                }
                _ => Constraint::from_keyword(keyword, rule),
            };
            internals.extend(constraint);
        }
    }

    if let Some(schema) = param.get("schema").filter(|s| s.is_object()) {
        let target = match schema.get("$ref").and_then(JsonValue::as_str) {
            Some(target) => target.to_string(),
            None => join_pointer(&raw.pointer, "schema"),
        };
        let reference = Reference::schema(target);
        let reference = match scope.options.resolve_depth {
            Some(depth) => reference.resolve_to_depth(depth, &scope.resolver),
            None => reference,
        };
        value = Some(ParameterValue::Reference(reference));
        param_type = Some("reference".into());
        key = key.or_else(|| Some("schema".into()));
    }

    if param_type.as_deref() == Some("array") {
        value = param.get("items").map(|items| {
            let items = RawParam {
                pointer: join_pointer(&raw.pointer, "items"),
                value: items,
            };
            ParameterValue::Items(Box::new(extract_param(scope, &items, externals)))
        });
        format = text("collectionFormat");
    }

    let externals = match param.get("x-use-with").and_then(JsonValue::as_array) {
        Some(alternatives) => {
            let base = join_pointer(&raw.pointer, "x-use-with");
            alternatives
                .iter()
                .enumerate()
                .map(|(index, alternative)| {
                    let alternative = RawParam {
                        pointer: join_pointer(&base, &index.to_string()),
                        value: alternative,
                    };
                    extract_param(scope, &alternative, &[])
                })
                .collect()
        }
        None => externals.to_vec(),
    };

    Parameter {
        key,
        name: text("name"),
        value,
        param_type,
        format,
        required: param.get("required").and_then(JsonValue::as_bool).unwrap_or(false),
        description: text("description"),
        example: param.get("x-example").filter(|v| !v.is_null()).cloned(),
        internals,
        externals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ResolveContext, Schema};
    use crate::swagger::ParserOptions;
    use serde_json::json;

    fn with_scope<T>(document: &JsonValue, options: &ParserOptions, f: impl FnOnce(&Scope<'_>) -> T) -> T {
        let root = Schema::from_value(document);
        let scope = Scope {
            document,
            resolver: ResolveContext::schema(&root),
            options,
        };
        f(&scope)
    }

    fn raw(value: &JsonValue) -> RawParam<'_> {
        RawParam {
            pointer: "#/paths/~1pets/get/parameters/0".into(),
            value,
        }
    }

    #[test]
    fn test_constraints_in_declaration_order() {
        let doc = json!({});
        let declared = json!({
            "name": "limit", "in": "query", "type": "integer", "required": true,
            "maximum": 100, "exclusiveMaximum": true, "minimum": 1, "multipleOf": 5,
            "default": 10, "x-example": 20, "description": "page size"
        });

        let param = with_scope(&doc, &ParserOptions::default(), |scope| {
            extract_param(scope, &raw(&declared), &[])
        });

        assert_eq!(
            param.internals,
            vec![
                Constraint::Maximum(100.0),
                Constraint::ExclusiveMaximum(100.0),
                Constraint::Minimum(1.0),
                Constraint::MultipleOf(5.0),
            ]
        );
        assert_eq!(param.key.as_deref(), Some("limit"));
        assert!(param.required);
        assert_eq!(param.value_json(), json!(10));
        assert_eq!(param.example, Some(json!(20)));
        assert_eq!(param.description.as_deref(), Some("page size"));
        assert!(param.validate(&json!(50)));
        assert!(!param.validate(&json!(100)));
        assert!(!param.validate(&json!(7)));
    }

    #[test]
    fn test_false_exclusive_flag_adds_nothing() {
        let doc = json!({});
        let declared = json!({ "name": "n", "type": "number", "minimum": 0, "exclusiveMinimum": false });
        let param = with_scope(&doc, &ParserOptions::default(), |scope| {
            extract_param(scope, &raw(&declared), &[])
        });
        assert_eq!(param.internals, vec![Constraint::Minimum(0.0)]);
    }

    #[test]
    fn test_schema_parameter_becomes_reference() {
        let doc = json!({ "definitions": { "Pet": { "type": "object" } } });
        let declared = json!({ "name": "pet", "in": "body", "schema": { "$ref": "#/definitions/Pet" } });

        let lazy = with_scope(&doc, &ParserOptions::default(), |scope| {
            extract_param(scope, &raw(&declared), &[])
        });
        assert_eq!(lazy.key.as_deref(), Some("pet"));
        assert_eq!(lazy.name.as_deref(), Some("pet"));
        assert_eq!(lazy.param_type.as_deref(), Some("reference"));
        match &lazy.value {
            Some(ParameterValue::Reference(r)) => {
                assert_eq!(r.reference(), "#/definitions/Pet");
                assert!(!r.is_resolved());
            }
            other => panic!("unexpected value {other:?}"),
        }

        let options = ParserOptions {
            resolve_depth: Some(1),
            ..ParserOptions::default()
        };
        let eager = with_scope(&doc, &options, |scope| extract_param(scope, &raw(&declared), &[]));
        assert_eq!(
            eager.json_schema(false),
            json!({ "type": "object", "x-title": "pet" })
        );
    }

    #[test]
    fn test_unnamed_schema_parameter_is_keyed_schema() {
        let doc = json!({});
        let declared = json!({ "in": "body", "schema": { "type": "object" } });
        let param = with_scope(&doc, &ParserOptions::default(), |scope| {
            extract_param(scope, &raw(&declared), &[])
        });
        assert_eq!(param.key.as_deref(), Some("schema"));
        assert_eq!(param.name, None);
        assert_eq!(param.json_schema(false)["x-title"], json!("schema"));
    }

    #[test]
    fn test_inline_schema_points_at_itself() {
        let doc = json!({
            "paths": { "/pets": { "get": { "parameters": [
                { "name": "pet", "in": "body", "schema": { "type": "string" } }
            ] } } }
        });
        let declared = &doc["paths"]["/pets"]["get"]["parameters"][0];
        let options = ParserOptions {
            resolve_depth: Some(0),
            ..ParserOptions::default()
        };
        let param = with_scope(&doc, &options, |scope| extract_param(scope, &raw(declared), &[]));
        match &param.value {
            Some(ParameterValue::Reference(r)) => {
                assert_eq!(r.reference(), "#/paths/~1pets/get/parameters/0/schema");
                assert!(r.is_resolved());
            }
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn test_array_items_and_collection_format() {
        let doc = json!({});
        let declared = json!({
            "name": "ids", "in": "query", "type": "array", "collectionFormat": "csv",
            "items": { "type": "integer", "minimum": 1 }
        });
        let param = with_scope(&doc, &ParserOptions::default(), |scope| {
            extract_param(scope, &raw(&declared), &[])
        });
        assert_eq!(param.format.as_deref(), Some("csv"));
        match &param.value {
            Some(ParameterValue::Items(items)) => {
                assert_eq!(items.param_type.as_deref(), Some("integer"));
                assert_eq!(items.internals, vec![Constraint::Minimum(1.0)]);
            }
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn test_use_with_overrides_externals() {
        let doc = json!({});
        let declared = json!({
            "name": "token", "in": "query", "type": "string",
            "x-use-with": [ { "name": "mode", "type": "string", "enum": ["a"] } ]
        });
        let inherited = content_type_externals(&["application/json".to_string()]);
        let param = with_scope(&doc, &ParserOptions::default(), |scope| {
            extract_param(scope, &raw(&declared), &inherited)
        });
        assert_eq!(param.externals.len(), 1);
        assert_eq!(param.externals[0].key.as_deref(), Some("mode"));
        assert!(param.externals[0].externals.is_empty());
    }

    #[test]
    fn test_parameter_refs_and_path_merge() {
        let doc = json!({
            "parameters": { "Limit": { "name": "limit", "in": "query", "type": "integer" } },
            "paths": { "/pets": {
                "parameters": [
                    { "name": "id", "in": "query", "type": "string" },
                    { "$ref": "#/parameters/Limit" },
                    { "$ref": "#/parameters/Missing" }
                ],
                "get": { "parameters": [
                    { "name": "id", "in": "query", "type": "integer" },
                    { "name": "sort", "in": "query", "type": "string" }
                ] }
            } }
        });

        let base = get_parameters(&doc, "#/paths/~1pets/parameters", doc.pointer("/paths/~1pets/parameters"));
        assert_eq!(base.len(), 2);
        assert_eq!(base[1].pointer, "#/parameters/Limit");

        let own = get_parameters(
            &doc,
            "#/paths/~1pets/get/parameters",
            doc.pointer("/paths/~1pets/get/parameters"),
        );
        let merged = merge_path_parameters(&base, own);
        let summary: Vec<(Option<&str>, Option<&str>)> = merged
            .iter()
            .map(|p| (p.name(), p.value.get("type").and_then(JsonValue::as_str)))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Some("id"), Some("integer")),
                (Some("limit"), Some("integer")),
                (Some("sort"), Some("string")),
            ]
        );
        assert_eq!(merged[0].pointer, "#/paths/~1pets/get/parameters/0");
    }

    #[test]
    fn test_extract_params_by_channel() {
        let doc = json!({ "consumes": ["application/json"] });
        let declared = json!([
            { "name": "X-Id", "in": "header", "type": "string" },
            { "name": "q", "in": "query", "type": "string" },
            { "name": "id", "in": "path", "type": "string", "required": true },
            { "name": "file", "in": "formData", "type": "file" },
            { "name": "odd", "in": "cookie", "type": "string" }
        ]);
        let params = get_parameters(&doc, "#/x", Some(&declared));

        let container = with_scope(&doc, &ParserOptions::default(), |scope| {
            let types = content_types(scope, &json!({}), "consumes");
            extract_params(scope, &params, &types)
        });

        assert_eq!(container.headers.len(), 2);
        assert_eq!(container.headers[0], Parameter::content_type("application/json"));
        assert_eq!(container.queries.len(), 1);
        assert_eq!(container.path.len(), 1);
        assert_eq!(container.body.len(), 1);
        assert_eq!(
            container.queries[0].externals,
            vec![Parameter::string_enum(CONTENT_TYPE, &["application/json".to_string()])]
        );
    }

    #[test]
    fn test_bodies_per_content_type() {
        let bodies = extract_bodies(&[
            "application/x-www-form-urlencoded".to_string(),
            "application/json".to_string(),
        ]);
        assert_eq!(bodies[0].body_type, Some(BodyType::UrlEncoded));
        assert_eq!(bodies[1].body_type, None);
        assert_eq!(bodies[1].constraints[0].value_json(), json!("application/json"));
    }
}
