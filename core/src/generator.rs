#![deny(missing_docs)]

//! # Example Values
//!
//! The boundary used to turn a JSON-Schema constraint object into a concrete
//! example value (URL rendering, request previews).

use serde_json::{Map, Value as JsonValue};

/// Produces a value matching a constraint object.
///
/// The constraint object is the output of
/// [`Parameter::json_schema`](crate::model::Parameter::json_schema): `type`,
/// `enum`, `default`, `pattern`, `format` and the numeric/length bounds.
pub trait ValueGenerator {
    /// Generates one value. Must not panic on unexpected shapes.
    fn generate(&self, constraints: &JsonValue) -> JsonValue;
}

/// Deterministic generator: first `enum` member, else `default`, else a
/// placeholder shaped by `type` and `format`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExampleGenerator;

impl ValueGenerator for ExampleGenerator {
    fn generate(&self, constraints: &JsonValue) -> JsonValue {
        let Some(object) = constraints.as_object() else {
            return JsonValue::Null;
        };

        if let Some(first) = object
            .get("enum")
            .and_then(JsonValue::as_array)
            .and_then(|members| members.first())
        {
            return first.clone();
        }

        if let Some(default) = object.get("default") {
            return default.clone();
        }

        match object.get("type").and_then(JsonValue::as_str) {
            Some("integer") => integer_example(object),
            Some("number") => number_example(object),
            Some("boolean") => JsonValue::Bool(true),
            Some("null") => JsonValue::Null,
            Some("array") => array_example(self, object),
            Some("object") => object_example(self, object),
            _ => string_example(object),
        }
    }
}

fn integer_example(object: &Map<String, JsonValue>) -> JsonValue {
    let exclusive = |key: &str| object.get(key).and_then(JsonValue::as_bool) == Some(true);

    let value = match (
        object.get("minimum").and_then(JsonValue::as_f64),
        object.get("maximum").and_then(JsonValue::as_f64),
    ) {
        (Some(min), _) if exclusive("exclusiveMinimum") => min.floor() as i64 + 1,
        (Some(min), _) => min.ceil() as i64,
        (None, Some(max)) if max < 0.0 && exclusive("exclusiveMaximum") => max.ceil() as i64 - 1,
        (None, Some(max)) if max < 0.0 => max.floor() as i64,
        _ => 0,
    };
    JsonValue::from(value)
}

fn number_example(object: &Map<String, JsonValue>) -> JsonValue {
    match object.get("minimum").and_then(JsonValue::as_f64) {
        Some(min) => JsonValue::from(min),
        None => JsonValue::from(0.0),
    }
}

fn array_example(generator: &ExampleGenerator, object: &Map<String, JsonValue>) -> JsonValue {
    let count = object
        .get("minItems")
        .and_then(JsonValue::as_u64)
        .unwrap_or(1) as usize;

    match object.get("items") {
        Some(items) if items.is_object() => {
            JsonValue::Array((0..count).map(|_| generator.generate(items)).collect())
        }
        _ => JsonValue::Array(Vec::new()),
    }
}

fn object_example(generator: &ExampleGenerator, object: &Map<String, JsonValue>) -> JsonValue {
    let properties = object
        .get("properties")
        .and_then(JsonValue::as_object)
        .map(|props| {
            props
                .iter()
                .map(|(key, schema)| (key.clone(), generator.generate(schema)))
                .collect::<Map<String, JsonValue>>()
        })
        .unwrap_or_default();
    JsonValue::Object(properties)
}

fn string_example(object: &Map<String, JsonValue>) -> JsonValue {
    let format = object.get("format").and_then(JsonValue::as_str);
    let base = match format {
        Some("date-time") => "1970-01-01T00:00:00Z".to_string(),
        Some("date") => "1970-01-01".to_string(),
        Some("email") => "user@example.com".to_string(),
        Some("uri") | Some("url") => "http://example.com".to_string(),
        Some("uuid") => "00000000-0000-4000-8000-000000000000".to_string(),
        Some("byte") => String::new(),
        _ => object
            .get("x-title")
            .and_then(JsonValue::as_str)
            .unwrap_or("string")
            .to_string(),
    };

    let min = object.get("minLength").and_then(JsonValue::as_u64).unwrap_or(0) as usize;
    let max = object.get("maxLength").and_then(JsonValue::as_u64).map(|m| m as usize);

    let mut text = base;
    let len = text.chars().count();
    if len < min {
        text.extend(std::iter::repeat('x').take(min - len));
    }
    if let Some(max) = max {
        text = text.chars().take(max).collect();
    }
    JsonValue::String(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_enum_then_default() {
        let generator = ExampleGenerator;
        assert_eq!(
            generator.generate(&json!({ "enum": ["a", "b"], "default": "b" })),
            json!("a")
        );
        assert_eq!(
            generator.generate(&json!({ "type": "integer", "default": 7 })),
            json!(7)
        );
    }

    #[test]
    fn test_numeric_bounds() {
        let generator = ExampleGenerator;
        assert_eq!(
            generator.generate(&json!({ "type": "integer", "minimum": 3 })),
            json!(3)
        );
        assert_eq!(
            generator.generate(&json!({ "type": "integer", "minimum": 3, "exclusiveMinimum": true })),
            json!(4)
        );
        assert_eq!(
            generator.generate(&json!({ "type": "integer", "maximum": -2 })),
            json!(-2)
        );
    }

    #[test]
    fn test_string_lengths_and_titles() {
        let generator = ExampleGenerator;
        assert_eq!(
            generator.generate(&json!({ "type": "string", "x-title": "id" })),
            json!("id")
        );
        assert_eq!(
            generator.generate(&json!({ "type": "string", "minLength": 8 })),
            json!("stringxx")
        );
        assert_eq!(
            generator.generate(&json!({ "type": "string", "maxLength": 3 })),
            json!("str")
        );
        assert_eq!(
            generator.generate(&json!({ "type": "string", "format": "email" })),
            json!("user@example.com")
        );
    }

    #[test]
    fn test_structures() {
        let generator = ExampleGenerator;
        assert_eq!(
            generator.generate(&json!({
                "type": "array", "minItems": 2, "items": { "type": "boolean" }
            })),
            json!([true, true])
        );
        assert_eq!(
            generator.generate(&json!({
                "type": "object",
                "properties": { "n": { "type": "number" } }
            })),
            json!({ "n": 0.0 })
        );
        assert_eq!(generator.generate(&json!("not a schema")), JsonValue::Null);
    }
}
