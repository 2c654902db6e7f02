#![deny(missing_docs)]

//! # Document Validation
//!
//! The validity check run on a decoded document before extraction.
//!
//! The default [`SwaggerValidator`] enforces the structural rules of Swagger
//! 2.0 that extraction relies on:
//! - the root is an object declaring `swagger: "2.0"`;
//! - `info` carries a string `title` and `version`;
//! - `paths` is an object of `/…` paths (or `x-` extensions) mapping to objects;
//! - every `securityDefinitions` entry declares a `type`.

use serde_json::{Map, Value as JsonValue};

const METHODS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

/// Decides whether a decoded document may be parsed.
pub trait DocumentValidator {
    /// Returns a diagnostic when the document is invalid.
    fn validate(&self, document: &JsonValue) -> Result<(), String>;
}

/// Structural Swagger 2.0 checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwaggerValidator;

impl DocumentValidator for SwaggerValidator {
    fn validate(&self, document: &JsonValue) -> Result<(), String> {
        let root = document
            .as_object()
            .ok_or_else(|| "document root must be an object".to_string())?;

        validate_version(root)?;
        validate_info(root)?;
        validate_paths(root)?;
        validate_security_definitions(root)?;
        Ok(())
    }
}

/// Accepts every document.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissiveValidator;

impl DocumentValidator for PermissiveValidator {
    fn validate(&self, _document: &JsonValue) -> Result<(), String> {
        Ok(())
    }
}

fn validate_version(root: &Map<String, JsonValue>) -> Result<(), String> {
    match root.get("swagger") {
        Some(JsonValue::String(version)) if version == "2.0" => Ok(()),
        Some(other) => Err(format!("'swagger' must be \"2.0\", found {other}")),
        None => Err("missing required property 'swagger'".into()),
    }
}

fn validate_info(root: &Map<String, JsonValue>) -> Result<(), String> {
    let info = root
        .get("info")
        .and_then(JsonValue::as_object)
        .ok_or_else(|| "missing required object 'info'".to_string())?;

    for field in ["title", "version"] {
        if !info.get(field).is_some_and(JsonValue::is_string) {
            return Err(format!("'info.{field}' must be a string"));
        }
    }
    Ok(())
}

fn validate_paths(root: &Map<String, JsonValue>) -> Result<(), String> {
    let paths = root
        .get("paths")
        .and_then(JsonValue::as_object)
        .ok_or_else(|| "missing required object 'paths'".to_string())?;

    for (path, item) in paths {
        if path.starts_with("x-") {
            continue;
        }
        if !path.starts_with('/') {
            return Err(format!("path '{path}' must begin with a /"));
        }

        let item = item
            .as_object()
            .ok_or_else(|| format!("path item '{path}' must be an object"))?;

        for method in METHODS {
            if item.get(method).is_some_and(|op| !op.is_object()) {
                return Err(format!("operation '{method} {path}' must be an object"));
            }
        }

        if item.get("parameters").is_some_and(|p| !p.is_array()) {
            return Err(format!("'parameters' of path '{path}' must be an array"));
        }
    }
    Ok(())
}

fn validate_security_definitions(root: &Map<String, JsonValue>) -> Result<(), String> {
    let Some(definitions) = root.get("securityDefinitions") else {
        return Ok(());
    };
    let definitions = definitions
        .as_object()
        .ok_or_else(|| "'securityDefinitions' must be an object".to_string())?;

    for (name, definition) in definitions {
        if !definition.get("type").is_some_and(JsonValue::is_string) {
            return Err(format!("security definition '{name}' must declare a 'type'"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal() -> JsonValue {
        json!({
            "swagger": "2.0",
            "info": { "title": "Pets", "version": "1.0" },
            "paths": {}
        })
    }

    #[test]
    fn test_minimal_document_is_valid() {
        assert_eq!(SwaggerValidator.validate(&minimal()), Ok(()));
    }

    #[test]
    fn test_rejects_other_versions() {
        let mut doc = minimal();
        doc["swagger"] = json!("1.2");
        let err = SwaggerValidator.validate(&doc).unwrap_err();
        assert!(err.contains("2.0"));

        let err = SwaggerValidator.validate(&json!({ "openapi": "3.0.0" })).unwrap_err();
        assert!(err.contains("swagger"));
    }

    #[test]
    fn test_rejects_missing_info_fields() {
        let mut doc = minimal();
        doc["info"] = json!({ "title": "Pets" });
        assert!(SwaggerValidator.validate(&doc).unwrap_err().contains("info.version"));
    }

    #[test]
    fn test_paths_rules() {
        let mut doc = minimal();
        doc["paths"] = json!({ "x-internal": true, "/pets": { "get": {} } });
        assert_eq!(SwaggerValidator.validate(&doc), Ok(()));

        doc["paths"] = json!({ "pets": {} });
        assert!(SwaggerValidator.validate(&doc).unwrap_err().contains("must begin with a /"));

        doc["paths"] = json!({ "/pets": { "get": "nope" } });
        assert!(SwaggerValidator.validate(&doc).is_err());
    }

    #[test]
    fn test_security_definitions_need_a_type() {
        let mut doc = minimal();
        doc["securityDefinitions"] = json!({ "key": { "in": "header" } });
        assert!(SwaggerValidator.validate(&doc).unwrap_err().contains("'key'"));
    }

    #[test]
    fn test_permissive() {
        assert_eq!(PermissiveValidator.validate(&json!(null)), Ok(()));
    }
}
