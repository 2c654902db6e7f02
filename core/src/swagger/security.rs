#![deny(missing_docs)]

//! # Security Extraction
//!
//! Resolves the effective security requirements of an operation into [`Auth`] values.

use crate::error::{AppError, AppResult};
use crate::model::{Auth, AuthKind};
use serde_json::{Map, Value as JsonValue};

/// Builds the auths of `operation`.
///
/// The operation's own `security` wins over the document-wide one, an empty
/// list meaning no auth. Requirements naming undeclared schemes are skipped,
/// as are schemes of unknown type. Requiring security without any
/// `securityDefinitions` is fatal.
pub(crate) fn extract_auths(document: &JsonValue, operation: &JsonValue) -> AppResult<Vec<Auth>> {
    let requirements = operation
        .get("security")
        .or_else(|| document.get("security"))
        .and_then(JsonValue::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    if requirements.is_empty() {
        return Ok(Vec::new());
    }

    let definitions = document
        .get("securityDefinitions")
        .and_then(JsonValue::as_object)
        .ok_or_else(|| {
            AppError::Structural("expected a security definition to exist".into())
        })?;

    let mut auths = Vec::new();
    for requirement in requirements.iter().filter_map(JsonValue::as_object) {
        for (name, scopes) in requirement {
            let Some(definition) = definitions.get(name).and_then(JsonValue::as_object) else {
                continue;
            };
            let scopes = scopes
                .as_array()
                .map(|items| {
                    items
                        .iter()
                        .filter_map(JsonValue::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();

            match auth_kind(definition) {
                Some(kind) => auths.push(Auth {
                    name: name.clone(),
                    description: text(definition, "description"),
                    scopes,
                    kind,
                }),
                None => log::warn!("skipping security scheme '{name}' of unknown type"),
            }
        }
    }
    Ok(auths)
}

fn text(definition: &Map<String, JsonValue>, key: &str) -> Option<String> {
    definition.get(key).and_then(JsonValue::as_str).map(str::to_string)
}

fn auth_kind(definition: &Map<String, JsonValue>) -> Option<AuthKind> {
    let kind = match definition.get("type").and_then(JsonValue::as_str)? {
        "basic" => AuthKind::Basic {
            username: text(definition, "x-username"),
            password: text(definition, "x-password"),
        },
        "apiKey" => AuthKind::ApiKey {
            location: text(definition, "in").unwrap_or_default(),
            name: text(definition, "name").unwrap_or_default(),
        },
        "oauth2" => AuthKind::OAuth2 {
            flow: text(definition, "flow"),
            authorization_url: text(definition, "authorizationUrl"),
            token_url: text(definition, "tokenUrl"),
        },
        _ => return None,
    };
    Some(kind)
}
