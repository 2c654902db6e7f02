#![deny(missing_docs)]

//! # Document Loading
//!
//! Decodes a text buffer as JSON, falling back to YAML.

use crate::error::{AppError, AppResult};
use serde_json::Value as JsonValue;

/// Decodes `text`, trying JSON first and YAML second.
///
/// Fails with [`AppError::InvalidFormat`] carrying both decoder errors when
/// neither succeeds.
pub fn load_document(text: &str) -> AppResult<JsonValue> {
    let json_error = match serde_json::from_str::<JsonValue>(text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    serde_yaml::from_str::<JsonValue>(text).map_err(|yaml_error| AppError::InvalidFormat {
        json: json_error.to_string(),
        yaml: yaml_error.to_string(),
    })
}

/// Like [`load_document`], but never fails.
pub(crate) fn try_load_document(text: &str) -> Option<JsonValue> {
    load_document(text).ok()
}
