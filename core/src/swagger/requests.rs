#![deny(missing_docs)]

//! # Request Extraction
//!
//! One [`Request`] per path and method of the document.

use crate::error::{AppError, AppResult};
use crate::model::url::extract_sequence_param;
use crate::model::{Request, Url};
use crate::pointer::join_pointer;
use crate::swagger::params::{
    content_types, extract_bodies, extract_param, extract_params, get_parameters,
    merge_path_parameters, RawParam,
};
use crate::swagger::responses::extract_responses;
use crate::swagger::security::extract_auths;
use crate::swagger::Scope;
use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

const METHODS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

/// Builds the request index, keyed by a parse-scoped sequential identifier.
pub(crate) fn extract_requests(scope: &Scope<'_>) -> AppResult<IndexMap<String, Request>> {
    let paths = scope
        .document
        .get("paths")
        .and_then(JsonValue::as_object)
        .ok_or_else(|| AppError::Structural("paths must be an object".into()))?;

    let mut requests = IndexMap::new();
    for (path, item) in paths {
        if path.starts_with("x-") {
            continue;
        }
        let Some(item) = item.as_object() else {
            continue;
        };

        let item_pointer = join_pointer("#/paths", path);
        let base_params = get_parameters(
            scope.document,
            &join_pointer(&item_pointer, "parameters"),
            item.get("parameters"),
        );
        let path_fields = describe_path_fields(item);

        for (method, operation) in item {
            if !METHODS.contains(&method.as_str()) {
                if method != "parameters" && !method.starts_with("x-") {
                    log::debug!("ignoring field '{method}' of path '{path}'");
                }
                continue;
            }

            let op_pointer = join_pointer(&item_pointer, method);
            let own_params = get_parameters(
                scope.document,
                &join_pointer(&op_pointer, "parameters"),
                operation.get("parameters"),
            );
            let params = merge_path_parameters(&base_params, own_params);

            let mut request = create_request(
                scope,
                PathOperation {
                    path,
                    method,
                    operation,
                    pointer: &op_pointer,
                    params: &params,
                },
                path_fields.as_deref(),
            )?;

            let id = (requests.len() + 1).to_string();
            request.id = id.clone();
            requests.insert(id, request);
        }
    }
    Ok(requests)
}

/// One operation and where it sits in the document.
struct PathOperation<'a> {
    path: &'a str,
    method: &'a str,
    operation: &'a JsonValue,
    pointer: &'a str,
    params: &'a [RawParam<'a>],
}

fn create_request(
    scope: &Scope<'_>,
    op: PathOperation<'_>,
    path_fields: Option<&str>,
) -> AppResult<Request> {
    let operation = op.operation;
    let text = |key: &str| operation.get(key).and_then(JsonValue::as_str).map(str::to_string);

    let consumes = content_types(scope, operation, "consumes");
    let produces = content_types(scope, operation, "produces");

    let url = extract_url(scope, op.path, operation, op.params)?;
    let parameters = extract_params(scope, op.params, &consumes);
    let bodies = extract_bodies(&consumes);
    let responses = extract_responses(scope, operation, op.pointer, &produces);
    let auths = extract_auths(scope.document, operation)?;

    let operation_id = text("operationId");
    let name = text("summary")
        .or_else(|| operation_id.clone())
        .unwrap_or_else(|| op.path.to_string());

    let description: Vec<String> = text("description")
        .into_iter()
        .chain(path_fields.map(str::to_string))
        .collect();

    let tags = operation
        .get("tags")
        .and_then(JsonValue::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(JsonValue::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(Request {
        id: String::new(),
        operation_id,
        name,
        description: (!description.is_empty()).then(|| description.join("\n\n")),
        url,
        method: op.method.to_string(),
        parameters,
        bodies,
        auths,
        responses,
        timeout: None,
        tags,
    })
}

/// Decomposes the URL of an operation.
///
/// Schemes come from the operation, else the document, else the default
/// scheme. The base path is normalised to start with `/` and not end with one.
fn extract_url(
    scope: &Scope<'_>,
    path: &str,
    operation: &JsonValue,
    params: &[RawParam<'_>],
) -> AppResult<Url> {
    if !path.starts_with('/') {
        return Err(AppError::Structural("path must begin with a /".into()));
    }

    let strings = |value: &JsonValue, key: &str| -> Option<Vec<String>> {
        value.get(key).and_then(JsonValue::as_array).map(|items| {
            items
                .iter()
                .filter_map(JsonValue::as_str)
                .map(str::to_string)
                .collect()
        })
    };
    let schemes = strings(operation, "schemes")
        .or_else(|| strings(scope.document, "schemes"))
        .unwrap_or_else(|| vec![scope.options.default_scheme.clone()]);

    let host = scope
        .document
        .get("host")
        .and_then(JsonValue::as_str)
        .filter(|h| !h.is_empty())
        .unwrap_or(&scope.options.default_host);

    let base_path = normalize_base_path(
        scope
            .document
            .get("basePath")
            .and_then(JsonValue::as_str)
            .unwrap_or_default(),
    );

    let path_params: Vec<&RawParam<'_>> = params
        .iter()
        .filter(|raw| raw.location() == Some("path"))
        .collect();
    let mut bind = |name: &str| {
        path_params
            .iter()
            .rev()
            .find(|raw| raw.value.get("name").and_then(JsonValue::as_str) == Some(name))
            .map(|raw| extract_param(scope, raw, &[]))
    };

    Ok(Url {
        schemes,
        host: extract_sequence_param(host, "host", &mut bind),
        pathname: extract_sequence_param(&format!("{base_path}{path}"), "pathname", &mut bind),
    })
}

fn normalize_base_path(base_path: &str) -> String {
    if base_path.is_empty() {
        return String::new();
    }
    let mut normalized = if base_path.starts_with('/') {
        base_path.to_string()
    } else {
        format!("/{base_path}")
    };
    if normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Renders the `x-` fields of a path item for the request description.
fn describe_path_fields(item: &Map<String, JsonValue>) -> Option<String> {
    let lines: Vec<String> = item
        .iter()
        .filter(|(key, _)| key.to_lowercase().starts_with("x-"))
        .map(|(key, value)| {
            let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
            format!("\n  - {key}: {rendered}")
        })
        .collect();

    if lines.is_empty() {
        return None;
    }
    Some(format!(
        "The following fields were provided at the path level:{}",
        lines.concat()
    ))
}
