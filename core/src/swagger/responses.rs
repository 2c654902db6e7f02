#![deny(missing_docs)]

//! # Response Extraction

use crate::model::{Parameter, ParameterContainer, Response};
use crate::pointer::{join_pointer, lookup};
use crate::swagger::params::{content_type_externals, extract_bodies, extract_param, RawParam};
use crate::swagger::Scope;
use serde_json::Value as JsonValue;

/// One [`Response`] per declared status code, in declaration order.
///
/// Local response `$ref`s are followed within the document. Dangling and
/// external ones are skipped.
pub(crate) fn extract_responses(
    scope: &Scope<'_>,
    operation: &JsonValue,
    pointer: &str,
    produces: &[String],
) -> Vec<Response> {
    let Some(responses) = operation.get("responses").and_then(JsonValue::as_object) else {
        return Vec::new();
    };

    let externals = content_type_externals(produces);
    let bodies = extract_bodies(produces);
    let base = join_pointer(pointer, "responses");

    let mut extracted = Vec::new();
    for (code, declared) in responses {
        let raw = match declared.get("$ref").and_then(JsonValue::as_str) {
            Some(target) if !target.starts_with('#') => {
                log::debug!("skipping response '{code}': external reference '{target}'");
                continue;
            }
            Some(target) => match lookup(scope.document, target) {
                Some(value) => RawParam {
                    pointer: target.to_string(),
                    value,
                },
                None => {
                    log::debug!("skipping response '{code}': dangling reference '{target}'");
                    continue;
                }
            },
            None => RawParam {
                pointer: join_pointer(&base, code),
                value: declared,
            },
        };

        let body = if raw.value.get("schema").is_some() {
            vec![extract_param(scope, &raw, &externals).with_name("body")]
        } else {
            Vec::new()
        };

        let mut headers: Vec<Parameter> = produces
            .iter()
            .map(|ct| Parameter::content_type(ct))
            .collect();
        if let Some(declared_headers) = raw.value.get("headers").and_then(JsonValue::as_object) {
            let headers_pointer = join_pointer(&raw.pointer, "headers");
            for (name, header) in declared_headers {
                let header = RawParam {
                    pointer: join_pointer(&headers_pointer, name),
                    value: header,
                };
                let mut param = extract_param(scope, &header, &externals);
                param.key = Some(name.clone());
                headers.push(param);
            }
        }

        extracted.push(Response {
            code: code.clone(),
            description: raw
                .value
                .get("description")
                .and_then(JsonValue::as_str)
                .map(str::to_string),
            examples: raw.value.get("examples").filter(|e| !e.is_null()).cloned(),
            parameters: ParameterContainer {
                headers,
                body,
                ..ParameterContainer::default()
            },
            bodies: bodies.clone(),
        });
    }
    extracted
}
