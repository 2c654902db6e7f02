#![deny(missing_docs)]

//! # URLs
//!
//! Templated URLs decomposed into sequence parameters, and their rendering.

use crate::generator::ValueGenerator;
use crate::model::constraint::Constraint;
use crate::model::parameter::{Parameter, ParameterValue, SEQUENCE_FORMAT};
use regex::Regex;
use serde_json::{json, Value as JsonValue};
use std::sync::OnceLock;

/// Scheme used when a URL declares none.
pub const DEFAULT_SCHEME: &str = "http";

/// A request URL.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Url {
    /// Declared schemes, in preference order.
    pub schemes: Vec<String>,
    /// Host template as a sequence parameter (key `host`).
    pub host: Parameter,
    /// Path template, base path included, as a sequence parameter (key `pathname`).
    pub pathname: Parameter,
}

impl Url {
    /// Picks `scheme` if declared, else the first declared scheme, else `http`.
    pub fn scheme(&self, scheme: Option<&str>) -> &str {
        scheme
            .and_then(|wanted| self.schemes.iter().find(|s| *s == wanted))
            .or_else(|| self.schemes.first())
            .map(String::as_str)
            .unwrap_or(DEFAULT_SCHEME)
    }

    /// Renders a concrete URL. Bound fragments render as `{name}` markers.
    pub fn get_url(&self, scheme: Option<&str>, generator: &dyn ValueGenerator) -> String {
        format!(
            "{}://{}{}",
            self.scheme(scheme),
            format_sequence_param(&self.host, generator),
            format_sequence_param(&self.pathname, generator)
        )
    }

    /// The path template as declared, placeholders included.
    pub fn path_template(&self) -> String {
        sequence_template(&self.pathname)
    }
}

/// Decomposes `template` into a sequence parameter keyed `key`.
///
/// `bind` is asked for every `{name}` placeholder; a returned parameter is
/// used as the bound fragment, otherwise a placeholder fragment keeps the
/// braces text. Bound fragments are always required. A template without
/// placeholders becomes a single literal parameter.
pub fn extract_sequence_param(
    template: &str,
    key: &str,
    mut bind: impl FnMut(&str) -> Option<Parameter>,
) -> Parameter {
    let simple = Parameter {
        key: Some(key.to_string()),
        param_type: Some("string".into()),
        internals: vec![Constraint::Enum(vec![JsonValue::String(template.to_string())])],
        ..Parameter::default()
    };

    // Literal run, `{placeholder}`, trailing literal run.
    static TEMPLATE_GROUP: OnceLock<Regex> = OnceLock::new();
    let pattern = TEMPLATE_GROUP
        .get_or_init(|| Regex::new(r"([^{}]*)(\{[^{}]*\})([^{}]*)").expect("Invalid regex"));

    let mut fragments = Vec::new();
    for captures in pattern.captures_iter(template) {
        let literal = |index: usize| captures.get(index).map(|m| m.as_str()).filter(|s| !s.is_empty());

        if let Some(prefix) = literal(1) {
            fragments.push(Parameter::literal(prefix));
        }

        if let Some(placeholder) = literal(2) {
            let name = &placeholder[1..placeholder.len() - 1];
            let bound = bind(name).unwrap_or_else(|| Parameter {
                key: Some(name.to_string()),
                param_type: Some("string".into()),
                value: Some(ParameterValue::Json(json!(placeholder))),
                internals: vec![Constraint::Enum(vec![json!(placeholder)])],
                ..Parameter::default()
            });
            fragments.push(bound.with_required(true));
        }

        if let Some(suffix) = literal(3) {
            fragments.push(Parameter::literal(suffix));
        }
    }

    if fragments.is_empty() {
        return simple;
    }

    Parameter {
        key: Some(key.to_string()),
        param_type: Some("string".into()),
        format: Some(SEQUENCE_FORMAT.into()),
        value: Some(ParameterValue::Sequence(fragments)),
        ..Parameter::default()
    }
}

/// Renders a parameter for display.
///
/// A plain parameter generates one value, its default acting as the only
/// choice when no enum is declared. A sequence renders its keyed fragments as
/// `{key}` markers and generates the others.
pub fn format_sequence_param(param: &Parameter, generator: &dyn ValueGenerator) -> String {
    let mut schema = param.json_schema(true);

    if !param.is_sequence() {
        if let Some(object) = schema.as_object_mut() {
            if !object.contains_key("enum") {
                if let Some(default) = object.get("default").cloned() {
                    object.insert("enum".into(), JsonValue::Array(vec![default]));
                }
            }
        }
        return as_text(param.generate(false, Some(schema), generator));
    }

    if let Some(JsonValue::Array(items)) = schema.get_mut("x-sequence") {
        for item in items.iter_mut() {
            if let Some(title) = item.get("x-title").and_then(JsonValue::as_str) {
                let marker = format!("{{{title}}}");
                item["enum"] = json!([marker]);
            }
        }
    }
    as_text(param.generate(false, Some(schema), generator))
}

/// Rebuilds the template text of a sequence parameter without generating anything.
///
/// Literal fragments contribute their value and keyed fragments `{key}`.
pub fn sequence_template(param: &Parameter) -> String {
    if !param.is_sequence() {
        return match param.internals.first() {
            Some(Constraint::Enum(values)) => values.first().map(|v| as_text(v.clone())).unwrap_or_default(),
            _ => as_text(param.value_json()),
        };
    }

    param
        .fragments()
        .iter()
        .map(|fragment| match &fragment.key {
            Some(key) => format!("{{{key}}}"),
            None => as_text(fragment.value_json()),
        })
        .collect()
}

fn as_text(value: JsonValue) -> String {
    match value {
        JsonValue::String(text) => text,
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::ExampleGenerator;

    fn unbound(_: &str) -> Option<Parameter> {
        None
    }

    #[test]
    fn test_template_without_placeholders() {
        let param = extract_sequence_param("api.example.com", "host", unbound);
        assert!(!param.is_sequence());
        assert!(param.validate(&json!("api.example.com")));
        assert!(!param.validate(&json!("other.com")));
        assert_eq!(format_sequence_param(&param, &ExampleGenerator), "api.example.com");
    }

    #[test]
    fn test_fragments_alternate() {
        let param = extract_sequence_param("/users/{id}/posts/{post}", "pathname", |name| {
            (name == "id").then(|| Parameter {
                key: Some("id".into()),
                param_type: Some("integer".into()),
                ..Parameter::default()
            })
        });

        let fragments = param.fragments();
        assert_eq!(fragments.len(), 4);
        assert_eq!(fragments[0], Parameter::literal("/users/"));
        assert_eq!(fragments[1].key.as_deref(), Some("id"));
        assert_eq!(fragments[1].param_type.as_deref(), Some("integer"));
        assert!(fragments[1].required);
        assert_eq!(fragments[2], Parameter::literal("/posts/"));
        assert_eq!(fragments[3].value_json(), json!("{post}"));
        assert!(fragments[3].validate(&json!("{post}")));
        assert!(fragments[3].required);
    }

    #[test]
    fn test_sequence_round_trip() {
        for template in [
            "/",
            "/pets",
            "/pets/{id}",
            "{tenant}.example.com",
            "/a/{b}/c/{d}",
            "/{a}{b}",
            "/files/{name}.json",
        ] {
            let param = extract_sequence_param(template, "pathname", unbound);
            assert_eq!(sequence_template(&param), template);
        }
    }

    #[test]
    fn test_format_sequence_uses_markers() {
        let param = extract_sequence_param("/pets/{id}/photo", "pathname", |_| {
            Some(Parameter {
                key: Some("id".into()),
                param_type: Some("integer".into()),
                ..Parameter::default()
            })
        });
        assert_eq!(format_sequence_param(&param, &ExampleGenerator), "/pets/{id}/photo");
    }

    #[test]
    fn test_get_url_scheme_fallbacks() {
        let url = Url {
            schemes: vec!["https".into(), "ws".into()],
            host: extract_sequence_param("api.example.com", "host", unbound),
            pathname: extract_sequence_param("/v1/pets/{id}", "pathname", unbound),
        };

        assert_eq!(
            url.get_url(Some("ws"), &ExampleGenerator),
            "ws://api.example.com/v1/pets/{id}"
        );
        assert_eq!(
            url.get_url(Some("ftp"), &ExampleGenerator),
            "https://api.example.com/v1/pets/{id}"
        );
        assert_eq!(url.path_template(), "/v1/pets/{id}");

        let wanted = String::from("ws");
        let picked = url.scheme(Some(&wanted));
        drop(wanted);
        assert_eq!(picked, "ws");
        assert_eq!(url.scheme(None), "https");

        let bare = Url {
            schemes: Vec::new(),
            ..url
        };
        assert_eq!(bare.scheme(None), "http");
    }
}
