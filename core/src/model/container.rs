#![deny(missing_docs)]

//! # Parameter Containers
//!
//! Parameters grouped by the channel they travel on, plus the request and
//! response bodies that constrain them.

use crate::model::parameter::Parameter;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Parameters of a request or response, grouped by channel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParameterContainer {
    /// Header parameters, in declaration order.
    pub headers: Vec<Parameter>,
    /// Query parameters, in declaration order.
    pub queries: Vec<Parameter>,
    /// Body and form-data parameters.
    pub body: Vec<Parameter>,
    /// Path parameters.
    pub path: Vec<Parameter>,
}

impl ParameterContainer {
    /// Whether no channel holds a parameter.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.queries.is_empty() && self.body.is_empty() && self.path.is_empty()
    }

    /// Header view keyed by parameter key. Later headers win.
    pub fn headers_set(&self) -> IndexMap<String, Parameter> {
        let mut set = IndexMap::new();
        for header in &self.headers {
            let key = header.key.clone().unwrap_or_default();
            set.insert(key, header.clone());
        }
        set
    }

    /// Renders the query string (`?a=1&b`), or an empty string without queries.
    ///
    /// Keys without a plain value render bare.
    pub fn url_params(&self) -> String {
        if self.queries.is_empty() {
            return String::new();
        }

        let fragments: Vec<String> = self
            .queries
            .iter()
            .map(|param| {
                let key = param.key.clone().unwrap_or_default();
                match param.value_json() {
                    JsonValue::Null => key,
                    JsonValue::String(value) => format!("{key}={value}"),
                    other => format!("{key}={other}"),
                }
            })
            .collect();
        format!("?{}", fragments.join("&"))
    }

    /// Keeps only the parameters compatible with every parameter of `constraints`.
    ///
    /// Compatibility is [`Parameter::is_valid`], a constraint check rather
    /// than a value check.
    pub fn filter(&self, constraints: &[Parameter]) -> ParameterContainer {
        let keep = |params: &[Parameter]| -> Vec<Parameter> {
            params
                .iter()
                .filter(|param| constraints.iter().all(|c| param.is_valid(c)))
                .cloned()
                .collect()
        };

        ParameterContainer {
            headers: keep(&self.headers),
            queries: keep(&self.queries),
            body: keep(&self.body),
            path: keep(&self.path),
        }
    }
}

/// Encoding of a body, derived from its content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    /// `application/x-www-form-urlencoded`.
    UrlEncoded,
    /// `multipart/form-data`.
    FormData,
}

impl BodyType {
    /// Maps a content type onto a body type. Other content types are untyped.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "application/x-www-form-urlencoded" => Some(BodyType::UrlEncoded),
            "multipart/form-data" => Some(BodyType::FormData),
            _ => None,
        }
    }
}

/// One acceptable body shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    /// Body encoding, `None` for raw bodies.
    pub body_type: Option<BodyType>,
    /// Parameters the body pins, typically a `Content-Type` header.
    pub constraints: Vec<Parameter>,
}

impl Body {
    /// Filters `container` down to the parameters usable with this body.
    pub fn filter(&self, container: &ParameterContainer) -> ParameterContainer {
        container.filter(&self.constraints)
    }
}

/// A possible response of a request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    /// Status code as declared (`200`, `default`).
    pub code: String,
    /// Response description.
    pub description: Option<String>,
    /// Raw `examples` object, keyed by content type.
    pub examples: Option<JsonValue>,
    /// Response headers and body schema.
    pub parameters: ParameterContainer,
    /// Producible bodies.
    pub bodies: Vec<Body>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parameter::ParameterValue;
    use serde_json::json;

    fn param(key: &str, value: Option<JsonValue>) -> Parameter {
        Parameter {
            key: Some(key.into()),
            value: value.map(ParameterValue::Json),
            ..Parameter::default()
        }
    }

    #[test]
    fn test_headers_set_last_write_wins() {
        let container = ParameterContainer {
            headers: vec![
                param("Accept", Some(json!("text/plain"))),
                param("X-Id", None),
                param("Accept", Some(json!("application/json"))),
            ],
            ..ParameterContainer::default()
        };

        let set = container.headers_set();
        assert_eq!(set.len(), 2);
        assert_eq!(set["Accept"].value_json(), json!("application/json"));
        assert_eq!(set.keys().next().map(String::as_str), Some("Accept"));
    }

    #[test]
    fn test_url_params() {
        let container = ParameterContainer {
            queries: vec![
                param("page", Some(json!(2))),
                param("verbose", None),
                param("q", Some(json!("cats"))),
            ],
            ..ParameterContainer::default()
        };
        assert_eq!(container.url_params(), "?page=2&verbose&q=cats");
        assert_eq!(ParameterContainer::default().url_params(), "");
    }

    #[test]
    fn test_body_filter_by_content_type() {
        let json_only = Parameter {
            key: Some("payload".into()),
            externals: vec![Parameter::string_enum(
                "Content-Type",
                &["application/json".to_string()],
            )],
            ..Parameter::default()
        };
        let unrestricted = param("X-Trace", None);
        let container = ParameterContainer {
            headers: vec![unrestricted.clone()],
            body: vec![json_only.clone()],
            ..ParameterContainer::default()
        };

        let json_body = Body {
            body_type: None,
            constraints: vec![Parameter::content_type("application/json")],
        };
        let form_body = Body {
            body_type: BodyType::from_content_type("multipart/form-data"),
            constraints: vec![Parameter::content_type("multipart/form-data")],
        };

        let for_json = json_body.filter(&container);
        assert_eq!(for_json.body, vec![json_only]);
        assert_eq!(for_json.headers, vec![unrestricted.clone()]);

        let for_form = form_body.filter(&container);
        assert!(for_form.body.is_empty());
        assert_eq!(for_form.headers, vec![unrestricted]);
        assert_eq!(form_body.body_type, Some(BodyType::FormData));
    }

    #[test]
    fn test_filter_without_constraints_keeps_everything() {
        let container = ParameterContainer {
            path: vec![param("id", None)],
            ..ParameterContainer::default()
        };
        assert_eq!(container.filter(&[]), container);
        assert!(!container.is_empty());
    }
}
