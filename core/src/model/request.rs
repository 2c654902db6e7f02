#![deny(missing_docs)]

//! # Requests

use crate::model::auth::Auth;
use crate::model::container::{Body, ParameterContainer, Response};
use crate::model::url::Url;

/// One operation of the document, built once per (path, method) pair.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Request {
    /// Parse-scoped identifier, the key of the request index.
    pub id: String,
    /// `operationId`, when declared.
    pub operation_id: Option<String>,
    /// Display name: summary, else operationId, else the path.
    pub name: String,
    /// Operation description, followed by any path-level vendor fields.
    pub description: Option<String>,
    /// Decomposed URL.
    pub url: Url,
    /// HTTP method, lowercase as declared.
    pub method: String,
    /// Parameters by channel.
    pub parameters: ParameterContainer,
    /// Acceptable request bodies.
    pub bodies: Vec<Body>,
    /// Accepted authentication schemes.
    pub auths: Vec<Auth>,
    /// Possible responses, in declaration order.
    pub responses: Vec<Response>,
    /// Timeout in milliseconds. Swagger has no such field.
    pub timeout: Option<u64>,
    /// Declared tags.
    pub tags: Vec<String>,
}
