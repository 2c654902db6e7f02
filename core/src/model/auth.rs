#![deny(missing_docs)]

//! # Authentication
//!
//! Declared authentication schemes, one value per scheme an operation accepts.

/// Scheme-specific fields.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthKind {
    /// HTTP basic authentication.
    Basic {
        /// `x-username` extension value.
        username: Option<String>,
        /// `x-password` extension value.
        password: Option<String>,
    },
    /// A key sent in a header or query parameter.
    ApiKey {
        /// Where the key travels (`header` or `query`).
        location: String,
        /// Header or query parameter name.
        name: String,
    },
    /// OAuth 2.0.
    OAuth2 {
        /// Grant flow (`implicit`, `password`, `application`, `accessCode`).
        flow: Option<String>,
        /// Authorization endpoint.
        authorization_url: Option<String>,
        /// Token endpoint.
        token_url: Option<String>,
    },
}

impl AuthKind {
    /// The Swagger `type` string of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            AuthKind::Basic { .. } => "basic",
            AuthKind::ApiKey { .. } => "apiKey",
            AuthKind::OAuth2 { .. } => "oauth2",
        }
    }
}

/// An authentication scheme usable with a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Auth {
    /// Name of the scheme in `securityDefinitions`.
    pub name: String,
    /// Scheme description.
    pub description: Option<String>,
    /// Scopes granted by the operation's security requirement.
    pub scopes: Vec<String>,
    /// Scheme-specific fields.
    pub kind: AuthKind,
}
