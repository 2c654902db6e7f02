#![deny(missing_docs)]

//! # Canonical Model
//!
//! Immutable value types produced by parsing. Transformations return new values.

pub mod auth;
pub mod constraint;
pub mod container;
pub mod context;
pub mod group;
pub mod parameter;
pub mod reference;
pub mod request;
pub mod schema;
pub mod url;

pub use auth::{Auth, AuthKind};
pub use constraint::{Constraint, Pattern};
pub use container::{Body, BodyType, ParameterContainer, Response};
pub use context::{Contact, Context, Environment, Info, License};
pub use group::{Group, GroupChild};
pub use parameter::{Parameter, ParameterValue};
pub use reference::{FileReader, Reference, ReferenceKind, RemoteFetcher, ResolveContext};
pub use request::Request;
pub use schema::{Schema, SchemaContent, SchemaNode};
pub use url::Url;
