#![deny(missing_docs)]

//! # API Flow Core
//!
//! Converts Swagger 2.0 documents into a canonical, immutable API model:
//! requests with decomposed URLs, constrained parameters, auths and
//! responses, organised in a group tree, with `$ref`s resolvable on demand.

/// Shared error types.
pub mod error;

/// JSON pointer helpers.
pub mod pointer;

/// Example value generation.
pub mod generator;

/// The canonical model.
pub mod model;

/// Swagger 2.0 parsing.
pub mod swagger;

pub use error::{AppError, AppResult};
pub use generator::{ExampleGenerator, ValueGenerator};
pub use model::{
    Auth, AuthKind, Body, BodyType, Constraint, Context, FileReader, Group, GroupChild, Parameter,
    ParameterContainer, ParameterValue, Reference, ReferenceKind, RemoteFetcher, Request,
    ResolveContext, Response, Schema, SchemaNode, Url,
};
pub use swagger::{
    DocumentValidator, ParserOptions, PermissiveValidator, SwaggerParser, SwaggerValidator,
};
