#![deny(missing_docs)]

//! # Context
//!
//! The root of a parsed document: request index, group tree, reference index,
//! environments and metadata.

use crate::model::group::Group;
use crate::model::reference::{Reference, ResolveContext};
use crate::model::request::Request;
use crate::model::schema::Schema;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

/// Contact details from `info.contact`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Contact {
    /// Contact name.
    pub name: Option<String>,
    /// Contact URL.
    pub url: Option<String>,
    /// Contact email.
    pub email: Option<String>,
}

/// License from `info.license`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct License {
    /// License name.
    pub name: Option<String>,
    /// License URL.
    pub url: Option<String>,
}

/// API metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Info {
    /// API title.
    pub title: Option<String>,
    /// API description.
    pub description: Option<String>,
    /// Terms of service.
    pub tos: Option<String>,
    /// Contact details.
    pub contact: Option<Contact>,
    /// License.
    pub license: Option<License>,
    /// API version.
    pub version: Option<String>,
}

/// A named set of variables.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Environment {
    /// Identity used when merging.
    pub id: String,
    /// Display name.
    pub name: Option<String>,
    /// Variable values by name.
    pub variables: IndexMap<String, JsonValue>,
}

/// A parsed document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Context {
    /// The document as a schema tree, the root `$ref`s resolve against.
    pub schema: Schema,
    /// Requests by identifier, in document order.
    pub requests: IndexMap<String, Request>,
    /// The request tree.
    pub group: Group,
    /// Every distinct `$ref` of the document.
    pub references: Vec<Reference>,
    /// Environments.
    pub environments: Vec<Environment>,
    /// API metadata.
    pub info: Info,
}

impl Context {
    /// Looks up a request by identifier.
    pub fn request(&self, id: &str) -> Option<&Request> {
        self.requests.get(id)
    }

    /// Requests in tree order.
    pub fn requests_in_tree_order(&self) -> impl Iterator<Item = &Request> + '_ {
        self.group
            .request_ids()
            .into_iter()
            .filter_map(move |id| self.request(id))
    }

    /// Resolves `reference` against this document.
    pub fn resolve_reference(&self, reference: &Reference) -> Reference {
        reference.resolve(&ResolveContext::schema(&self.schema))
    }

    /// Merges environments sharing an id; others are appended.
    ///
    /// Variables of an incoming environment replace same-named ones.
    pub fn merge_environments(&self, environments: &[Environment]) -> Context {
        let mut merged = self.environments.clone();
        for incoming in environments {
            match merged.iter_mut().find(|env| env.id == incoming.id) {
                Some(existing) => {
                    if incoming.name.is_some() {
                        existing.name = incoming.name.clone();
                    }
                    for (key, value) in &incoming.variables {
                        existing.variables.insert(key.clone(), value.clone());
                    }
                }
                None => merged.push(incoming.clone()),
            }
        }

        Context {
            environments: merged,
            ..self.clone()
        }
    }

    /// Merges `group` into the tree with [`Group::merge_with_group`].
    pub fn merge_group(&self, group: &Group) -> Context {
        Context {
            group: self.group.merge_with_group(group),
            ..self.clone()
        }
    }
}
