#![deny(missing_docs)]

//! # Reference Index

use crate::model::{Reference, ResolveContext, Schema};
use indexmap::IndexSet;

/// Every distinct `$ref` of the document, in document order.
///
/// Each is classified from its URI and resolved once against `resolver`;
/// those that cannot be resolved are kept unresolved.
pub(crate) fn extract_references(root: &Schema, resolver: &ResolveContext<'_>) -> Vec<Reference> {
    let uris: IndexSet<&str> = root.references().into_iter().map(Reference::reference).collect();

    let references: Vec<Reference> = uris
        .into_iter()
        .map(|uri| Reference::from_uri(uri).resolve(resolver))
        .collect();

    let unresolved = references.iter().filter(|r| !r.is_resolved()).count();
    if unresolved > 0 {
        log::debug!("{unresolved} of {} references left unresolved", references.len());
    }
    references
}
