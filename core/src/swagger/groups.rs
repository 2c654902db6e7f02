#![deny(missing_docs)]

//! # Group Tree Construction
//!
//! Partitions the request index into a [`Group`] tree, by first tag when
//! enough requests are tagged, by path segment otherwise.

use crate::model::{Group, GroupChild, Request};
use indexmap::IndexMap;

/// Group name of requests without a tag.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Builds the request tree under `root`.
///
/// Only when the share of tagged requests strictly exceeds `threshold` is the
/// tree one level of groups named after each request's first tag. Otherwise,
/// including at exactly `threshold`, it follows path segments.
pub fn create_group_tree(root: Group, requests: &IndexMap<String, Request>, threshold: f64) -> Group {
    let tagged = requests.values().filter(|r| !r.tags.is_empty()).count();

    if tagged as f64 > requests.len() as f64 * threshold {
        log::debug!("grouping {} requests by tag ({tagged} tagged)", requests.len());
        create_tag_group_tree(root, requests)
    } else {
        log::debug!("grouping {} requests by path ({tagged} tagged)", requests.len());
        create_path_group_tree(root, requests)
    }
}

fn create_tag_group_tree(root: Group, requests: &IndexMap<String, Request>) -> Group {
    let mut groups: IndexMap<String, GroupChild> = IndexMap::new();
    for (id, request) in requests {
        let tag = request.tags.first().map(String::as_str).unwrap_or(UNCATEGORIZED);
        let entry = groups
            .entry(tag.to_string())
            .or_insert_with(|| GroupChild::Group(Group::new(tag)));
        if let GroupChild::Group(group) = entry {
            group
                .children
                .insert(id.clone(), GroupChild::Request(id.clone()));
        }
    }

    Group {
        children: groups,
        ..root
    }
}

fn create_path_group_tree(root: Group, requests: &IndexMap<String, Request>) -> Group {
    let mut tree = root;
    for (id, request) in requests {
        let path = request.url.path_template();
        let trimmed = path.strip_prefix('/').unwrap_or(&path);
        let segments: Vec<String> = trimmed.split('/').map(|node| format!("/{node}")).collect();
        insert_leaf(&mut tree, &segments, &request.method, id);
    }
    tree
}

/// Creates the groups along `segments` as needed and stores `id` under `method` in the deepest one.
fn insert_leaf(group: &mut Group, segments: &[String], method: &str, id: &str) {
    let Some((first, rest)) = segments.split_first() else {
        group
            .children
            .insert(method.to_string(), GroupChild::Request(id.to_string()));
        return;
    };

    let child = group
        .children
        .entry(first.clone())
        .or_insert_with(|| GroupChild::Group(Group::new(first.clone())));
    if let GroupChild::Group(subgroup) = child {
        insert_leaf(subgroup, rest, method, id);
    }
}
