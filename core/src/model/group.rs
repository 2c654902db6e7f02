#![deny(missing_docs)]

//! # Groups
//!
//! The request tree. Leaves hold request identifiers; the requests themselves
//! live in the [`Context`](crate::model::Context) index.

use indexmap::IndexMap;

/// A child of a group.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupChild {
    /// A nested group.
    Group(Group),
    /// A request identifier.
    Request(String),
}

/// A named node of the request tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    /// Optional identifier.
    pub id: Option<String>,
    /// Display name (tag, path segment or `root`).
    pub name: String,
    /// Children in insertion order.
    pub children: IndexMap<String, GroupChild>,
}

impl Group {
    /// An empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Direct child lookup.
    pub fn child(&self, key: &str) -> Option<&GroupChild> {
        self.children.get(key)
    }

    /// Walks nested groups by key.
    pub fn get_in(&self, keys: &[&str]) -> Option<&GroupChild> {
        let (last, parents) = keys.split_last()?;
        let mut current = self;
        for key in parents {
            current = match current.child(key)? {
                GroupChild::Group(group) => group,
                GroupChild::Request(_) => return None,
            };
        }
        current.child(last)
    }

    /// Request identifiers of every leaf, depth first.
    pub fn request_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for child in self.children.values() {
            match child {
                GroupChild::Group(group) => ids.extend(group.request_ids()),
                GroupChild::Request(id) => ids.push(id.as_str()),
            }
        }
        ids
    }

    /// Adds `group` as the child named after it.
    ///
    /// An existing subgroup of that name is deep-merged with it. Wherever both
    /// trees hold something under the same key and they are not both groups,
    /// the existing entry is kept.
    pub fn merge_with_group(&self, group: &Group) -> Group {
        let mut merged = self.clone();
        match self.children.get(&group.name) {
            Some(GroupChild::Group(existing)) => {
                merged
                    .children
                    .insert(group.name.clone(), GroupChild::Group(existing.merge_deep(group)));
            }
            Some(GroupChild::Request(_)) => {}
            None => {
                merged
                    .children
                    .insert(group.name.clone(), GroupChild::Group(group.clone()));
            }
        }
        merged
    }

    fn merge_deep(&self, other: &Group) -> Group {
        let mut merged = self.clone();
        for (key, incoming) in &other.children {
            let next = match (merged.children.get(key), incoming) {
                (Some(GroupChild::Group(mine)), GroupChild::Group(theirs)) => {
                    GroupChild::Group(mine.merge_deep(theirs))
                }
                (Some(_), _) => continue,
                (None, child) => child.clone(),
            };
            merged.children.insert(key.clone(), next);
        }
        merged
    }
}
