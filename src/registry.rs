//! Named groups and their resolution.
//!
//! A [`GroupRegistry`] maps lower-cased group names to the tags they stand
//! for. It is filled once by [`SchemaBuilder`](crate::SchemaBuilder) or the
//! description compiler and never changes afterwards, so it can be shared
//! across threads without locking.

use std::collections::HashMap;
use std::sync::Arc;

use crate::tag::Tag;

/// An immutable map from group name to tag.
///
/// # Example
///
/// ```rust
/// use tagschema::{Schema, Tag, TagKind};
///
/// let schema = Schema::builder(Tag::object().field("pos", Tag::group("Position")))
///     .group(
///         "position",
///         Tag::object().field("x", TagKind::Float).field("y", TagKind::Float),
///     )
///     .build()
///     .unwrap();
///
/// let groups = schema.groups();
/// assert!(groups.get("POSITION").is_some());
/// assert!(groups.get("velocity").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupRegistry {
    groups: HashMap<String, Arc<Tag>>,
}

impl GroupRegistry {
    /// Looks a group up by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&Arc<Tag>> {
        self.groups.get(&name.to_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Registers `tag` under `name`, replacing any previous group of that name.
    pub(crate) fn insert(&mut self, name: &str, tag: Arc<Tag>) -> Option<Arc<Tag>> {
        self.groups.insert(name.to_lowercase(), tag)
    }

    /// Returns the group names referenced from `root` or from any registered
    /// group that are not registered, sorted and deduplicated.
    pub fn unresolved_refs(&self, root: &Tag) -> Vec<String> {
        let mut refs = Vec::new();
        root.collect_group_refs(&mut refs);
        for tag in self.groups.values() {
            tag.collect_group_refs(&mut refs);
        }

        let mut unresolved: Vec<String> = refs
            .into_iter()
            .filter(|name| !self.groups.contains_key(name))
            .collect();
        unresolved.sort();
        unresolved.dedup();
        unresolved
    }

    /// Returns a registered group whose tag, followed through group
    /// references, only ever reaches other group references and loops.
    ///
    /// Validating against such a group would never reach a shape.
    pub(crate) fn find_alias_cycle(&self) -> Option<String> {
        let mut names: Vec<&String> = self.groups.keys().collect();
        names.sort();

        for start in names {
            let mut seen = vec![start.as_str()];
            let mut current = &self.groups[start];
            while let Tag::Group(next) = current.as_ref() {
                if seen.contains(&next.name()) {
                    return Some(start.clone());
                }
                match self.groups.get(next.name()) {
                    Some(tag) => {
                        seen.push(next.name());
                        current = tag;
                    }
                    None => break,
                }
            }
        }
        None
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<GroupRegistry>();
    assert_sync::<GroupRegistry>();
};
