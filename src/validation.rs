//! Validation context for group resolution.
//!
//! [`ValidationContext`] is threaded through every [`Tag::validate`] call so
//! that group references can be resolved without global state.

use crate::registry::GroupRegistry;
use crate::tag::{GroupTag, Tag};

/// Read-only state shared by one validation run.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    groups: &'a GroupRegistry,
}

impl<'a> ValidationContext<'a> {
    pub fn new(groups: &'a GroupRegistry) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &'a GroupRegistry {
        self.groups
    }

    /// Resolves a group reference to the tag it names.
    ///
    /// # Panics
    ///
    /// Panics if the group is not registered. Schemas reject unresolvable
    /// references when they are built, so this indicates a tag validated
    /// against a context it was not built with.
    pub fn resolve(&self, group: &GroupTag) -> &'a Tag {
        match self.groups.get(group.name()) {
            Some(tag) => tag.as_ref(),
            None => panic!(
                "group '{}' is not registered; known groups: {:?}",
                group.name(),
                self.groups.names()
            ),
        }
    }
}
