//! References to named groups.

use crate::error::BuildError;

use super::Tag;

/// A by-name reference to a group in the [`GroupRegistry`](crate::GroupRegistry).
///
/// Names are case-insensitive and stored lower-cased. A reference may point to
/// a group that is still being defined, which is how recursive shapes are
/// described.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupTag {
    pub(crate) optional: bool,
    name: String,
}

impl GroupTag {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone)]
pub struct GroupBuilder {
    optional: bool,
    name: String,
}

impl GroupBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            optional: false,
            name: name.into().to_lowercase(),
        }
    }

    /// Marks the reference optional. The referenced group's own flag is not
    /// consulted when the key is absent.
    pub fn optional(self) -> Self {
        self.set_optional(true)
    }

    pub fn set_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn build(self) -> Result<Tag, BuildError> {
        Ok(Tag::Group(GroupTag {
            optional: self.optional,
            name: self.name,
        }))
    }
}
