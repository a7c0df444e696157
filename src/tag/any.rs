//! The tag that accepts everything.

use crate::error::BuildError;

use super::Tag;

/// Accepts any value, including null.
#[derive(Debug, Clone, PartialEq)]
pub struct AnyTag {
    pub(crate) optional: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AnyBuilder {
    optional: bool,
}

impl AnyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn optional(self) -> Self {
        self.set_optional(true)
    }

    pub fn set_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn build(self) -> Result<Tag, BuildError> {
        Ok(Tag::Any(AnyTag {
            optional: self.optional,
        }))
    }
}
