//! Discriminator-driven conditional sets.
//!
//! A conditional set inspects one key of its enclosing object (the
//! discriminator) and, depending on its value, demands that another key (the
//! destination) matches a tag. The set never looks outside that object.
//!
//! ```rust
//! use tagschema::{Alternative, Schema, Tag, TagKind};
//! use serde_json::json;
//!
//! let entry = Tag::object()
//!     .field("type", Tag::enumeration(["ARR", "STR"]))
//!     .conditional(
//!         "type",
//!         [
//!             Alternative::new("ARR", "data", Tag::array().element(TagKind::Str)),
//!             Alternative::new("STR", "data", Tag::object().field("max_len", TagKind::UInt))
//!                 .not_required(),
//!         ],
//!     );
//! let schema = Schema::builder(entry).build().unwrap();
//!
//! assert!(schema.check(&json!({"type": "arr", "data": ["a", "b"]})).is_valid());
//! assert!(!schema.check(&json!({"type": "ARR"})).is_valid());
//! assert!(schema.check(&json!({"type": "STR"})).is_valid());
//! ```

use std::sync::Arc;

use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{BuildError, CheckError};
use crate::path::JsonPath;
use crate::validation::ValidationContext;
use crate::value;
use crate::ValidationResult;

use super::{failure, IntoTag, Tag, TagKind};

/// One unbuilt branch of a conditional set.
#[derive(Debug, Clone)]
pub struct Alternative {
    reference_value: String,
    destination_key: String,
    tag: Result<Arc<Tag>, BuildError>,
    required: bool,
}

impl Alternative {
    /// When the discriminator equals `reference_value` (ignoring case), the key
    /// `destination_key` must match `tag`.
    pub fn new(
        reference_value: impl Into<String>,
        destination_key: impl Into<String>,
        tag: impl IntoTag,
    ) -> Self {
        Self {
            reference_value: reference_value.into(),
            destination_key: destination_key.into(),
            tag: tag.into_tag(),
            required: true,
        }
    }

    /// Allows the destination to be absent when this branch matches.
    pub fn not_required(self) -> Self {
        self.set_required(false)
    }

    pub fn set_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub(crate) fn build(self, discriminator: &str) -> Result<Branch, BuildError> {
        let tag = self.tag.map_err(|source| BuildError::Branch {
            discriminator: discriminator.to_string(),
            reference_value: self.reference_value.clone(),
            source: Box::new(source),
        })?;
        Ok(Branch {
            reference_value: self.reference_value,
            destination_key: self.destination_key,
            tag,
            required: self.required,
        })
    }
}

/// A built branch of a [`ConditionalSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    reference_value: String,
    destination_key: String,
    tag: Arc<Tag>,
    required: bool,
}

impl Branch {
    pub fn reference_value(&self) -> &str {
        &self.reference_value
    }

    pub fn destination_key(&self) -> &str {
        &self.destination_key
    }

    pub fn tag(&self) -> &Arc<Tag> {
        &self.tag
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    fn matches(&self, discriminator_value: &str) -> bool {
        self.reference_value.to_lowercase() == discriminator_value.to_lowercase()
    }
}

/// Branches selected by the value of one discriminator key.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalSet {
    discriminator: String,
    branches: Vec<Branch>,
}

impl ConditionalSet {
    pub(crate) fn new(discriminator: String, branches: Vec<Branch>) -> Self {
        Self {
            discriminator,
            branches,
        }
    }

    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    pub fn branches(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter()
    }

    pub fn kind(&self) -> TagKind {
        TagKind::Conditional
    }

    /// Runs the set against `object`, found at `object_path`.
    ///
    /// Only the first branch whose reference value matches is applied.
    pub(crate) fn validate(
        &self,
        object: &Map<String, Value>,
        object_path: &JsonPath,
        ctx: &ValidationContext<'_>,
    ) -> ValidationResult {
        let discriminator_path = object_path.push_key(&self.discriminator);

        let Some(raw) = object.get(&self.discriminator) else {
            if self.branches.iter().all(|branch| branch.tag.is_optional()) {
                return Validation::Success(());
            }
            return failure(CheckError::structural(
                discriminator_path,
                format!(
                    "missing reference key \"{}\" for conditionals",
                    self.discriminator
                ),
            ));
        };

        let Some(discriminator) = value::primitive_string(raw) else {
            return failure(
                CheckError::structural(
                    discriminator_path,
                    format!("reference key \"{}\" must be a primitive", self.discriminator),
                )
                .with_got(value::type_name(raw)),
            );
        };

        let Some(branch) = self.branches.iter().find(|b| b.matches(&discriminator)) else {
            return Validation::Success(());
        };

        let destination_path = object_path.push_key(&branch.destination_key);
        match object.get(&branch.destination_key) {
            Some(destination) => branch.tag.validate(destination, &destination_path, ctx),
            None if branch.tag.is_optional() || !branch.required => Validation::Success(()),
            None => failure(CheckError::missing_field(destination_path, branch.tag.kind())),
        }
    }
}
