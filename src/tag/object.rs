//! Object tags.
//!
//! An object tag declares keys in order, each with a child tag, and may carry
//! conditional sets keyed by discriminator. Keys the tag does not declare are
//! ignored.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{BuildError, CheckError};
use crate::path::JsonPath;
use crate::validation::ValidationContext;
use crate::ValidationResult;

use super::conditional::{Alternative, ConditionalSet};
use super::{absorb, collect, failure, IntoTag, Tag, TagKind};

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTag {
    pub(crate) optional: bool,
    fields: IndexMap<String, Arc<Tag>>,
    conditionals: IndexMap<String, ConditionalSet>,
}

impl ObjectTag {
    /// Declared keys and their tags, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Arc<Tag>)> {
        self.fields.iter().map(|(key, tag)| (key.as_str(), tag))
    }

    pub fn field(&self, key: &str) -> Option<&Arc<Tag>> {
        self.fields.get(key)
    }

    pub fn conditionals(&self) -> impl Iterator<Item = &ConditionalSet> {
        self.conditionals.values()
    }

    /// Validates conditional sets first, then every declared key.
    ///
    /// Errors are collected in that order, so a missing-field error for a key
    /// follows any conditional error reported at the same path.
    pub(crate) fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        ctx: &ValidationContext<'_>,
    ) -> ValidationResult {
        let Some(object) = value.as_object() else {
            return failure(CheckError::type_mismatch(path.clone(), TagKind::Obj, value));
        };

        let mut errors = Vec::new();

        for set in self.conditionals.values() {
            absorb(&mut errors, set.validate(object, path, ctx));
        }

        for (key, tag) in &self.fields {
            let key_path = path.push_key(key);
            match object.get(key) {
                Some(child) => absorb(&mut errors, tag.validate(child, &key_path, ctx)),
                None if tag.is_optional() => {}
                None => errors.push(CheckError::missing_field(key_path, tag.kind())),
            }
        }

        collect(errors)
    }
}

/// Builder for [`ObjectTag`].
///
/// The first child that fails to build is remembered and reported by
/// [`build`](ObjectBuilder::build).
///
/// # Example
///
/// ```rust
/// use tagschema::{NumericKind, Tag, TagKind};
///
/// let position = Tag::object()
///     .field("x", TagKind::Float)
///     .field("y", TagKind::Float)
///     .field("z", Tag::numeric(NumericKind::Float).optional())
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ObjectBuilder {
    optional: bool,
    fields: IndexMap<String, Arc<Tag>>,
    conditionals: IndexMap<String, Vec<Alternative>>,
    error: Option<BuildError>,
}

impl ObjectBuilder {
    pub fn new() -> Self {
        Self {
            optional: false,
            fields: IndexMap::new(),
            conditionals: IndexMap::new(),
            error: None,
        }
    }

    pub fn optional(self) -> Self {
        self.set_optional(true)
    }

    pub fn set_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Declares `key` with the tag it must match. Declaring a key again
    /// replaces its tag but keeps its original position.
    pub fn field(mut self, key: impl Into<String>, tag: impl IntoTag) -> Self {
        let key = key.into();
        match tag.into_tag() {
            Ok(tag) => {
                self.fields.insert(key, tag);
            }
            Err(source) => {
                self.error.get_or_insert(BuildError::Field {
                    key,
                    source: Box::new(source),
                });
            }
        }
        self
    }

    /// Attaches a conditional set driven by the sibling key `discriminator`.
    ///
    /// A second set on the same discriminator replaces the first.
    pub fn conditional<I>(mut self, discriminator: impl Into<String>, branches: I) -> Self
    where
        I: IntoIterator<Item = Alternative>,
    {
        let discriminator = discriminator.into();
        let branches: Vec<Alternative> = branches.into_iter().collect();
        if self
            .conditionals
            .insert(discriminator.clone(), branches)
            .is_some()
        {
            tracing::warn!(%discriminator, "conditional set replaced");
        }
        self
    }

    pub fn build(self) -> Result<Tag, BuildError> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let mut conditionals = IndexMap::with_capacity(self.conditionals.len());
        for (discriminator, alternatives) in self.conditionals {
            let branches = alternatives
                .into_iter()
                .map(|alternative| alternative.build(&discriminator))
                .collect::<Result<Vec<_>, _>>()?;
            conditionals.insert(
                discriminator.clone(),
                ConditionalSet::new(discriminator, branches),
            );
        }

        Ok(Tag::Object(ObjectTag {
            optional: self.optional,
            fields: self.fields,
            conditionals,
        }))
    }
}

impl Default for ObjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::registry::GroupRegistry;
    use crate::tag::NumericKind;
    use serde_json::json;

    fn check(tag: &Tag, value: Value) -> ValidationResult {
        let groups = GroupRegistry::default();
        let ctx = ValidationContext::new(&groups);
        tag.validate(&value, &JsonPath::root(), &ctx)
    }

    fn weapon() -> Tag {
        Tag::object()
            .field("name", TagKind::Str)
            .field("range", Tag::numeric(NumericKind::UInt).max(10))
            .field("notes", Tag::string().optional())
            .build()
            .unwrap()
    }

    #[test]
    fn test_accepts_declared_shape_and_ignores_extra_keys() {
        let result = check(&weapon(), json!({"name": "Bow", "range": 8, "colour": "red"}));
        assert!(result.is_success());
    }

    #[test]
    fn test_missing_required_key() {
        let errors = check(&weapon(), json!({"range": 1})).into_result().unwrap_err();
        assert_eq!(errors.len(), 1);
        let error = errors.first();
        assert_eq!(error.kind, ErrorKind::MissingField);
        assert_eq!(error.message, "\"name\" is missing, add a STR");
    }

    #[test]
    fn test_every_key_is_checked() {
        let errors = check(&weapon(), json!({"name": [4], "range": 11}))
            .into_result()
            .unwrap_err();
        let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
        assert_eq!(paths, vec!["name", "range"]);
    }

    #[test]
    fn test_non_objects_abort() {
        let errors = check(&weapon(), json!(["name"])).into_result().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().kind, ErrorKind::TypeMismatch);
        assert!(errors.first().path.is_root());
    }

    #[test]
    fn test_nested_paths() {
        let tag = Tag::object()
            .field("weapon", Tag::object().field("items", Tag::array().element(TagKind::UInt)))
            .build()
            .unwrap();
        let errors = check(&tag, json!({"weapon": {"items": [0, 1, "x"]}}))
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first().path.to_string(), "weapon.items[2]");
    }

    #[test]
    fn test_field_and_conditional_share_a_key() {
        let tag = Tag::object()
            .field("type", Tag::enumeration(["ARR", "STR"]))
            .conditional("type", [Alternative::new("ARR", "data", Tag::array())])
            .build()
            .unwrap();
        assert!(check(&tag, json!({"type": "ARR", "data": []})).is_success());

        let errors = check(&tag, json!({"type": "OBJ"})).into_result().unwrap_err();
        assert_eq!(errors.first().kind, ErrorKind::ValueNotAccepted);
    }

    #[test]
    fn test_first_field_error_is_reported() {
        let result = Tag::object()
            .field("ok", TagKind::Str)
            .field("bad", TagKind::Enum)
            .field("worse", Tag::string().min_len(2).max_len(1))
            .build();
        match result {
            Err(BuildError::Field { key, source }) => {
                assert_eq!(key, "bad");
                assert_eq!(*source, BuildError::NoDefaultTag(TagKind::Enum));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_conditional_replacement_keeps_last() {
        let tag = Tag::object()
            .conditional("kind", [Alternative::new("a", "x", TagKind::Str)])
            .conditional("kind", [Alternative::new("a", "x", TagKind::UInt)])
            .build()
            .unwrap();
        match tag {
            Tag::Object(object) => {
                let sets: Vec<_> = object.conditionals().collect();
                assert_eq!(sets.len(), 1);
                let branch = sets[0].branches().next().unwrap();
                assert_eq!(branch.tag().kind(), TagKind::UInt);
            }
            _ => unreachable!(),
        }
    }
}
