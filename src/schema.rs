//! Schemas: a root tag together with the groups it references.

use std::sync::Arc;

use rayon::prelude::*;
use serde_json::Value;

use crate::compiler;
use crate::error::{BuildError, CheckResult, CompileError};
use crate::path::JsonPath;
use crate::registry::GroupRegistry;
use crate::tag::{IntoTag, Tag};
use crate::validation::ValidationContext;
use crate::ValidationResult;

/// A validated, immutable schema.
///
/// Every group reference reachable from the root is guaranteed to resolve, so
/// checking a document never fails for structural reasons of the schema
/// itself.
///
/// # Example
///
/// ```rust
/// use tagschema::{NumericKind, Schema, Tag, TagKind};
/// use serde_json::json;
///
/// let schema = Schema::builder(
///     Tag::object()
///         .field("name", Tag::string().min_len(1))
///         .field("range", Tag::numeric(NumericKind::UInt).max(10))
///         .field("items", Tag::array().element(TagKind::Str).optional()),
/// )
/// .build()
/// .unwrap();
///
/// assert!(schema.check(&json!({"name": "Sword", "range": 1})).is_valid());
///
/// let result = schema.check(&json!({"name": "Bow", "range": 11}));
/// assert_eq!(result.get("range").unwrap().code(), "too_many");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    root: Arc<Tag>,
    groups: GroupRegistry,
}

impl Schema {
    /// Starts a schema whose documents must match `root`.
    pub fn builder(root: impl IntoTag) -> SchemaBuilder {
        SchemaBuilder {
            root: root.into_tag(),
            groups: Vec::new(),
        }
    }

    /// Compiles a description document into a schema.
    ///
    /// The document is first checked against the built-in meta-schema. If it
    /// does not conform, the returned [`CompileError::Invalid`] carries the
    /// check result and no schema is produced.
    pub fn from_document(document: &Value) -> Result<Schema, CompileError> {
        compiler::compile(document)
    }

    pub fn root(&self) -> &Arc<Tag> {
        &self.root
    }

    pub fn groups(&self) -> &GroupRegistry {
        &self.groups
    }

    /// Validates `document` and returns every error keyed by path.
    pub fn check(&self, document: &Value) -> CheckResult {
        let result = CheckResult::from(self.validate(document));
        tracing::trace!(valid = result.is_valid(), errors = result.len(), "document checked");
        result
    }

    /// Checks a batch of documents in parallel, preserving input order.
    pub fn check_all(&self, documents: &[Value]) -> Vec<CheckResult> {
        documents
            .par_iter()
            .map(|document| self.check(document))
            .collect()
    }

    /// Validates `document` from the root, returning the raw accumulated errors.
    pub fn validate(&self, document: &Value) -> ValidationResult {
        let ctx = ValidationContext::new(&self.groups);
        self.root.validate(document, &JsonPath::root(), &ctx)
    }

    pub(crate) fn from_parts(root: Arc<Tag>, groups: GroupRegistry) -> Result<Schema, BuildError> {
        if let Some(name) = groups.unresolved_refs(&root).into_iter().next() {
            return Err(BuildError::UnknownGroup(name));
        }
        if let Some(name) = groups.find_alias_cycle() {
            return Err(BuildError::GroupCycle(name));
        }
        Ok(Schema { root, groups })
    }
}

/// Builder for [`Schema`], collecting named groups.
///
/// Groups may reference each other, and themselves, in any order; references
/// are only checked by [`build`](SchemaBuilder::build).
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    root: Result<Arc<Tag>, BuildError>,
    groups: Vec<(String, Result<Arc<Tag>, BuildError>)>,
}

impl SchemaBuilder {
    /// Registers `tag` under `name` (case-insensitive). Registering a name
    /// again replaces the earlier group.
    pub fn group(mut self, name: impl Into<String>, tag: impl IntoTag) -> Self {
        self.groups.push((name.into(), tag.into_tag()));
        self
    }

    /// Freezes the schema.
    ///
    /// # Errors
    ///
    /// Returns the first tag construction error, [`BuildError::UnknownGroup`]
    /// for a reference to an unregistered group, or [`BuildError::GroupCycle`]
    /// for groups that only alias each other.
    pub fn build(self) -> Result<Schema, BuildError> {
        let root = self.root?;
        let mut groups = GroupRegistry::default();
        for (name, tag) in self.groups {
            let tag = tag.map_err(|source| BuildError::Group {
                name: name.clone(),
                source: Box::new(source),
            })?;
            if groups.insert(&name, tag).is_some() {
                tracing::debug!(group = %name, "group redefined");
            }
        }
        Schema::from_parts(root, groups)
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Schema>();
    assert_sync::<Schema>();
};
