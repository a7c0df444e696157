//! Schema nodes.
//!
//! A [`Tag`] describes the accepted shape of one document value. Tags are
//! built with fluent builders and frozen by `build()`; children are held
//! behind `Arc` so one tag can be shared by several parents.
//!
//! # Example
//!
//! ```rust
//! use tagschema::{JsonPath, NumericKind, Tag, TagKind, GroupRegistry, ValidationContext};
//! use serde_json::json;
//!
//! let weapon = Tag::object()
//!     .field("id", TagKind::Uuid)
//!     .field("name", Tag::string().min_len(1))
//!     .field("range", Tag::numeric(NumericKind::UInt).max(10))
//!     .field("items", Tag::array().element(TagKind::Str).optional())
//!     .build()
//!     .unwrap();
//!
//! let groups = GroupRegistry::default();
//! let ctx = ValidationContext::new(&groups);
//! let result = weapon.validate(
//!     &json!({
//!         "id": "4d4e21ca-5534-43d1-a0d6-91d485f759d4",
//!         "name": "Sword",
//!         "range": 1
//!     }),
//!     &JsonPath::root(),
//!     &ctx,
//! );
//! assert!(result.is_success());
//! ```

mod any;
mod array;
mod boolean;
pub(crate) mod bounds;
mod character;
mod conditional;
mod enumeration;
mod group;
mod kind;
mod numeric;
mod object;
mod string;
mod uuid;

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{BuildError, CheckError, CheckErrors};
use crate::path::JsonPath;
use crate::validation::ValidationContext;
use crate::ValidationResult;

pub use any::{AnyBuilder, AnyTag};
pub use array::{ArrayBuilder, ArrayTag};
pub use boolean::{BoolBuilder, BoolTag, DEFAULT_FALSE_TOKENS, DEFAULT_TRUE_TOKENS};
pub use character::{CharBuilder, CharTag};
pub use conditional::{Alternative, Branch, ConditionalSet};
pub use enumeration::{EnumBuilder, EnumTag};
pub use group::{GroupBuilder, GroupTag};
pub use kind::{NumericKind, TagKind, UnknownKind};
pub use numeric::{NumericBuilder, NumericTag};
pub use object::{ObjectBuilder, ObjectTag};
pub use string::{StringBuilder, StringTag};
pub use uuid::{UuidBuilder, UuidTag};

pub(crate) use boolean::is_default_true_token;

/// A frozen schema node, one case per structural kind.
///
/// Conditional sets are not a case of their own: they live on the
/// [`ObjectTag`] whose sibling keys they inspect.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    String(StringTag),
    Char(CharTag),
    Numeric(NumericTag),
    Bool(BoolTag),
    Uuid(UuidTag),
    Enum(EnumTag),
    Any(AnyTag),
    Array(ArrayTag),
    Object(ObjectTag),
    Group(GroupTag),
}

impl Tag {
    pub fn string() -> StringBuilder {
        StringBuilder::new()
    }

    pub fn char() -> CharBuilder {
        CharBuilder::new()
    }

    pub fn numeric(kind: NumericKind) -> NumericBuilder {
        NumericBuilder::new(kind)
    }

    pub fn boolean() -> BoolBuilder {
        BoolBuilder::new()
    }

    pub fn uuid() -> UuidBuilder {
        UuidBuilder::new()
    }

    /// An enum tag accepting `constants`, compared case-insensitively.
    pub fn enumeration<I, S>(constants: I) -> EnumBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnumBuilder::new(constants)
    }

    pub fn any() -> AnyBuilder {
        AnyBuilder::new()
    }

    /// An array tag; elements default to `ANY`.
    pub fn array() -> ArrayBuilder {
        ArrayBuilder::new()
    }

    pub fn object() -> ObjectBuilder {
        ObjectBuilder::new()
    }

    /// A reference to the group registered under `name` (case-insensitive).
    pub fn group(name: impl Into<String>) -> GroupBuilder {
        GroupBuilder::new(name)
    }

    pub fn kind(&self) -> TagKind {
        match self {
            Tag::String(_) => TagKind::Str,
            Tag::Char(_) => TagKind::Char,
            Tag::Numeric(tag) => tag.numeric_kind().tag_kind(),
            Tag::Bool(_) => TagKind::Bool,
            Tag::Uuid(_) => TagKind::Uuid,
            Tag::Enum(_) => TagKind::Enum,
            Tag::Any(_) => TagKind::Any,
            Tag::Array(_) => TagKind::Arr,
            Tag::Object(_) => TagKind::Obj,
            Tag::Group(_) => TagKind::Group,
        }
    }

    /// Whether a parent may omit the value this tag describes.
    pub fn is_optional(&self) -> bool {
        match self {
            Tag::String(tag) => tag.optional,
            Tag::Char(tag) => tag.optional,
            Tag::Numeric(tag) => tag.optional,
            Tag::Bool(tag) => tag.optional,
            Tag::Uuid(tag) => tag.optional,
            Tag::Enum(tag) => tag.optional,
            Tag::Any(tag) => tag.optional,
            Tag::Array(tag) => tag.optional,
            Tag::Object(tag) => tag.optional,
            Tag::Group(tag) => tag.optional,
        }
    }

    /// Validates `value`, located at `path`, against this tag.
    ///
    /// Group references are resolved through `ctx` before descending. Scalar
    /// tags report at most one error, at `path`; containers keep checking
    /// siblings so that every independent failure is reported in one pass.
    ///
    /// # Panics
    ///
    /// Panics if a group reference names a group missing from `ctx`. Schemas
    /// built through [`Schema::builder`](crate::Schema::builder) reject such
    /// references up front.
    pub fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        ctx: &ValidationContext<'_>,
    ) -> ValidationResult {
        match self {
            Tag::String(tag) => tag.validate(value, path),
            Tag::Char(tag) => tag.validate(value, path),
            Tag::Numeric(tag) => tag.validate(value, path),
            Tag::Bool(tag) => tag.validate(value, path),
            Tag::Uuid(tag) => tag.validate(value, path),
            Tag::Enum(tag) => tag.validate(value, path),
            Tag::Any(_) => Validation::Success(()),
            Tag::Array(tag) => tag.validate(value, path, ctx),
            Tag::Object(tag) => tag.validate(value, path, ctx),
            Tag::Group(group) => ctx.resolve(group).validate(value, path, ctx),
        }
    }

    /// Appends the names of all groups referenced from this tag.
    ///
    /// Does not follow the references themselves.
    pub fn collect_group_refs(&self, refs: &mut Vec<String>) {
        match self {
            Tag::Group(group) => refs.push(group.name().to_string()),
            Tag::Array(tag) => tag.element().collect_group_refs(refs),
            Tag::Object(tag) => {
                for field in tag.fields().map(|(_, tag)| tag) {
                    field.collect_group_refs(refs);
                }
                for set in tag.conditionals() {
                    for branch in set.branches() {
                        branch.tag().collect_group_refs(refs);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Anything that can become a shared [`Tag`]: a built tag, an `Arc<Tag>`, a
/// scalar [`TagKind`] (its unconstrained tag), or an unfinished builder.
///
/// Builder methods that take child tags accept `impl IntoTag` and defer any
/// construction error to their own `build()`.
pub trait IntoTag {
    fn into_tag(self) -> Result<Arc<Tag>, BuildError>;
}

impl IntoTag for Tag {
    fn into_tag(self) -> Result<Arc<Tag>, BuildError> {
        Ok(Arc::new(self))
    }
}

impl IntoTag for Arc<Tag> {
    fn into_tag(self) -> Result<Arc<Tag>, BuildError> {
        Ok(self)
    }
}

impl IntoTag for &Arc<Tag> {
    fn into_tag(self) -> Result<Arc<Tag>, BuildError> {
        Ok(Arc::clone(self))
    }
}

impl IntoTag for TagKind {
    fn into_tag(self) -> Result<Arc<Tag>, BuildError> {
        self.default_tag().map(Arc::new)
    }
}

impl IntoTag for Result<Tag, BuildError> {
    fn into_tag(self) -> Result<Arc<Tag>, BuildError> {
        self.map(Arc::new)
    }
}

/// Implements [`IntoTag`] for builders with an inherent `build()`.
macro_rules! builder_into_tag {
    ($($builder:ty),* $(,)?) => {
        $(
            impl IntoTag for $builder {
                fn into_tag(self) -> Result<Arc<Tag>, BuildError> {
                    self.build().map(Arc::new)
                }
            }
        )*
    };
}

builder_into_tag!(
    StringBuilder,
    CharBuilder,
    NumericBuilder,
    BoolBuilder,
    UuidBuilder,
    EnumBuilder,
    AnyBuilder,
    ArrayBuilder,
    ObjectBuilder,
    GroupBuilder,
);

pub(crate) fn failure(error: CheckError) -> ValidationResult {
    Validation::Failure(CheckErrors::single(error))
}

/// Folds the errors gathered by a container into one result.
pub(crate) fn collect(errors: Vec<CheckError>) -> ValidationResult {
    match CheckErrors::from_vec(errors) {
        Some(errors) => Validation::Failure(errors),
        None => Validation::Success(()),
    }
}

/// Moves the errors of a failed child check into `errors`.
pub(crate) fn absorb(errors: &mut Vec<CheckError>, result: ValidationResult) {
    if let Validation::Failure(child) = result {
        errors.extend(child);
    }
}

// Tags are shared across threads by `Schema::check_all`.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Tag>();
    assert_sync::<Tag>();
};
