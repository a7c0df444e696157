//! Errors raised while constructing or compiling a schema.

use crate::tag::{TagKind, UnknownKind};

use super::check_result::CheckResult;

/// A tag or schema could not be built from the given arguments.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// A minimum bound is greater than its maximum.
    #[error("invalid {what} bounds: minimum {min} is greater than maximum {max}")]
    InvalidRange {
        what: &'static str,
        min: String,
        max: String,
    },

    /// A numeric bound is not a number.
    #[error("invalid {what} bound: {value} is not a number")]
    NotANumber { what: &'static str, value: f64 },

    /// The kind needs explicit construction (e.g. a group needs a name).
    #[error("{0} has no default tag and must be built explicitly")]
    NoDefaultTag(TagKind),

    /// A group reference names a group missing from the schema.
    #[error("group '{0}' is referenced but not registered")]
    UnknownGroup(String),

    /// A nested tag of an object failed to build.
    #[error("key '{key}': {source}")]
    Field {
        key: String,
        source: Box<BuildError>,
    },

    /// The element tag of an array failed to build.
    #[error("array element: {0}")]
    Element(Box<BuildError>),

    /// A conditional branch failed to build.
    #[error("conditional on '{discriminator}' = '{reference_value}': {source}")]
    Branch {
        discriminator: String,
        reference_value: String,
        source: Box<BuildError>,
    },

    /// A registered group failed to build.
    #[error("group '{name}': {source}")]
    Group {
        name: String,
        source: Box<BuildError>,
    },

    /// A group resolves only to group references, ending back at itself.
    #[error("group '{0}' is an alias cycle with no shape of its own")]
    GroupCycle(String),

    /// A description names a tag kind that does not exist.
    #[error(transparent)]
    Kind(#[from] UnknownKind),
}

/// A description document could not be turned into a schema.
///
/// Compilation never partially succeeds: either the document fails the
/// meta-schema and the caller gets the [`CheckResult`], or it passes and the
/// described tags fail to build, or a schema is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    /// The description document does not satisfy the meta-schema.
    #[error("description document is invalid\n{0}")]
    Invalid(CheckResult),

    /// The description is well-formed but describes an inconsistent schema.
    #[error("description document could not be compiled: {0}")]
    Build(#[from] BuildError),
}

impl CompileError {
    /// The meta-schema check result, if that is why compilation failed.
    pub fn check_result(&self) -> Option<&CheckResult> {
        match self {
            CompileError::Invalid(result) => Some(result),
            CompileError::Build(_) => None,
        }
    }
}
