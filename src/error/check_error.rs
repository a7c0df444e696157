//! Per-document validation errors.
//!
//! [`CheckError`] is one failed check at one path. [`CheckErrors`] is the
//! non-empty accumulation that flows out of a failing
//! [`Tag::validate`](crate::Tag::validate) call.

use std::fmt::{self, Display};

use serde_json::Value;
use stillwater::prelude::*;

use crate::path::JsonPath;
use crate::tag::TagKind;
use crate::value;

/// How a size-like bound was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeViolation {
    /// Below the minimum (only a minimum was declared).
    TooFew,
    /// Above the maximum (only a maximum was declared).
    TooMany,
    /// Minimum and maximum are equal and the size differs.
    ExactMismatch,
    /// Outside a declared `[min, max]` range.
    OutsideRange,
}

/// The closed set of recoverable error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required key or conditional destination was absent.
    MissingField,
    /// The value's shape does not match the expected tag.
    TypeMismatch,
    /// A length, count or numeric value is outside its bounds.
    Size(SizeViolation),
    /// The value is well-shaped but not among the accepted enum constants or characters.
    ValueNotAccepted,
    /// A conditional set could not be evaluated against the document.
    Structural,
}

impl ErrorKind {
    /// Machine-readable code, stable across releases.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MissingField => "missing_field",
            ErrorKind::TypeMismatch => "invalid_type",
            ErrorKind::Size(SizeViolation::TooFew) => "too_few",
            ErrorKind::Size(SizeViolation::TooMany) => "too_many",
            ErrorKind::Size(SizeViolation::ExactMismatch) => "exact_size",
            ErrorKind::Size(SizeViolation::OutsideRange) => "outside_range",
            ErrorKind::ValueNotAccepted => "not_accepted",
            ErrorKind::Structural => "structural",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single failed check.
///
/// # Example
///
/// ```rust
/// use tagschema::{CheckError, ErrorKind, JsonPath};
///
/// let error = CheckError::new(
///     JsonPath::root().push_key("range"),
///     ErrorKind::TypeMismatch,
///     "not an unsigned integer",
/// )
/// .with_expected("U_INT")
/// .with_got("string");
///
/// assert_eq!(error.code(), "invalid_type");
/// assert_eq!(error.to_string(), "range: not an unsigned integer (expected: U_INT) (got: string)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CheckError {
    /// Where the check failed.
    pub path: JsonPath,
    /// What kind of failure this is.
    pub kind: ErrorKind,
    /// Human-readable description.
    pub message: String,
    /// What was expected, if worth reporting.
    pub expected: Option<String>,
    /// What was found, if worth reporting.
    pub got: Option<String>,
}

impl CheckError {
    pub fn new(path: JsonPath, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
            expected: None,
            got: None,
        }
    }

    /// Sets the `expected` description and returns self for chaining.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Sets the `got` description and returns self for chaining.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub(crate) fn missing_field(path: JsonPath, kind: TagKind) -> Self {
        let message = format!("\"{}\" is missing, add a {}", path, kind);
        Self::new(path, ErrorKind::MissingField, message).with_expected(kind.name())
    }

    pub(crate) fn type_mismatch(path: JsonPath, kind: TagKind, value: &Value) -> Self {
        let message = format!("\"{}\" is not of type {}", path, kind);
        Self::new(path, ErrorKind::TypeMismatch, message)
            .with_expected(kind.name())
            .with_got(describe(value))
    }

    pub(crate) fn not_accepted<'a, I>(path: JsonPath, kind: TagKind, got: &str, accepted: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let accepted: Vec<&str> = accepted.into_iter().collect();
        let mut listed = accepted.iter().take(5).copied().collect::<Vec<_>>().join(", ");
        if accepted.len() > 5 {
            listed.push_str(", ...");
        }
        let message = format!(
            "\"{}\" is not an accepted {} value for \"{}\"",
            got, kind, path
        );
        Self::new(path, ErrorKind::ValueNotAccepted, message)
            .with_expected(format!("one of [{}]", listed))
            .with_got(got)
    }

    pub(crate) fn structural(path: JsonPath, message: impl Into<String>) -> Self {
        Self::new(path, ErrorKind::Structural, message)
    }
}

/// Short rendering of an offending value for `got` fields: primitives by
/// their string form, containers by their type name.
fn describe(value: &Value) -> String {
    value::primitive_string(value).unwrap_or_else(|| value::type_name(value).to_string())
}

impl Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)?;
        } else {
            write!(f, "{}: {}", self.path, self.message)?;
        }
        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }
        Ok(())
    }
}

impl std::error::Error for CheckError {}

/// A non-empty accumulation of [`CheckError`]s.
///
/// Failing tags return one of these inside `Validation::Failure`; containers
/// combine the failures of their children through [`Semigroup`].
#[derive(Debug, Clone, PartialEq)]
pub struct CheckErrors(NonEmptyVec<CheckError>);

impl CheckErrors {
    pub fn single(error: CheckError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Builds a collection from a vec, `None` if it is empty.
    pub fn from_vec(errors: Vec<CheckError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &CheckError> {
        self.0.iter()
    }

    pub fn first(&self) -> &CheckError {
        self.0.head()
    }

    pub fn into_vec(self) -> Vec<CheckError> {
        self.0.into_vec()
    }
}

impl Semigroup for CheckErrors {
    fn combine(self, other: Self) -> Self {
        CheckErrors(self.0.combine(other.0))
    }
}

impl IntoIterator for CheckErrors {
    type Item = CheckError;
    type IntoIter = std::vec::IntoIter<CheckError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

// Check results cross threads in `Schema::check_all`.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<CheckErrors>();
    assert_sync::<CheckErrors>();
};
