//! String tags.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{BuildError, CheckError, ErrorKind};
use crate::path::JsonPath;
use crate::value;
use crate::ValidationResult;

use super::bounds::Bounds;
use super::{failure, Tag, TagKind};

/// Accepts any primitive whose string form has an allowed length.
///
/// Length is counted in Unicode scalar values. Numbers and booleans are
/// accepted through their string form.
#[derive(Debug, Clone, PartialEq)]
pub struct StringTag {
    pub(crate) optional: bool,
    length: Bounds<usize>,
}

impl StringTag {
    pub fn min_len(&self) -> Option<usize> {
        self.length.min
    }

    pub fn max_len(&self) -> Option<usize> {
        self.length.max
    }

    pub(crate) fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult {
        let Some(s) = value::primitive_string(value) else {
            return failure(CheckError::type_mismatch(path.clone(), TagKind::Str, value));
        };

        let len = s.chars().count();
        match self.length.range_violation(len) {
            Some((violation, expected)) => failure(
                CheckError::new(
                    path.clone(),
                    ErrorKind::Size(violation),
                    format!("length of \"{}\" must be {}, got {}", path, expected, len),
                )
                .with_expected(format!("{} characters", expected))
                .with_got(format!("{} characters", len)),
            ),
            None => Validation::Success(()),
        }
    }
}

/// Builder for [`StringTag`].
///
/// # Example
///
/// ```rust
/// use tagschema::Tag;
///
/// let code = Tag::string().len(3).build().unwrap();
/// let name = Tag::string().min_len(1).max_len(64).optional().build().unwrap();
/// assert!(name.is_optional());
///
/// // Inverted bounds are rejected at build time.
/// assert!(Tag::string().min_len(5).max_len(2).build().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringBuilder {
    optional: bool,
    length: Bounds<usize>,
}

impl StringBuilder {
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

    /// Minimum length, inclusive.
    pub fn min_len(mut self, min: usize) -> Self {
        self.length.min = Some(min);
        self
    }

    /// Maximum length, inclusive.
    pub fn max_len(mut self, max: usize) -> Self {
        self.length.max = Some(max);
        self
    }

    /// Exact length.
    pub fn len(self, len: usize) -> Self {
        self.min_len(len).max_len(len)
    }

    pub fn len_range(self, min: usize, max: usize) -> Self {
        self.min_len(min).max_len(max)
    }

    pub fn build(self) -> Result<Tag, BuildError> {
        self.length.check_order("length")?;
        Ok(Tag::String(StringTag {
            optional: self.optional,
            length: self.length,
        }))
    }
}
