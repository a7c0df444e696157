//! Single-character tags.

use std::collections::BTreeSet;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{BuildError, CheckError};
use crate::path::JsonPath;
use crate::value;
use crate::ValidationResult;

use super::{failure, Tag, TagKind};

/// Accepts a primitive whose string form is exactly one character, optionally
/// restricted to a set. An empty set accepts any character.
#[derive(Debug, Clone, PartialEq)]
pub struct CharTag {
    pub(crate) optional: bool,
    valid_chars: BTreeSet<char>,
}

impl CharTag {
    pub fn valid_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.valid_chars.iter().copied()
    }

    pub(crate) fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult {
        let single = value::primitive_string(value).and_then(|s| {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        });
        let Some(c) = single else {
            return failure(CheckError::type_mismatch(path.clone(), TagKind::Char, value));
        };

        if self.valid_chars.is_empty() || self.valid_chars.contains(&c) {
            return Validation::Success(());
        }
        let accepted: Vec<String> = self.valid_chars.iter().map(char::to_string).collect();
        failure(CheckError::not_accepted(
            path.clone(),
            TagKind::Char,
            &c.to_string(),
            accepted.iter().map(String::as_str),
        ))
    }
}

/// Builder for [`CharTag`].
///
/// ```rust
/// use tagschema::Tag;
///
/// let grade = Tag::char().valid_chars("ABCDF".chars()).build().unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct CharBuilder {
    optional: bool,
    valid_chars: BTreeSet<char>,
}

impl CharBuilder {
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

    pub fn valid_char(mut self, c: char) -> Self {
        self.valid_chars.insert(c);
        self
    }

    pub fn valid_chars<I>(mut self, chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.valid_chars.extend(chars);
        self
    }

    pub fn build(self) -> Result<Tag, BuildError> {
        Ok(Tag::Char(CharTag {
            optional: self.optional,
            valid_chars: self.valid_chars,
        }))
    }
}
