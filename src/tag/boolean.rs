//! Boolean tags over string tokens.

use std::collections::BTreeSet;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{BuildError, CheckError};
use crate::path::JsonPath;
use crate::value;
use crate::ValidationResult;

use super::{failure, Tag, TagKind};

/// Tokens read as true unless a tag replaces them.
pub const DEFAULT_TRUE_TOKENS: [&str; 7] = ["true", "1", "yes", "y", "on", "enable", "t"];

/// Tokens read as false unless a tag replaces them.
pub const DEFAULT_FALSE_TOKENS: [&str; 7] = ["false", "0", "no", "n", "off", "disable", "f"];

pub(crate) fn is_default_true_token(token: &str) -> bool {
    DEFAULT_TRUE_TOKENS.contains(&token)
}

/// Accepts a primitive whose string form is one of the true or false tokens.
///
/// Tokens are case-sensitive. JSON `true`/`false` match through their string
/// form.
#[derive(Debug, Clone, PartialEq)]
pub struct BoolTag {
    pub(crate) optional: bool,
    true_tokens: BTreeSet<String>,
    false_tokens: BTreeSet<String>,
}

impl BoolTag {
    pub fn true_tokens(&self) -> impl Iterator<Item = &str> {
        self.true_tokens.iter().map(String::as_str)
    }

    pub fn false_tokens(&self) -> impl Iterator<Item = &str> {
        self.false_tokens.iter().map(String::as_str)
    }

    /// Reads `value` as a boolean: `Some(true)` for a true-token, `Some(false)`
    /// for a false-token, `None` otherwise.
    pub fn interpret(&self, value: &Value) -> Option<bool> {
        let token = value::primitive_string(value)?;
        if self.true_tokens.contains(&token) {
            Some(true)
        } else if self.false_tokens.contains(&token) {
            Some(false)
        } else {
            None
        }
    }

    pub(crate) fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult {
        match self.interpret(value) {
            Some(_) => Validation::Success(()),
            None => failure(CheckError::type_mismatch(path.clone(), TagKind::Bool, value)),
        }
    }
}

/// Builder for [`BoolTag`].
///
/// The first custom true-token replaces the default true set, and the first
/// custom false-token replaces the default false set; each set is replaced
/// independently of the other.
///
/// ```rust
/// use tagschema::Tag;
///
/// // "ja"/"nein" plus the default false tokens
/// let flag = Tag::boolean().true_token("ja").false_tokens(["nein"]).build().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct BoolBuilder {
    optional: bool,
    true_tokens: BTreeSet<String>,
    false_tokens: BTreeSet<String>,
    custom_true: bool,
    custom_false: bool,
}

impl BoolBuilder {
    pub fn new() -> Self {
        Self {
            optional: false,
            true_tokens: DEFAULT_TRUE_TOKENS.iter().map(|s| s.to_string()).collect(),
            false_tokens: DEFAULT_FALSE_TOKENS.iter().map(|s| s.to_string()).collect(),
            custom_true: false,
            custom_false: false,
        }
    }

    pub fn optional(self) -> Self {
        self.set_optional(true)
    }

    pub fn set_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn true_token(self, token: impl Into<String>) -> Self {
        self.true_tokens([token])
    }

    pub fn true_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.custom_true {
            self.true_tokens.clear();
            self.custom_true = true;
        }
        self.true_tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    pub fn false_token(self, token: impl Into<String>) -> Self {
        self.false_tokens([token])
    }

    pub fn false_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.custom_false {
            self.false_tokens.clear();
            self.custom_false = true;
        }
        self.false_tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<Tag, BuildError> {
        Ok(Tag::Bool(BoolTag {
            optional: self.optional,
            true_tokens: self.true_tokens,
            false_tokens: self.false_tokens,
        }))
    }
}

impl Default for BoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}
