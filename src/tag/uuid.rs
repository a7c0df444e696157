//! UUID tags.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{BuildError, CheckError};
use crate::path::JsonPath;
use crate::value;
use crate::ValidationResult;

use super::{failure, Tag, TagKind};

const CANONICAL_UUID: &str =
    r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

fn canonical_uuid() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(CANONICAL_UUID).expect("UUID pattern is a valid regex"))
}

/// Accepts a primitive in canonical hyphenated UUID form, either case.
#[derive(Debug, Clone, PartialEq)]
pub struct UuidTag {
    pub(crate) optional: bool,
}

impl UuidTag {
    pub(crate) fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult {
        match value::primitive_string(value) {
            Some(s) if canonical_uuid().is_match(&s) => Validation::Success(()),
            _ => failure(CheckError::type_mismatch(path.clone(), TagKind::Uuid, value)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UuidBuilder {
    optional: bool,
}

impl UuidBuilder {
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
        Ok(Tag::Uuid(UuidTag {
            optional: self.optional,
        }))
    }
}
