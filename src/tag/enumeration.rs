//! Enum tags.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{BuildError, CheckError};
use crate::path::JsonPath;
use crate::value;
use crate::ValidationResult;

use super::{failure, Tag, TagKind};

/// Accepts a primitive whose string form equals one of the constants,
/// ignoring case. An enum without constants accepts nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumTag {
    pub(crate) optional: bool,
    constants: Vec<String>,
}

impl EnumTag {
    pub fn constants(&self) -> impl Iterator<Item = &str> {
        self.constants.iter().map(String::as_str)
    }

    pub(crate) fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult {
        let Some(s) = value::primitive_string(value) else {
            return failure(CheckError::type_mismatch(path.clone(), TagKind::Enum, value));
        };

        let folded = s.to_lowercase();
        if self.constants.iter().any(|c| c.to_lowercase() == folded) {
            Validation::Success(())
        } else {
            failure(CheckError::not_accepted(
                path.clone(),
                TagKind::Enum,
                &s,
                self.constants(),
            ))
        }
    }
}

/// Builder for [`EnumTag`].
///
/// ```rust
/// use tagschema::Tag;
///
/// let rarity = Tag::enumeration(["common", "rare"]).constant("legendary").build().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct EnumBuilder {
    optional: bool,
    constants: Vec<String>,
}

impl EnumBuilder {
    pub fn new<I, S>(constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            optional: false,
            constants: constants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn optional(self) -> Self {
        self.set_optional(true)
    }

    pub fn set_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Appends one more accepted constant.
    pub fn constant(mut self, constant: impl Into<String>) -> Self {
        self.constants.push(constant.into());
        self
    }

    pub fn build(self) -> Result<Tag, BuildError> {
        Ok(Tag::Enum(EnumTag {
            optional: self.optional,
            constants: self.constants,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    fn tag(builder: EnumBuilder) -> EnumTag {
        match builder.build().unwrap() {
            Tag::Enum(tag) => tag,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_matches_ignoring_case() {
        let tag = tag(Tag::enumeration(["STR", "ARR"]));
        assert!(tag.validate(&json!("str"), &JsonPath::root()).is_success());
        assert!(tag.validate(&json!("Arr"), &JsonPath::root()).is_success());
    }

    #[test]
    fn test_unknown_constant_is_not_accepted() {
        let tag = tag(Tag::enumeration(["STR", "ARR"]));
        let errors = tag
            .validate(&json!("OBJ"), &JsonPath::root().push_key("type"))
            .into_result()
            .unwrap_err();
        let error = errors.first();
        assert_eq!(error.kind, ErrorKind::ValueNotAccepted);
        assert_eq!(error.path.to_string(), "type");
        assert_eq!(error.expected.as_deref(), Some("one of [STR, ARR]"));
    }

    #[test]
    fn test_containers_are_type_mismatches() {
        let tag = tag(Tag::enumeration(["a"]));
        let errors = tag
            .validate(&json!(["a"]), &JsonPath::root())
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first().kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_empty_enum_accepts_nothing() {
        let tag = tag(Tag::enumeration(Vec::<String>::new()));
        assert!(tag.validate(&json!(""), &JsonPath::root()).is_failure());
    }

    #[test]
    fn test_numbers_match_by_string_form() {
        let tag = tag(Tag::enumeration(["1", "2"]));
        assert!(tag.validate(&json!(2), &JsonPath::root()).is_success());
    }
}
