//! The outcome of checking one document.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt::{self, Display};

use serde_json::{json, Map, Value};
use stillwater::Validation;

use super::check_error::{CheckError, CheckErrors};

/// Errors of one validation run keyed by rendered path, sorted by path.
///
/// Each path holds at most one error. When two checks report at the same path
/// the later one replaces the earlier one.
///
/// # Example
///
/// ```rust
/// use tagschema::{Schema, Tag, TagKind};
/// use serde_json::json;
///
/// let schema = Schema::builder(
///     Tag::object()
///         .field("name", TagKind::Str)
///         .field("range", TagKind::UInt),
/// )
/// .build()
/// .unwrap();
///
/// let result = schema.check(&json!({"range": -1}));
/// assert!(!result.is_valid());
/// let paths: Vec<_> = result.paths().collect();
/// assert_eq!(paths, vec!["name", "range"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckResult {
    errors: BTreeMap<String, CheckError>,
}

impl CheckResult {
    /// A result with no errors.
    pub fn valid() -> Self {
        Self::default()
    }

    /// Collects errors in order; later errors overwrite earlier ones at the same path.
    pub fn from_errors<I>(errors: I) -> Self
    where
        I: IntoIterator<Item = CheckError>,
    {
        let mut result = Self::default();
        for error in errors {
            result.record(error);
        }
        result
    }

    pub(crate) fn record(&mut self, error: CheckError) {
        self.errors.insert(error.path.to_string(), error);
    }

    /// True when no error was recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The error recorded at `path` (rendered form, `""` for the root).
    pub fn get(&self, path: &str) -> Option<&CheckError> {
        self.errors.get(path)
    }

    /// Paths with errors, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Path/error pairs, sorted by path.
    pub fn iter(&self) -> btree_map::Iter<'_, String, CheckError> {
        self.errors.iter()
    }

    pub fn into_map(self) -> BTreeMap<String, CheckError> {
        self.errors
    }

    /// Renders the result as a JSON report:
    /// `{"valid": bool, "errors": {path: {"code", "message", "expected"?, "got"?}}}`.
    pub fn to_json(&self) -> Value {
        let mut errors = Map::new();
        for (path, error) in &self.errors {
            let mut entry = Map::new();
            entry.insert("code".into(), json!(error.code()));
            entry.insert("message".into(), json!(error.message));
            if let Some(ref expected) = error.expected {
                entry.insert("expected".into(), json!(expected));
            }
            if let Some(ref got) = error.got {
                entry.insert("got".into(), json!(got));
            }
            errors.insert(path.clone(), Value::Object(entry));
        }
        json!({
            "valid": self.is_valid(),
            "errors": errors,
        })
    }
}

impl From<Validation<(), CheckErrors>> for CheckResult {
    fn from(validation: Validation<(), CheckErrors>) -> Self {
        match validation {
            Validation::Success(()) => Self::valid(),
            Validation::Failure(errors) => Self::from_errors(errors),
        }
    }
}

impl<'a> IntoIterator for &'a CheckResult {
    type Item = (&'a String, &'a CheckError);
    type IntoIter = btree_map::Iter<'a, String, CheckError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return writeln!(f, "Document is valid");
        }
        writeln!(f, "Check failed with {} error(s):", self.len())?;
        for (i, error) in self.errors.values().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::path::JsonPath;

    fn error(path: &str, message: &str) -> CheckError {
        let path = if path.is_empty() {
            JsonPath::root()
        } else {
            JsonPath::root().push_key(path)
        };
        CheckError::new(path, ErrorKind::Structural, message)
    }

    #[test]
    fn test_empty_result_is_valid() {
        let result = CheckResult::valid();
        assert!(result.is_valid());
        assert_eq!(result.len(), 0);
        assert_eq!(result.to_string(), "Document is valid\n");
    }

    #[test]
    fn test_sorted_by_path() {
        let result = CheckResult::from_errors([error("zeta", "z"), error("alpha", "a"), error("mid", "m")]);
        let paths: Vec<_> = result.paths().collect();
        assert_eq!(paths, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_last_write_wins() {
        let result = CheckResult::from_errors([error("key", "first"), error("key", "second")]);
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("key").unwrap().message, "second");
    }

    #[test]
    fn test_root_errors_use_empty_path() {
        let result = CheckResult::from_errors([error("", "root failure")]);
        assert!(result.get("").is_some());
    }

    #[test]
    fn test_from_validation() {
        let ok: Validation<(), CheckErrors> = Validation::Success(());
        assert!(CheckResult::from(ok).is_valid());

        let failed: Validation<(), CheckErrors> =
            Validation::Failure(CheckErrors::single(error("a", "bad")));
        let result = CheckResult::from(failed);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_json_report() {
        let result = CheckResult::from_errors([error("a", "bad").with_got("x")]);
        let report = result.to_json();
        assert_eq!(report["valid"], json!(false));
        assert_eq!(report["errors"]["a"]["code"], json!("structural"));
        assert_eq!(report["errors"]["a"]["got"], json!("x"));
    }

    #[test]
    fn test_display_lists_errors() {
        let result = CheckResult::from_errors([error("a", "bad"), error("b", "worse")]);
        let display = result.to_string();
        assert!(display.contains("2 error(s)"));
        assert!(display.contains("1. a: bad"));
        assert!(display.contains("2. b: worse"));
    }
}
