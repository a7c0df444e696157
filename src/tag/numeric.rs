//! Numeric tags.
//!
//! Six subkinds combine integer/float with the allowed sign. Bounds are
//! inclusive and compared numerically, so `2.0` satisfies `max(2)` and an
//! integral float is a valid integer.

use std::ops::RangeInclusive;

use serde_json::{Number, Value};
use stillwater::Validation;

use crate::error::{BuildError, CheckError, ErrorKind};
use crate::path::JsonPath;
use crate::ValidationResult;

use super::bounds::Bounds;
use super::{failure, NumericKind, Tag};

#[derive(Debug, Clone, PartialEq)]
pub struct NumericTag {
    pub(crate) optional: bool,
    kind: NumericKind,
    value: Bounds<f64>,
}

impl NumericTag {
    pub fn numeric_kind(&self) -> NumericKind {
        self.kind
    }

    pub fn min(&self) -> Option<f64> {
        self.value.min
    }

    pub fn max(&self) -> Option<f64> {
        self.value.max
    }

    pub(crate) fn validate(&self, value: &Value, path: &JsonPath) -> ValidationResult {
        let n = match value {
            Value::Number(n) if self.matches_kind(n) => n,
            _ => {
                return failure(CheckError::type_mismatch(
                    path.clone(),
                    self.kind.tag_kind(),
                    value,
                ))
            }
        };

        let Some(actual) = n.as_f64() else {
            return Validation::Success(());
        };
        match self.value.range_violation(actual) {
            Some((violation, expected)) => failure(
                CheckError::new(
                    path.clone(),
                    ErrorKind::Size(violation),
                    format!("value of \"{}\" must be {}, got {}", path, expected, n),
                )
                .with_expected(expected)
                .with_got(n.to_string()),
            ),
            None => Validation::Success(()),
        }
    }

    fn matches_kind(&self, n: &Number) -> bool {
        let Some(f) = n.as_f64() else {
            return false;
        };
        let integral = n.is_i64() || n.is_u64() || (f.is_finite() && f.fract() == 0.0);
        (!self.kind.is_integer() || integral) && self.kind.accepts_sign(f)
    }
}

/// Builder for [`NumericTag`].
///
/// # Example
///
/// ```rust
/// use tagschema::{NumericKind, Tag};
///
/// let percent = Tag::numeric(NumericKind::UFloat).range(0.0..=100.0).build().unwrap();
/// let depth = Tag::numeric(NumericKind::SInt).min(-11_000).build().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct NumericBuilder {
    optional: bool,
    kind: NumericKind,
    value: Bounds<f64>,
}

impl NumericBuilder {
    pub fn new(kind: NumericKind) -> Self {
        Self {
            optional: false,
            kind,
            value: Bounds::default(),
        }
    }

    pub fn optional(self) -> Self {
        self.set_optional(true)
    }

    pub fn set_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Smallest accepted value, inclusive.
    pub fn min(mut self, min: impl Into<f64>) -> Self {
        self.value.min = Some(min.into());
        self
    }

    /// Largest accepted value, inclusive.
    pub fn max(mut self, max: impl Into<f64>) -> Self {
        self.value.max = Some(max.into());
        self
    }

    pub fn range(self, range: RangeInclusive<f64>) -> Self {
        let (min, max) = range.into_inner();
        self.min(min).max(max)
    }

    pub fn build(self) -> Result<Tag, BuildError> {
        for bound in [self.value.min, self.value.max].into_iter().flatten() {
            if bound.is_nan() {
                return Err(BuildError::NotANumber {
                    what: "value",
                    value: bound,
                });
            }
        }
        self.value.check_order("value")?;
        Ok(Tag::Numeric(NumericTag {
            optional: self.optional,
            kind: self.kind,
            value: self.value,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SizeViolation;
    use serde_json::json;

    fn tag(builder: NumericBuilder) -> NumericTag {
        match builder.build().unwrap() {
            Tag::Numeric(tag) => tag,
            _ => unreachable!(),
        }
    }

    fn accepts(tag: &NumericTag, value: Value) -> bool {
        tag.validate(&value, &JsonPath::root()).is_success()
    }

    #[test]
    fn test_unsigned_int_boundary() {
        let tag = tag(Tag::numeric(NumericKind::UInt));
        assert!(accepts(&tag, json!(0)));
        assert!(accepts(&tag, json!(42)));
        assert!(!accepts(&tag, json!(-1)));
        assert!(!accepts(&tag, json!(1.5)));
    }

    #[test]
    fn test_signed_int_boundary() {
        let tag = tag(Tag::numeric(NumericKind::SInt));
        assert!(accepts(&tag, json!(0)));
        assert!(accepts(&tag, json!(-5)));
        assert!(!accepts(&tag, json!(3)));
    }

    #[test]
    fn test_plain_int_accepts_both_signs() {
        let tag = tag(Tag::numeric(NumericKind::Int));
        assert!(accepts(&tag, json!(-3)));
        assert!(accepts(&tag, json!(3)));
        assert!(accepts(&tag, json!(2.0)));
        assert!(!accepts(&tag, json!(2.5)));
    }

    #[test]
    fn test_floats() {
        let unsigned = tag(Tag::numeric(NumericKind::UFloat));
        assert!(accepts(&unsigned, json!(1.8)));
        assert!(accepts(&unsigned, json!(2)));
        assert!(!accepts(&unsigned, json!(-0.1)));

        let signed = tag(Tag::numeric(NumericKind::SFloat));
        assert!(accepts(&signed, json!(-0.1)));
        assert!(!accepts(&signed, json!(0.1)));

        let any = tag(Tag::numeric(NumericKind::Float));
        assert!(accepts(&any, json!(-1e10)));
    }

    #[test]
    fn test_strings_are_not_numbers() {
        let tag = tag(Tag::numeric(NumericKind::Int));
        let errors = tag
            .validate(&json!("12"), &JsonPath::root())
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first().kind, ErrorKind::TypeMismatch);
        assert_eq!(errors.first().expected.as_deref(), Some("INT"));
    }

    #[test]
    fn test_bounds_report_the_right_limit() {
        let tag = tag(Tag::numeric(NumericKind::Int).max(10));
        let errors = tag
            .validate(&json!(11), &JsonPath::root().push_key("range"))
            .into_result()
            .unwrap_err();
        let error = errors.first();
        assert_eq!(error.kind, ErrorKind::Size(SizeViolation::TooMany));
        assert_eq!(error.expected.as_deref(), Some("at most 10"));
        assert_eq!(error.message, "value of \"range\" must be at most 10, got 11");
    }

    #[test]
    fn test_range_bounds() {
        let tag = tag(Tag::numeric(NumericKind::Float).range(0.5..=1.5));
        assert!(accepts(&tag, json!(0.5)));
        assert!(accepts(&tag, json!(1)));
        let errors = tag
            .validate(&json!(2), &JsonPath::root())
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first().kind, ErrorKind::Size(SizeViolation::OutsideRange));
    }

    #[test]
    fn test_min_only() {
        let tag = tag(Tag::numeric(NumericKind::UInt).min(5));
        let errors = tag
            .validate(&json!(4), &JsonPath::root())
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first().kind, ErrorKind::Size(SizeViolation::TooFew));
        assert_eq!(errors.first().expected.as_deref(), Some("at least 5"));
    }

    #[test]
    fn test_invalid_bounds_fail_to_build() {
        assert!(Tag::numeric(NumericKind::Int).min(3).max(1).build().is_err());
        assert!(matches!(
            Tag::numeric(NumericKind::Float).min(f64::NAN).build(),
            Err(BuildError::NotANumber { .. })
        ));
    }
}
