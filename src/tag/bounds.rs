//! Inclusive min/max bounds shared by string lengths, numeric values and
//! array sizes.

use std::fmt::Display;

use crate::error::{BuildError, SizeViolation};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Bounds<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: PartialOrd + Copy + Display> Bounds<T> {
    /// Rejects `min > max`.
    pub fn check_order(&self, what: &'static str) -> Result<(), BuildError> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > max => Err(BuildError::InvalidRange {
                what,
                min: min.to_string(),
                max: max.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Range semantics for lengths and numeric values: equal bounds demand an
    /// exact value, two bounds form a range, a single bound is one-sided.
    pub fn range_violation(&self, actual: T) -> Option<(SizeViolation, String)> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max && actual != min => {
                Some((SizeViolation::ExactMismatch, format!("exactly {}", min)))
            }
            (Some(min), Some(max)) if actual < min || actual > max => Some((
                SizeViolation::OutsideRange,
                format!("between {} and {}", min, max),
            )),
            (Some(min), None) if actual < min => {
                Some((SizeViolation::TooFew, format!("at least {}", min)))
            }
            (None, Some(max)) if actual > max => {
                Some((SizeViolation::TooMany, format!("at most {}", max)))
            }
            _ => None,
        }
    }

    /// Count semantics for array sizes: equal bounds demand an exact count,
    /// otherwise each bound is reported on its own.
    pub fn count_violation(&self, actual: T) -> Option<(SizeViolation, String)> {
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min == max {
                return (actual != min)
                    .then(|| (SizeViolation::ExactMismatch, format!("exactly {}", min)));
            }
        }
        match (self.min, self.max) {
            (Some(min), _) if actual < min => {
                Some((SizeViolation::TooFew, format!("at least {}", min)))
            }
            (_, Some(max)) if actual > max => {
                Some((SizeViolation::TooMany, format!("at most {}", max)))
            }
            _ => None,
        }
    }
}
