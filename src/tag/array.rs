//! Array tags.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{BuildError, CheckError, ErrorKind};
use crate::path::JsonPath;
use crate::validation::ValidationContext;
use crate::ValidationResult;

use super::bounds::Bounds;
use super::{absorb, collect, failure, IntoTag, Tag, TagKind};

/// Accepts an array whose elements all match one element tag.
///
/// A size violation does not stop element checks: every element is validated
/// at `path[i]` and all failures are reported together.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayTag {
    pub(crate) optional: bool,
    element: Arc<Tag>,
    size: Bounds<usize>,
}

impl ArrayTag {
    pub fn element(&self) -> &Arc<Tag> {
        &self.element
    }

    pub fn min_size(&self) -> Option<usize> {
        self.size.min
    }

    pub fn max_size(&self) -> Option<usize> {
        self.size.max
    }

    pub(crate) fn validate(
        &self,
        value: &Value,
        path: &JsonPath,
        ctx: &ValidationContext<'_>,
    ) -> ValidationResult {
        let Some(items) = value.as_array() else {
            return failure(CheckError::type_mismatch(path.clone(), TagKind::Arr, value));
        };

        let mut errors = Vec::new();

        if let Some((violation, expected)) = self.size.count_violation(items.len()) {
            errors.push(
                CheckError::new(
                    path.clone(),
                    ErrorKind::Size(violation),
                    format!(
                        "array \"{}\" must have {} elements, got {}",
                        path,
                        expected,
                        items.len()
                    ),
                )
                .with_expected(format!("{} elements", expected))
                .with_got(format!("{} elements", items.len())),
            );
        }

        for (index, item) in items.iter().enumerate() {
            let item_path = path.push_index(index);
            absorb(&mut errors, self.element.validate(item, &item_path, ctx));
        }

        collect(errors)
    }
}

/// Builder for [`ArrayTag`].
///
/// # Example
///
/// ```rust
/// use tagschema::{Tag, TagKind};
///
/// let tags = Tag::array().element(TagKind::Str).max_size(8).build().unwrap();
/// let pair = Tag::array().element(Tag::numeric(tagschema::NumericKind::Float)).size(2);
/// assert!(pair.build().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ArrayBuilder {
    optional: bool,
    element: Result<Arc<Tag>, BuildError>,
    size: Bounds<usize>,
}

impl ArrayBuilder {
    pub fn new() -> Self {
        Self {
            optional: false,
            element: TagKind::Any.into_tag(),
            size: Bounds::default(),
        }
    }

    pub fn optional(self) -> Self {
        self.set_optional(true)
    }

    pub fn set_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Sets the tag every element must match.
    pub fn element(mut self, element: impl IntoTag) -> Self {
        self.element = element.into_tag();
        self
    }

    pub fn min_size(mut self, min: usize) -> Self {
        self.size.min = Some(min);
        self
    }

    pub fn max_size(mut self, max: usize) -> Self {
        self.size.max = Some(max);
        self
    }

    /// Requires exactly `size` elements.
    pub fn size(self, size: usize) -> Self {
        self.min_size(size).max_size(size)
    }

    pub fn build(self) -> Result<Tag, BuildError> {
        let element = self
            .element
            .map_err(|source| BuildError::Element(Box::new(source)))?;
        self.size.check_order("size")?;
        Ok(Tag::Array(ArrayTag {
            optional: self.optional,
            element,
            size: self.size,
        }))
    }
}

impl Default for ArrayBuilder {
    fn default() -> Self {
        Self::new()
    }
}
