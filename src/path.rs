//! Locations of values inside a checked document.
//!
//! A [`JsonPath`] renders as dotted keys and bracketed indices, the same
//! string used as the key of a [`CheckResult`](crate::CheckResult):
//! `weapon.items[2]`. The root renders as the empty string.

use std::fmt::{self, Display};

/// One step from a container to a child value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key (e.g. `weapon`).
    Key(String),
    /// A 0-based array index (e.g. `[2]`).
    Index(usize),
}

/// A path from the document root to a value.
///
/// Paths are cheap persistent values: [`push_key`](Self::push_key) and
/// [`push_index`](Self::push_index) return a new path and leave `self`
/// untouched, so sibling checks can share a parent path.
///
/// # Example
///
/// ```rust
/// use tagschema::JsonPath;
///
/// let path = JsonPath::root().push_key("weapon").push_key("items").push_index(2);
/// assert_eq!(path.to_string(), "weapon.items[2]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// The empty path of the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with `key` appended.
    pub fn push_key(&self, key: impl Into<String>) -> Self {
        self.with(PathSegment::Key(key.into()))
    }

    /// Returns a new path with `index` appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.with(PathSegment::Index(index))
    }

    fn with(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment);
        Self { segments }
    }

    /// True for the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// The final segment, `None` at the root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_empty() {
        let path = JsonPath::root();
        assert!(path.is_root());
        assert_eq!(path.depth(), 0);
        assert_eq!(path.to_string(), "");
    }

    #[test]
    fn test_top_level_key_has_no_leading_dot() {
        assert_eq!(JsonPath::root().push_key("name").to_string(), "name");
    }

    #[test]
    fn test_index_at_root() {
        assert_eq!(JsonPath::root().push_index(3).to_string(), "[3]");
    }

    #[test]
    fn test_nested_array_inside_object() {
        let path = JsonPath::root()
            .push_key("weapon")
            .push_key("items")
            .push_index(2);
        assert_eq!(path.to_string(), "weapon.items[2]");
    }

    #[test]
    fn test_key_after_index() {
        let path = JsonPath::root()
            .push_key("schema")
            .push_index(0)
            .push_key("data")
            .push_index(1)
            .push_key("tag_format");
        assert_eq!(path.to_string(), "schema[0].data[1].tag_format");
    }

    #[test]
    fn test_push_leaves_parent_untouched() {
        let parent = JsonPath::root().push_key("items");
        let first = parent.push_index(0);
        let second = parent.push_index(1);

        assert_eq!(parent.to_string(), "items");
        assert_eq!(first.to_string(), "items[0]");
        assert_eq!(second.to_string(), "items[1]");
        assert_eq!(first.last(), Some(&PathSegment::Index(0)));
    }

    #[test]
    fn test_segments_in_order() {
        let path = JsonPath::root().push_key("a").push_index(1);
        let segments: Vec<_> = path.segments().collect();
        assert_eq!(
            segments,
            vec![&PathSegment::Key("a".to_string()), &PathSegment::Index(1)]
        );
    }
}
