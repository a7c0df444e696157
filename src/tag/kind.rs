//! The closed set of tag kinds.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::BuildError;

use super::Tag;

/// Every kind a tag (or a description document entry) can have.
///
/// The names are the ones used by description documents and are matched
/// case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Str,
    Char,
    UInt,
    Int,
    SInt,
    UFloat,
    Float,
    SFloat,
    Bool,
    Uuid,
    Enum,
    Obj,
    Arr,
    Group,
    Conditional,
    Any,
}

impl TagKind {
    /// All kinds in declaration order.
    pub const ALL: [TagKind; 16] = [
        TagKind::Str,
        TagKind::Char,
        TagKind::UInt,
        TagKind::Int,
        TagKind::SInt,
        TagKind::UFloat,
        TagKind::Float,
        TagKind::SFloat,
        TagKind::Bool,
        TagKind::Uuid,
        TagKind::Enum,
        TagKind::Obj,
        TagKind::Arr,
        TagKind::Group,
        TagKind::Conditional,
        TagKind::Any,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TagKind::Str => "STR",
            TagKind::Char => "CHAR",
            TagKind::UInt => "U_INT",
            TagKind::Int => "INT",
            TagKind::SInt => "S_INT",
            TagKind::UFloat => "U_FLT",
            TagKind::Float => "FLT",
            TagKind::SFloat => "S_FLT",
            TagKind::Bool => "BOOL",
            TagKind::Uuid => "UUID",
            TagKind::Enum => "ENUM",
            TagKind::Obj => "OBJ",
            TagKind::Arr => "ARR",
            TagKind::Group => "GROUP",
            TagKind::Conditional => "CONDITIONAL",
            TagKind::Any => "ANY",
        }
    }

    /// The numeric subkind, for the six numeric kinds.
    pub fn numeric(&self) -> Option<NumericKind> {
        match self {
            TagKind::UInt => Some(NumericKind::UInt),
            TagKind::Int => Some(NumericKind::Int),
            TagKind::SInt => Some(NumericKind::SInt),
            TagKind::UFloat => Some(NumericKind::UFloat),
            TagKind::Float => Some(NumericKind::Float),
            TagKind::SFloat => Some(NumericKind::SFloat),
            _ => None,
        }
    }

    /// The unconstrained, required tag of this kind.
    ///
    /// Only scalar kinds and `ANY` have one; the others need arguments.
    pub fn default_tag(&self) -> Result<Tag, BuildError> {
        if let Some(numeric) = self.numeric() {
            return Tag::numeric(numeric).build();
        }
        match self {
            TagKind::Str => Tag::string().build(),
            TagKind::Char => Tag::char().build(),
            TagKind::Bool => Tag::boolean().build(),
            TagKind::Uuid => Tag::uuid().build(),
            TagKind::Any => Tag::any().build(),
            other => Err(BuildError::NoDefaultTag(*other)),
        }
    }
}

impl Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string names no tag kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tag kind '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for TagKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagKind::ALL
            .iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// Numeric subkinds: integer or float, and which signs are allowed.
///
/// "Signed" kinds accept zero and negative numbers, "unsigned" kinds zero and
/// positive numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    UInt,
    Int,
    SInt,
    UFloat,
    Float,
    SFloat,
}

impl NumericKind {
    pub fn tag_kind(&self) -> TagKind {
        match self {
            NumericKind::UInt => TagKind::UInt,
            NumericKind::Int => TagKind::Int,
            NumericKind::SInt => TagKind::SInt,
            NumericKind::UFloat => TagKind::UFloat,
            NumericKind::Float => TagKind::Float,
            NumericKind::SFloat => TagKind::SFloat,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, NumericKind::UInt | NumericKind::Int | NumericKind::SInt)
    }

    /// Whether `n` has the sign this kind allows.
    pub(crate) fn accepts_sign(&self, n: f64) -> bool {
        match self {
            NumericKind::UInt | NumericKind::UFloat => n >= 0.0,
            NumericKind::SInt | NumericKind::SFloat => n <= 0.0,
            NumericKind::Int | NumericKind::Float => true,
        }
    }
}
