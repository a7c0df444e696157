//! The meta-schema every description document must satisfy.
//!
//! It is written with the same builders users write schemas with, and
//! checks description documents the same way any schema checks documents.

use std::sync::OnceLock;

use crate::error::BuildError;
use crate::schema::Schema;
use crate::tag::{Alternative, NumericKind, ObjectBuilder, Tag, TagKind};

pub(crate) const SCHEMA: &str = "schema";
pub(crate) const GROUPS: &str = "groups";
pub(crate) const NAME: &str = "name";
pub(crate) const TYPE: &str = "type";
pub(crate) const OPTIONAL: &str = "optional";
pub(crate) const DATA: &str = "data";
pub(crate) const GROUP_NAME: &str = "group_name";
pub(crate) const TYPE_DEF: &str = "type_def";
pub(crate) const GROUP_DEF: &str = "group_def";
pub(crate) const MIN_LEN: &str = "min_len";
pub(crate) const MAX_LEN: &str = "max_len";
pub(crate) const VALID_CHARS: &str = "valid_chars";
pub(crate) const MIN_VALUE: &str = "min_value";
pub(crate) const MAX_VALUE: &str = "max_value";
pub(crate) const VALID_BOOLS: &str = "valid_bools";
pub(crate) const INVALID_BOOLS: &str = "invalid_bools";
pub(crate) const MIN_SIZE: &str = "min_size";
pub(crate) const MAX_SIZE: &str = "max_size";
pub(crate) const TAG_FORMAT: &str = "tag_format";
pub(crate) const REFERENCE_KEY: &str = "reference_key";
pub(crate) const CONDITIONALS: &str = "conditionals";
pub(crate) const REFERENCE_VALUE: &str = "reference_value";
pub(crate) const DESTINATION_KEY: &str = "destination_key";

/// The meta-schema, built on first use.
pub(crate) fn meta_schema() -> &'static Schema {
    static META: OnceLock<Schema> = OnceLock::new();
    META.get_or_init(|| build().expect("meta-schema is well-formed"))
}

fn build() -> Result<Schema, BuildError> {
    let root = Tag::object()
        .field(SCHEMA, Tag::array().element(Tag::group(TYPE_DEF)))
        .field(
            GROUPS,
            Tag::array().element(Tag::group(GROUP_DEF)).optional(),
        );

    Schema::builder(root)
        .group(TYPE_DEF, type_def())
        .group(GROUP_DEF, group_def())
        .build()
}

fn type_def() -> ObjectBuilder {
    let mut data = vec![
        Alternative::new(
            TagKind::Str.name(),
            DATA,
            Tag::object()
                .field(MIN_LEN, Tag::numeric(NumericKind::UInt).optional())
                .field(MAX_LEN, Tag::numeric(NumericKind::UInt).optional()),
        )
        .not_required(),
        Alternative::new(
            TagKind::Char.name(),
            DATA,
            Tag::object().field(VALID_CHARS, Tag::array().element(TagKind::Char).optional()),
        )
        .not_required(),
    ];

    data.extend(NUMERIC_KINDS.into_iter().map(|kind| {
        Alternative::new(
            kind.tag_kind().name(),
            DATA,
            Tag::object()
                .field(MIN_VALUE, Tag::numeric(kind).optional())
                .field(MAX_VALUE, Tag::numeric(kind).optional()),
        )
        .not_required()
    }));

    data.extend([
        Alternative::new(
            TagKind::Bool.name(),
            DATA,
            Tag::object()
                .field(VALID_BOOLS, Tag::array().element(TagKind::Str).optional())
                .field(INVALID_BOOLS, Tag::array().element(TagKind::Str).optional()),
        )
        .not_required(),
        Alternative::new(
            TagKind::Enum.name(),
            DATA,
            Tag::array().element(TagKind::Str),
        )
        .not_required(),
        Alternative::new(
            TagKind::Obj.name(),
            DATA,
            Tag::array().element(Tag::group(TYPE_DEF)),
        ),
        Alternative::new(
            TagKind::Arr.name(),
            DATA,
            Tag::object()
                .field(MIN_SIZE, Tag::numeric(NumericKind::UInt).optional())
                .field(MAX_SIZE, Tag::numeric(NumericKind::UInt).optional())
                .field(TAG_FORMAT, Tag::group(TYPE_DEF)),
        ),
        Alternative::new(
            TagKind::Group.name(),
            DATA,
            Tag::object().field(GROUP_NAME, TagKind::Str),
        ),
        Alternative::new(
            TagKind::Conditional.name(),
            DATA,
            Tag::object()
                .field(REFERENCE_KEY, TagKind::Str)
                .field(
                    CONDITIONALS,
                    Tag::array().element(
                        Tag::object()
                            .field(REFERENCE_VALUE, TagKind::Str)
                            .field(DESTINATION_KEY, TagKind::Str)
                            .field(TAG_FORMAT, Tag::group(TYPE_DEF)),
                    ),
                ),
        ),
    ]);

    Tag::object()
        .field(NAME, TagKind::Str)
        .field(TYPE, Tag::enumeration(TagKind::ALL.iter().map(TagKind::name)))
        .field(OPTIONAL, TagKind::Bool)
        .conditional(TYPE, data)
}

fn group_def() -> ObjectBuilder {
    Tag::object()
        .field(GROUP_NAME, TagKind::Str)
        .field(OPTIONAL, TagKind::Bool)
        .field(TYPE_DEF, Tag::group(TYPE_DEF))
}

const NUMERIC_KINDS: [NumericKind; 6] = [
    NumericKind::UInt,
    NumericKind::Int,
    NumericKind::SInt,
    NumericKind::UFloat,
    NumericKind::Float,
    NumericKind::SFloat,
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_meta_schema_builds() {
        let meta = meta_schema();
        assert_eq!(meta.groups().names(), vec![GROUP_DEF, TYPE_DEF]);
    }

    #[test]
    fn test_accepts_a_minimal_description() {
        let result = meta_schema().check(&json!({
            "schema": [{"name": "id", "type": "UUID", "optional": false}]
        }));
        assert!(result.is_valid(), "{}", result);
    }

    #[test]
    fn test_requires_schema_key() {
        let result = meta_schema().check(&json!({"groups": []}));
        assert_eq!(result.get("schema").unwrap().code(), "missing_field");
    }

    #[test]
    fn test_type_names_are_case_insensitive() {
        let result = meta_schema().check(&json!({
            "schema": [{"name": "n", "type": "u_int", "optional": "no", "data": {"max_value": 3}}]
        }));
        assert!(result.is_valid(), "{}", result);
    }

    #[test]
    fn test_unknown_type_is_not_accepted() {
        let result = meta_schema().check(&json!({
            "schema": [{"name": "n", "type": "DATE", "optional": false}]
        }));
        assert_eq!(result.get("schema[0].type").unwrap().code(), "not_accepted");
    }

    #[test]
    fn test_array_entries_need_data() {
        let result = meta_schema().check(&json!({
            "schema": [{"name": "items", "type": "ARR", "optional": false}]
        }));
        assert_eq!(result.get("schema[0].data").unwrap().code(), "missing_field");
    }

    #[test]
    fn test_numeric_data_uses_the_entry_kind() {
        let result = meta_schema().check(&json!({
            "schema": [{"name": "depth", "type": "S_INT", "optional": false, "data": {"min_value": 5}}]
        }));
        assert_eq!(result.get("schema[0].data.min_value").unwrap().code(), "invalid_type");
    }
}
