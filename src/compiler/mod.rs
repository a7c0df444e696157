//! Compiles description documents into schemas.
//!
//! A description document lists entries under `schema` (the root object's
//! keys) and optionally named groups under `groups`. It is checked against
//! [`meta::meta_schema`] first, so the walk below can rely on its shape; any
//! remaining inconsistency (bounds in the wrong order, unknown group names)
//! is reported by the builders.

pub(crate) mod meta;

use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{BuildError, CompileError};
use crate::registry::GroupRegistry;
use crate::schema::Schema;
use crate::tag::{is_default_true_token, Alternative, ObjectBuilder, Tag, TagKind};
use crate::value;

use self::meta::*;

static NULL: Value = Value::Null;

/// Checks `document` against the meta-schema and compiles it.
pub(crate) fn compile(document: &Value) -> Result<Schema, CompileError> {
    let result = meta_schema().check(document);
    if !result.is_valid() {
        tracing::debug!(errors = result.len(), "description rejected by meta-schema");
        return Err(CompileError::Invalid(result));
    }

    let entries = array(document, SCHEMA);
    let root = compile_object(entries).build()?;

    let mut groups = GroupRegistry::default();
    for def in array(document, GROUPS) {
        let name = string(def, GROUP_NAME);
        let type_def = def.get(TYPE_DEF).unwrap_or(&NULL);
        // recorded on the tag; lookups through a reference never consult it
        let tag = compile_tag(type_def, flag(def, OPTIONAL)).map_err(|source| BuildError::Group {
            name: name.clone(),
            source: Box::new(source),
        })?;
        if groups.insert(&name, Arc::new(tag)).is_some() {
            tracing::warn!(group = %name, "group defined twice, keeping the last definition");
        }
    }

    tracing::debug!(
        entries = entries.len(),
        groups = groups.len(),
        "description compiled"
    );
    Ok(Schema::from_parts(Arc::new(root), groups)?)
}

/// What one `type_def` contributes to its enclosing object.
enum Entry {
    Field(String, Result<Tag, BuildError>),
    Conditional(String, Vec<Alternative>),
}

fn compile_object(defs: &[Value]) -> ObjectBuilder {
    defs.iter()
        .fold(Tag::object(), |builder, def| match compile_entry(def, false) {
            Entry::Field(name, tag) => builder.field(name, tag),
            Entry::Conditional(discriminator, branches) => {
                builder.conditional(discriminator, branches)
            }
        })
}

/// Compiles a `type_def` that stands on its own: an array element, a
/// conditional branch or a group. Its `name` is ignored, and a conditional
/// becomes an object carrying only that set.
fn compile_tag(def: &Value, force_optional: bool) -> Result<Tag, BuildError> {
    match compile_entry(def, force_optional) {
        Entry::Field(_, tag) => tag,
        Entry::Conditional(discriminator, branches) => Tag::object()
            .conditional(discriminator, branches)
            .set_optional(force_optional || flag(def, OPTIONAL))
            .build(),
    }
}

fn compile_entry(def: &Value, force_optional: bool) -> Entry {
    let name = string(def, NAME);
    let optional = force_optional || flag(def, OPTIONAL);
    let kind = match TagKind::from_str(&string(def, TYPE)) {
        Ok(kind) => kind,
        Err(unknown) => return Entry::Field(name, Err(unknown.into())),
    };
    let data = def.get(DATA).unwrap_or(&NULL);

    let tag = if let Some(numeric) = kind.numeric() {
        let mut builder = Tag::numeric(numeric).set_optional(optional);
        if let Some(min) = number(data, MIN_VALUE) {
            builder = builder.min(min);
        }
        if let Some(max) = number(data, MAX_VALUE) {
            builder = builder.max(max);
        }
        builder.build()
    } else {
        match kind {
            TagKind::Str => {
                let mut builder = Tag::string().set_optional(optional);
                if let Some(min) = size(data, MIN_LEN) {
                    builder = builder.min_len(min);
                }
                if let Some(max) = size(data, MAX_LEN) {
                    builder = builder.max_len(max);
                }
                builder.build()
            }
            TagKind::Char => Tag::char()
                .valid_chars(strings(data, VALID_CHARS).iter().filter_map(|s| s.chars().next()))
                .set_optional(optional)
                .build(),
            TagKind::Bool => {
                let mut builder = Tag::boolean().set_optional(optional);
                let valid = strings(data, VALID_BOOLS);
                if !valid.is_empty() {
                    builder = builder.true_tokens(valid);
                }
                let invalid = strings(data, INVALID_BOOLS);
                if !invalid.is_empty() {
                    builder = builder.false_tokens(invalid);
                }
                builder.build()
            }
            TagKind::Uuid => Tag::uuid().set_optional(optional).build(),
            TagKind::Any => Tag::any().set_optional(optional).build(),
            TagKind::Enum => {
                let constants = primitives(data.as_array().map(Vec::as_slice).unwrap_or(&[]));
                Tag::enumeration(constants).set_optional(optional).build()
            }
            TagKind::Obj => {
                let entries = data.as_array().map(Vec::as_slice).unwrap_or(&[]);
                compile_object(entries).set_optional(optional).build()
            }
            TagKind::Arr => {
                let element = data.get(TAG_FORMAT).unwrap_or(&NULL);
                let mut builder = Tag::array()
                    .element(compile_tag(element, false))
                    .set_optional(optional);
                if let Some(min) = size(data, MIN_SIZE) {
                    builder = builder.min_size(min);
                }
                if let Some(max) = size(data, MAX_SIZE) {
                    builder = builder.max_size(max);
                }
                builder.build()
            }
            TagKind::Group => Tag::group(string(data, GROUP_NAME))
                .set_optional(optional)
                .build(),
            TagKind::Conditional => {
                let branches = array(data, CONDITIONALS)
                    .iter()
                    .map(|branch| {
                        let tag_format = branch.get(TAG_FORMAT).unwrap_or(&NULL);
                        Alternative::new(
                            string(branch, REFERENCE_VALUE),
                            string(branch, DESTINATION_KEY),
                            compile_tag(tag_format, false),
                        )
                    })
                    .collect();
                return Entry::Conditional(string(data, REFERENCE_KEY), branches);
            }
            // numeric kinds are handled above
            _ => Err(BuildError::NoDefaultTag(kind)),
        }
    };

    Entry::Field(name, tag)
}

/// An `optional`-style flag is set iff its string form is a default true-token.
fn flag(map: &Value, key: &str) -> bool {
    map.get(key)
        .and_then(value::primitive_string)
        .is_some_and(|token| is_default_true_token(&token))
}

fn string(map: &Value, key: &str) -> String {
    map.get(key)
        .and_then(value::primitive_string)
        .unwrap_or_default()
}

fn array<'a>(map: &'a Value, key: &str) -> &'a [Value] {
    map.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn primitives(items: &[Value]) -> Vec<String> {
    items.iter().filter_map(value::primitive_string).collect()
}

fn strings(map: &Value, key: &str) -> Vec<String> {
    primitives(array(map, key))
}

fn number(map: &Value, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

fn size(map: &Value, key: &str) -> Option<usize> {
    number(map, key).map(|n| n as usize)
}
