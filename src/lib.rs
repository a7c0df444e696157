//! # Tagschema
//!
//! Validation of JSON documents against tag-based schemas, where the schemas
//! themselves can be described as JSON documents.
//!
//! ## Overview
//!
//! A schema is a tree of [`Tag`]s: scalars (strings, characters, six numeric
//! kinds, booleans over configurable tokens, UUIDs, enums), arrays, objects,
//! references to named groups, and conditional sets that pick a tag for one
//! key based on the value of another. Checking a document walks the tree once
//! and collects every failure into a [`CheckResult`] keyed by path, rather
//! than stopping at the first one. Failures accumulate through stillwater's
//! `Validation` type.
//!
//! Schemas can be built in code with the builders on [`Tag`] and
//! [`Schema::builder`], or compiled from a description document with
//! [`Schema::from_document`]. Description documents are themselves checked
//! against a meta-schema built with the same builders.
//!
//! ## Core Types
//!
//! - [`Tag`] and its builders: the schema nodes
//! - [`Schema`]: a root tag plus its [`GroupRegistry`]
//! - [`CheckResult`]: errors of one document, sorted by path
//! - [`CheckError`]: one failed check with path, kind, message, expected/got
//! - [`JsonPath`]: paths like `weapon.items[2]`
//!
//! ## Example
//!
//! ```rust
//! use tagschema::Schema;
//! use serde_json::json;
//!
//! let schema = Schema::from_document(&json!({
//!     "schema": [
//!         {"name": "name", "type": "STR", "optional": false, "data": {"min_len": 1}},
//!         {"name": "range", "type": "U_INT", "optional": false, "data": {"max_value": 10}},
//!         {"name": "pos", "type": "GROUP", "optional": true, "data": {"group_name": "position"}}
//!     ],
//!     "groups": [{
//!         "group_name": "position",
//!         "optional": false,
//!         "type_def": {
//!             "name": "position", "type": "OBJ", "optional": false,
//!             "data": [
//!                 {"name": "x", "type": "FLT", "optional": false},
//!                 {"name": "y", "type": "FLT", "optional": false}
//!             ]
//!         }
//!     }]
//! }))
//! .unwrap();
//!
//! assert!(schema.check(&json!({"name": "Sword", "range": 1})).is_valid());
//!
//! let result = schema.check(&json!({"name": "", "range": 12, "pos": {"x": 0}}));
//! let paths: Vec<_> = result.paths().collect();
//! assert_eq!(paths, vec!["name", "pos.y", "range"]);
//! ```

mod compiler;
pub mod error;
pub mod path;
pub mod registry;
pub mod schema;
pub mod tag;
pub mod validation;
pub mod value;

pub use error::{
    BuildError, CheckError, CheckErrors, CheckResult, CompileError, ErrorKind, SizeViolation,
};
pub use path::{JsonPath, PathSegment};
pub use registry::GroupRegistry;
pub use schema::{Schema, SchemaBuilder};
pub use tag::{
    Alternative, AnyBuilder, AnyTag, ArrayBuilder, ArrayTag, BoolBuilder, BoolTag, Branch,
    CharBuilder, CharTag, ConditionalSet, EnumBuilder, EnumTag, GroupBuilder, GroupTag, IntoTag,
    NumericBuilder, NumericKind, NumericTag, ObjectBuilder, ObjectTag, StringBuilder, StringTag,
    Tag, TagKind, UnknownKind, UuidBuilder, UuidTag,
};
pub use validation::ValidationContext;

/// Result of validating one value: success, or the non-empty errors found.
pub type ValidationResult = stillwater::Validation<(), CheckErrors>;
