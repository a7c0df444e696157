//! Tests for sharing schemas across threads.

use serde_json::json;
use std::sync::Arc;
use std::thread;
use tagschema::{NumericKind, Schema, Tag, TagKind};

fn user_schema() -> Schema {
    Schema::builder(
        Tag::object()
            .field("name", Tag::string().min_len(1))
            .field("age", Tag::numeric(NumericKind::UInt).max(150))
            .field("friends", Tag::array().element(Tag::group("user")).optional()),
    )
    .group(
        "user",
        Tag::object()
            .field("name", TagKind::Str)
            .field("friends", Tag::array().element(Tag::group("user")).optional()),
    )
    .build()
    .unwrap()
}

#[test]
fn test_concurrent_checks() {
    let schema = Arc::new(user_schema());

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let result = schema.check(&json!({
                    "name": format!("User{}", i),
                    "age": 20 + i,
                    "friends": [{"name": "Bob", "friends": [{"name": "Eve"}]}]
                }));
                assert!(result.is_valid());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_check_all_matches_sequential_checks() {
    let schema = user_schema();
    let documents: Vec<_> = (0..200)
        .map(|i| {
            if i % 3 == 0 {
                json!({"name": "", "age": i})
            } else {
                json!({"name": format!("User{}", i), "age": i % 150})
            }
        })
        .collect();

    let parallel = schema.check_all(&documents);
    let sequential: Vec<_> = documents.iter().map(|d| schema.check(d)).collect();
    assert_eq!(parallel, sequential);
    assert_eq!(parallel.iter().filter(|r| !r.is_valid()).count(), 67);
}

#[test]
fn test_compiled_schema_shared_between_threads() {
    let schema = Arc::new(
        Schema::from_document(&json!({
            "schema": [{"name": "id", "type": "UUID", "optional": false}]
        }))
        .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || schema.check(&json!({"id": 1})).len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 1);
    }
}
