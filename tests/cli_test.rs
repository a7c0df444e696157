//! CLI integration tests for the tagschema binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("tagschema"))
}

fn write_temp_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const DESCRIPTION: &str = r#"{
    "schema": [
        {"name": "name", "type": "STR", "optional": false, "data": {"min_len": 1}},
        {"name": "range", "type": "U_INT", "optional": false, "data": {"max_value": 10}},
        {"name": "pos", "type": "GROUP", "optional": true, "data": {"group_name": "position"}}
    ],
    "groups": [
        {
            "group_name": "position",
            "optional": false,
            "type_def": {
                "name": "", "type": "OBJ", "optional": false,
                "data": [
                    {"name": "x", "type": "FLT", "optional": false},
                    {"name": "y", "type": "FLT", "optional": false}
                ]
            }
        }
    ]
}"#;

mod check_command {
    use super::*;

    #[test]
    fn test_valid_document() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", DESCRIPTION);
        let doc = write_temp_file(&dir, "doc.json", r#"{"name": "Bow", "range": 4}"#);

        cmd()
            .args(["check", "--schema"])
            .arg(&schema)
            .arg(&doc)
            .assert()
            .success()
            .stdout(predicate::str::contains("valid"));
    }

    #[test]
    fn test_invalid_document_exits_with_one() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", DESCRIPTION);
        let doc = write_temp_file(&dir, "doc.json", r#"{"name": "", "range": 11}"#);

        cmd()
            .args(["check", "--schema"])
            .arg(&schema)
            .arg(&doc)
            .assert()
            .code(1)
            .stdout(predicate::str::contains("invalid"))
            .stdout(predicate::str::contains("range"));
    }

    #[test]
    fn test_json_output_reports_paths() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", DESCRIPTION);
        let doc = write_temp_file(
            &dir,
            "doc.json",
            r#"{"name": "Bow", "range": 1, "pos": {"x": 1.5}}"#,
        );

        cmd()
            .args(["check", "--json", "--schema"])
            .arg(&schema)
            .arg(&doc)
            .assert()
            .code(1)
            .stdout(predicate::str::contains(r#""valid":false"#))
            .stdout(predicate::str::contains(r#""pos.y""#))
            .stdout(predicate::str::contains("missing_field"));
    }

    #[test]
    fn test_one_line_per_document() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", DESCRIPTION);
        let good = write_temp_file(&dir, "good.json", r#"{"name": "Bow", "range": 1}"#);
        let bad = write_temp_file(&dir, "bad.json", r#"{"name": "Bow"}"#);

        let output = cmd()
            .args(["check", "--json", "--schema"])
            .arg(&schema)
            .arg(&good)
            .arg(&bad)
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        let stdout = String::from_utf8(output.stdout).unwrap();
        let lines: Vec<&str> = stdout.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r#""valid":true"#));
        assert!(lines[1].contains(r#""valid":false"#));
    }

    #[test]
    fn test_missing_document_exits_with_two() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", DESCRIPTION);

        cmd()
            .args(["check", "--schema"])
            .arg(&schema)
            .arg(dir.path().join("missing.json"))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("missing.json"));
    }

    #[test]
    fn test_malformed_json_exits_with_two() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", DESCRIPTION);
        let doc = write_temp_file(&dir, "doc.json", "{not json");

        cmd()
            .args(["check", "--schema"])
            .arg(&schema)
            .arg(&doc)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("parsing"));
    }

    #[test]
    fn test_documents_are_required() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", DESCRIPTION);

        cmd()
            .args(["check", "--schema"])
            .arg(&schema)
            .assert()
            .failure();
    }
}

mod compile_command {
    use super::*;

    #[test]
    fn test_valid_description() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", DESCRIPTION);

        cmd()
            .arg("compile")
            .arg(&schema)
            .assert()
            .success()
            .stdout(predicate::str::contains("compiles (3 root keys, 1 groups)"));
    }

    #[test]
    fn test_json_summary() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(&dir, "schema.json", DESCRIPTION);

        cmd()
            .args(["compile", "--json"])
            .arg(&schema)
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""groups":["position"]"#))
            .stdout(predicate::str::contains(r#""root_keys":3"#));
    }

    #[test]
    fn test_invalid_description_exits_with_one() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"schema": [{"name": "items", "type": "ARR", "optional": false}]}"#,
        );

        cmd()
            .arg("compile")
            .arg(&schema)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("not a valid description"))
            .stderr(predicate::str::contains("schema[0].data"));
    }

    #[test]
    fn test_unknown_group_exits_with_one() {
        let dir = TempDir::new().unwrap();
        let schema = write_temp_file(
            &dir,
            "schema.json",
            r#"{"schema": [{"name": "pos", "type": "GROUP", "optional": false, "data": {"group_name": "position"}}]}"#,
        );

        cmd()
            .args(["compile", "--json"])
            .arg(&schema)
            .assert()
            .code(1)
            .stdout(predicate::str::contains(r#""valid":false"#))
            .stdout(predicate::str::contains("position"));
    }
}
