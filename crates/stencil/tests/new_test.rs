//! Integration tests for `stencil new`

#![allow(deprecated)]

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use stencil_testkit::{
    list_files, temp_dir_in_workspace, with_isolated_env, write_descriptor, write_file,
};

fn stencil(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stencil").unwrap();
    cmd.current_dir(root)
        .env("NO_COLOR", "1")
        .arg("--workspace")
        .arg(root);
    cmd
}

/// Workspace with a `component` directory-family template
fn setup_component_template(root: &Path) {
    let templates = root.join(".stencil/templates");
    write_descriptor(
        &templates,
        "component",
        r#"{"label": "Component", "description": "UI component"}"#,
    );
    write_file(
        &templates,
        "component/__NAME__.tsx",
        "export function __NAME__() {}\n",
    );
    write_file(
        &templates,
        "component/styles/__NAME__.module.css",
        ".__NAME__ {}\n",
    );
}

#[test]
fn test_new_from_builtin_single_file() {
    with_isolated_env(|_templates| {
        let temp = temp_dir_in_workspace();
        let root = temp.path();

        stencil(root)
            .args(["new", "markdown", "NOTES"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created"))
            .stdout(predicate::str::contains("NOTES.md"));

        assert_eq!(
            fs::read_to_string(root.join("NOTES.md")).unwrap(),
            "# NOTES\n\n"
        );
    });
}

#[test]
fn test_new_single_file_collision_fails_and_preserves_file() {
    with_isolated_env(|_templates| {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        fs::write(root.join("lib.rs"), "my code\n").unwrap();

        stencil(root)
            .args(["new", "rust-module", "lib"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("DESTINATION_EXISTS"));

        assert_eq!(fs::read(root.join("lib.rs")).unwrap(), b"my code\n");
    });
}

#[test]
fn test_new_directory_family_substitutes_nested_paths() {
    with_isolated_env(|_templates| {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        setup_component_template(root);
        let src = root.join("src");
        fs::create_dir(&src).unwrap();

        stencil(root)
            .args(["new", "component", "Button", "--dest"])
            .arg(&src)
            .assert()
            .success();

        assert_eq!(
            list_files(&src),
            vec!["Button/Button.tsx", "Button/styles/Button.module.css"]
        );
        assert_eq!(
            fs::read_to_string(src.join("Button/Button.tsx")).unwrap(),
            "export function Button() {}\n"
        );
    });
}

#[test]
fn test_new_directory_family_rerun_fills_in_without_overwriting() {
    with_isolated_env(|_templates| {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        setup_component_template(root);

        stencil(root)
            .args(["new", "component", "Card"])
            .assert()
            .success();

        fs::write(root.join("Card/Card.tsx"), "edited\n").unwrap();
        write_file(
            &root.join(".stencil/templates"),
            "component/__NAME__.test.tsx",
            "test(__NAME__)\n",
        );

        stencil(root)
            .args(["new", "component", "Card"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Skipped"))
            .stdout(predicate::str::contains("Card.test.tsx"));

        assert_eq!(
            fs::read_to_string(root.join("Card/Card.tsx")).unwrap(),
            "edited\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("Card/Card.test.tsx")).unwrap(),
            "test(Card)\n"
        );
    });
}

#[test]
fn test_new_rejects_empty_name_without_side_effects() {
    with_isolated_env(|_templates| {
        let temp = temp_dir_in_workspace();
        let root = temp.path();

        stencil(root)
            .args(["new", "markdown", ""])
            .assert()
            .failure()
            .stderr(predicate::str::contains("NAME_INVALID"));

        assert!(list_files(root).is_empty());
    });
}

#[test]
fn test_new_rejects_path_traversal_name() {
    with_isolated_env(|_templates| {
        let temp = temp_dir_in_workspace();
        let root = temp.path();

        stencil(root)
            .args(["new", "markdown", "../escape"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("parent directory"));

        assert!(!root.parent().unwrap().join("escape.md").exists());
    });
}

#[test]
fn test_new_unknown_template() {
    with_isolated_env(|_templates| {
        let temp = temp_dir_in_workspace();

        stencil(temp.path())
            .args(["new", "does-not-exist", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("TEMPLATE_NOT_FOUND"));
    });
}

#[test]
fn test_new_dest_file_uses_its_directory() {
    with_isolated_env(|_templates| {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        let open_file = write_file(root, "docs/index.md", "");

        stencil(root)
            .args(["new", "markdown", "faq", "--dest"])
            .arg(&open_file)
            .assert()
            .success();

        assert!(root.join("docs/faq.md").is_file());
    });
}

#[test]
fn test_new_json_report() {
    with_isolated_env(|_templates| {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        setup_component_template(root);

        let output = stencil(root)
            .args(["new", "component", "Nav", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["template"], "component");
        assert_eq!(json["created"].as_array().unwrap().len(), 2);
        assert!(json["skipped"].as_array().unwrap().is_empty());
        assert!(json["failures"].as_array().unwrap().is_empty());
    });
}

#[test]
fn test_new_partial_failure_reports_each_file() {
    with_isolated_env(|_templates| {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        let templates = root.join(".stencil/templates");
        write_descriptor(&templates, "pair", r#"{"label": "Pair", "description": ""}"#);
        write_file(&templates, "pair.txt", "text __NAME__");
        fs::write(templates.join("pair.bin"), [0xff, 0xfe, 0xfd]).unwrap();

        let output = stencil(root)
            .args(["new", "pair", "p", "--json"])
            .output()
            .unwrap();
        assert!(!output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["created"].as_array().unwrap().len(), 1);
        assert_eq!(json["failures"][0]["code"], "TEMPLATE_READ_FAILED");
        assert_eq!(fs::read_to_string(root.join("p.txt")).unwrap(), "text p");
    });
}
