//! Integration tests for `stencil list`

#![allow(deprecated)]

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use stencil_testkit::{temp_dir_in_workspace, with_isolated_env, write_descriptor};

fn stencil(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stencil").unwrap();
    cmd.current_dir(root)
        .env("NO_COLOR", "1")
        .arg("--workspace")
        .arg(root);
    cmd
}

fn list_json(root: &Path) -> serde_json::Value {
    let output = stencil(root).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

fn find<'a>(json: &'a serde_json::Value, name: &str) -> Option<&'a serde_json::Value> {
    json["templates"]
        .as_array()
        .unwrap()
        .iter()
        .find(|t| t["name"] == name)
}

#[test]
fn test_list_includes_builtins() {
    with_isolated_env(|_templates| {
        let temp = temp_dir_in_workspace();
        let json = list_json(temp.path());

        let markdown = find(&json, "markdown").expect("builtin markdown listed");
        assert_eq!(markdown["origin"], "builtin");
        assert_eq!(markdown["kind"], "file");
        assert!(markdown["descriptor"].is_null());
    });
}

#[test]
fn test_list_creates_user_template_dir() {
    with_isolated_env(|templates| {
        let temp = temp_dir_in_workspace();
        assert!(!templates.exists());

        stencil(temp.path()).arg("list").assert().success();

        assert!(templates.is_dir());
    });
}

#[test]
fn test_list_workspace_overrides_user_and_builtin() {
    with_isolated_env(|templates| {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        fs::create_dir_all(templates).unwrap();
        let workspace = root.join(".stencil/templates");
        fs::create_dir_all(&workspace).unwrap();

        write_descriptor(
            templates,
            "markdown",
            r#"{"label": "Team markdown", "description": "", "template": "", "extension": ".md"}"#,
        );
        write_descriptor(
            &workspace,
            "markdown",
            r#"{"label": "Project markdown", "description": "", "template": "", "extension": ".md"}"#,
        );

        let json = list_json(root);
        let markdown = find(&json, "markdown").unwrap();
        assert_eq!(markdown["label"], "Project markdown");
        assert_eq!(markdown["origin"], "workspace");
    });
}

#[test]
fn test_list_reports_malformed_descriptor_and_continues() {
    with_isolated_env(|_templates| {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        let workspace = root.join(".stencil/templates");
        fs::create_dir_all(&workspace).unwrap();
        write_descriptor(&workspace, "broken", "{ nope");
        write_descriptor(&workspace, "fine", r#"{"label": "Fine", "description": ""}"#);

        let json = list_json(root);
        assert!(find(&json, "fine").is_some());
        assert!(find(&json, "broken").is_none());
        assert!(find(&json, "rust-module").is_some());

        let errors = json["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0]["path"].as_str().unwrap().ends_with("broken.template"));

        stencil(root)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("fine"))
            .stderr(predicate::str::contains("DESCRIPTOR_INVALID"));
    });
}

#[test]
fn test_list_without_builtins() {
    with_isolated_env(|_templates| {
        let temp = temp_dir_in_workspace();
        let root = temp.path();
        fs::create_dir_all(root.join(".stencil")).unwrap();
        fs::write(
            root.join(".stencil/config.toml"),
            "[templates]\ninclude_builtin = false\n",
        )
        .unwrap();

        let json = list_json(root);
        assert_eq!(json["count"], 0);

        stencil(root)
            .arg("list")
            .assert()
            .success()
            .stdout(predicate::str::contains("No templates found"));
    });
}
