//! End-to-end tests for the `tablesmith` binary, driven by a schema snapshot.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/shop.json")
}

/// The binary, run in an empty directory with no user config in reach.
fn tablesmith(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tablesmith").unwrap();
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .env("HOME", dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn generate(dir: &TempDir) -> Command {
    let mut cmd = tablesmith(dir);
    cmd.arg("generate")
        .arg("--schema-file")
        .arg(fixture())
        .args(["--package", "com.acme.shop", "--artifact-id", "shop"])
        .arg("-o")
        .arg(dir.path().join("shop"));
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    tablesmith(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    tablesmith(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn generates_project_from_snapshot() {
    let dir = TempDir::new().unwrap();
    generate(&dir)
        .args(["--skip-keyless", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 2 table(s), 20 files"))
        .stdout(predicate::str::contains("Skipped 'audit_log'"));

    let root = dir.path().join("shop");
    let entity = fs::read_to_string(
        root.join("dao/src/main/java/com/acme/shop/dao/entity/UserInfo.java"),
    )
    .unwrap();
    assert!(entity.contains("package com.acme.shop.dao.entity;"));
    assert!(entity.contains("private BigDecimal balance;"));
    assert!(entity.contains("private LocalDateTime createdAt;"));

    assert!(root.join("dao/src/main/resources/mapper/OrderLineMapper.xml").is_file());
    assert!(root.join("web/src/main/resources/application.yml").is_file());
    assert!(root.join("pom.xml").is_file());
    assert!(!root.join("dao/src/main/java/com/acme/shop/dao/entity/AuditLog.java").exists());
}

#[test]
fn keyless_table_fails_before_writing() {
    let dir = TempDir::new().unwrap();
    generate(&dir)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("table 'audit_log' has no primary key"));
    assert!(!dir.path().join("shop").exists());
}

#[test]
fn table_filter_limits_output() {
    let dir = TempDir::new().unwrap();
    generate(&dir)
        .args(["--table", "order_line", "--no-scaffold", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated 1 table(s), 6 files"));
    assert!(!dir.path().join("shop/pom.xml").exists());
}

#[test]
fn unknown_table_is_a_user_error() {
    let dir = TempDir::new().unwrap();
    generate(&dir)
        .args(["--table", "missing"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    generate(&dir)
        .args(["--skip-keyless", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run: would write 20 files"))
        .stdout(predicate::str::contains("UserInfoController.java"));
    assert!(!dir.path().join("shop").exists());
}

#[test]
fn existing_output_needs_yes_without_terminal() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("shop")).unwrap();
    generate(&dir)
        .arg("--skip-keyless")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--yes"));

    generate(&dir)
        .args(["--skip-keyless", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Overwrote files"));
}

#[test]
fn json_report() {
    let dir = TempDir::new().unwrap();
    let out = generate(&dir)
        .args(["--skip-keyless", "--yes", "--output-format", "json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["files_written"], 20);
    assert_eq!(report["skipped"][0], "audit_log");
}

#[test]
fn missing_source_is_reported() {
    let dir = TempDir::new().unwrap();
    tablesmith(&dir)
        .arg("generate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No metadata source configured"))
        .stderr(predicate::str::contains("--schema-file"));
}

#[test]
fn unsupported_driver_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    tablesmith(&dir)
        .args(["inspect", "--url", "postgres://db:5432/shop"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("postgres"));
}

#[test]
fn inspect_lists_tables_and_keys() {
    let dir = TempDir::new().unwrap();
    tablesmith(&dir)
        .arg("inspect")
        .arg("--schema-file")
        .arg(fixture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog shop: 3 table(s)"))
        .stdout(predicate::str::contains("user_info  -- registered users"))
        .stdout(predicate::str::contains("Long PK"))
        .stdout(predicate::str::contains("audit_log has no primary key"));
}

#[test]
fn inspect_export_round_trips() {
    let dir = TempDir::new().unwrap();
    let exported = dir.path().join("export.json");
    tablesmith(&dir)
        .arg("inspect")
        .arg("--schema-file")
        .arg(fixture())
        .args(["--table", "user_info", "--export"])
        .arg(&exported)
        .assert()
        .success();

    let snapshot: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&exported).unwrap()).unwrap();
    assert_eq!(snapshot["tables"].as_array().unwrap().len(), 1);
    assert_eq!(snapshot["tables"][0]["primary_key"][0], "id");

    // The export is itself a valid source.
    tablesmith(&dir)
        .arg("inspect")
        .arg("--schema-file")
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 table(s)"));
}

#[test]
fn init_then_config_reads_file_and_env() {
    let dir = TempDir::new().unwrap();
    tablesmith(&dir).arg("init").assert().success();
    assert!(dir.path().join("tablesmith.toml").is_file());

    tablesmith(&dir)
        .args(["config", "get", "generation.modules.api"])
        .assert()
        .success()
        .stdout(predicate::str::contains("generation.modules.api = web"));

    tablesmith(&dir)
        .env("TABLESMITH_PROJECT__GROUP_ID", "org.acme")
        .args(["config", "get", "project.group_id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("org.acme"));

    tablesmith(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tablesmith.toml"));
}

#[test]
fn config_file_values_drive_generation() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tablesmith.toml"),
        "[project]\nartifact_id = \"store\"\npackage = \"org.store\"\n\n\
         [generation]\nskip_keyless = true\nscaffold = false\n",
    )
    .unwrap();

    tablesmith(&dir)
        .arg("generate")
        .arg("--schema-file")
        .arg(fixture())
        .assert()
        .success();
    assert!(
        dir.path()
            .join("store/service/src/main/java/org/store/service/UserInfoService.java")
            .is_file()
    );
}

#[test]
fn unknown_config_key() {
    let dir = TempDir::new().unwrap();
    tablesmith(&dir)
        .args(["config", "get", "nope.nothing"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn shell_completions() {
    let dir = TempDir::new().unwrap();
    tablesmith(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tablesmith"));
}
