//! CLI Integration Tests
//!
//! Runs the xlribbon binary with assert_cmd against the sample project.

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::File;
use std::io::Write;
use tempfile::TempDir;
use zip::write::FileOptions;
use zip::ZipWriter;

fn xlribbon() -> Command {
    let mut cmd = Command::cargo_bin("xlribbon").unwrap();
    cmd.env_remove("XLRIBBON_IMAGE_DIR")
        .env_remove("XLRIBBON_MODULE")
        .env_remove("XLRIBBON_BUILD_DIR");
    cmd
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    xlribbon()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("xlribbon"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    xlribbon()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("xlribbon"));
}

#[test]
fn test_build_help() {
    xlribbon()
        .args(["build", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("customUI/customImages"));
}

// ═══════════════════════════════════════════════════════════════════════════
// CHECK / CALLBACKS TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_check_valid_project() {
    xlribbon()
        .args(["check", "test-data/ribbon.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project is valid"))
        .stdout(predicate::str::contains("2 automatic getters, 3 automatic setters"));
}

#[test]
fn test_check_missing_image() {
    xlribbon()
        .args(["check", "test-data/missing_image.yaml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("icon1.png"));
}

#[test]
fn test_check_image_dir_from_env() {
    let dir = TempDir::new().unwrap();
    std::fs::copy("test-data/img/save.png", dir.path().join("icon1.png")).unwrap();

    xlribbon()
        .args(["check", "test-data/missing_image.yaml"])
        .env("XLRIBBON_IMAGE_DIR", dir.path())
        .assert()
        .success();
}

#[test]
fn test_check_invalid_child() {
    xlribbon()
        .args(["check", "test-data/invalid_child.yaml"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("is not allowed"));
}

#[test]
fn test_callbacks_lists_handlers() {
    xlribbon()
        .args(["callbacks", "test-data/ribbon.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("doSave"))
        .stdout(predicate::str::contains("Module1.Save"));
}

#[test]
fn test_callbacks_with_router_file() {
    xlribbon()
        .args([
            "callbacks",
            "test-data/ribbon.yaml",
            "--router",
            "test-data/router.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Module1.Export"));
}

// ═══════════════════════════════════════════════════════════════════════════
// OUTPUT COMMAND TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_macros_to_stdout() {
    xlribbon()
        .args(["macros", "test-data/ribbon.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("' xlribbon generated at "))
        .stdout(predicate::str::contains("Sub filter_onChange(control As IRibbonControl, text As String)"));
}

#[test]
fn test_macros_module_name_override() {
    let dir = TempDir::new().unwrap();
    xlribbon()
        .args(["macros", "test-data/ribbon.yaml", "--module", "RibbonCode", "--write"])
        .arg(dir.path())
        .assert()
        .success();

    let source = std::fs::read_to_string(dir.path().join("RibbonCode.bas")).unwrap();
    assert!(source.starts_with("Attribute VB_Name = \"RibbonCode\""));
}

#[test]
fn test_xml_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    xlribbon()
        .args(["xml", "test-data/ribbon.yaml", "--dir"])
        .arg(dir.path())
        .assert()
        .success();
    assert!(dir.path().join("customUI.xml").exists());

    xlribbon()
        .args(["xml", "test-data/ribbon.yaml", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("OutputExists"));
}

#[test]
fn test_init_then_check() {
    let dir = TempDir::new().unwrap();
    let project = dir.path().join("ribbon.yaml");

    xlribbon().arg("init").arg(&project).assert().success();
    xlribbon().arg("check").arg(&project).assert().success();
}

#[test]
fn test_build_addin() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("template.xlam");
    {
        let mut zip = ZipWriter::new(File::create(&input).unwrap());
        zip.start_file("xl/workbook.xml", FileOptions::<()>::default())
            .unwrap();
        zip.write_all(b"<workbook/>").unwrap();
        zip.finish().unwrap();
    }
    let build_dir = dir.path().join("build");

    xlribbon()
        .args(["build", "test-data/ribbon.yaml", "--verbose", "--input"])
        .arg(&input)
        .arg("--build-dir")
        .arg(&build_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Add-in built"));

    assert!(build_dir.join("template.xlam").exists());
    assert!(build_dir.join("xlribbon.bas").exists());
}
