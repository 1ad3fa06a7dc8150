//! Command-line behavior of the `quire` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn document(source: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".quire")
        .tempfile()
        .expect("temp file");
    file.write_all(source.as_bytes()).expect("write document");
    file
}

fn quire() -> Command {
    let mut command = Command::cargo_bin("quire").expect("quire binary");
    command.env_remove("RUST_LOG");
    command
}

#[test]
fn prints_treeviz_by_default() {
    let doc = document("== Intro\n\nHello\n");
    quire()
        .arg(doc.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("▤ novella\n"))
        .stdout(predicate::str::contains("§ level"));
}

#[test]
fn json_format() {
    let doc = document("== Intro\n\nHello\n");
    quire()
        .arg(doc.path())
        .args(["--format", "json", "--compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"level\""))
        .stdout(predicate::str::contains("whitespace").not());
}

#[test]
fn tag_option_filters_content() {
    let doc = document("== Kept +keep\n\nyes\n\n== Dropped\n\nno\n");
    quire()
        .arg(doc.path())
        .args(["--tag", "keep"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"yes\""))
        .stdout(predicate::str::contains("\"no\"").not());
}

#[test]
fn lists_designators() {
    let doc = document("== Intro \\\\intro\n\n== Second part\n");
    quire()
        .arg(doc.path())
        .arg("--list-designators")
        .assert()
        .success()
        .stdout(predicate::str::contains("\\intro\texplicit\tlevel\t"))
        .stdout(predicate::str::contains("\\SecondPart\timplicit\tlevel\t"));
}

#[test]
fn problems_go_to_stderr() {
    let doc = document("== A \\\\same\n\n== B \\\\same\n");
    quire()
        .arg(doc.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(":3:1: Already defined: \\same"));
}

#[test]
fn fail_on_problems_from_config_file() {
    let doc = document("== A \\\\same\n\n== B \\\\same\n");
    let mut config = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(config, "[problems]\nfail_on_problems = true").expect("write config");

    quire()
        .arg(doc.path())
        .arg("--config")
        .arg(config.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Already defined"));
}

#[test]
fn fatal_mangling_error_fails() {
    let doc = document("== A\n\n==== B\n");
    quire()
        .arg(doc.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad depth order"));
}

#[test]
fn missing_file_fails() {
    quire()
        .arg("/nonexistent/document.quire")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: /nonexistent/document.quire"));
}
