use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn bin() -> Command {
    Command::cargo_bin("jsonmend").unwrap()
}

#[test]
fn stdin_to_stdout_repairs() {
    bin()
        .write_stdin("{'a': 1, b: 'x',}\n")
        .assert()
        .success()
        .stdout(predicate::function(|out: &[u8]| {
            std::str::from_utf8(out)
                .ok()
                .and_then(|s| serde_json::from_str::<serde_json::Value>(s.trim()).ok())
                .is_some_and(|v| v["a"] == 1 && v["b"] == "x")
        }));
}

#[test]
fn file_to_output_file() {
    let dir = tempdir().unwrap();
    let inp = dir.path().join("in.json");
    let out = dir.path().join("out.json");
    fs::write(&inp, "[1, 2, 3,]").unwrap();
    bin()
        .args([inp.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .success();
    assert_eq!(fs::read_to_string(out).unwrap(), "[1,2,3]");
}

#[test]
fn inline_rewrites_the_file() {
    let dir = tempdir().unwrap();
    let inp = dir.path().join("inline.json");
    fs::write(&inp, "{'a': 1, b: 2").unwrap();
    bin()
        .args(["--inline", inp.to_str().unwrap()])
        .assert()
        .success();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&inp).unwrap()).unwrap();
    assert_eq!(v, serde_json::json!({"a": 1, "b": 2}));
}

#[test]
fn indent_flag_pretty_prints() {
    bin()
        .args(["--indent", "2"])
        .write_stdin("{a:1}")
        .assert()
        .success()
        .stdout(predicate::str::contains("{\n  \"a\": 1\n}"));
}

#[test]
fn ensure_ascii_escapes_output() {
    bin()
        .args(["--ensure_ascii"])
        .write_stdin("{\"a\": \"\u{00e9}\"}")
        .assert()
        .success()
        .stdout(predicate::str::contains("\\u00E9"));
}

#[test]
fn strict_mode_fails_on_broken_input() {
    bin()
        .args(["--strict"])
        .write_stdin("{'a': 1}")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn strict_mode_passes_valid_input() {
    bin()
        .args(["--strict"])
        .write_stdin("{\"a\": 1}")
        .assert()
        .success();
}

#[test]
fn unknown_flag_is_a_usage_error() {
    bin().args(["--bogus"]).assert().failure().code(2);
}

#[test]
fn missing_file_is_an_io_error() {
    bin()
        .arg("/definitely/not/here.json")
        .assert()
        .failure()
        .code(1);
}
