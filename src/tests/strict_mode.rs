use super::*;
use crate::RepairError;

fn strict() -> Options {
    Options {
        strict: true,
        ..Options::default()
    }
}

fn strict_engine() -> Options {
    Options {
        strict: true,
        skip_initial_validation: true,
        ..Options::default()
    }
}

#[test]
fn valid_input_passes_strict() {
    assert!(crate::repair(r#"{"a": 1, "b": [true, null]}"#, &strict()).is_ok());
    // Also through the engine itself, without the fast path.
    assert!(crate::repair(r#"{"a": 1, "b": [true, null]}"#, &strict_engine()).is_ok());
    assert!(crate::repair(r#"["x", -2.5, 1e3, {"k": "v"}]"#, &strict_engine()).is_ok());
}

#[test]
fn every_repair_becomes_fatal() {
    let broken = [
        r#"{"a": 1"#,          // missing '}'
        r#"{'a': 1}"#,         // single quotes
        "[1, 2,]",             // trailing comma
        r#"{"a": 1 "b": 2}"#,  // missing comma
        r#"{"a" 1}"#,          // missing colon
        "[1 /* c */]",         // comment
        "{a: 1}",              // unquoted key
        r#"{"ok": tr"#,        // truncated keyword
        "{}{}",                // multiple top-level values
        r#"{"a": "x"#,         // unterminated string
        "[+1]",                // leading plus
        "hello {\"a\": 1}",    // leading prose
    ];
    for input in broken {
        let err = crate::repair(input, &strict()).unwrap_err();
        assert!(
            matches!(err, RepairError::Strict { .. }),
            "expected strict failure for {input:?}, got {err:?}"
        );
    }
}

#[test]
fn duplicate_keys_raise_in_strict_engine() {
    let err = crate::repair(r#"{"a": 1, "a": 2}"#, &strict_engine()).unwrap_err();
    assert!(matches!(err, RepairError::Strict { .. }));
}

#[test]
fn strict_errors_carry_a_position() {
    let err = crate::repair(r#"{"a": 1"#, &strict()).unwrap_err();
    assert!(err.position().is_some());
    assert!(err.position().unwrap() <= r#"{"a": 1"#.chars().count());
}

#[test]
fn whatever_logs_in_default_mode_raises_in_strict() {
    let samples = [
        r#"{"a": 1"#,
        "[1 2 3]",
        "```json\n[1]\n```",
        r#"{"a": "x, "b": "y"}"#,
        "{a: .5,}",
    ];
    for input in samples {
        let (_, log) = crate::repair_with_log(input, &engine_opts()).unwrap();
        if !log.is_empty() {
            assert!(
                crate::repair(input, &strict_engine()).is_err(),
                "{input:?} logged repairs but passed strict mode"
            );
        }
    }
}

#[test]
fn deep_nesting_fails_in_strict_mode() {
    let mut o = strict_engine();
    o.max_depth = 8;
    let deep = format!("{}1{}", "[".repeat(20), "]".repeat(20));
    let err = crate::repair(&deep, &o).unwrap_err();
    assert!(matches!(err, RepairError::DepthExceeded { .. }));
}

#[test]
fn deep_nesting_is_skimmed_in_default_mode() {
    let mut o = engine_opts();
    o.max_depth = 8;
    let deep = format!("{}1{}", "[".repeat(20), "]".repeat(20));
    let out = crate::repair(&deep, &o).unwrap();
    serde_json::from_str::<serde_json::Value>(&out).unwrap();
}
