use super::*;

#[test]
fn canonical_keywords() {
    let v = crate::repair_to_value("[true, false, null]", &engine_opts()).unwrap();
    assert_eq!(v[0], Value::Bool(true));
    assert_eq!(v[1], Value::Bool(false));
    assert_eq!(v[2], Value::Null);
}

#[test]
fn case_variants_normalize() {
    let v = reparse("[True, FALSE, None, NULL, TRUE]");
    assert_eq!(v, serde_json::json!([true, false, null, null, true]));
}

#[test]
fn truncated_keyword_completed_at_end_of_input() {
    let v = reparse(r#"{"ok": tr"#);
    assert_eq!(v["ok"], true);

    let v = reparse(r#"{"gone": n"#);
    assert_eq!(v["gone"], serde_json::Value::Null);
}

#[test]
fn keyword_prefixes_mid_input_are_strings() {
    let v = reparse("[truestory, nullable, falsey]");
    assert_eq!(v, serde_json::json!(["truestory", "nullable", "falsey"]));
}

#[test]
fn keywords_as_object_values() {
    let v = reparse("{a: True, b: None}");
    assert_eq!(v["a"], true);
    assert_eq!(v["b"], serde_json::Value::Null);
}
