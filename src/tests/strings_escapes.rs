use super::*;

#[test]
fn curly_quotes_normalize() {
    let v = reparse("{\u{201C}a\u{201D}: \u{201C}x\u{201D}}");
    assert_eq!(v["a"], "x");
}

#[test]
fn backtick_strings() {
    let v = reparse("{`a`: `hello`}");
    assert_eq!(v["a"], "hello");
}

#[test]
fn missing_closing_quote_before_next_member() {
    let v = reparse(r#"{"a": "x, "b": "y"}"#);
    assert_eq!(v["a"], "x, ");
    assert_eq!(v["b"], "y");
}

#[test]
fn missing_comma_between_string_elements() {
    let v = reparse(r#"["a", "b" "c"]"#);
    assert_eq!(v, serde_json::json!(["a", "b", "c"]));
}

#[test]
fn interior_quotes_stay_in_the_string() {
    let v = crate::repair_to_value(r#"{"a": "lorem "ipsum" sit"}"#, &opts()).unwrap();
    assert_eq!(v["a"].as_str(), Some(r#"lorem "ipsum" sit"#));
}

#[test]
fn standard_escapes_decode() {
    let v = crate::repair_to_value(r#"{"a": "l1\nl2\té"}"#, &engine_opts()).unwrap();
    assert_eq!(v["a"].as_str(), Some("l1\nl2\t\u{e9}"));
}

#[test]
fn surrogate_pairs_combine() {
    let v = crate::repair_to_value(r#"["😀"]"#, &engine_opts()).unwrap();
    assert_eq!(v[0].as_str(), Some("\u{1F600}"));
}

#[test]
fn unknown_escape_preserved_literally() {
    let out = crate::repair(r#"["\q"]"#, &opts()).unwrap();
    assert_eq!(out, r#"["\\q"]"#);
}

#[test]
fn doubled_escape_layer_stripped() {
    let v = reparse(r#"{\"a\": \"b\"}"#);
    assert_eq!(v["a"], "b");
}

#[test]
fn unterminated_string_closed_at_end_of_input() {
    let out = crate::repair(r#"{"a": "broken"#, &opts()).unwrap();
    assert_eq!(out, r#"{"a":"broken"}"#);
}

#[test]
fn unterminated_string_closed_at_line_break_before_key() {
    let v = reparse("{\"a\": \"oops\n\"b\": 2}");
    assert_eq!(v["a"], "oops");
    assert_eq!(v["b"], 2);
}

#[test]
fn escaped_line_break_removed() {
    let v = crate::repair_to_value("[\"one\\\ntwo\"]", &engine_opts()).unwrap();
    assert_eq!(v[0].as_str(), Some("onetwo"));
}

#[test]
fn doubled_opening_quotes() {
    let v = reparse(r#"{""a"": 1}"#);
    assert_eq!(v["a"], 1);
}

#[test]
fn valid_escaped_quote_content_untouched() {
    let v = crate::repair_to_value(r#"{"a": "say \"hi\" now"}"#, &engine_opts()).unwrap();
    assert_eq!(v["a"].as_str(), Some(r#"say "hi" now"#));
}

#[test]
fn fancy_quote_table_is_configurable() {
    let mut o = opts();
    o.fancy_quotes.clear();
    // Without the table, curly quotes are not string delimiters; the closing
    // one ends up inside the bareword.
    let v = crate::repair_to_value("[\u{201C}a\u{201D}]", &o).unwrap();
    assert_eq!(v[0].as_str(), Some("a\u{201D}"));
    let v = crate::repair_to_value("[\u{201C}a\u{201D}]", &opts()).unwrap();
    assert_eq!(v[0].as_str(), Some("a"));
}
