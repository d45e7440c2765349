use super::*;

#[test]
fn all_comment_styles_are_whitespace() {
    let v = reparse("{/* block */ \"a\": 1, // line\n \"b\": 2 # hash\n}");
    assert_eq!(v["a"], 1);
    assert_eq!(v["b"], 2);
}

#[test]
fn leading_and_trailing_comments() {
    let v = reparse("// header\n[1, 2] // footer");
    assert_eq!(v, serde_json::json!([1, 2]));
}

#[test]
fn unterminated_block_comment_consumed_to_end() {
    let out = crate::repair("[1 /* oops", &opts()).unwrap();
    assert_eq!(out, "[1]");
}

#[test]
fn comments_between_elements() {
    let v = reparse("[1, /* two */ 2, # three\n 3]");
    assert_eq!(v, serde_json::json!([1, 2, 3]));
}

#[test]
fn comment_never_reaches_output() {
    let out = crate::repair("{a: 1 /* secret */}", &opts()).unwrap();
    assert!(!out.contains("secret"));
}

#[test]
fn bom_is_skipped() {
    let v = reparse("\u{FEFF}{\"a\": 1}");
    assert_eq!(v["a"], 1);
}
