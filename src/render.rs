//! Value-to-text rendering: compact or indented, optionally ASCII-only.

use crate::value::{Number, Value};

/// Serialize `value` the way the public entry points do.
pub(crate) fn render(value: &Value, ensure_ascii: bool, indent: Option<usize>) -> String {
    let mut out = String::new();
    write_value(&mut out, value, ensure_ascii, indent, 0);
    out
}

pub(crate) fn write_value(
    out: &mut String,
    value: &Value,
    ensure_ascii: bool,
    indent: Option<usize>,
    level: usize,
) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(out, n),
        Value::String(s) => write_json_string(out, s, ensure_ascii),
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline_indent(out, indent, level + 1);
                write_value(out, item, ensure_ascii, indent, level + 1);
            }
            newline_indent(out, indent, level);
            out.push(']');
        }
        Value::Object(map) => {
            if map.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                newline_indent(out, indent, level + 1);
                write_json_string(out, key, ensure_ascii);
                out.push(':');
                if indent.is_some() {
                    out.push(' ');
                }
                write_value(out, item, ensure_ascii, indent, level + 1);
            }
            newline_indent(out, indent, level);
            out.push('}');
        }
    }
}

fn newline_indent(out: &mut String, indent: Option<usize>, level: usize) {
    if let Some(width) = indent {
        out.push('\n');
        for _ in 0..width * level {
            out.push(' ');
        }
    }
}

fn write_number(out: &mut String, n: &Number) {
    use std::fmt::Write as _;
    match n {
        Number::Int(i) => {
            let _ = write!(out, "{}", i);
        }
        Number::Float(f) => {
            if f.is_finite() {
                let _ = write!(out, "{}", f);
            } else {
                // The parser never produces these; guard against values built
                // through the public constructors.
                out.push_str("null");
            }
        }
        Number::Literal(lit) => out.push_str(lit),
    }
}

/// Emit `s` as a JSON string literal, escaping only what JSON requires plus
/// everything non-ASCII when `ensure_ascii` is set.
pub(crate) fn write_json_string(out: &mut String, s: &str, ensure_ascii: bool) {
    use std::fmt::Write as _;

    // Fast path: ASCII with nothing to escape goes out as one slice.
    if s.is_ascii() {
        let bytes = s.as_bytes();
        let clean = bytes.iter().all(|&b| b != b'"' && b != b'\\' && b > 0x1F);
        if clean {
            out.push('"');
            out.push_str(s);
            out.push('"');
            return;
        }
    }

    out.push('"');
    let mut start = 0usize;
    for (i, ch) in s.char_indices() {
        let code = ch as u32;
        let needs_escape = ch == '"' || ch == '\\' || code <= 0x1F || (ensure_ascii && code > 0x7F);
        if !needs_escape {
            continue;
        }
        if i > start {
            out.push_str(&s[start..i]);
        }
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ if code <= 0x1F => {
                let _ = write!(out, "\\u{:04X}", code);
            }
            _ => {
                // ensure_ascii && non-ASCII
                if code <= 0xFFFF {
                    let _ = write!(out, "\\u{:04X}", code);
                } else {
                    let u = code - 0x1_0000;
                    let hi = 0xD800 + ((u >> 10) & 0x3FF);
                    let lo = 0xDC00 + (u & 0x3FF);
                    let _ = write!(out, "\\u{:04X}\\u{:04X}", hi, lo);
                }
            }
        }
        start = i + ch.len_utf8();
    }
    if start < s.len() {
        out.push_str(&s[start..]);
    }
    out.push('"');
}
