use super::*;

mod booleans_null;
mod comments_ws;
mod strict_mode;
mod strings_escapes;

/// Default options.
fn opts() -> Options {
    Options::default()
}

/// Options that bypass the conformant fast path, forcing the repair engine.
fn engine_opts() -> Options {
    Options {
        skip_initial_validation: true,
        ..Options::default()
    }
}

/// Repair and parse the output with a conformant decoder; panics when the
/// output is not valid JSON.
fn reparse(input: &str) -> serde_json::Value {
    let out = crate::repair(input, &opts()).unwrap();
    serde_json::from_str(&out).unwrap()
}
