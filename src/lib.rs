pub mod cli;
pub mod error;
mod logging;
pub mod options;
mod parser;
mod render;
mod value;

pub use error::RepairError;
pub use logging::RepairLogEntry;
pub use options::{DEFAULT_FANCY_QUOTES, Options};
pub use value::{Map, Number, Value};

use parser::{CharSource, FILE_PAGE_BYTES, FileSource, Parser, StrSource};
use std::io::Read;
use std::path::Path;

// ============================================================================
// Core API - Repair to String
// ============================================================================

/// Repair a potentially broken JSON text and return a valid JSON string.
///
/// Valid input passes through a conformant decode first and comes back
/// unchanged; everything else goes through the repairing parser and is
/// re-serialized according to `opts.indent` and `opts.ensure_ascii`.
///
/// # Examples
///
/// ```
/// use jsonmend::{Options, repair};
///
/// let fixed = repair("{'a': 1, b: 'x',}", &Options::default())?;
/// assert_eq!(fixed, r#"{"a":1,"b":"x"}"#);
/// # Ok::<(), jsonmend::RepairError>(())
/// ```
pub fn repair(input: &str, opts: &Options) -> Result<String, RepairError> {
    #[cfg(feature = "serde")]
    if !opts.skip_initial_validation {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(input) {
            if opts.indent.is_none() && !opts.ensure_ascii {
                return Ok(input.to_string());
            }
            let value = Value::from(parsed);
            return Ok(render::render(&value, opts.ensure_ascii, opts.indent));
        }
    }
    let (value, _) = parse_str(input, opts)?;
    Ok(render::render(&value, opts.ensure_ascii, opts.indent))
}

// ============================================================================
// Value API
// ============================================================================

/// Repair a potentially broken JSON text and return the decoded value tree.
///
/// # Examples
///
/// ```
/// use jsonmend::{Options, repair_to_value};
///
/// let v = repair_to_value("[1, 2, 3,]", &Options::default())?;
/// assert_eq!(v[0].as_i64(), Some(1));
/// assert_eq!(v.as_array().map(|a| a.len()), Some(3));
/// # Ok::<(), jsonmend::RepairError>(())
/// ```
pub fn repair_to_value(input: &str, opts: &Options) -> Result<Value, RepairError> {
    #[cfg(feature = "serde")]
    if !opts.skip_initial_validation {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(input) {
            return Ok(Value::from(parsed));
        }
    }
    let (value, _) = parse_str(input, opts)?;
    Ok(value)
}

/// Repair and also report every repair that was applied.
///
/// The log is empty when the input was already valid JSON (the fast path
/// performs no repairs) or when the crate was built without the `logging`
/// feature.
///
/// # Examples
///
/// ```
/// use jsonmend::{Options, repair_with_log};
///
/// let (v, log) = repair_with_log(r#"{"a": 1"#, &Options::default())?;
/// assert_eq!(v["a"].as_i64(), Some(1));
/// assert!(log.iter().any(|e| e.message.contains("never closed")));
/// # Ok::<(), jsonmend::RepairError>(())
/// ```
pub fn repair_with_log(
    input: &str,
    opts: &Options,
) -> Result<(Value, Vec<RepairLogEntry>), RepairError> {
    #[cfg(feature = "serde")]
    if !opts.skip_initial_validation {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(input) {
            return Ok((Value::from(parsed), Vec::new()));
        }
    }
    let mut opts = opts.clone();
    opts.logging = true;
    parse_str(input, &opts)
}

// ============================================================================
// Reader / File API
// ============================================================================

/// Read everything from `reader` and repair it.
///
/// # Examples
///
/// ```no_run
/// use jsonmend::{Options, load};
/// use std::fs::File;
///
/// let value = load(File::open("broken.json")?, &Options::default())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load<R: Read>(mut reader: R, opts: &Options) -> Result<Value, RepairError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    repair_to_value(&String::from_utf8_lossy(&bytes), opts)
}

/// Repair the contents of a file.
///
/// Small files are read whole; larger ones are paged through a windowed
/// cursor so peak memory stays proportional to one page plus the decoded
/// value. Paged inputs skip the conformant-decode fast path.
///
/// # Examples
///
/// ```no_run
/// use jsonmend::{Options, load_file};
///
/// let value = load_file("broken.json", &Options::default())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn load_file<P: AsRef<Path>>(path: P, opts: &Options) -> Result<Value, RepairError> {
    let meta = std::fs::metadata(&path)?;
    if meta.len() <= FILE_PAGE_BYTES as u64 {
        let bytes = std::fs::read(&path)?;
        return repair_to_value(&String::from_utf8_lossy(&bytes), opts);
    }
    let src = FileSource::open(path)?;
    let (value, _) = parse_engine(src, opts)?;
    Ok(value)
}

// ============================================================================
// Engine plumbing
// ============================================================================

fn parse_str(input: &str, opts: &Options) -> Result<(Value, Vec<RepairLogEntry>), RepairError> {
    parse_engine(StrSource::new(input), opts)
}

fn parse_engine<S: CharSource>(
    src: S,
    opts: &Options,
) -> Result<(Value, Vec<RepairLogEntry>), RepairError> {
    let mut parser = Parser::new(src, opts);
    let value = parser.run()?;
    if let Some(e) = parser.take_io_error() {
        return Err(RepairError::Io(e));
    }
    Ok((value, parser.into_log()))
}

#[cfg(test)]
mod tests;
