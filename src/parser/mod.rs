//! The repairing parser: hand-written recursive descent over a single
//! forward-moving character cursor. Each sub-parser consumes what it can and
//! repairs what it must; the log records every repair, and strict mode turns
//! the first repair into a fatal error.

mod array;
mod comment;
mod context;
mod number;
mod object;
pub(crate) mod source;
mod strings;

use crate::error::RepairError;
use crate::logging::RepairLogEntry;
use crate::options::Options;
use crate::value::Value;
use context::{Context, ContextStack};
pub(crate) use source::{CharSource, FILE_PAGE_BYTES, FileSource, StrSource};

/// How far ahead the driver searches for an opening bracket when the input
/// starts with prose instead of JSON.
const PROSE_SCAN_LIMIT: usize = 4096;

pub(crate) struct Parser<'o, S: CharSource> {
    src: S,
    index: usize,
    context: ContextStack,
    log: Vec<RepairLogEntry>,
    opts: &'o Options,
}

impl<'o, S: CharSource> Parser<'o, S> {
    pub(crate) fn new(src: S, opts: &'o Options) -> Self {
        Self {
            src,
            index: 0,
            context: ContextStack::default(),
            log: Vec::new(),
            opts,
        }
    }

    pub(crate) fn into_log(self) -> Vec<RepairLogEntry> {
        self.log
    }

    pub(crate) fn take_io_error(&mut self) -> Option<std::io::Error> {
        self.src.take_io_error()
    }

    /// Final cursor offset; equals the input length after a completed parse.
    pub(crate) fn consumed(&self) -> usize {
        self.index
    }

    // ---- cursor primitives ----

    pub(super) fn peek(&mut self) -> Option<char> {
        self.src.char_at(self.index)
    }

    pub(super) fn peek_at(&mut self, offset: usize) -> Option<char> {
        self.src.char_at(self.index + offset)
    }

    pub(super) fn bump(&mut self) {
        self.index += 1;
    }

    pub(super) fn advance(&mut self, n: usize) {
        self.index += n;
    }

    // ---- repairs ----

    /// Record a repair, or refuse it in strict mode. Every heuristic funnels
    /// through here, which is what makes "no repair survives strict mode"
    /// hold by construction.
    pub(super) fn repair(&mut self, message: &'static str) -> Result<(), RepairError> {
        if self.opts.strict {
            return Err(RepairError::Strict {
                reason: message,
                position: self.index,
            });
        }
        #[cfg(feature = "logging")]
        if self.opts.logging {
            let w = self.opts.log_window;
            let start = self.index.saturating_sub(w);
            let context = self.src.span(start, self.index + w);
            self.log.push(RepairLogEntry {
                position: self.index,
                message,
                context,
            });
        }
        Ok(())
    }

    // ---- whitespace and filler ----

    pub(super) fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Whitespace and comments, in any interleaving.
    pub(super) fn skip_filler(&mut self) -> Result<(), RepairError> {
        loop {
            self.skip_whitespace();
            if self.at_comment_start() {
                self.skip_comment()?;
            } else {
                return Ok(());
            }
        }
    }

    // ---- root driver ----

    /// Sweep the whole input: produce one value, or aggregate several
    /// top-level values into an array, discarding surrounding prose.
    pub(crate) fn run(&mut self) -> Result<Value, RepairError> {
        if self.peek() == Some('\u{FEFF}') {
            self.bump();
        }
        self.skip_filler()?;
        if self.at_fence() {
            self.strip_fence_open()?;
            self.skip_filler()?;
        }
        self.skip_leading_prose()?;

        let mut first: Option<Value> = None;
        loop {
            self.skip_filler()?;
            match self.parse_value()? {
                Some(v) => {
                    first = Some(v);
                    break;
                }
                None => match self.peek() {
                    None => break,
                    Some(_) => {
                        self.repair("ignored stray character at the top level")?;
                        self.bump();
                    }
                },
            }
        }
        let Some(first) = first else {
            // Nothing parseable anywhere in the input.
            return Ok(Value::String(String::new()));
        };

        let mut values = vec![first];
        let mut logged_aggregation = false;
        loop {
            self.src
                .release_before(self.index.saturating_sub(FILE_PAGE_BYTES));
            self.skip_filler()?;
            if self.at_fence() {
                self.strip_fence_open()?;
                continue;
            }
            if self.peek().is_none() {
                break;
            }
            if !self.more_values_ahead() {
                self.repair("ignored trailing text after the value")?;
                self.discard_rest();
                break;
            }
            if self.opts.stream_stable {
                self.repair("discarded extra top-level values to keep the stream stable")?;
                self.discard_rest();
                break;
            }
            let before = self.index;
            match self.parse_value()? {
                Some(v) => {
                    if !logged_aggregation {
                        self.repair("multiple top-level values collected into an array")?;
                        logged_aggregation = true;
                    }
                    values.push(v);
                }
                None => {
                    if self.index == before {
                        self.repair("ignored stray character at the top level")?;
                        self.bump();
                    }
                }
            }
        }

        if values.len() == 1 {
            Ok(values.pop().unwrap_or(Value::Null))
        } else {
            Ok(Value::Array(values))
        }
    }

    // ---- value dispatcher ----

    /// Route on the next non-filler character. Returns `None` when nothing
    /// usable starts here: end of input, or a structural character that
    /// belongs to the enclosing container.
    pub(super) fn parse_value(&mut self) -> Result<Option<Value>, RepairError> {
        loop {
            self.skip_filler()?;
            let Some(c) = self.peek() else { return Ok(None) };
            match c {
                '{' => {
                    self.bump();
                    return self.parse_object().map(Some);
                }
                '[' => {
                    self.bump();
                    return self.parse_array().map(Some);
                }
                ',' | '}' | ']' => return Ok(None),
                '-' | '+' | '.' => return self.parse_number(),
                c if c.is_ascii_digit() => return self.parse_number(),
                c if self.is_quote_char(c) || c.is_alphabetic() => return self.parse_string(),
                _ => {
                    self.repair("ignored unexpected characters")?;
                    self.bump();
                    while let Some(c) = self.peek() {
                        if self.starts_token(c) {
                            break;
                        }
                        self.bump();
                    }
                }
            }
        }
    }

    fn starts_token(&self, c: char) -> bool {
        matches!(
            c,
            '{' | '[' | ',' | '}' | ']' | '-' | '+' | '.' | '#' | '/'
        ) || c.is_ascii_digit()
            || c.is_alphabetic()
            || c.is_whitespace()
            || self.is_quote_char(c)
    }

    // ---- prose and fence handling ----

    /// If the input leads with prose rather than JSON, jump to the first
    /// opening bracket that sits at a plausible boundary.
    fn skip_leading_prose(&mut self) -> Result<(), RepairError> {
        let Some(c0) = self.peek() else {
            return Ok(());
        };
        if !c0.is_alphabetic() || self.keyword_ahead() {
            return Ok(());
        }
        let mut boundary_ok = true;
        let mut jump = None;
        for off in 0..PROSE_SCAN_LIMIT {
            let Some(c) = self.peek_at(off) else { break };
            if (c == '{' || c == '[') && boundary_ok {
                jump = Some(off);
                break;
            }
            boundary_ok = matches!(c, ' ' | '\t' | '\n' | '\r' | '(' | ':' | ',' | '=' | '`');
        }
        if let Some(off) = jump {
            self.repair("skipped leading text before the first bracket")?;
            self.advance(off);
        }
        Ok(())
    }

    /// Would the next characters start another top-level value, as opposed to
    /// trailing prose?
    fn more_values_ahead(&mut self) -> bool {
        match self.peek() {
            None => false,
            Some('{') | Some('[') | Some(',') | Some('}') | Some(']') => true,
            Some('-') | Some('+') | Some('.') => true,
            Some(c) if c.is_ascii_digit() => true,
            Some(c) if self.is_quote_char(c) => true,
            Some(c) if c.is_alphabetic() => self.keyword_ahead(),
            _ => false,
        }
    }

    /// A full `true`/`false`/`null`/`none` spelling (any case) at the cursor,
    /// ending at a word boundary.
    fn keyword_ahead(&mut self) -> bool {
        let mut word = String::new();
        let mut off = 0usize;
        while off < 6 {
            match self.peek_at(off) {
                Some(c) if c.is_alphabetic() => {
                    word.push(c);
                    off += 1;
                }
                _ => break,
            }
        }
        if matches!(self.peek_at(off), Some(c) if c.is_alphanumeric() || c == '_') {
            return false;
        }
        matches!(
            word.to_ascii_lowercase().as_str(),
            "true" | "false" | "null" | "none"
        )
    }

    pub(super) fn at_fence(&mut self) -> bool {
        self.peek() == Some('`') && self.peek_at(1) == Some('`') && self.peek_at(2) == Some('`')
    }

    /// Consume a markdown fence marker plus its language tag, up to and
    /// including one newline. Handles both the opening and closing fence.
    pub(super) fn strip_fence_open(&mut self) -> Result<(), RepairError> {
        if !self.at_fence() {
            return Ok(());
        }
        self.repair("stripped markdown code fence")?;
        while self.peek() == Some('`') {
            self.bump();
        }
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.bump();
            } else {
                break;
            }
        }
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.bump();
        }
        if matches!(self.peek(), Some('\n') | Some('\r')) {
            self.bump();
        }
        Ok(())
    }

    fn discard_rest(&mut self) {
        loop {
            if let Some(len) = self.src.known_len() {
                self.index = self.index.max(len);
                return;
            }
            // Paged source: walk forward until the end is known.
            if self.peek().is_none() {
                return;
            }
            self.bump();
            if self.index % FILE_PAGE_BYTES == 0 {
                self.src.release_before(self.index);
            }
        }
    }

    /// Consume a container we refuse to build (nesting limit), keeping
    /// bracket balance so the enclosing parser can continue.
    pub(super) fn skim_balanced(&mut self, open: char, close: char) {
        let mut level = 1usize;
        while let Some(c) = self.peek() {
            self.bump();
            if c == open {
                level += 1;
            } else if c == close {
                level -= 1;
                if level == 0 {
                    break;
                }
            }
        }
    }
}
