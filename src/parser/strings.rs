//! String parser — the densest set of heuristics in the decoder. It chooses
//! the opening quote (straight, curly, backtick, or none at all), decides for
//! every candidate closing quote whether it plausibly ends the string, decodes
//! escapes, strips doubled escape layers, and resolves barewords into
//! booleans, null, numbers, or plain text.

use super::{CharSource, Context, Parser};
use crate::error::RepairError;
use crate::value::{Number, Value};

/// Quotes match by class: any double-ish quote closes any double-ish quote,
/// singles close singles, backticks close backticks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum QuoteKind {
    Double,
    Single,
    Backtick,
}

impl<'o, S: CharSource> Parser<'o, S> {
    pub(super) fn is_quote_char(&self, c: char) -> bool {
        c == '"' || c == '\'' || self.opts.fancy_quotes.contains(&c)
    }

    fn quote_kind(&self, c: char) -> Option<QuoteKind> {
        match c {
            '"' => Some(QuoteKind::Double),
            '\'' => Some(QuoteKind::Single),
            '\u{201C}' | '\u{201D}' => self
                .opts
                .fancy_quotes
                .contains(&c)
                .then_some(QuoteKind::Double),
            '\u{2018}' | '\u{2019}' => self
                .opts
                .fancy_quotes
                .contains(&c)
                .then_some(QuoteKind::Single),
            '`' => self
                .opts
                .fancy_quotes
                .contains(&'`')
                .then_some(QuoteKind::Backtick),
            // Anything else the table declares pairs like a double quote.
            c if self.opts.fancy_quotes.contains(&c) => Some(QuoteKind::Double),
            _ => None,
        }
    }

    fn same_quote_kind(&self, kind: QuoteKind, c: char) -> bool {
        self.quote_kind(c) == Some(kind)
    }

    /// Parse a string, or whatever the bareword at the cursor turns out to
    /// be. Returns `None` only when nothing was consumed.
    pub(super) fn parse_string(&mut self) -> Result<Option<Value>, RepairError> {
        let Some(first) = self.peek() else {
            return Ok(None);
        };
        if self.at_fence() {
            // A fence marker inside a structure: strip it and parse whatever
            // the fenced body holds.
            self.strip_fence_open()?;
            return self.parse_value();
        }
        let Some(kind) = self.quote_kind(first) else {
            return self.parse_bareword();
        };

        if first == '\'' {
            self.repair("replaced single-quoted string with double quotes")?;
        } else if first != '"' {
            self.repair("normalized non-standard quote character")?;
        }
        self.bump();

        // `""text""` artifact: an immediately repeated opening quote with
        // content right behind it.
        let mut doubled = false;
        if matches!(self.peek(), Some(c) if self.same_quote_kind(kind, c)) {
            let after = self.peek_at(1);
            let content_follows = matches!(
                after,
                Some(c2) if !c2.is_whitespace()
                    && !matches!(c2, ':' | ',' | '}' | ']')
                    && !self.same_quote_kind(kind, c2)
            );
            if content_follows {
                self.repair("stripped doubled opening quote")?;
                self.bump();
                doubled = true;
            }
        }

        let mut acc = String::new();
        loop {
            let Some(c) = self.peek() else {
                self.repair("string missing its closing quote at end of input")?;
                break;
            };
            if self.same_quote_kind(kind, c) {
                if self.close_is_plausible(kind) {
                    self.bump();
                    if doubled && matches!(self.peek(), Some(c2) if self.same_quote_kind(kind, c2))
                    {
                        self.bump();
                    }
                    break;
                }
                self.repair("kept quote character that does not close the string")?;
                acc.push(c);
                self.bump();
                continue;
            }
            if c == '\\' {
                if self.read_escape(&mut acc, kind)? {
                    break;
                }
                continue;
            }
            if (c == '\n' || c == '\r') && self.line_break_ends_string() {
                self.repair("closed unterminated string at line break")?;
                break;
            }
            acc.push(c);
            self.bump();
        }
        Ok(Some(Value::String(acc)))
    }

    /// At a candidate closing quote: does closing here leave the remainder in
    /// a shape the grammar can continue from? If a later same-kind quote is
    /// the one followed by a terminator, this one is content.
    fn close_is_plausible(&mut self, kind: QuoteKind) -> bool {
        let mut off = 1usize;
        while off <= 256 {
            match self.peek_at(off) {
                Some(c) if c.is_whitespace() && c != '\n' && c != '\r' => off += 1,
                _ => break,
            }
        }
        match self.peek_at(off) {
            None => true,
            Some(',') | Some('}') | Some(']') | Some(':') => true,
            Some('\n') | Some('\r') => true,
            Some('/') if matches!(self.peek_at(off + 1), Some('/') | Some('*')) => true,
            Some('#') => true,
            // Another string starts right after: a missing separator, not
            // string content.
            Some(c) if self.is_quote_char(c) => true,
            _ => {
                let in_key = self.context.current() == Some(Context::ObjectKey);
                let mut k = off;
                let mut steps = 0usize;
                while let Some(c) = self.peek_at(k) {
                    steps += 1;
                    if steps > 512 {
                        break;
                    }
                    match c {
                        '\n' | '\r' => break,
                        '\\' => {
                            // An escaped quote can be the real closer once an
                            // escape layer is being stripped.
                            if matches!(self.peek_at(k + 1), Some(q) if self.same_quote_kind(kind, q))
                            {
                                match self.delimiter_after(k + 2) {
                                    Some(':') if !in_key => return true,
                                    Some(_) => return false,
                                    None => {}
                                }
                            }
                            k += 2;
                        }
                        c if self.same_quote_kind(kind, c) => {
                            match self.delimiter_after(k + 1) {
                                // `"..." :` ahead in value position means the
                                // later quote belongs to the next member's
                                // key, so this one does close.
                                Some(':') if !in_key => return true,
                                Some(_) => return false,
                                None => k += 1,
                            }
                        }
                        _ => k += 1,
                    }
                }
                true
            }
        }
    }

    /// Skips horizontal whitespace from `from` and returns the structural
    /// terminator that follows, if any. End of input and line ends report as
    /// `','`.
    fn delimiter_after(&mut self, from: usize) -> Option<char> {
        let mut m = from;
        while m < from + 64 {
            match self.peek_at(m) {
                Some(c) if c.is_whitespace() && c != '\n' && c != '\r' => m += 1,
                _ => break,
            }
        }
        match self.peek_at(m) {
            None | Some('\n') | Some('\r') => Some(','),
            Some(c @ (',' | '}' | ']' | ':')) => Some(c),
            _ => None,
        }
    }

    /// Inside a quoted string at a raw line break: an unterminated string is
    /// assumed when the next line starts a new member or the string is a key.
    fn line_break_ends_string(&mut self) -> bool {
        match self.context.current() {
            Some(Context::ObjectKey) => true,
            Some(Context::ObjectValue) | Some(Context::Array) => self.next_line_starts_member(),
            None => false,
        }
    }

    /// `"key":` or `key:` shape ahead, after whitespace.
    pub(super) fn next_line_starts_member(&mut self) -> bool {
        let mut off = 0usize;
        while off <= 128 {
            match self.peek_at(off) {
                Some(c) if c.is_whitespace() => off += 1,
                _ => break,
            }
        }
        match self.peek_at(off) {
            Some(c) if self.is_quote_char(c) || c.is_alphanumeric() || c == '_' => {}
            _ => return false,
        }
        let mut steps = 0usize;
        while let Some(c) = self.peek_at(off) {
            match c {
                ':' => return true,
                '\n' | '\r' | '{' | '[' | ',' | '}' | ']' => return false,
                _ => {
                    off += 1;
                    steps += 1;
                    if steps > 64 {
                        return false;
                    }
                }
            }
        }
        false
    }

    /// Decode one backslash sequence into `acc`. Returns `true` when the
    /// sequence turned out to be the string's closing quote.
    fn read_escape(&mut self, acc: &mut String, kind: QuoteKind) -> Result<bool, RepairError> {
        let Some(esc) = self.peek_at(1) else {
            self.repair("dropped trailing backslash at end of input")?;
            self.bump();
            return Ok(false);
        };
        match esc {
            'n' => {
                acc.push('\n');
                self.advance(2);
            }
            'r' => {
                acc.push('\r');
                self.advance(2);
            }
            't' => {
                acc.push('\t');
                self.advance(2);
            }
            'b' => {
                acc.push('\u{0008}');
                self.advance(2);
            }
            'f' => {
                acc.push('\u{000C}');
                self.advance(2);
            }
            '/' => {
                acc.push('/');
                self.advance(2);
            }
            'u' => self.read_unicode_escape(acc)?,
            '\n' | '\r' => {
                self.repair("removed escaped line break inside a string")?;
                self.advance(2);
                if esc == '\r' && self.peek() == Some('\n') {
                    self.bump();
                }
            }
            '\\' => {
                // `\\` is a literal backslash, unless it is the first half of
                // a doubled-escape artifact `\\"` hiding an escaped quote.
                if matches!(self.peek_at(2), Some(q) if self.same_quote_kind(kind, q)) {
                    self.advance(2);
                    if self.close_is_plausible(kind) {
                        // Literal backslash, then the real closing quote.
                        acc.push('\\');
                        self.bump();
                        return Ok(true);
                    }
                    self.repair("stripped doubled escape layer before quote")?;
                    if let Some(q) = self.peek() {
                        acc.push(q);
                    }
                    self.bump();
                } else {
                    acc.push('\\');
                    self.advance(2);
                }
            }
            q if self.same_quote_kind(kind, q) => {
                // An escaped quote of the string's own kind. Normally content;
                // when closing here is the only plausible reading (common once
                // an embedded blob lost its outer decoding), it closes.
                self.bump();
                if self.close_is_plausible(kind) {
                    self.repair("stripped stray escape from the closing quote")?;
                    self.bump();
                    return Ok(true);
                }
                acc.push(q);
                self.bump();
            }
            '"' | '\'' => {
                acc.push(esc);
                self.advance(2);
            }
            _ => {
                // Unknown escape: preserved literally.
                acc.push('\\');
                acc.push(esc);
                self.advance(2);
            }
        }
        Ok(false)
    }

    fn read_unicode_escape(&mut self, acc: &mut String) -> Result<(), RepairError> {
        let mut hex = String::new();
        for off in 2..6 {
            match self.peek_at(off) {
                Some(c) if c.is_ascii_hexdigit() => hex.push(c),
                _ => break,
            }
        }
        if hex.len() < 4 {
            self.repair("kept malformed unicode escape as literal text")?;
            acc.push('\\');
            acc.push('u');
            self.advance(2);
            return Ok(());
        }
        let unit = u32::from_str_radix(&hex, 16).unwrap_or(0);
        self.advance(6);
        if (0xD800..=0xDBFF).contains(&unit) {
            // High surrogate: pair it with a following low surrogate.
            if self.peek() == Some('\\') && self.peek_at(1) == Some('u') {
                let mut lo_hex = String::new();
                for off in 2..6 {
                    match self.peek_at(off) {
                        Some(c) if c.is_ascii_hexdigit() => lo_hex.push(c),
                        _ => break,
                    }
                }
                if lo_hex.len() == 4 {
                    let lo = u32::from_str_radix(&lo_hex, 16).unwrap_or(0);
                    if (0xDC00..=0xDFFF).contains(&lo) {
                        let code = 0x1_0000 + (((unit - 0xD800) << 10) | (lo - 0xDC00));
                        if let Some(c) = char::from_u32(code) {
                            acc.push(c);
                        }
                        self.advance(6);
                        return Ok(());
                    }
                }
            }
            self.repair("dropped unpaired surrogate escape")?;
            return Ok(());
        }
        if (0xDC00..=0xDFFF).contains(&unit) {
            self.repair("dropped unpaired surrogate escape")?;
            return Ok(());
        }
        if let Some(c) = char::from_u32(unit) {
            acc.push(c);
        }
        Ok(())
    }

    /// Run of unquoted text. Keywords resolve first; purely numeric runs
    /// become numbers; everything else is a string bounded by the structure
    /// around it.
    fn parse_bareword(&mut self) -> Result<Option<Value>, RepairError> {
        if let Some(v) = self.parse_keyword()? {
            return Ok(Some(v));
        }
        let ctx = self.context.current();
        self.repair("added quotes around unquoted text")?;
        let mut acc = String::new();
        loop {
            let Some(c) = self.peek() else { break };
            let structural = match ctx {
                Some(Context::ObjectKey) => matches!(c, ':' | ',' | '}' | '{' | '[' | ']'),
                Some(Context::ObjectValue) | Some(Context::Array) => matches!(c, ',' | '}' | ']'),
                None => false,
            };
            if structural || self.is_quote_char(c) || self.at_comment_start() {
                break;
            }
            if c == '\n' || c == '\r' {
                match ctx {
                    Some(Context::ObjectKey) => break,
                    Some(Context::ObjectValue) | Some(Context::Array) => {
                        if self.next_line_starts_member() {
                            break;
                        }
                    }
                    None => {}
                }
            }
            acc.push(c);
            self.bump();
        }
        let acc = acc.trim_end().to_string();
        if acc.is_empty() {
            return Ok(None);
        }
        if let Some(n) = numeric_bareword(&acc) {
            return Ok(Some(Value::Number(n)));
        }
        Ok(Some(Value::String(acc)))
    }

    /// Case-insensitive `true`/`false`/`null` plus Python-style `None`, with
    /// end-of-input prefix completion as a last resort.
    fn parse_keyword(&mut self) -> Result<Option<Value>, RepairError> {
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
        if word.is_empty() {
            return Ok(None);
        }
        let after = self.peek_at(off);
        let boundary = !matches!(after, Some(c) if c.is_alphanumeric() || c == '_');
        let lower = word.to_ascii_lowercase();
        for (spelling, value) in [
            ("true", Value::Bool(true)),
            ("false", Value::Bool(false)),
            ("null", Value::Null),
            ("none", Value::Null),
        ] {
            if lower == spelling && boundary {
                if spelling == "none" {
                    self.repair("replaced Python-style None with null")?;
                } else if word != spelling {
                    self.repair("normalized keyword capitalization")?;
                }
                self.advance(off);
                return Ok(Some(value));
            }
            if after.is_none() && lower.len() < spelling.len() && spelling.starts_with(&lower) {
                self.repair("completed keyword truncated at end of input")?;
                self.advance(off);
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

/// A bareword that is nothing but a number: optional sign, digits, optional
/// fraction or exponent. Digit runs beyond i64 keep their spelling.
fn numeric_bareword(s: &str) -> Option<Number> {
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        || !s.chars().any(|c| c.is_ascii_digit())
    {
        return None;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::Int(i));
    }
    let body = s.strip_prefix('-').unwrap_or(s);
    if !body.is_empty() && body.chars().all(|c| c.is_ascii_digit()) {
        return Some(Number::Literal(s.to_string()));
    }
    if let Ok(f) = s.parse::<f64>() {
        if f.is_finite() {
            return Some(Number::Float(f));
        }
    }
    None
}
