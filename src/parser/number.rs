//! Number parser: optional sign, digits, fraction, exponent, plus the
//! tolerances LLM output needs — a leading `+`, thousands separators, a
//! trailing decimal point, and truncated exponents.

use super::{CharSource, Context, Parser};
use crate::error::RepairError;
use crate::value::{Number, Value};

/// Alphabetic suffixes that read as units. A number followed by one of these
/// keeps its numeric reading; any other letter run turns the whole token into
/// a string.
const UNIT_SUFFIXES: &[&str] = &["px", "pt", "em", "ms", "s", "m", "h", "kb", "mb", "gb", "kg", "km"];

impl<'o, S: CharSource> Parser<'o, S> {
    pub(super) fn parse_number(&mut self) -> Result<Option<Value>, RepairError> {
        let start = self.index;
        let mut lit = String::new();

        // Pre-scan the contiguous token: shapes like 1.1.1, 1/3 or 10-20 are
        // not salvageable as numbers and read better as strings.
        let mut off = 0usize;
        let mut dots = 0usize;
        let mut slash = false;
        let mut inner_hyphen = false;
        let mut prev: Option<char> = None;
        while off <= 64 {
            let Some(c) = self.peek_at(off) else { break };
            if c.is_whitespace() || matches!(c, ',' | '}' | ']' | ':' | '(' | ')') {
                break;
            }
            match c {
                '.' => dots += 1,
                '/' => slash = true,
                '-' => {
                    if matches!(prev, Some(p) if p != 'e' && p != 'E') {
                        inner_hyphen = true;
                    }
                }
                _ => {}
            }
            prev = Some(c);
            off += 1;
        }
        if dots > 1 || slash || inner_hyphen {
            return self.parse_string();
        }

        match self.peek() {
            Some(sign @ ('+' | '-')) => {
                // A signed word like `-Infinity` or `+foo` is not a number.
                if matches!(self.peek_at(1), Some(c) if c.is_alphabetic()) {
                    return self.parse_string();
                }
                if sign == '+' {
                    self.repair("dropped leading '+' from a number")?;
                } else {
                    lit.push('-');
                }
                self.bump();
            }
            _ => {}
        }

        let mut int_digits = 0usize;
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_digit() => {
                    lit.push(c);
                    self.bump();
                    int_digits += 1;
                }
                Some(',') if int_digits > 0 && self.thousands_group_ahead() => {
                    self.repair("dropped thousands separator from a number")?;
                    self.bump();
                }
                _ => break,
            }
        }

        let mut is_float = false;
        if self.peek() == Some('.') {
            self.bump();
            let mut frac = String::new();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    frac.push(c);
                    self.bump();
                } else {
                    break;
                }
            }
            if frac.is_empty() {
                if int_digits == 0 {
                    // A lone '.' or '-.': nothing numeric here.
                    let span = self.src.span(start, self.index);
                    return Ok(Some(Value::String(span)));
                }
                self.repair("dropped trailing '.' from a number")?;
            } else {
                if int_digits == 0 {
                    self.repair("added a leading zero to a bare decimal fraction")?;
                    lit.push('0');
                }
                lit.push('.');
                lit.push_str(&frac);
                is_float = true;
            }
        }

        if int_digits == 0 && !is_float {
            // Only a sign was consumed.
            let span = self.src.span(start, self.index);
            if span.is_empty() {
                return Ok(None);
            }
            return Ok(Some(Value::String(span)));
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            let mut off = 1usize;
            if matches!(self.peek_at(1), Some('+') | Some('-')) {
                off += 1;
            }
            let mut digits = 0usize;
            while matches!(self.peek_at(off + digits), Some(c) if c.is_ascii_digit()) {
                digits += 1;
            }
            if digits > 0 {
                // Copied verbatim: when the value overflows f64 the literal
                // falls back to `Number::Literal` and must keep its spelling.
                let end = self.index + off + digits;
                while self.index < end {
                    if let Some(c) = self.peek() {
                        lit.push(c);
                    }
                    self.bump();
                }
                is_float = true;
            } else {
                self.repair("dropped incomplete exponent from a number")?;
                self.advance(off);
            }
        }

        // A letter glued to the number: keep the numeric prefix only for
        // unit-like suffixes, otherwise re-read the whole run as a string.
        if matches!(self.peek(), Some(c) if c.is_alphabetic()) {
            let mut run = String::new();
            let mut off = 0usize;
            while off <= 8 {
                match self.peek_at(off) {
                    Some(c) if c.is_alphanumeric() => {
                        run.push(c);
                        off += 1;
                    }
                    _ => break,
                }
            }
            if off <= 8 && UNIT_SUFFIXES.contains(&run.to_ascii_lowercase().as_str()) {
                self.repair("separated unit suffix from a number")?;
                // The suffix stays in the input and parses as its own value.
            } else {
                self.index = start;
                return self.parse_string();
            }
        }

        let value = if is_float {
            match lit.parse::<f64>() {
                Ok(f) if f.is_finite() => Value::Number(Number::Float(f)),
                _ => Value::Number(Number::Literal(lit)),
            }
        } else {
            match lit.parse::<i64>() {
                Ok(i) => Value::Number(Number::Int(i)),
                // Out of i64 range: keep every digit.
                Err(_) => Value::Number(Number::Literal(lit)),
            }
        };
        Ok(Some(value))
    }

    /// `,` inside digits counts as a thousands separator only for a clear
    /// `,ddd` group boundary, and never inside an array where a comma is
    /// almost always an element separator.
    fn thousands_group_ahead(&mut self) -> bool {
        if self.context.current() == Some(Context::Array) {
            return false;
        }
        for off in 1..=3 {
            if !matches!(self.peek_at(off), Some(c) if c.is_ascii_digit()) {
                return false;
            }
        }
        !matches!(self.peek_at(4), Some(c) if c.is_ascii_digit())
    }
}
