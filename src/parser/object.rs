//! Object parser. Completing the container always beats aborting the parse:
//! truncated objects get their `}` synthesized, missing colons and commas are
//! inserted, and duplicate keys collapse last-writer-wins while keeping the
//! first insertion position.

use super::{CharSource, Context, Parser};
use crate::error::RepairError;
use crate::render;
use crate::value::{Map, Value};

impl<'o, S: CharSource> Parser<'o, S> {
    /// The `{` has already been consumed.
    pub(super) fn parse_object(&mut self) -> Result<Value, RepairError> {
        if self.context.depth() >= self.opts.max_depth {
            if self.opts.strict {
                return Err(RepairError::DepthExceeded {
                    limit: self.opts.max_depth,
                    position: self.index,
                });
            }
            self.repair("nesting too deep, skipped the inner object")?;
            self.skim_balanced('{', '}');
            return Ok(Value::Object(Map::new()));
        }
        self.context.push(Context::ObjectKey);
        let mut map = Map::new();
        let mut pending_comma = false;
        loop {
            self.skip_filler()?;
            match self.peek() {
                None => {
                    self.repair("object never closed, inserted '}' at end of input")?;
                    break;
                }
                Some('}') => {
                    if pending_comma && !map.is_empty() {
                        self.repair("removed trailing comma before '}'")?;
                    }
                    self.bump();
                    break;
                }
                Some(']') => {
                    // Leave the bracket for the enclosing array.
                    self.repair("closed object at stray ']'")?;
                    break;
                }
                _ => {}
            }
            if self.peek() == Some(':') {
                self.repair("ignored ':' appearing before a key")?;
                self.bump();
                continue;
            }
            if self.peek() == Some(',') {
                self.repair("ignored extra ',' between object members")?;
                self.bump();
                continue;
            }
            pending_comma = false;

            self.context.set_top(Context::ObjectKey);
            let Some(key) = self.parse_key()? else {
                continue;
            };
            if key.is_empty() {
                self.repair("object key is empty")?;
            }

            self.skip_filler()?;
            let mut value_missing = false;
            match self.peek() {
                Some(':') => self.bump(),
                Some(',') | Some('}') | None => {
                    self.repair("member has no value, substituted an empty string")?;
                    value_missing = true;
                }
                _ => {
                    self.repair("inserted missing ':' after object key")?;
                }
            }

            self.context.set_top(Context::ObjectValue);
            let value = if value_missing {
                Value::String(String::new())
            } else {
                match self.parse_value()? {
                    Some(v) => v,
                    None => {
                        self.repair("member has no value, substituted an empty string")?;
                        Value::String(String::new())
                    }
                }
            };
            self.context.set_top(Context::ObjectKey);

            // An empty key survives only alongside a real value.
            if key.is_empty() && matches!(&value, Value::String(s) if s.is_empty()) {
                self.repair("dropped member with empty key and empty value")?;
            } else {
                if map.contains_key(&key) {
                    self.repair("duplicate key, kept the later value")?;
                }
                // IndexMap keeps the original position on overwrite.
                map.insert(key, value);
            }

            self.skip_filler()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                    pending_comma = true;
                }
                Some('}') | Some(']') | None => {}
                _ => {
                    // Implicit separator: log, do not consume.
                    self.repair("inserted missing ',' between object members")?;
                }
            }
        }
        self.context.pop();
        Ok(Value::Object(map))
    }

    /// Key position: a quoted or bareword string; numbers, booleans and null
    /// stringify. Returns `None` when no key could be read here, after making
    /// progress past whatever was in the way.
    fn parse_key(&mut self) -> Result<Option<String>, RepairError> {
        let before = self.index;
        match self.peek() {
            None => return Ok(None),
            Some(c)
                if self.is_quote_char(c)
                    || c.is_alphanumeric()
                    || matches!(c, '-' | '+' | '.' | '_') => {}
            Some(_) => {
                self.repair("ignored stray character before an object key")?;
                self.bump();
                return Ok(None);
            }
        }
        match self.parse_string()? {
            Some(Value::String(s)) => Ok(Some(s)),
            Some(Value::Bool(true)) => Ok(Some("true".to_string())),
            Some(Value::Bool(false)) => Ok(Some("false".to_string())),
            Some(Value::Null) => Ok(Some("null".to_string())),
            Some(other) => Ok(Some(render::render(&other, false, None))),
            None => {
                if self.index == before {
                    self.repair("ignored stray character before an object key")?;
                    self.bump();
                }
                Ok(None)
            }
        }
    }
}
