//! Array parser: the object parser's simpler sibling. Missing separators are
//! inserted, trailing commas dropped, and a stray `}` hands control back to
//! the enclosing object.

use super::{CharSource, Context, Parser};
use crate::error::RepairError;
use crate::value::Value;

impl<'o, S: CharSource> Parser<'o, S> {
    /// The `[` has already been consumed.
    pub(super) fn parse_array(&mut self) -> Result<Value, RepairError> {
        if self.context.depth() >= self.opts.max_depth {
            if self.opts.strict {
                return Err(RepairError::DepthExceeded {
                    limit: self.opts.max_depth,
                    position: self.index,
                });
            }
            self.repair("nesting too deep, skipped the inner array")?;
            self.skim_balanced('[', ']');
            return Ok(Value::Array(Vec::new()));
        }
        self.context.push(Context::Array);
        let mut items = Vec::new();
        let mut pending_comma = false;
        loop {
            self.skip_filler()?;
            match self.peek() {
                None => {
                    self.repair("array never closed, inserted ']' at end of input")?;
                    break;
                }
                Some(']') => {
                    if pending_comma && !items.is_empty() {
                        self.repair("removed trailing comma before ']'")?;
                    }
                    self.bump();
                    break;
                }
                Some('}') => {
                    // Leave the brace for the enclosing object.
                    self.repair("closed array at stray '}'")?;
                    break;
                }
                _ => {}
            }
            let before = self.index;
            match self.parse_value()? {
                Some(v) => {
                    items.push(v);
                    pending_comma = false;
                }
                None => {
                    if self.peek() == Some(',') {
                        self.repair("removed empty array slot")?;
                        self.bump();
                    } else if self.index == before {
                        self.repair("ignored unparseable fragment in array")?;
                        self.bump();
                    }
                    continue;
                }
            }
            self.skip_filler()?;
            match self.peek() {
                Some(',') => {
                    self.bump();
                    pending_comma = true;
                }
                Some(']') | Some('}') | None => {}
                _ => {
                    // Implicit separator: log, do not consume.
                    self.repair("inserted missing ',' between array elements")?;
                }
            }
        }
        self.context.pop();
        Ok(Value::Array(items))
    }
}
