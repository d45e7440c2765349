//! Comment skipper. `//`, `#`, and `/* */` count as whitespace anywhere
//! whitespace is allowed; none of it reaches the output.

use super::{CharSource, Parser};
use crate::error::RepairError;

impl<'o, S: CharSource> Parser<'o, S> {
    pub(super) fn at_comment_start(&mut self) -> bool {
        match self.peek() {
            Some('#') => true,
            Some('/') => matches!(self.peek_at(1), Some('/') | Some('*')),
            _ => false,
        }
    }

    pub(super) fn skip_comment(&mut self) -> Result<(), RepairError> {
        match (self.peek(), self.peek_at(1)) {
            (Some('#'), _) => {
                self.repair("removed line comment")?;
                self.bump();
                self.skip_to_line_end();
            }
            (Some('/'), Some('/')) => {
                self.repair("removed line comment")?;
                self.advance(2);
                self.skip_to_line_end();
            }
            (Some('/'), Some('*')) => {
                self.repair("removed block comment")?;
                self.advance(2);
                let mut closed = false;
                while let Some(c) = self.peek() {
                    if c == '*' && self.peek_at(1) == Some('/') {
                        self.advance(2);
                        closed = true;
                        break;
                    }
                    self.bump();
                }
                if !closed {
                    self.repair("block comment never terminated, consumed to end of input")?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn skip_to_line_end(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.bump();
        }
    }
}
