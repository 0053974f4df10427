//! Decoding of four-digit `\uXXXX` escapes.
//!
//! The [`UnicodeEscapeBuffer`] type accumulates four ASCII hexadecimal digits
//! (`0-9`, `A-F`, `a-f`) and decodes them once the fourth arrives, after which
//! it resets to accept a new escape.
use crate::error::SyntaxError;

/// The result of a complete escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decoded {
    Char(char),
    /// A code point in U+D800..=U+DFFF, which has no UTF-8 encoding on its
    /// own. Surrogate pairs are not combined.
    Surrogate(u32),
}

#[derive(Debug)]
pub(crate) struct UnicodeEscapeBuffer {
    code: u32,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self { code: 0, len: 0 }
    }

    pub(crate) fn reset(&mut self) {
        self.code = 0;
        self.len = 0;
    }

    /// Feeds one hexadecimal digit.
    ///
    /// - Returns `Ok(None)` while fewer than four digits have been seen.
    /// - Returns `Ok(Some(decoded))` on the fourth digit and resets.
    /// - Returns `Err` if `c` is not an ASCII hex digit.
    pub(crate) fn feed(&mut self, c: char) -> Result<Option<Decoded>, SyntaxError> {
        let digit = c
            .to_digit(16)
            .ok_or(SyntaxError::InvalidUnicodeEscapeChar(c))?;
        self.code = (self.code << 4) | digit;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let code = self.code;
        self.reset();
        Ok(Some(match char::from_u32(code) {
            Some(ch) => Decoded::Char(ch),
            None => Decoded::Surrogate(code),
        }))
    }
}
