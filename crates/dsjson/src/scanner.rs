//! Whitespace and token primitives shared by the sub-parsers.
use crate::source::{CharSource, Position};

/// The four whitespace characters JSON allows between tokens.
#[inline]
pub(crate) fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Thin layer over a [`CharSource`] providing the token-level reads.
#[derive(Debug)]
pub(crate) struct Scanner<S> {
    source: S,
}

impl<S: CharSource> Scanner<S> {
    pub(crate) fn new(source: S) -> Self {
        Self { source }
    }

    #[inline]
    pub(crate) fn position(&self) -> Position {
        self.source.position()
    }

    #[inline]
    pub(crate) fn get_next(&mut self) -> Option<char> {
        self.source.get_next()
    }

    #[inline]
    pub(crate) fn unget_last(&mut self) {
        self.source.unget_last();
    }

    /// Advances past whitespace, leaving the first significant character
    /// unread.
    pub(crate) fn skip_whitespace(&mut self) {
        while let Some(ch) = self.source.get_next() {
            if !is_whitespace(ch) {
                self.source.unget_last();
                return;
            }
        }
    }

    /// Skips whitespace and returns the next significant character.
    pub(crate) fn read_char(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.source.get_next()
    }

    /// Skips whitespace and returns the next significant character without
    /// consuming it.
    pub(crate) fn peek_char(&mut self) -> Option<char> {
        let ch = self.read_char();
        if ch.is_some() {
            self.source.unget_last();
        }
        ch
    }

    /// Skips whitespace and reads a maximal run of ASCII digits.
    ///
    /// The returned string is empty if no digit was found. The character that
    /// ended the run is left unread.
    pub(crate) fn read_digit_run(&mut self) -> String {
        self.skip_whitespace();
        let mut digits = String::new();
        while let Some(ch) = self.source.get_next() {
            if ch.is_ascii_digit() {
                digits.push(ch);
            } else {
                self.source.unget_last();
                break;
            }
        }
        digits
    }
}
