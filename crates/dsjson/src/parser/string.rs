use super::{
    Reader,
    escape_buffer::{Decoded, UnicodeEscapeBuffer},
};
use crate::{error::SyntaxError, source::CharSource, value::Node};

/// Outcome of reading a quoted string.
pub(super) enum Quoted {
    /// The input did not start with `"`; nothing was consumed.
    Absent,
    Complete(String),
    /// The string was malformed; the text decoded up to the problem.
    Partial(String),
}

impl<S: CharSource> Reader<'_, S> {
    /// Reads a string value. Returns `None` if the input does not start with
    /// a quote.
    pub(super) fn read_string(&mut self) -> Option<Node> {
        match self.read_quoted() {
            Quoted::Absent => None,
            Quoted::Complete(text) => Some(Node::string(text)),
            Quoted::Partial(text) => Some(Node::string(text).with_error()),
        }
    }

    pub(super) fn read_quoted(&mut self) -> Quoted {
        if self.scanner.peek_char() != Some('"') {
            return Quoted::Absent;
        }
        self.scanner.get_next();

        let mut text = String::new();
        loop {
            match self.scanner.get_next() {
                None => {
                    report!(self, Error, SyntaxError::UnterminatedString);
                    return Quoted::Partial(text);
                }
                Some('"') => return Quoted::Complete(text),
                Some('\\') => {
                    if !self.read_escape(&mut text) {
                        return Quoted::Partial(text);
                    }
                }
                Some(ch) => text.push(ch),
            }
        }
    }

    /// Decodes the escape following a backslash into `text`.
    fn read_escape(&mut self, text: &mut String) -> bool {
        let Some(ch) = self.scanner.get_next() else {
            report!(self, Error, SyntaxError::UnexpectedEndOfInput("escape sequence"));
            return false;
        };
        let decoded = match ch {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'b' => '\u{08}',
            'f' => '\u{0C}',
            '"' => '"',
            '\\' => '\\',
            'u' => return self.read_unicode_escape(text),
            other => {
                report!(self, Error, SyntaxError::InvalidEscape(other));
                return false;
            }
        };
        text.push(decoded);
        true
    }

    fn read_unicode_escape(&mut self, text: &mut String) -> bool {
        let mut escape = UnicodeEscapeBuffer::new();
        loop {
            let Some(ch) = self.scanner.get_next() else {
                report!(self, Error, SyntaxError::UnexpectedEndOfInput("unicode escape"));
                return false;
            };
            match escape.feed(ch) {
                Ok(None) => {}
                Ok(Some(Decoded::Char(decoded))) => {
                    text.push(decoded);
                    return true;
                }
                Ok(Some(Decoded::Surrogate(code))) => {
                    report!(self, Warn, SyntaxError::LoneSurrogate(code));
                    text.push(char::REPLACEMENT_CHARACTER);
                    return true;
                }
                Err(err) => {
                    report!(self, Error, err);
                    return false;
                }
            }
        }
    }
}
