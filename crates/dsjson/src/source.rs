//! Character sources feeding the parser.
//!
//! A [`CharSource`] hands out one character at a time and can push back the
//! most recent one, which is all the lookahead the recursive-descent parser
//! needs. Every source tracks a 1-based [`Position`] so diagnostics can point
//! at the offending input.
use std::{
    fmt,
    io::{self, BufRead, BufReader, Read},
};

/// Line and column of the next character to be read, both 1-based.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Position {
    fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    // The column after un-reading a newline is not known; it is left as is.
    fn retreat(&mut self, ch: char) {
        if ch == '\n' {
            self.line = self.line.saturating_sub(1).max(1);
        } else {
            self.column = self.column.saturating_sub(1).max(1);
        }
    }
}

/// A pull-based character stream with one character of pushback.
pub trait CharSource {
    /// Returns the next character, or `None` at end of input.
    fn get_next(&mut self) -> Option<char>;

    /// Pushes back the character most recently returned by
    /// [`get_next`](Self::get_next) and returns it.
    ///
    /// Only one character can be pushed back: a second consecutive call, or
    /// a call after `get_next` returned `None`, does nothing and returns
    /// `None`.
    fn unget_last(&mut self) -> Option<char>;

    /// Position of the next character to be read.
    fn position(&self) -> Position;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn get_next(&mut self) -> Option<char> {
        (**self).get_next()
    }

    fn unget_last(&mut self) -> Option<char> {
        (**self).unget_last()
    }

    fn position(&self) -> Position {
        (**self).position()
    }
}

/// A [`CharSource`] over an in-memory string.
#[derive(Debug)]
pub struct StrSource<'a> {
    text: &'a str,
    /// Byte offset of the next character.
    cursor: usize,
    /// The last character handed out, if it may still be pushed back.
    last: Option<char>,
    position: Position,
}

impl<'a> StrSource<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            cursor: 0,
            last: None,
            position: Position::default(),
        }
    }

    /// The unread remainder of the input.
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        &self.text[self.cursor..]
    }
}

impl CharSource for StrSource<'_> {
    fn get_next(&mut self) -> Option<char> {
        let ch = self.text[self.cursor..].chars().next();
        if let Some(ch) = ch {
            self.cursor += ch.len_utf8();
            self.position.advance(ch);
        }
        self.last = ch;
        ch
    }

    fn unget_last(&mut self) -> Option<char> {
        let ch = self.last.take()?;
        self.cursor -= ch.len_utf8();
        self.position.retreat(ch);
        Some(ch)
    }

    fn position(&self) -> Position {
        self.position
    }
}

/// A [`CharSource`] over a byte stream, decoded as UTF-8.
///
/// Invalid UTF-8 is replaced with U+FFFD. An I/O error ends the stream; it
/// can be retrieved afterwards with [`ReaderSource::take_error`].
pub struct ReaderSource<R> {
    reader: BufReader<R>,
    /// The last character handed out.
    saved: Option<char>,
    /// Whether `saved` has been pushed back and is the next character.
    pushed_back: bool,
    /// Whether the last `get_next` may be undone.
    can_unget: bool,
    error: Option<io::Error>,
    position: Position,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            saved: None,
            pushed_back: false,
            can_unget: false,
            error: None,
            position: Position::default(),
        }
    }

    /// Takes the I/O error that ended the stream, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn next_byte(&mut self) -> Option<u8> {
        if self.error.is_some() {
            return None;
        }
        loop {
            match self.reader.fill_buf() {
                Ok([]) => return None,
                Ok(buf) => {
                    let b = buf[0];
                    self.reader.consume(1);
                    return Some(b);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    log::error!("character source read failed: {e}");
                    self.error = Some(e);
                    return None;
                }
            }
        }
    }

    fn peek_byte(&mut self) -> Option<u8> {
        if self.error.is_some() {
            return None;
        }
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return buf.first().copied(),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    log::error!("character source read failed: {e}");
                    self.error = Some(e);
                    return None;
                }
            }
        }
    }

    /// Decodes one character. Continuation bytes are only consumed while they
    /// fit the sequence announced by the lead byte, so a malformed sequence
    /// never swallows the start of the next character.
    fn decode_char(&mut self) -> Option<char> {
        let lead = self.next_byte()?;
        let width = match lead {
            0x00..=0x7F => return Some(char::from(lead)),
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => return Some(char::REPLACEMENT_CHARACTER),
        };

        let mut bytes = [lead, 0, 0, 0];
        let mut len = 1;
        while len < width {
            match self.peek_byte() {
                Some(b) if b & 0xC0 == 0x80 => {
                    bytes[len] = b;
                    len += 1;
                    self.reader.consume(1);
                }
                _ => break,
            }
        }

        let (ch, size) = bstr::decode_utf8(&bytes[..len]);
        match ch {
            Some(ch) if size == len => Some(ch),
            _ => Some(char::REPLACEMENT_CHARACTER),
        }
    }
}

impl<R> fmt::Debug for ReaderSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderSource")
            .field("saved", &self.saved)
            .field("pushed_back", &self.pushed_back)
            .field("error", &self.error)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl<R: Read> CharSource for ReaderSource<R> {
    fn get_next(&mut self) -> Option<char> {
        let ch = if self.pushed_back {
            self.pushed_back = false;
            self.saved
        } else {
            let ch = self.decode_char();
            self.saved = ch;
            ch
        };
        if let Some(ch) = ch {
            self.position.advance(ch);
        }
        self.can_unget = ch.is_some();
        ch
    }

    fn unget_last(&mut self) -> Option<char> {
        if !self.can_unget {
            return None;
        }
        self.can_unget = false;
        self.pushed_back = true;
        let ch = self.saved?;
        self.position.retreat(ch);
        Some(ch)
    }

    fn position(&self) -> Position {
        self.position
    }
}
