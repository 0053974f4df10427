//! Recursive-descent parser.
//!
//! Overview
//! - A [`Reader`] owns a [`Scanner`] over some [`CharSource`], the logical
//!   input name used in diagnostics, and the [`Diagnostics`] collected so far.
//! - `read_value` skips whitespace, peeks one character and dispatches: `{`
//!   object, `[` array, `"` string, digit or `-` number, anything else symbol.
//!   Objects and arrays call back into `read_value` for their members.
//! - The document root is always read as an object.
//!
//! Failure handling
//! - No sub-parser aborts the whole parse. A sub-parser that hits a problem
//!   records a [`Message`](crate::Message), sets the error flag on the node
//!   it is building, stops, and returns that node with everything read so
//!   far. A container whose member comes back flagged stores the member,
//!   flags itself and stops as well, so a failure salvages every enclosing
//!   container up to the root.
//! - A sub-parser returns `None` only when no value is present at all (end of
//!   input, or a delimiter where a value was expected).
//! - Warnings (unknown symbols, duplicate fields, lone surrogates, trailing
//!   text) are recorded without flagging anything.

/// Records a diagnostic at the reader's current position, tagged with the
/// place in this crate that reported it.
macro_rules! report {
    ($reader:expr, $severity:ident, $error:expr) => {
        $reader.report(
            (file!(), line!()),
            $crate::diagnostics::Severity::$severity,
            $error,
        )
    };
}

mod escape_buffer;
mod number;
mod string;

use std::io::Read;

use string::Quoted;

use crate::{
    diagnostics::{Diagnostics, Severity},
    error::SyntaxError,
    options::ParserOptions,
    scanner::{Scanner, is_whitespace},
    source::{CharSource, ReaderSource, StrSource},
    value::{Map, Node},
};

/// The result of parsing one document: the tree and every message reported
/// while building it.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Node,
    pub diagnostics: Diagnostics,
}

impl Document {
    /// Returns `true` if no node is flagged and no error was reported.
    /// Warnings do not count.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        !self.root.has_errors() && !self.diagnostics.has_errors()
    }
}

/// Parses documents with a fixed set of [`ParserOptions`].
///
/// # Examples
///
/// ```rust
/// use dsjson::{Parser, ParserOptions, Severity};
///
/// let parser = Parser::new(ParserOptions::default());
/// let doc = parser.parse_str("settings.json", r#"{"debug": yes}"#);
///
/// // Unknown symbols are kept and reported as warnings.
/// assert_eq!(doc.root.get("debug").and_then(|n| n.as_symbol()), Some("yes"));
/// let warning = doc.diagnostics.iter().next().unwrap();
/// assert_eq!(warning.severity, Severity::Warn);
/// assert_eq!(warning.input, "settings.json");
/// assert!(doc.is_ok());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    options: ParserOptions,
}

impl Parser {
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parses an in-memory document.
    #[must_use]
    pub fn parse_str(&self, name: &str, text: &str) -> Document {
        self.parse_source(name, StrSource::new(text))
    }

    /// Parses a document read from a byte stream.
    ///
    /// An I/O error ends the input; it is reported as an error diagnostic and
    /// flags the root.
    pub fn parse_reader<R: Read>(&self, name: &str, reader: R) -> Document {
        let mut source = ReaderSource::new(reader);
        let mut doc = self.parse_source(name, &mut source);
        if let Some(err) = source.take_error() {
            doc.diagnostics.report(
                (file!(), line!()),
                Severity::Error,
                name,
                source.position(),
                SyntaxError::Io(err.to_string()),
            );
            doc.root.set_error();
        }
        doc
    }

    /// Parses a document from any character source.
    pub fn parse_source<S: CharSource>(&self, name: &str, source: S) -> Document {
        log::debug!("parsing '{name}'");
        let mut reader = Reader::new(name, source, self.options);
        let root = reader.read_document();
        log::debug!(
            "parsed '{name}': {} error(s), {} warning(s)",
            reader.diagnostics.error_count(),
            reader.diagnostics.warning_count()
        );
        Document {
            root,
            diagnostics: reader.diagnostics,
        }
    }
}

/// State of one parse.
pub(crate) struct Reader<'n, S> {
    scanner: Scanner<S>,
    name: &'n str,
    options: ParserOptions,
    depth: usize,
    diagnostics: Diagnostics,
}

impl<'n, S: CharSource> Reader<'n, S> {
    pub(crate) fn new(name: &'n str, source: S, options: ParserOptions) -> Self {
        Self {
            scanner: Scanner::new(source),
            name,
            options,
            depth: 0,
            diagnostics: Diagnostics::new(),
        }
    }

    fn report(&mut self, location: (&'static str, u32), severity: Severity, error: SyntaxError) {
        let position = self.scanner.position();
        self.diagnostics
            .report(location, severity, self.name, position, error);
    }

    /// Reports that `expected` was not found; `found` is what was read
    /// instead.
    fn expected(&mut self, expected: &'static str, found: Option<char>) {
        match found {
            Some(found) => report!(self, Error, SyntaxError::Expected { expected, found }),
            None => report!(self, Error, SyntaxError::UnexpectedEndOfInput(expected)),
        }
    }

    fn read_document(&mut self) -> Node {
        let root = self.read_object();
        if !root.is_error() {
            self.scanner.skip_whitespace();
            if let Some(ch) = self.scanner.peek_char() {
                report!(self, Warn, SyntaxError::TrailingCharacters(ch));
            }
        }
        root
    }

    /// Reads any value, dispatching on the next significant character.
    fn read_value(&mut self) -> Option<Node> {
        let next = self.scanner.peek_char();
        log::trace!("read_value at {}: {next:?}", self.scanner.position());
        match next {
            None => {
                report!(self, Error, SyntaxError::UnexpectedEndOfInput("value"));
                None
            }
            Some('{') => Some(self.read_object()),
            Some('[') => Some(self.read_array()),
            Some('"') => self.read_string(),
            Some(c) if c.is_ascii_digit() || c == '-' => Some(self.read_number()),
            Some(_) => self.read_symbol(),
        }
    }

    /// Enters a container, enforcing the nesting limit.
    fn enter(&mut self) -> bool {
        if self.depth >= self.options.max_depth {
            report!(self, Error, SyntaxError::TooDeep(self.options.max_depth));
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Reads `{ "name": value, ... }`.
    fn read_object(&mut self) -> Node {
        let open = self.scanner.peek_char();
        if open != Some('{') {
            self.expected("'{'", open);
            return Node::object().with_error();
        }
        if !self.enter() {
            return Node::object().with_error();
        }
        self.scanner.get_next();

        let mut map = Map::new();
        let ok = if self.scanner.peek_char() == Some('}') {
            self.scanner.get_next();
            true
        } else {
            self.read_fields(&mut map)
        };
        self.leave();

        let node = Node::from(map);
        if ok { node } else { node.with_error() }
    }

    /// Reads fields up to and including the closing `}`. Returns `false` on
    /// the first failure; fields read before it stay in `map`.
    fn read_fields(&mut self, map: &mut Map) -> bool {
        loop {
            let name = match self.read_quoted() {
                Quoted::Complete(name) => name,
                Quoted::Partial(_) => return false,
                Quoted::Absent => {
                    report!(self, Error, SyntaxError::MissingFieldName);
                    return false;
                }
            };

            let colon = self.scanner.read_char();
            if colon != Some(':') {
                self.expected("':'", colon);
                return false;
            }

            let Some(value) = self.read_value() else {
                return false;
            };
            let failed = value.is_error();
            if map.insert(name.clone(), value).is_some() {
                report!(self, Warn, SyntaxError::DuplicateField(name));
            }
            if failed {
                return false;
            }

            match self.scanner.read_char() {
                Some(',') => {}
                Some('}') => return true,
                found => {
                    self.expected("',' or '}'", found);
                    return false;
                }
            }
        }
    }

    /// Reads `[ value, ... ]`.
    fn read_array(&mut self) -> Node {
        let open = self.scanner.peek_char();
        if open != Some('[') {
            self.expected("'['", open);
            return Node::array().with_error();
        }
        if !self.enter() {
            return Node::array().with_error();
        }
        self.scanner.get_next();

        let mut elements = Vec::new();
        let ok = if self.scanner.peek_char() == Some(']') {
            self.scanner.get_next();
            true
        } else {
            self.read_elements(&mut elements)
        };
        self.leave();

        let node = Node::from(elements);
        if ok { node } else { node.with_error() }
    }

    fn read_elements(&mut self, elements: &mut Vec<Node>) -> bool {
        loop {
            let Some(value) = self.read_value() else {
                return false;
            };
            let failed = value.is_error();
            elements.push(value);
            if failed {
                return false;
            }

            match self.scanner.read_char() {
                Some(',') => {}
                Some(']') => return true,
                found => {
                    if found.is_some() {
                        self.scanner.unget_last();
                    }
                    self.expected("',' or ']'", found);
                    return false;
                }
            }
        }
    }

    /// Reads an unquoted literal up to the next delimiter.
    fn read_symbol(&mut self) -> Option<Node> {
        self.scanner.skip_whitespace();
        let mut text = String::new();
        while let Some(ch) = self.scanner.get_next() {
            if is_whitespace(ch) || is_delimiter(ch) {
                self.scanner.unget_last();
                break;
            }
            text.push(ch);
        }

        if text.is_empty() {
            report!(self, Error, SyntaxError::MissingValue);
            return None;
        }
        if matches!(text.as_str(), "true" | "false" | "null") {
            return Some(Node::symbol(text));
        }

        if self.options.strict_symbols {
            report!(self, Error, SyntaxError::UnknownSymbol(text.clone()));
            Some(Node::symbol(text).with_error())
        } else {
            report!(self, Warn, SyntaxError::UnknownSymbol(text.clone()));
            Some(Node::symbol(text))
        }
    }
}

/// Characters that end an unquoted symbol.
fn is_delimiter(ch: char) -> bool {
    matches!(ch, '{' | '}' | '[' | ']' | ':' | ',' | '"')
}

#[cfg(test)]
mod tests;
