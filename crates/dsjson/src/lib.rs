//! A recursive-descent JSON reader and writer.
//!
//! `dsjson` reads a document into a tree of [`Node`]s and writes trees back
//! out as text. It is built for configuration-style input where a useful
//! partial result beats an early abort:
//!
//! - Every problem is recorded as a [`Message`] carrying the input name and
//!   the 1-based line and column where it was found.
//! - A sub-parse that fails still returns the part it managed to read; the
//!   node and its ancestors are flagged with [`Node::is_error`].
//! - Numbers keep their textual parts (sign, integer, fraction, exponent), so
//!   writing a tree back reproduces every literal exactly.
//! - Unquoted words other than `true`, `false` and `null` are kept as symbols
//!   and reported as warnings.
//!
//! ```rust
//! let root = dsjson::parse("config.json", r#"{"port": 8080, "hosts": ["a", "b"]}"#);
//! assert!(!root.has_errors());
//! assert_eq!(root.pointer("/hosts[1]").and_then(|n| n.as_str()), Some("b"));
//! assert_eq!(root.to_string(), r#"{"hosts":["a","b"],"port":8080}"#);
//! ```
//!
//! The document root is always an object.

mod diagnostics;
mod error;
mod options;
mod parser;
mod path;
mod scanner;
mod source;
mod stringify;
mod value;

#[cfg(test)]
mod tests;

use std::{fs::File, io::Read};

pub use diagnostics::{Diagnostics, Message, Severity, clear_messages, get_messages};
pub use error::{Error, SyntaxError};
pub use options::{ParserOptions, StringifyOptions};
pub use parser::{Document, Parser};
pub use path::{Path, PathError, PathItem, PathItemFrom};
pub use source::{CharSource, Position, ReaderSource, StrSource};
pub use stringify::{stringify, stringify_with};
pub use value::{Array, Map, Node, Number, Sign, Value};

/// Parses `text` with default options.
///
/// `name` identifies the input in messages. Messages are appended to the
/// thread-local log read by [`get_messages`]; use [`Parser`] to get them back
/// directly instead.
#[must_use]
pub fn parse(name: &str, text: &str) -> Node {
    let doc = Parser::default().parse_str(name, text);
    diagnostics::record(&doc.diagnostics);
    doc.root
}

/// Parses a document read from `reader` with default options.
///
/// Messages are appended to the thread-local log, as with [`parse`].
pub fn parse_stream<R: Read>(name: &str, reader: R) -> Node {
    let doc = Parser::default().parse_reader(name, reader);
    diagnostics::record(&doc.diagnostics);
    doc.root
}

/// Reads and parses the file at `path`, which is also used as the input name.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened. Syntax problems are
/// not errors here; they are logged and reflected in the returned tree.
pub fn parse_file(path: impl AsRef<std::path::Path>) -> Result<Node, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_stream(&path.display().to_string(), file))
}

/// Builds a `Vec<PathItem>` from a heterogeneous list of field names and
/// element indices.
///
/// ```rust
/// # use dsjson::{path, PathItem};
/// let p = path![0, "foo", 2];
/// assert_eq!(
///     p,
///     vec![
///         PathItem::Index(0),
///         PathItem::Key("foo".into()),
///         PathItem::Index(2)
///     ]
/// );
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {{
        use $crate::PathItemFrom;
        ::std::vec![$($crate::PathItem::from_path_component($elem)),*]
    }};
}
