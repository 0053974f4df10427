use std::{io, path::PathBuf};

use thiserror::Error;

use crate::path::PathError;

/// A problem found while reading a document.
///
/// Syntax errors never abort a parse. Each one is recorded as a
/// [`Message`](crate::Message) and, for structural problems, reflected in the
/// error flag of the node that was being built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SyntaxError {
    #[error("expected {expected}, found '{found}'")]
    Expected { expected: &'static str, found: char },
    #[error("unexpected end of input while reading {0}")]
    UnexpectedEndOfInput(&'static str),
    #[error("expected digits in {0}")]
    MissingDigits(&'static str),
    #[error("number has a leading zero")]
    LeadingZero,
    #[error("invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("invalid unicode escape sequence at character: '{0}'")]
    InvalidUnicodeEscapeChar(char),
    #[error("unicode escape \\u{0:04X} is a lone surrogate")]
    LoneSurrogate(u32),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("expected field name")]
    MissingFieldName,
    #[error("expected value")]
    MissingValue,
    #[error("unknown symbol '{0}'")]
    UnknownSymbol(String),
    #[error("duplicate field '{0}' replaces an earlier value")]
    DuplicateField(String),
    #[error("maximum nesting depth of {0} exceeded")]
    TooDeep(usize),
    #[error("trailing characters after document: '{0}'")]
    TrailingCharacters(char),
    #[error("read failed: {0}")]
    Io(String),
}

/// Errors returned by the fallible entry points of this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Path(#[from] PathError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_messages() {
        assert_eq!(
            SyntaxError::Expected {
                expected: "':'",
                found: 'x'
            }
            .to_string(),
            "expected ':', found 'x'"
        );
        assert_eq!(
            SyntaxError::InvalidEscape('q').to_string(),
            "invalid escape sequence '\\q'"
        );
        assert_eq!(
            SyntaxError::LoneSurrogate(0xD800).to_string(),
            "unicode escape \\uD800 is a lone surrogate"
        );
    }

    #[test]
    fn io_error_names_the_file() {
        let err = Error::Io {
            path: PathBuf::from("missing.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.to_string(), "failed to read 'missing.json': gone");
    }
}
