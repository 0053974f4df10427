/// Configuration options for the recursive-descent parser.
///
/// # Examples
///
/// ```rust
/// use dsjson::{Parser, ParserOptions};
///
/// let parser = Parser::new(ParserOptions {
///     max_depth: 16,
///     ..Default::default()
/// });
/// let doc = parser.parse_str("inline", r#"{"a": [1, 2]}"#);
/// assert!(doc.is_ok());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParserOptions {
    /// Maximum nesting depth of objects and arrays.
    ///
    /// The root object is at depth 1. A container nested deeper than this is
    /// not read; the parse records a syntax error and flags the enclosing
    /// node instead of recursing further.
    ///
    /// # Default
    ///
    /// `128`
    pub max_depth: usize,

    /// Whether unquoted symbols other than `true`, `false` and `null` are
    /// errors.
    ///
    /// By default an unknown symbol such as `undefined` is kept in the tree
    /// and reported as a warning. When `true` it is reported as an error and
    /// the symbol node is flagged.
    ///
    /// # Default
    ///
    /// `false`
    pub strict_symbols: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: 128,
            strict_symbols: false,
        }
    }
}

/// Configuration options for [`stringify_with`](crate::stringify_with).
#[derive(Debug, Clone, Copy)]
pub struct StringifyOptions<'a> {
    /// Text written once per nesting level at the start of each line.
    ///
    /// # Default
    ///
    /// Three spaces.
    pub indent: &'a str,
}

impl Default for StringifyOptions<'_> {
    fn default() -> Self {
        Self { indent: "   " }
    }
}
