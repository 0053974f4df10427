//! The document tree.
//!
//! A parsed document is a tree of [`Node`]s. Each node owns one [`Value`] and
//! an error flag recording whether the sub-parse that produced it failed or
//! only partially succeeded. Children are owned by their parent; dropping the
//! root drops the whole tree.
use std::{collections::BTreeMap, fmt};

use crate::path::PathItem;

/// Fields of an object, keyed by name. Duplicate names overwrite.
pub type Map = BTreeMap<String, Node>;
/// Elements of an array, in document order.
pub type Array = Vec<Node>;

/// The payload of a [`Node`].
///
/// # Examples
///
/// ```
/// use dsjson::{Map, Node, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Node::string("value"));
/// let v = Node::from(Value::Object(map));
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Object(Map),
    Array(Array),
    /// Unescaped text, without the surrounding quotes.
    String(String),
    /// An unquoted literal, normally `true`, `false` or `null`.
    Symbol(String),
    Number(Number),
}

/// Sign of a number's exponent.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Sign::Plus => '+',
            Sign::Minus => '-',
        }
    }
}

/// A decimal literal kept in its decomposed textual form.
///
/// The digits are stored exactly as they appeared in the input, so writing a
/// number back out reproduces the original literal. Conversion to a native
/// numeric type is available through [`Number::as_f64`] and
/// [`Number::as_i64`] but is never applied to the stored form.
///
/// # Examples
///
/// ```
/// use dsjson::{Number, Sign};
///
/// let n = Number {
///     negative: true,
///     major: "12".into(),
///     minor: "50".into(),
///     exp_sign: Some(Sign::Plus),
///     exp: "3".into(),
/// };
/// assert_eq!(n.to_string(), "-12.50e+3");
/// assert_eq!(n.as_f64(), Some(-12_500.0));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Number {
    /// `true` when the literal starts with `-`.
    pub negative: bool,
    /// Integer-part digits; either `"0"` or a run not starting with `0`.
    pub major: String,
    /// Fractional digits; empty when the literal has no `.` part.
    pub minor: String,
    /// Explicit exponent sign, if one was written.
    pub exp_sign: Option<Sign>,
    /// Exponent digits; empty when the literal has no exponent.
    pub exp: String,
}

impl Number {
    /// Creates an integer literal from a digit string.
    ///
    /// Returns `None` unless `digits` is a non-empty run of ASCII digits
    /// without a leading zero (a lone `0` is fine).
    ///
    /// ```rust
    /// use dsjson::Number;
    ///
    /// assert_eq!(Number::integer(true, "42").map(|n| n.to_string()), Some("-42".into()));
    /// assert_eq!(Number::integer(false, "4x"), None);
    /// assert_eq!(Number::integer(false, "042"), None);
    /// ```
    #[must_use]
    pub fn integer(negative: bool, digits: &str) -> Option<Self> {
        let valid = match digits.as_bytes() {
            [] => false,
            [b'0', _, ..] => false,
            bytes => bytes.iter().all(u8::is_ascii_digit),
        };
        valid.then(|| Self {
            negative,
            major: digits.into(),
            ..Self::default()
        })
    }

    /// Returns `true` if the literal has neither a fractional part nor an
    /// exponent.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.minor.is_empty() && self.exp.is_empty()
    }

    /// Converts the literal to the nearest `f64`.
    ///
    /// Returns `None` for an incomplete literal (for example one salvaged
    /// from a failed parse with no major digits).
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        if self.major.is_empty() {
            return None;
        }
        self.to_string().parse().ok()
    }

    /// Converts an integer literal to `i64`.
    ///
    /// Returns `None` if the literal has a fractional part or exponent, or
    /// does not fit.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        if !self.is_integer() || self.major.is_empty() {
            return None;
        }
        self.to_string().parse().ok()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.major)?;
        if !self.minor.is_empty() {
            write!(f, ".{}", self.minor)?;
        }
        if !self.exp.is_empty() {
            f.write_str("e")?;
            if let Some(sign) = self.exp_sign {
                write!(f, "{}", sign.as_char())?;
            }
            f.write_str(&self.exp)?;
        }
        Ok(())
    }
}

/// A node of the document tree: a [`Value`] plus an error flag.
///
/// # Examples
///
/// ```
/// let root = dsjson::parse("inline", r#"{"x": [1, 2, 3], "y": "hi"}"#);
/// assert!(!root.has_errors());
/// assert_eq!(root.get("y").and_then(|n| n.as_str()), Some("hi"));
/// assert_eq!(root.pointer("/x[2]").and_then(|n| n.as_number()).map(|n| n.major.as_str()), Some("3"));
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    value: Value,
    error: bool,
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Self {
            value,
            error: false,
        }
    }
}

impl From<Number> for Node {
    fn from(n: Number) -> Self {
        Self::number(n)
    }
}

impl From<Map> for Node {
    fn from(map: Map) -> Self {
        Value::Object(map).into()
    }
}

impl From<Array> for Node {
    fn from(array: Array) -> Self {
        Value::Array(array).into()
    }
}

impl Node {
    /// Creates an empty object.
    #[must_use]
    pub fn object() -> Self {
        Value::Object(Map::new()).into()
    }

    /// Creates an empty array.
    #[must_use]
    pub fn array() -> Self {
        Value::Array(Array::new()).into()
    }

    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into()).into()
    }

    #[must_use]
    pub fn symbol(text: impl Into<String>) -> Self {
        Value::Symbol(text.into()).into()
    }

    #[must_use]
    pub fn number(n: Number) -> Self {
        Value::Number(n).into()
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Consumes the node and returns its value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Replaces this node's value, returning the previous one.
    pub fn set_value(&mut self, value: Value) -> Value {
        core::mem::replace(&mut self.value, value)
    }

    /// Returns `true` if the sub-parse that produced this node failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error
    }

    pub(crate) fn set_error(&mut self) {
        self.error = true;
    }

    #[must_use]
    pub(crate) fn with_error(mut self) -> Self {
        self.error = true;
        self
    }

    /// Returns `true` if this node or any node below it is flagged.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        if self.error {
            return true;
        }
        match &self.value {
            Value::Object(map) => map.values().any(Node::has_errors),
            Value::Array(arr) => arr.iter().any(Node::has_errors),
            _ => false,
        }
    }

    /// Inserts a field into an object node, returning the replaced field.
    ///
    /// Returns `Err(node)` unchanged if this node is not an object.
    ///
    /// # Errors
    ///
    /// The node is handed back when `self` is not an object.
    pub fn insert(&mut self, name: impl Into<String>, node: Node) -> Result<Option<Node>, Node> {
        match &mut self.value {
            Value::Object(map) => Ok(map.insert(name.into(), node)),
            _ => Err(node),
        }
    }

    /// Appends an element to an array node.
    ///
    /// # Errors
    ///
    /// The node is handed back when `self` is not an array.
    pub fn push(&mut self, node: Node) -> Result<(), Node> {
        match &mut self.value {
            Value::Array(arr) => {
                arr.push(node);
                Ok(())
            }
            _ => Err(node),
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match &self.value {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match &self.value {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns the payload of a string node.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_symbol(&self) -> Option<&str> {
        match &self.value {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match &self.value {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the boolean of a `true` or `false` symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsjson::Node;
    ///
    /// assert_eq!(Node::symbol("true").as_bool(), Some(true));
    /// assert_eq!(Node::symbol("null").as_bool(), None);
    /// ```
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self.as_symbol() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        }
    }

    /// Returns `true` if the node is the `null` symbol.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.as_symbol() == Some("null")
    }

    /// Looks up a field of an object node.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.as_object()?.get(name)
    }

    /// Looks up an element of an array node.
    #[must_use]
    pub fn index(&self, index: usize) -> Option<&Node> {
        self.as_array()?.get(index)
    }

    /// Descends through a sequence of field names and element indices.
    ///
    /// Returns `None` as soon as a step does not exist. A step is matched
    /// against the kind of node it meets: an index on an object looks up the
    /// field with that decimal name, and an all-digit name on an array
    /// selects that element.
    ///
    /// ```
    /// use dsjson::path;
    ///
    /// let root = dsjson::parse("inline", r#"{"a": {"b": [10, 20]}}"#);
    /// let n = root.walk(&path!["a", "b", 1]).and_then(|n| n.as_number());
    /// assert_eq!(n.map(ToString::to_string).as_deref(), Some("20"));
    /// assert!(root.walk(&path!["a", "c"]).is_none());
    /// ```
    #[must_use]
    pub fn walk(&self, path: &[PathItem]) -> Option<&Node> {
        path.iter().try_fold(self, |node, item| match (item, &node.value) {
            (PathItem::Key(name), Value::Array(_)) => node.index(array_index(name)?),
            (PathItem::Key(name), _) => node.get(name),
            (PathItem::Index(i), Value::Object(_)) => node.get(&i.to_string()),
            (PathItem::Index(i), _) => node.index(*i),
        })
    }

    /// Descends along a `/`-delimited path such as `/servers[0]/name`.
    ///
    /// Returns `None` if the path is malformed or any segment is missing. Use
    /// [`try_pointer`](Self::try_pointer) to tell the two apart.
    #[must_use]
    pub fn pointer(&self, path: &str) -> Option<&Node> {
        self.try_pointer(path).ok().flatten()
    }

    /// Like [`pointer`](Self::pointer), but reports a malformed path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Path`](crate::Error::Path) if `path` cannot be
    /// parsed.
    ///
    /// ```
    /// let root = dsjson::parse("inline", r#"{"a": [1]}"#);
    /// assert!(root.try_pointer("/a/0").unwrap().is_some());
    /// assert!(root.try_pointer("/b").unwrap().is_none());
    /// assert!(root.try_pointer("/a[x]").is_err());
    /// ```
    pub fn try_pointer(&self, path: &str) -> Result<Option<&Node>, crate::Error> {
        let items = crate::path::Path::parse(path)?;
        Ok(self.walk(&items))
    }
}

/// Reads a field name as an array index; only plain decimal digits qualify.
fn array_index(name: &str) -> Option<usize> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok()
}

/// Escapes a string for inclusion in a quoted literal.
///
/// Quotes, backslashes and the control characters the parser understands as
/// short escapes are written in their short form; every other control
/// character becomes a `\uXXXX` escape.
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0C}' => f.write_str("\\f")?,
            c if c.is_control() && c as u32 <= 0xFFFF => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

impl fmt::Display for Node {
    /// Writes the node compactly, or pretty-printed with `{:#}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = if f.alternate() {
            Some(crate::StringifyOptions::default().indent)
        } else {
            None
        };
        crate::stringify::write_node(f, self, indent)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = if f.alternate() {
            Some(crate::StringifyOptions::default().indent)
        } else {
            None
        };
        crate::stringify::write_value(f, self, indent, 0)
    }
}
