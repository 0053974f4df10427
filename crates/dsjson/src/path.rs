use thiserror::Error;

/// One step of a path through a document tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathItem {
    /// A field of an object.
    Key(String),
    /// An element of an array.
    Index(usize),
}

impl From<&str> for PathItem {
    fn from(s: &str) -> Self {
        Self::Key(s.into())
    }
}

impl From<String> for PathItem {
    fn from(s: String) -> Self {
        Self::Key(s)
    }
}

impl From<usize> for PathItem {
    fn from(i: usize) -> Self {
        Self::Index(i)
    }
}

#[doc(hidden)]
pub trait PathItemFrom<T> {
    fn from_path_component(value: T) -> PathItem;
}

// use macro_rules to implement for the unsigned and signed integer types
macro_rules! impl_unsigned_as_path_component {
    ($($t:ty),+) => {
        $(
            impl PathItemFrom<$t> for PathItem {
                fn from_path_component(value: $t) -> Self {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
                    PathItem::Index(value as usize)
                }
            }
        )+
    };
}
impl_unsigned_as_path_component!(u8, u16, u32, u64, usize);

macro_rules! impl_signed_as_path_component {
    ($($t:ty),+) => {
        $(
            impl PathItemFrom<$t> for PathItem {
                fn from_path_component(value: $t) -> Self {
                    // No array holds `usize::MAX` nodes, so a negative index
                    // never matches.
                    PathItem::Index(usize::try_from(value).unwrap_or(usize::MAX))
                }
            }
        )+
    };
}
impl_signed_as_path_component!(i8, i16, i32, i64, isize);

impl PathItemFrom<&str> for PathItem {
    fn from_path_component(value: &str) -> Self {
        PathItem::Key(value.into())
    }
}

impl PathItemFrom<String> for PathItem {
    fn from_path_component(value: String) -> Self {
        PathItem::Key(value)
    }
}

/// A malformed textual path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid path '{path}': {reason}")]
pub struct PathError {
    path: String,
    reason: &'static str,
}

impl PathError {
    fn new(path: &str, reason: &'static str) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }
}

/// Parser for textual paths.
///
/// A path is a sequence of `/`-separated segments. A segment is a field name
/// (`servers`), a field name followed by one or more element indices
/// (`servers[0]`), or a bare decimal (`0`). A bare decimal is kept as written
/// and selects an element when it meets an array, or the field of that name
/// when it meets an object, so `/years/2024` and `/codes/007` reach numeric
/// field names. Leading, trailing and repeated slashes are ignored.
pub struct Path;

impl Path {
    /// Splits `path` into [`PathItem`]s.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] for an unclosed or empty `[ ]` group, a
    /// non-numeric or out-of-range index inside `[ ]`, or text after a
    /// closing `]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsjson::{Path, PathItem};
    ///
    /// let items = Path::parse("/servers[1]/ports/0").unwrap();
    /// assert_eq!(
    ///     items,
    ///     vec![
    ///         PathItem::Key("servers".into()),
    ///         PathItem::Index(1),
    ///         PathItem::Key("ports".into()),
    ///         PathItem::Key("0".into()),
    ///     ]
    /// );
    /// ```
    pub fn parse(path: &str) -> Result<Vec<PathItem>, PathError> {
        let mut items = Vec::new();
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let Some(open) = segment.find('[') else {
                items.push(PathItem::Key(segment.into()));
                continue;
            };
            let (name, mut rest) = segment.split_at(open);
            if !name.is_empty() {
                items.push(PathItem::Key(name.into()));
            }
            // One or more `[n]` groups may follow the name.
            while !rest.is_empty() {
                let Some(inner) = rest.strip_prefix('[') else {
                    return Err(PathError::new(path, "unexpected text after ']'"));
                };
                let Some(close) = inner.find(']') else {
                    return Err(PathError::new(path, "unclosed '['"));
                };
                items.push(PathItem::Index(parse_index(path, &inner[..close])?));
                rest = &inner[close + 1..];
            }
        }
        Ok(items)
    }
}

fn parse_index(path: &str, digits: &str) -> Result<usize, PathError> {
    if digits.is_empty() {
        return Err(PathError::new(path, "empty index"));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PathError::new(path, "index is not a number"));
    }
    digits
        .parse()
        .map_err(|_| PathError::new(path, "index is out of range"))
}
