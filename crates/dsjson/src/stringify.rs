//! Text output for [`Node`] trees.
use core::fmt::{self, Write};

use crate::{
    options::StringifyOptions,
    value::{Node, Value, write_escaped_string},
};

/// Renders a node as pretty-printed JSON with the default indent.
///
/// # Examples
///
/// ```rust
/// let root = dsjson::parse("inline", r#"{"x": [1, 2], "y": "hi"}"#);
/// assert_eq!(
///     dsjson::stringify(&root),
///     "{\n   \"x\": [\n      1,\n      2\n   ],\n   \"y\": \"hi\"\n}"
/// );
/// ```
#[must_use]
pub fn stringify(node: &Node) -> String {
    stringify_with(node, &StringifyOptions::default())
}

/// Renders a node as pretty-printed JSON.
#[must_use]
pub fn stringify_with(node: &Node, options: &StringifyOptions<'_>) -> String {
    let mut out = String::new();
    write_node(&mut out, node, Some(options.indent)).expect("writing to a String cannot fail");
    out
}

/// Writes `node`; `indent` of `None` selects the compact form.
pub(crate) fn write_node<W: Write>(out: &mut W, node: &Node, indent: Option<&str>) -> fmt::Result {
    write_value(out, node.value(), indent, 0)
}

pub(crate) fn write_value<W: Write>(
    out: &mut W,
    value: &Value,
    indent: Option<&str>,
    depth: usize,
) -> fmt::Result {
    match value {
        Value::Object(map) if map.is_empty() => out.write_str("{}"),
        Value::Array(items) if items.is_empty() => out.write_str("[]"),
        Value::Object(map) => {
            out.write_char('{')?;
            for (i, (name, child)) in map.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                newline(out, indent, depth + 1)?;
                out.write_char('"')?;
                write_escaped_string(name, out)?;
                out.write_str(if indent.is_some() { "\": " } else { "\":" })?;
                write_value(out, child.value(), indent, depth + 1)?;
            }
            newline(out, indent, depth)?;
            out.write_char('}')
        }
        Value::Array(items) => {
            out.write_char('[')?;
            for (i, child) in items.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                newline(out, indent, depth + 1)?;
                write_value(out, child.value(), indent, depth + 1)?;
            }
            newline(out, indent, depth)?;
            out.write_char(']')
        }
        Value::String(s) => {
            out.write_char('"')?;
            write_escaped_string(s, out)?;
            out.write_char('"')
        }
        Value::Symbol(s) => out.write_str(s),
        Value::Number(n) => write!(out, "{n}"),
    }
}

fn newline<W: Write>(out: &mut W, indent: Option<&str>, depth: usize) -> fmt::Result {
    let Some(unit) = indent else {
        return Ok(());
    };
    out.write_char('\n')?;
    for _ in 0..depth {
        out.write_str(unit)?;
    }
    Ok(())
}
