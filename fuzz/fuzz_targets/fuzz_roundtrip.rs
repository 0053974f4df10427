#![no_main]

use arbitrary::Arbitrary;
use dsjson::{Node, Parser, ParserOptions, StringifyOptions, Value, stringify_with};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    text: &'a str,
    max_depth: u8,
    strict_symbols: bool,
    tabs: bool,
}

/// Structural agreement with `serde_json`; numbers are only checked by kind.
fn same(node: &Node, json: &serde_json::Value) -> bool {
    match (node.value(), json) {
        (Value::Object(a), serde_json::Value::Object(b)) => {
            a.len() == b.len() && a.iter().all(|(k, v)| b.get(k).is_some_and(|w| same(v, w)))
        }
        (Value::Array(a), serde_json::Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(v, w)| same(v, w))
        }
        (Value::String(a), serde_json::Value::String(b)) => a == b,
        (Value::Symbol(s), serde_json::Value::Bool(b)) => s == if *b { "true" } else { "false" },
        (Value::Symbol(s), serde_json::Value::Null) => s == "null",
        (Value::Number(_), serde_json::Value::Number(_)) => true,
        _ => false,
    }
}

fuzz_target!(|input: Input<'_>| {
    let parser = Parser::new(ParserOptions {
        max_depth: usize::from(input.max_depth).max(1),
        strict_symbols: input.strict_symbols,
    });
    let doc = parser.parse_str("fuzz", input.text);
    if !doc.is_ok() {
        return;
    }

    let indent = if input.tabs { "\t" } else { "   " };
    let pretty = stringify_with(&doc.root, &StringifyOptions { indent });
    let again = parser.parse_str("fuzz-again", &pretty);
    assert!(again.is_ok(), "re-parse failed: {:?}", again.diagnostics.messages());
    assert_eq!(again.root, doc.root);
    assert_eq!(again.root.to_string(), doc.root.to_string());

    if !doc.diagnostics.is_empty() {
        return;
    }
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(input.text) {
        assert!(same(&doc.root, &json), "disagrees with serde_json: {}", input.text);
    }
});
