use rstest::rstest;

use super::*;
use crate::{Value, path};

fn parse(text: &str) -> Document {
    Parser::default().parse_str("test", text)
}

fn errors(doc: &Document) -> Vec<SyntaxError> {
    doc.diagnostics
        .iter()
        .filter(|m| m.severity == Severity::Error)
        .map(|m| m.error.clone())
        .collect()
}

fn warnings(doc: &Document) -> Vec<SyntaxError> {
    doc.diagnostics
        .iter()
        .filter(|m| m.severity == Severity::Warn)
        .map(|m| m.error.clone())
        .collect()
}

#[test_log::test]
fn nested_document() {
    let doc = parse(r#"{"x": [1, 2, 3], "y": "hi"}"#);
    assert!(doc.is_ok(), "{:?}", doc.diagnostics.messages());
    let x = doc.root.get("x").and_then(Node::as_array).expect("array x");
    assert_eq!(x.len(), 3);
    assert_eq!(x[2].as_number().and_then(crate::Number::as_i64), Some(3));
    assert_eq!(doc.root.get("y").and_then(Node::as_str), Some("hi"));
}

#[rstest]
#[case::empty_object("{}")]
#[case::empty_nested(r#"{"a": {}, "b": []}"#)]
#[case::whitespace(" \n\t{ \"a\" :\r\n 1 } \n")]
#[case::symbols(r#"{"t": true, "f": false, "n": null}"#)]
#[case::deep_mix(r#"{"a": [{"b": [[], {"c": -1.5e-3}]}]}"#)]
fn accepts(#[case] text: &str) {
    let doc = parse(text);
    assert!(doc.is_ok(), "{text}: {:?}", doc.diagnostics.messages());
    assert!(doc.diagnostics.is_empty(), "{text}");
}

#[test]
fn salvages_fields_before_missing_value() {
    let doc = parse(r#"{"a": 1, "b": }"#);
    assert!(doc.root.is_error());
    assert_eq!(errors(&doc), vec![SyntaxError::MissingValue]);
    assert_eq!(
        doc.root.get("a").and_then(Node::as_number).map(ToString::to_string),
        Some("1".into())
    );
    assert!(doc.root.get("b").is_none());
}

#[test]
fn failure_propagates_to_every_ancestor() {
    let doc = parse(r#"{"outer": {"list": [1, 02, 3]}, "later": true}"#);
    let outer = doc.root.get("outer").expect("outer");
    let list = outer.get("list").expect("list");
    assert!(doc.root.is_error());
    assert!(outer.is_error());
    assert!(list.is_error());
    assert_eq!(list.as_array().map(Vec::len), Some(2));
    assert!(list.index(1).is_some_and(Node::is_error));
    assert!(doc.root.get("later").is_none());
    assert_eq!(errors(&doc), vec![SyntaxError::LeadingZero]);
}

#[rstest]
#[case::array_root("[1, 2]", SyntaxError::Expected { expected: "'{'", found: '[' })]
#[case::empty_input("", SyntaxError::UnexpectedEndOfInput("'{'"))]
#[case::only_whitespace("  \n ", SyntaxError::UnexpectedEndOfInput("'{'"))]
#[case::unquoted_name("{a: 1}", SyntaxError::MissingFieldName)]
#[case::trailing_comma(r#"{"a": 1,}"#, SyntaxError::MissingFieldName)]
#[case::missing_colon(r#"{"a" 1}"#, SyntaxError::Expected { expected: "':'", found: '1' })]
#[case::missing_comma(r#"{"a": 1 "b": 2}"#, SyntaxError::Expected { expected: "',' or '}'", found: '"' })]
#[case::unclosed_object(r#"{"a": 1"#, SyntaxError::UnexpectedEndOfInput("',' or '}'"))]
#[case::unclosed_array(r#"{"a": [1, 2"#, SyntaxError::UnexpectedEndOfInput("',' or ']'"))]
#[case::array_separator(r#"{"a": [1; 2]}"#, SyntaxError::Expected { expected: "',' or ']'", found: ';' })]
#[case::array_trailing_comma(r#"{"a": [1,]}"#, SyntaxError::MissingValue)]
#[case::value_at_end(r#"{"a":"#, SyntaxError::UnexpectedEndOfInput("value"))]
fn reports_first_error(#[case] text: &str, #[case] expected: SyntaxError) {
    let doc = parse(text);
    assert!(doc.root.is_error(), "{text}");
    assert_eq!(errors(&doc), vec![expected], "{text}");
}

#[test]
fn array_separator_is_left_unread() {
    let mut source = StrSource::new("[1 x]");
    let mut reader = Reader::new("test", &mut source, ParserOptions::default());
    let node = reader.read_array();
    assert!(node.is_error());
    drop(reader);
    assert_eq!(source.remaining(), "x]");
}

#[test]
fn object_separator_is_consumed() {
    let mut source = StrSource::new(r#"{"a": 1 x}"#);
    let mut reader = Reader::new("test", &mut source, ParserOptions::default());
    let node = reader.read_object();
    assert!(node.is_error());
    drop(reader);
    assert_eq!(source.remaining(), "}");
}

#[test]
fn unknown_symbol_is_a_warning() {
    let doc = parse(r#"{"a": undefined, "b": NaN}"#);
    assert!(doc.is_ok());
    assert_eq!(doc.root.get("a").and_then(Node::as_symbol), Some("undefined"));
    assert_eq!(
        warnings(&doc),
        vec![
            SyntaxError::UnknownSymbol("undefined".into()),
            SyntaxError::UnknownSymbol("NaN".into()),
        ]
    );
}

#[test]
fn strict_symbols_flag_unknown_words() {
    let parser = Parser::new(ParserOptions {
        strict_symbols: true,
        ..Default::default()
    });
    let doc = parser.parse_str("strict", r#"{"a": true, "b": yes, "c": 1}"#);
    assert!(doc.root.is_error());
    assert!(doc.root.get("b").is_some_and(Node::is_error));
    assert!(doc.root.get("c").is_none());
    assert_eq!(errors(&doc), vec![SyntaxError::UnknownSymbol("yes".into())]);
}

#[test]
fn symbol_stops_at_delimiters() {
    let doc = parse(r#"{"a": [true,false,null]}"#);
    assert!(doc.is_ok());
    let symbols: Vec<_> = doc
        .root
        .get("a")
        .and_then(Node::as_array)
        .expect("array")
        .iter()
        .filter_map(Node::as_symbol)
        .collect();
    assert_eq!(symbols, ["true", "false", "null"]);
}

#[test]
fn duplicate_field_keeps_last_value() {
    let doc = parse(r#"{"a": 1, "a": 2}"#);
    assert!(doc.is_ok());
    assert_eq!(
        doc.root.get("a").and_then(Node::as_number).and_then(crate::Number::as_i64),
        Some(2)
    );
    assert_eq!(warnings(&doc), vec![SyntaxError::DuplicateField("a".into())]);
}

#[test]
fn trailing_text_is_a_warning() {
    let doc = parse(r#"{"a": 1} {"b": 2}"#);
    assert!(doc.is_ok());
    assert_eq!(warnings(&doc), vec![SyntaxError::TrailingCharacters('{')]);
    assert!(doc.root.get("b").is_none());
}

#[test]
fn trailing_text_is_ignored_after_a_failure() {
    let doc = parse(r#"{"a": 01} junk"#);
    assert!(doc.root.is_error());
    assert_eq!(doc.diagnostics.warning_count(), 0);
}

#[test]
fn depth_limit_stops_recursion() {
    let parser = Parser::new(ParserOptions {
        max_depth: 3,
        ..Default::default()
    });
    let doc = parser.parse_str("deep", r#"{"a": [{"b": [1]}]}"#);
    assert!(doc.root.is_error());
    assert_eq!(errors(&doc), vec![SyntaxError::TooDeep(3)]);
    let inner = doc.root.walk(&path!["a", 0, "b"]).expect("salvaged container");
    assert!(inner.is_error());
    assert_eq!(inner.value(), &Value::Array(Vec::new()));
}

#[test]
fn depth_limit_allows_exact_depth() {
    let parser = Parser::new(ParserOptions {
        max_depth: 3,
        ..Default::default()
    });
    assert!(parser.parse_str("deep", r#"{"a": [{"b": 1}]}"#).is_ok());
}

#[test]
fn default_depth_limit_handles_pathological_nesting() {
    let text = format!("{{\"a\": {}{}}}", "[".repeat(10_000), "]".repeat(10_000));
    let doc = parse(&text);
    assert!(doc.root.is_error());
    assert_eq!(errors(&doc), vec![SyntaxError::TooDeep(128)]);
}

#[test]
fn positions_are_one_based() {
    let doc = parse("{\n  \"a\": 1,\n  \"b\": ?\n}");
    let message = doc.diagnostics.iter().next().expect("message");
    assert_eq!(message.position.line, 3);
    assert_eq!(message.input, "test");
}

#[test]
fn reader_input_matches_string_input() {
    let text = r#"{"name": "café ☃", "n": [1, 2.5, -3e2], "ok": true}"#;
    let from_str = parse(text);
    let from_reader = Parser::default().parse_reader("test", text.as_bytes());
    assert_eq!(from_str.root, from_reader.root);
    assert!(from_reader.is_ok());
}

#[test]
fn reader_replaces_invalid_utf8() {
    let bytes: &[u8] = b"{\"a\": \"x\xFFy\"}";
    let doc = Parser::default().parse_reader("bytes", bytes);
    assert!(doc.is_ok());
    assert_eq!(doc.root.get("a").and_then(Node::as_str), Some("x\u{FFFD}y"));
}

#[test]
fn reader_io_error_flags_root() {
    struct Failing;

    impl std::io::Read for Failing {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("disk on fire"))
        }
    }

    let doc = Parser::default().parse_reader("broken", Failing);
    assert!(doc.root.is_error());
    assert!(
        errors(&doc)
            .iter()
            .any(|e| matches!(e, SyntaxError::Io(text) if text.contains("disk on fire")))
    );
}
