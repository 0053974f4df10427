//! Benchmark: `dsjson::Parser` and `dsjson::stringify`
#![allow(missing_docs)]

use std::{fmt::Write, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dsjson::{Parser, stringify};

/// Produce a deterministic configuration-style document with `records`
/// entries, each mixing strings, numbers, symbols and a nested array.
fn make_document(records: usize) -> String {
    let mut s = String::from("{\"records\": [");
    for i in 0..records {
        if i > 0 {
            s.push(',');
        }
        write!(
            s,
            "{{\"id\": {i}, \"name\": \"record \\\"{i}\\\"\", \"score\": {}.{:02}e-1, \
             \"active\": {}, \"tags\": [\"a\", \"b\", null]}}",
            i % 97,
            i % 100,
            i % 2 == 0
        )
        .expect("writing to a String cannot fail");
    }
    s.push_str("], \"count\": ");
    s.push_str(&records.to_string());
    s.push('}');
    s
}

/// Produce `{"a": [[[ ... ]]]}` nested `depth` arrays deep.
fn make_nested(depth: usize) -> String {
    format!("{{\"a\": {}1{}}}", "[".repeat(depth), "]".repeat(depth))
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    group.measurement_time(Duration::from_secs(5));
    let parser = Parser::default();

    for records in [10, 1_000, 10_000] {
        let text = make_document(records);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("str", records), &text, |b, text| {
            b.iter(|| black_box(parser.parse_str("bench", black_box(text))));
        });
        group.bench_with_input(BenchmarkId::new("reader", records), &text, |b, text| {
            b.iter(|| black_box(parser.parse_reader("bench", black_box(text.as_bytes()))));
        });
    }

    let nested = make_nested(100);
    group.throughput(Throughput::Bytes(nested.len() as u64));
    group.bench_function("nested_100", |b| {
        b.iter(|| black_box(parser.parse_str("bench", black_box(&nested))));
    });
    group.finish();
}

fn bench_stringify(c: &mut Criterion) {
    let mut group = c.benchmark_group("stringify");
    let parser = Parser::default();

    for records in [10, 1_000, 10_000] {
        let root = parser.parse_str("bench", &make_document(records)).root;
        group.bench_with_input(BenchmarkId::new("pretty", records), &root, |b, root| {
            b.iter(|| black_box(stringify(black_box(root))));
        });
        group.bench_with_input(BenchmarkId::new("compact", records), &root, |b, root| {
            b.iter(|| black_box(black_box(root).to_string()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_stringify);
criterion_main!(benches);
