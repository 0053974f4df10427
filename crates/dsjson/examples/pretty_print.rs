//! Reformats JSON documents and reports what the parser found wrong with them.
//!
//! Each argument is a path; with no arguments the document is read from
//! standard input. The pretty-printed tree goes to `stdout` and every warning
//! or error goes to `stderr`, one per line, most recent first.
//!
//! Run with
//!
//! ```bash
//! RUST_LOG=debug cargo run -p dsjson --example pretty_print -- config.json
//! ```
#![allow(missing_docs)]

use std::{io, process::ExitCode};

use dsjson::{clear_messages, get_messages, parse_file, parse_stream, stringify};

fn main() -> ExitCode {
    env_logger::init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    let mut failed = false;

    let roots = if paths.is_empty() {
        vec![parse_stream("<stdin>", io::stdin().lock())]
    } else {
        let mut roots = Vec::with_capacity(paths.len());
        for path in &paths {
            match parse_file(path) {
                Ok(root) => roots.push(root),
                Err(err) => {
                    eprintln!("{err}");
                    failed = true;
                }
            }
        }
        roots
    };

    for root in &roots {
        println!("{}", stringify(root));
        failed |= root.has_errors();
    }

    for message in get_messages() {
        eprintln!("{message}");
    }
    clear_messages();

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
