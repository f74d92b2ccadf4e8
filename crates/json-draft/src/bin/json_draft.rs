//! `json-draft` - apply a list of edits to a JSON document.
//!
//! Usage:
//!   json-draft '<edits-array-json>'
//!
//! The document is read from stdin. The edits are the first argument, for
//! example `[{"op":"set","path":["a"],"value":1}]`. Set `JSON_DRAFT_LOG`
//! to `debug` or `trace` to see the draft engine at work on stderr.

use json_draft::cli::{apply_edits, init_logging};
use std::io::{self, Read, Write};

fn main() {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    let edits = match args.get(1) {
        Some(e) => e.clone(),
        None => {
            eprintln!("First argument must be a JSON array of edits.");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match apply_edits(buf.trim(), &edits) {
        Ok(result) => {
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout, "{result}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
