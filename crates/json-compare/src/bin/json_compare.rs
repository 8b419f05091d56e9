//! `json-compare` — compare two JSON files by content.
//!
//! Usage:
//!   json-compare <file-a> <file-b> [--alias-a NAME] [--alias-b NAME]
//!
//! Prints the plain-text comparison report to stdout. Parse and read
//! failures go to stderr with a nonzero exit.

use json_compare::cli::run_compare;
use std::fs;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut files: Vec<String> = Vec::new();
    let mut alias_a = String::from("A");
    let mut alias_b = String::from("B");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--alias-a" => {
                alias_a = match args.get(i + 1) {
                    Some(value) => value.clone(),
                    None => usage(),
                };
                i += 2;
            }
            "--alias-b" => {
                alias_b = match args.get(i + 1) {
                    Some(value) => value.clone(),
                    None => usage(),
                };
                i += 2;
            }
            other => {
                files.push(other.to_string());
                i += 1;
            }
        }
    }

    if files.len() != 2 {
        usage();
    }

    let text_a = read_file(&files[0]);
    let text_b = read_file(&files[1]);

    match run_compare(&text_a, &text_b, &alias_a, &alias_b) {
        Ok(report) => println!("{report}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn read_file(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{path}: {e}");
            std::process::exit(1);
        }
    }
}

fn usage() -> ! {
    eprintln!("Usage: json-compare <file-a> <file-b> [--alias-a NAME] [--alias-b NAME]");
    std::process::exit(1);
}
