//! Stdin/stdout filter applying a single mutation.
//!
//! Usage: `json-text-edit '<display path>' '<value json>' [file]`
//!
//! Reads the document from `file` (or stdin), sets the value at the path
//! given in display form (`$["customer"][0]["name"]`), and writes the new
//! document text to stdout. Errors go to stderr with exit code 1.

use std::io::Read;
use std::process::ExitCode;

use json_text_edit::{mutate, parse_display_string, validate};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("usage: json-text-edit '<display path>' '<value json>' [file]");
        return ExitCode::FAILURE;
    }

    let path = match parse_display_string(&args[0]).and_then(|p| {
        validate(&p)?;
        Ok(p)
    }) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("json-text-edit: bad path {:?}: {err}", args[0]);
            return ExitCode::FAILURE;
        }
    };

    let document = match read_document(args.get(2)) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("json-text-edit: {err}");
            return ExitCode::FAILURE;
        }
    };

    match mutate(&document, &path, &args[1]) {
        Ok(new_text) => {
            print!("{new_text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("json-text-edit: {err}");
            ExitCode::FAILURE
        }
    }
}

fn read_document(file: Option<&String>) -> std::io::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
