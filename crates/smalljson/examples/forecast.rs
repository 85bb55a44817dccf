//! Print a short summary of a weather forecast, reading the document through
//! small fixed-size windows.
//!
//! ```text
//! cargo run --example forecast [path/to/forecast.json] [window size]
//! ```
#![allow(missing_docs)]

use std::{env, fs, process::ExitCode};

use smalljson::{Document, FixedChunks};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/forecast.json");

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let path = args.next().unwrap_or_else(|| FIXTURE.to_owned());
    let window = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x100);

    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("cannot read {path}: {err}");
            return ExitCode::FAILURE;
        }
    };
    let chunks = FixedChunks::new(&bytes, window);
    let mut doc = Document::new(&chunks);

    let city = doc.lookup_str("/city/name").unwrap_or_else(|| "?".to_owned());
    let count = doc.lookup_array_size("/list");
    println!("{city}: {count} entries");

    for i in 0..count {
        let when = doc.lookup_str(&format!("/list/{i}/dt_txt")).unwrap_or_default();
        let temp = doc.lookup_str(&format!("/list/{i}/main/temp")).unwrap_or_default();
        let icon = doc
            .lookup_str(&format!("/list/{i}/weather/0/icon"))
            .unwrap_or_default();
        println!("{when}  {temp:>7} K  {icon}");
    }
    ExitCode::SUCCESS
}
