//! Strict versus lenient handling of duplicate keys.
//!
//! Run with: cargo run --example lenient_parsing

use serde_tomlite::{parse, parse_with_options, validate, Error, ParseOptions};

const INPUT: &str = "\
retries = 3
timeout = 30
retries = 5
";

fn main() -> Result<(), Error> {
    match parse(INPUT) {
        Ok(_) => println!("strict parse unexpectedly succeeded"),
        Err(err) => println!("strict: {}", err),
    }

    let table = parse_with_options(INPUT, ParseOptions::lenient())?;
    println!(
        "lenient: retries = {}",
        table.get("retries").and_then(|v| v.as_i64()).unwrap_or_default()
    );

    // Table redefinition is rejected in both modes
    let redefined = "[server]\nport = 1\n[server]\nport = 2\n";
    if let Err(err) = parse_with_options(redefined, ParseOptions::lenient()) {
        println!("lenient: {}", err);
    }

    match validate("name = \"unterminated\n") {
        Ok(()) => println!("valid"),
        Err(err) => println!("validate: {} (line {:?})", err, err.line()),
    }

    Ok(())
}
