//! Parsing, editing and re-encoding a document without a schema.
//!
//! Run with: cargo run --example dynamic_values

use serde_tomlite::{encode, parse, tomlite, Value};
use std::error::Error;

const INPUT: &str = r#"
# Editor profiles
[profiles.code]
name = "Code"
extensions = ["rs", "toml"]

[profiles.code.settings]
with_user_notes = false
no_media = true
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let mut root = parse(INPUT)?;

    let code = root
        .get_mut("profiles")
        .and_then(Value::as_table_mut)
        .and_then(|profiles| profiles.get_mut("code"))
        .and_then(Value::as_table_mut)
        .ok_or("missing [profiles.code]")?;

    if let Some(name) = code.get("name").and_then(Value::as_str) {
        println!("Profile name: {}", name);
    }

    // Add a key and a nested table between parse and encode
    code.insert("theme".to_string(), Value::from("dark"));
    code.insert(
        "keymap".to_string(),
        tomlite!({ "save": "ctrl+s", "quit": "ctrl+q" }),
    );

    println!("Re-encoded document:\n{}", encode(&root));

    // Display renders any value inline
    if let Some(extensions) = root
        .get("profiles")
        .and_then(|p| p.get("code"))
        .and_then(|c| c.get("extensions"))
    {
        println!("extensions = {}", extensions);
    }

    Ok(())
}
