//! Typed round trip through a configuration struct.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_tomlite::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Database {
    url: String,
    pool_size: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Service {
    name: String,
    replicas: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    title: String,
    debug: bool,
    motd: String,
    database: Database,
    services: Vec<Service>,
    proxy: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        title: "Inventory".to_string(),
        debug: false,
        motd: "Welcome!\nMaintenance on Sunday.".to_string(),
        database: Database {
            url: "postgres://localhost/inventory".to_string(),
            pool_size: 8,
        },
        services: vec![
            Service {
                name: "api".to_string(),
                replicas: 3,
            },
            Service {
                name: "worker".to_string(),
                replicas: 1,
            },
        ],
        proxy: None,
    };

    let text = to_string(&config)?;
    println!("Encoded document:\n{}", text);

    let config_back: Config = from_str(&text)?;
    assert_eq!(config, config_back);
    println!("✓ Round-trip successful");

    Ok(())
}
