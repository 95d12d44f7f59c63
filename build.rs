//! Build script: validates relays.json at compile time.

use std::path::PathBuf;

fn main() {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR set by Cargo");
    let config_path: PathBuf = [&manifest_dir, "config", "relays.json"].iter().collect();
    println!("cargo:rerun-if-changed={}", config_path.display());
    let json = std::fs::read_to_string(&config_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read {}: {}. relays.json must exist and be valid.",
            config_path.display(),
            e
        )
    });
    #[derive(serde::Deserialize)]
    struct RelayEntry {
        name: String,
        prefix: String,
        #[allow(dead_code)]
        encode: bool,
    }
    let relays: Vec<RelayEntry> = serde_json::from_str(&json).unwrap_or_else(|e| {
        panic!(
            "relays.json is invalid JSON: {}. Fix the file and rebuild.",
            e
        )
    });
    if relays.len() != 3 {
        panic!("relays.json must list exactly three relays, found {}", relays.len());
    }
    for relay in &relays {
        if relay.name.trim().is_empty() {
            panic!("relays.json: relay with empty name");
        }
        if !relay.prefix.starts_with("https://") {
            panic!("relays.json: relay {} must use an https:// prefix", relay.name);
        }
    }
}
