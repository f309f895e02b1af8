//! Phrase lists and config documents shared by the engine tests. Every
//! fixture is named in `fixtures/manifest.json`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures manifest should parse")
});

/// Fixture name to path relative to `fixtures/`, per kind.
#[derive(Deserialize)]
struct Manifest {
    phrases: BTreeMap<String, String>,
    configs: BTreeMap<String, String>,
}

fn read(section: &BTreeMap<String, String>, kind: &str, name: &str) -> Result<String> {
    let rel = section
        .get(name)
        .ok_or_else(|| anyhow!("no {kind} fixture named '{name}'"))?;
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../../fixtures")
        .join(rel);
    fs::read_to_string(&path).with_context(|| format!("reading fixture {}", path.display()))
}

pub mod phrases {
    use super::*;

    /// Phrase list stored as a JSON array of strings.
    pub fn load(name: &str) -> Result<Vec<String>> {
        let text = read(&MANIFEST.phrases, "phrase list", name)?;
        serde_json::from_str(&text)
            .with_context(|| format!("phrase list '{name}' is not a string array"))
    }
}

pub mod configs {
    use super::*;

    /// Raw camelCase config document, as a JS host would pass it.
    pub fn json(name: &str) -> Result<String> {
        read(&MANIFEST.configs, "config", name)
    }
}
