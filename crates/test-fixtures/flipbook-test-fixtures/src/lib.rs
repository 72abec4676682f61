//! Stored sequence fixtures shared by the flipbook test suites.
//!
//! Names resolve through `fixtures/manifest.json`; `load` hands back parsed,
//! validated sequences keyed by their image paths.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use flipbook_core::{parse_library_json, parse_sequence_json, SequenceLibrary, SpriteSequence};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    sequences: HashMap<String, String>,
    #[serde(default)]
    libraries: HashMap<String, String>,
}

enum Kind {
    Sequence,
    Library,
}

impl Kind {
    fn entries(&self) -> &'static HashMap<String, String> {
        match self {
            Kind::Sequence => &MANIFEST.sequences,
            Kind::Library => &MANIFEST.libraries,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Kind::Sequence => "sequence",
            Kind::Library => "library",
        }
    }

    fn path(&self, name: &str) -> Result<PathBuf> {
        let rel = self
            .entries()
            .get(name)
            .ok_or_else(|| anyhow!("unknown {} fixture '{name}'", self.label()))?;
        Ok(Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(rel))
    }

    fn json(&self, name: &str) -> Result<String> {
        let path = self.path(name)?;
        fs::read_to_string(&path)
            .with_context(|| format!("failed to read {} fixture at {}", self.label(), path.display()))
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.entries().keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// Single stored sequence documents.
pub mod sequences {
    use super::*;

    pub fn keys() -> Vec<String> {
        Kind::Sequence.keys()
    }

    pub fn json(name: &str) -> Result<String> {
        Kind::Sequence.json(name)
    }

    /// Parse and validate the named fixture.
    pub fn load(name: &str) -> Result<SpriteSequence<String>> {
        let text = json(name)?;
        parse_sequence_json(&text).with_context(|| format!("invalid sequence fixture '{name}'"))
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Kind::Sequence.path(name)
    }
}

/// Arrays of stored sequences loaded as one library.
pub mod libraries {
    use super::*;

    pub fn keys() -> Vec<String> {
        Kind::Library.keys()
    }

    pub fn json(name: &str) -> Result<String> {
        Kind::Library.json(name)
    }

    pub fn load(name: &str) -> Result<SequenceLibrary<String>> {
        let text = json(name)?;
        parse_library_json(&text).with_context(|| format!("invalid library fixture '{name}'"))
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Kind::Library.path(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_parses() {
        for key in sequences::keys() {
            assert!(sequences::path(&key).unwrap().exists(), "missing {key}");
            let seq = sequences::load(&key).unwrap();
            assert!(!seq.name().is_empty(), "{key} has no name");
        }
        for key in libraries::keys() {
            assert!(libraries::path(&key).unwrap().exists(), "missing {key}");
            assert!(!libraries::load(&key).unwrap().is_empty());
        }
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        let err = sequences::load("does-not-exist").unwrap_err();
        assert!(err.to_string().contains("does-not-exist"));
        let err = libraries::json("does-not-exist").unwrap_err();
        assert!(err.to_string().contains("library"));
    }
}
