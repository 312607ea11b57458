//! Run configuration for corpus digestion.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::DigestError;

/// Configuration for one digest run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Corpus JSON file to read
    #[serde(default)]
    pub input: PathBuf,
    /// Directory receiving exported files
    #[serde(default)]
    pub out_dir: PathBuf,
    /// Entry status allow-list; empty accepts every entry
    #[serde(default)]
    pub only_with_status: Vec<String>,
}

impl Config {
    /// Load a configuration from a JSON file.
    pub fn from_json(path: &Path) -> Result<Self, DigestError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
