//! Corpus reading, validation and batch analysis.
//!
//! A corpus is a JSON array of entries, each carrying a stable identifier,
//! a review status, optional requirement text, and one or more formulas.
//! Identifiers must be unique across the corpus; a parse failure in one
//! formula is logged and skipped without aborting the batch.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use tlstats_core::{analyze, Classifier, FormulaStats};

use crate::error::DigestError;

/// One corpus entry: a requirement with its formalizations.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusEntry {
    pub id: String,
    #[serde(default)]
    pub status: String,
    /// Natural-language requirement text, when captured
    #[serde(default)]
    pub req: Option<String>,
    #[serde(default)]
    pub logics: Vec<LogicEntry>,
}

/// One formalization of a requirement.
#[derive(Debug, Clone, Deserialize)]
pub struct LogicEntry {
    /// Logic family label, e.g. "LTL" or "CTL"
    #[serde(rename = "type")]
    pub logic: String,
    pub f_code: String,
}

/// One analyzed formula, ready for export.
#[derive(Debug, Clone, Serialize)]
pub struct DigestRecord {
    pub id: String,
    pub logic: String,
    pub stats: FormulaStats,
}

/// Read and validate a corpus file.
///
/// Fails on malformed JSON and on duplicate entry identifiers; the
/// duplicate check runs before any analysis so a bad corpus is rejected
/// whole.
pub fn read_corpus(path: &Path) -> Result<Vec<CorpusEntry>, DigestError> {
    let raw = fs::read_to_string(path)?;
    let entries: Vec<CorpusEntry> = serde_json::from_str(&raw)?;

    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for entry in &entries {
        if !seen.insert(entry.id.as_str()) && !duplicates.contains(&entry.id) {
            duplicates.push(entry.id.clone());
        }
    }
    if !duplicates.is_empty() {
        return Err(DigestError::DuplicateIds(duplicates));
    }
    Ok(entries)
}

/// Analyze every formula of every entry passing the status filter.
///
/// An empty allow-list accepts all statuses. Per-formula analysis failures
/// are logged and skipped; each worker gets its own immutable inputs, so
/// entries are independent of one another.
pub fn analyze_corpus(
    entries: &[CorpusEntry],
    only_with_status: &[String],
    classifier: Option<&dyn Classifier>,
) -> Vec<DigestRecord> {
    let mut records = Vec::new();
    for entry in entries {
        if !only_with_status.is_empty() && !only_with_status.contains(&entry.status) {
            continue;
        }
        for logic in &entry.logics {
            match analyze(&logic.f_code, entry.req.as_deref(), classifier) {
                Ok(stats) => records.push(DigestRecord {
                    id: entry.id.clone(),
                    logic: logic.logic.clone(),
                    stats,
                }),
                Err(err) => {
                    warn!("skipping formula of entry '{}': {err}", entry.id);
                }
            }
        }
    }
    records
}
