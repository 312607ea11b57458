//! Extended formula classification through Spot's command-line tools.
//!
//! Classification is a capability: the analysis core depends only on the
//! [`Classifier`] trait and treats an absent or failing implementation as
//! "no classification", never as an error. [`SpotClassifier`] is the
//! concrete adapter; it locates `ltlfilt` once, translates the friendly
//! formula syntax to Spot's dialect, and turns tool failures into
//! deduplicated diagnostics instead of errors.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;

use log::{debug, warn};
use serde::Serialize;

use crate::normalize::normalize_tokens;

/// The verdicts Spot reports for one formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// The formula exactly as requested
    pub formula: String,
    /// The translated formula actually sent to Spot
    pub spot_formula: String,
    /// Structurally-detectable safety property
    pub syntactic_safety: bool,
    /// Truth unaffected by stuttering steps
    pub is_stutter_invariant_formula: bool,
    /// Manna-Pnueli hierarchy class, e.g. "safety" or "recurrence reactivity"
    pub manna_pnueli_class: String,
}

/// Capability interface for external formula classification.
///
/// Implementations return `None` when no verdict is available; they never
/// fail the caller.
pub trait Classifier {
    fn classify(&self, formula: &str) -> Option<Classification>;
}

#[derive(Debug, Clone, PartialEq)]
enum Availability {
    Unknown,
    Unavailable,
    Available(PathBuf),
}

struct SpotState {
    availability: Availability,
    diagnostics: Vec<String>,
}

/// Classifier backed by Spot's `ltlfilt` tool.
///
/// The tool is located lazily on first use. A missing tool marks the
/// adapter permanently unavailable; a per-formula tool failure only skips
/// that formula. All shared state sits behind one mutex so concurrent
/// callers cannot corrupt the diagnostic log, and the unavailability
/// transition is idempotent.
pub struct SpotClassifier {
    tool: &'static str,
    state: Mutex<SpotState>,
}

impl Default for SpotClassifier {
    fn default() -> Self {
        Self::new()
    }
}

enum RunFailure {
    /// The tool binary itself is gone; nothing further will succeed.
    ToolMissing(String),
    /// This invocation failed; later formulas may still work.
    CallFailed(String),
}

impl SpotClassifier {
    pub fn new() -> Self {
        Self::with_tool("ltlfilt")
    }

    /// Use a differently-named tool binary. Intended for tests that need a
    /// guaranteed-missing tool.
    pub fn with_tool(tool: &'static str) -> Self {
        SpotClassifier {
            tool,
            state: Mutex::new(SpotState {
                availability: Availability::Unknown,
                diagnostics: Vec::new(),
            }),
        }
    }

    /// Accumulated diagnostics, deduplicated, oldest first.
    pub fn diagnostics(&self) -> Vec<String> {
        self.state.lock().expect("spot state poisoned").diagnostics.clone()
    }

    fn record_warning(state: &mut SpotState, message: String) {
        if !state.diagnostics.contains(&message) {
            warn!("{message}");
            state.diagnostics.push(message);
        }
    }

    /// Resolve the tool path, probing at most once.
    fn ensure_initialized(&self) -> Option<PathBuf> {
        let mut state = self.state.lock().expect("spot state poisoned");
        if state.availability == Availability::Unknown {
            state.availability = match which::which(self.tool) {
                Ok(path) => {
                    debug!("found {} at {}", self.tool, path.display());
                    Availability::Available(path)
                }
                Err(err) => {
                    Self::record_warning(
                        &mut state,
                        format!(
                            "Spot extensions unavailable ({} not found: {err}); \
                             extended classification columns will be empty.",
                            self.tool
                        ),
                    );
                    Availability::Unavailable
                }
            };
        }
        match &state.availability {
            Availability::Available(path) => Some(path.clone()),
            _ => None,
        }
    }

    fn run_ltlfilt(path: &Path, extra_args: &[&str], formula: &str) -> Result<String, RunFailure> {
        let output = Command::new(path)
            .args(extra_args)
            .arg("-f")
            .arg(formula)
            .output()
            .map_err(|err| {
                if err.kind() == std::io::ErrorKind::NotFound {
                    RunFailure::ToolMissing(err.to_string())
                } else {
                    RunFailure::CallFailed(err.to_string())
                }
            })?;
        if !output.status.success() {
            return Err(RunFailure::CallFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// `ltlfilt <filter> -c` prints the number of matching formulas; with a
    /// single input formula that is `1` or `0`.
    fn run_predicate(path: &Path, filter: &str, formula: &str) -> Result<bool, RunFailure> {
        let stdout = Self::run_ltlfilt(path, &[filter, "-c"], formula)?;
        Ok(stdout == "1")
    }

    fn classify_with_tool(path: &Path, formula: &str, spot_formula: &str) -> Result<Classification, RunFailure> {
        let manna_pnueli_class = Self::run_ltlfilt(path, &["--format=%[v]h"], spot_formula)?;
        let syntactic_safety = Self::run_predicate(path, "--syntactic-safety", spot_formula)?;
        let is_stutter_invariant_formula =
            Self::run_predicate(path, "--stutter-invariant", spot_formula)?;
        Ok(Classification {
            formula: formula.to_string(),
            spot_formula: spot_formula.to_string(),
            syntactic_safety,
            is_stutter_invariant_formula,
            manna_pnueli_class,
        })
    }
}

impl Classifier for SpotClassifier {
    fn classify(&self, formula: &str) -> Option<Classification> {
        if formula.is_empty() {
            return None;
        }
        let path = self.ensure_initialized()?;

        // Spot wants canonical connectives; the raw formula keeps its
        // friendly syntax until here.
        let spot_formula = normalize_tokens(formula);

        match Self::classify_with_tool(&path, formula, &spot_formula) {
            Ok(classification) => Some(classification),
            Err(RunFailure::ToolMissing(detail)) => {
                let mut state = self.state.lock().expect("spot state poisoned");
                state.availability = Availability::Unavailable;
                Self::record_warning(
                    &mut state,
                    format!(
                        "Spot tool disappeared during classification ({detail}); \
                         extended classification columns will be empty."
                    ),
                );
                None
            }
            Err(RunFailure::CallFailed(detail)) => {
                let mut state = self.state.lock().expect("spot state poisoned");
                Self::record_warning(
                    &mut state,
                    format!(
                        "Spot classification failed for '{formula}': {detail}; \
                         extended classification columns will be empty for this formula."
                    ),
                );
                None
            }
        }
    }
}
