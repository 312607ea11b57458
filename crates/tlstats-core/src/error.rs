//! Error types for formula analysis.

use tlstats_syntax::ParseError;

/// Error produced when analyzing a single formula.
///
/// Analysis is total over well-formed inputs; the only failure mode is the
/// parser rejecting the rewritten formula. The offending raw formula is
/// carried so batch tooling can attribute failures without aborting
/// unrelated formulas.
#[derive(Debug)]
pub enum AnalysisError {
    /// The parser rejected the comparison-rewritten formula.
    Parse {
        /// The raw formula as received, before any normalization.
        formula: String,
        source: ParseError,
    },
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::Parse { formula, source } => {
                write!(f, "failed to parse formula '{formula}': {source}")
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Parse { source, .. } => Some(source),
        }
    }
}
