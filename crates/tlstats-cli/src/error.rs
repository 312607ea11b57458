//! Error type for corpus digestion.

/// Errors surfaced while digesting a corpus file.
#[derive(Debug)]
pub enum DigestError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    /// The corpus contains repeated entry identifiers.
    DuplicateIds(Vec<String>),
}

impl std::fmt::Display for DigestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigestError::Io(err) => write!(f, "I/O error: {err}"),
            DigestError::Json(err) => write!(f, "invalid corpus JSON: {err}"),
            DigestError::Csv(err) => write!(f, "CSV export failed: {err}"),
            DigestError::DuplicateIds(ids) => {
                write!(f, "duplicate entry identifiers: {}", ids.join(", "))
            }
        }
    }
}

impl std::error::Error for DigestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DigestError::Io(err) => Some(err),
            DigestError::Json(err) => Some(err),
            DigestError::Csv(err) => Some(err),
            DigestError::DuplicateIds(_) => None,
        }
    }
}

impl From<std::io::Error> for DigestError {
    fn from(err: std::io::Error) -> Self {
        DigestError::Io(err)
    }
}

impl From<serde_json::Error> for DigestError {
    fn from(err: serde_json::Error) -> Self {
        DigestError::Json(err)
    }
}

impl From<csv::Error> for DigestError {
    fn from(err: csv::Error) -> Self {
        DigestError::Csv(err)
    }
}
