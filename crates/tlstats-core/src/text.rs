//! Lightweight metrics over natural-language requirement text.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Character, word and sentence counts for a requirement text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextMetrics {
    pub chars: usize,
    pub words: usize,
    pub sentences: usize,
}

/// A sentence boundary: a run of terminal punctuation followed by
/// whitespace or end of text.
fn sentence_end_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[.!?]+(?:\s|$)").unwrap())
}

/// Compute metrics for optional requirement text.
///
/// The text is trimmed and given a terminal `.` when it ends without
/// `.`/`!`/`?`, so a bare phrase still counts as one sentence. Absent or
/// empty text returns `None` - a "not provided" sentinel distinct from
/// zero counts.
pub fn requirement_text_metrics(text: Option<&str>) -> Option<TextMetrics> {
    let cleaned = text?.trim();
    if cleaned.is_empty() {
        return None;
    }
    let mut cleaned = cleaned.to_string();
    if !cleaned.ends_with(['.', '!', '?']) {
        cleaned.push('.');
    }
    Some(TextMetrics {
        chars: cleaned.chars().count(),
        words: cleaned.split_whitespace().count(),
        sentences: sentence_end_re().find_iter(&cleaned).count(),
    })
}
