//! Formula normalization: synonym rewriting and comparison-operator erasure.
//!
//! Human-written formulas arrive in a friendly syntax (`-->`, `not`, `and`,
//! `or`, embedded relational comparisons, bare numerals). The grammar parser
//! accepts none of that, so two rewriting passes run first:
//!
//! 1. [`normalize_tokens`] maps lexical synonyms onto canonical connectives
//!    and normalizes spacing.
//! 2. [`rewrite_comparisons`] counts relational comparison sub-expressions
//!    and erases each one into an identifier-safe token (`u == 9` becomes
//!    `u_eq_n9`), leaving a pure propositional/temporal string.

use regex::Regex;
use std::sync::OnceLock;

use crate::stats::ComparisonCounts;

/// Sentinel substituted for implication arrows while scanning for `<`/`>`,
/// so arrow characters are never miscounted as comparisons.
const ARROW_SENTINEL: &str = "__IMPLIES__";

fn synonym_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            (Regex::new(r"-->").unwrap(), "->"),
            (Regex::new(r"(?i)\bnot\b").unwrap(), "!"),
            (Regex::new(r"(?i)\band\b").unwrap(), "&"),
            (Regex::new(r"(?i)\bor\b").unwrap(), "|"),
        ]
    })
}

fn negation_space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"!\s+").unwrap())
}

fn binary_op_space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s*(&|\||->)\s*").unwrap())
}

fn whitespace_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Rewrite lexical synonyms to canonical connective tokens and normalize
/// whitespace: `-->` to `->`, whole-word `not`/`and`/`or` (case-insensitive)
/// to `!`/`&`/`|`, no space after `!`, exactly one space around binary
/// operators, single-spaced, trimmed.
///
/// Total and idempotent; empty input yields empty output. Word-boundary
/// matching keeps identifiers like `android` intact.
pub fn normalize_tokens(raw: &str) -> String {
    let mut normalized = raw.to_string();
    for (pattern, replacement) in synonym_patterns() {
        normalized = pattern.replace_all(&normalized, *replacement).into_owned();
    }
    normalized = negation_space_re().replace_all(&normalized, "!").into_owned();
    normalized = binary_op_space_re()
        .replace_all(&normalized, " ${1} ")
        .into_owned();
    whitespace_run_re()
        .replace_all(&normalized, " ")
        .trim()
        .to_string()
}

/// One regex matching every comparison token, longest alternatives first.
///
/// The `regex` crate has no lookaround, so the "a bare `<` is not part of
/// `<=`/`<<`" rule is expressed by alternation order: at any position the
/// scanner prefers the two-character operators, then swallows doubled-angle
/// runs (which count as nothing), and only then accepts a lone `<`/`>`.
fn comparison_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"==|!=|<=|>=|<<+|>>+|<|>").unwrap())
}

/// A maximal comparison sub-expression: `identifier <op> value`, where the
/// value may be a negative or alphanumeric token.
fn comparison_expr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[\w.]+ *[<>!=]=? *-?\w+\b").unwrap())
}

fn numeric_literal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+(\.\d+)?)").unwrap())
}

/// Operator substitution table in priority order: two-character operators
/// first so `<=` is never split into `<` then `=`.
const OP_SUBSTITUTIONS: [(&str, &str); 6] = [
    ("<=", "_leq_"),
    (">=", "_geq_"),
    ("==", "_eq_"),
    ("!=", "_neq_"),
    ("<", "_lt_"),
    (">", "_gt_"),
];

/// Count relational comparison operators in a normalized formula and rewrite
/// each comparison sub-expression into a single identifier-safe token.
///
/// Counting runs on a copy with implication arrows blanked out, so the `>`
/// in `->` (or a stray `-->` that survived normalization) is never counted.
/// Every remaining numeric literal is prefixed with `n` so no token in the
/// result starts with a digit. With no comparisons present the counts are
/// all zero and the string is unchanged apart from that prefixing.
pub fn rewrite_comparisons(normalized: &str) -> (ComparisonCounts, String) {
    let scan_buf = normalized
        .replace("-->", ARROW_SENTINEL)
        .replace("->", ARROW_SENTINEL);

    let mut counts = ComparisonCounts::default();
    for token in comparison_token_re().find_iter(&scan_buf) {
        match token.as_str() {
            "==" => counts.eq += 1,
            "!=" => counts.neq += 1,
            "<=" => counts.leq += 1,
            ">=" => counts.geq += 1,
            "<" => counts.lt += 1,
            ">" => counts.gt += 1,
            // Doubled-angle runs are not comparisons.
            _ => {}
        }
    }

    let rewritten = comparison_expr_re().replace_all(normalized, |caps: &regex::Captures| {
        let expression = caps[0].replace(' ', "").replace('-', "n");
        for (symbol, tag) in OP_SUBSTITUTIONS {
            if expression.contains(symbol) {
                return expression.replace(symbol, tag);
            }
        }
        expression
    });
    let parsable = numeric_literal_re()
        .replace_all(&rewritten, "n${1}")
        .into_owned();

    (counts, parsable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_arrow_becomes_short_arrow() {
        assert_eq!(normalize_tokens("p --> q"), "p -> q");
    }

    #[test]
    fn word_synonyms_are_rewritten() {
        assert_eq!(normalize_tokens("not x and y or z"), "!x & y | z");
    }

    #[test]
    fn synonyms_match_case_insensitively() {
        assert_eq!(normalize_tokens("NOT p AND q"), "!p & q");
    }

    #[test]
    fn word_fragments_inside_identifiers_survive() {
        assert_eq!(normalize_tokens("android and ordered"), "android & ordered");
    }

    #[test]
    fn whitespace_collapses_and_trims() {
        assert_eq!(normalize_tokens("  p   &q "), "p & q");
    }

    #[test]
    fn space_after_negation_is_removed() {
        assert_eq!(normalize_tokens("not   y"), "!y");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(normalize_tokens(""), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_tokens("G((x and (u == 9)) --> G(not y or x))");
        assert_eq!(normalize_tokens(&once), once);
    }

    #[test]
    fn arrow_is_not_counted_as_greater_than() {
        let (counts, _) = rewrite_comparisons("p -> q");
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn each_comparison_kind_is_counted_once() {
        let (counts, _) =
            rewrite_comparisons("a == 1 & b != 2 & c < 3 & d <= 4 & e > 5 & f >= 6");
        assert_eq!(counts.eq, 1);
        assert_eq!(counts.neq, 1);
        assert_eq!(counts.lt, 1);
        assert_eq!(counts.leq, 1);
        assert_eq!(counts.gt, 1);
        assert_eq!(counts.geq, 1);
    }

    #[test]
    fn two_char_operators_are_not_double_counted() {
        let (counts, _) = rewrite_comparisons("a <= 1 & b >= 2");
        assert_eq!(counts.lt, 0);
        assert_eq!(counts.gt, 0);
        assert_eq!(counts.leq, 1);
        assert_eq!(counts.geq, 1);
    }

    #[test]
    fn comparison_is_erased_into_identifier_token() {
        let (counts, parsable) = rewrite_comparisons("u == 9");
        assert_eq!(counts.eq, 1);
        assert_eq!(parsable, "u_eq_n9");
    }

    #[test]
    fn negative_value_maps_minus_to_n() {
        let (_, parsable) = rewrite_comparisons("x > -5");
        assert_eq!(parsable, "x_gt_nn5");
    }

    #[test]
    fn identifier_valued_comparison_is_rewritten() {
        let (counts, parsable) = rewrite_comparisons("Number_of_FCTs >= seven");
        assert_eq!(counts.geq, 1);
        assert_eq!(parsable, "Number_of_FCTs_geq_seven");
    }

    #[test]
    fn dotted_identifiers_are_kept_whole() {
        let (_, parsable) = rewrite_comparisons("sys.temp <= 7");
        assert_eq!(parsable, "sys.temp_leq_n7");
    }

    #[test]
    fn standalone_numerals_get_prefixed() {
        let (counts, parsable) = rewrite_comparisons("p & 42 & t3.14");
        assert_eq!(counts.total(), 0);
        assert_eq!(parsable, "p & n42 & tn3.14");
    }

    #[test]
    fn parsable_string_has_no_raw_relational_characters() {
        let (_, parsable) = rewrite_comparisons("G ((x & u == 9 & i < 3) -> G (!y | x))");
        let stripped = parsable.replace("->", "");
        for forbidden in ["<", ">", "==", "!="] {
            assert!(
                !stripped.contains(forbidden),
                "'{forbidden}' left in '{parsable}'"
            );
        }
    }

    #[test]
    fn full_literal_scenario_counts() {
        let normalized = normalize_tokens("G((x and (u == 9) and (i < 3)) --> G(not y or x))");
        let (counts, parsable) = rewrite_comparisons(&normalized);
        assert_eq!(counts.eq, 1);
        assert_eq!(counts.lt, 1);
        assert_eq!(counts.total(), 2);
        assert_eq!(parsable, "G((x & (u_eq_n9) & (i_lt_n3)) -> G(!y | x))");
    }
}
