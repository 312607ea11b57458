//! Per-formula statistics record, aggregation and entropy.
//!
//! [`analyze`] is the whole pipeline for one formula: normalize, rewrite
//! comparisons, parse, walk, aggregate, compute entropy, optionally ask the
//! injected classifier about the raw formula. It returns one immutable
//! [`FormulaStats`] value; nothing is shared across formulas.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::AnalysisError;
use crate::normalize::{normalize_tokens, rewrite_comparisons};
use crate::spot::{Classification, Classifier};
use crate::text::{requirement_text_metrics, TextMetrics};
use crate::walk::walk;

/// Occurrence counts for relational comparison operators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonCounts {
    pub eq: usize,
    pub neq: usize,
    pub gt: usize,
    pub geq: usize,
    pub lt: usize,
    pub leq: usize,
}

impl ComparisonCounts {
    pub const LABELS: [&'static str; 6] = ["eq", "neq", "gt", "geq", "lt", "leq"];

    pub fn values(&self) -> [usize; 6] {
        [self.eq, self.neq, self.gt, self.geq, self.lt, self.leq]
    }

    pub fn total(&self) -> usize {
        self.values().iter().sum()
    }
}

/// Occurrence counts for logical connectives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogicalCounts {
    /// Implication (`->`)
    #[serde(rename = "impl")]
    pub impl_: usize,
    pub and: usize,
    pub or: usize,
    pub not: usize,
}

impl LogicalCounts {
    pub const LABELS: [&'static str; 4] = ["impl", "and", "or", "not"];

    pub fn values(&self) -> [usize; 4] {
        [self.impl_, self.and, self.or, self.not]
    }

    pub fn total(&self) -> usize {
        self.values().iter().sum()
    }
}

/// Occurrence counts for temporal operators and path quantifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TemporalCounts {
    /// For all paths
    #[serde(rename = "A")]
    pub forall: usize,
    /// Exists a path
    #[serde(rename = "E")]
    pub exists: usize,
    /// Next
    #[serde(rename = "X")]
    pub next: usize,
    /// Finally
    #[serde(rename = "F")]
    pub finally: usize,
    /// Globally
    #[serde(rename = "G")]
    pub globally: usize,
    /// Until
    #[serde(rename = "U")]
    pub until: usize,
    /// Release
    #[serde(rename = "R")]
    pub release: usize,
}

impl TemporalCounts {
    pub const LABELS: [&'static str; 7] = ["A", "E", "X", "F", "G", "U", "R"];

    pub fn values(&self) -> [usize; 7] {
        [
            self.forall,
            self.exists,
            self.next,
            self.finally,
            self.globally,
            self.until,
            self.release,
        ]
    }

    pub fn total(&self) -> usize {
        self.values().iter().sum()
    }
}

/// Summary totals reduced from the per-kind counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregates {
    /// Distinct atomic propositions
    pub aps: usize,
    /// Total comparison operators
    pub cops: usize,
    /// Total logical operators
    pub lops: usize,
    /// Total temporal operators
    pub tops: usize,
}

/// Reduce the counter groups into summary totals. Pure; no error conditions.
pub fn aggregate(
    atomic_props: &BTreeSet<String>,
    cops: &ComparisonCounts,
    lops: &LogicalCounts,
    tops: &TemporalCounts,
) -> Aggregates {
    Aggregates {
        aps: atomic_props.len(),
        cops: cops.total(),
        lops: lops.total(),
        tops: tops.total(),
    }
}

/// Shannon entropy (base 2) of the operator-kind frequency distributions.
#[derive(Debug, Clone, Serialize)]
pub struct EntropyStats {
    /// Entropy over the logical-operator counts
    pub lops: f64,
    /// Entropy over the temporal-operator counts
    pub tops: f64,
    /// Entropy over the concatenated temporal + logical counts
    pub lops_tops: f64,
}

impl EntropyStats {
    /// The temporal and logical label sets feed one combined distribution,
    /// so a shared label would silently merge two counters.
    pub fn labels_are_disjoint() -> bool {
        TemporalCounts::LABELS
            .iter()
            .all(|l| !LogicalCounts::LABELS.contains(l))
    }

    pub fn from_counts(tops: &TemporalCounts, lops: &LogicalCounts) -> Self {
        debug_assert!(Self::labels_are_disjoint());
        let combined: Vec<usize> = tops
            .values()
            .into_iter()
            .chain(lops.values())
            .collect();
        EntropyStats {
            lops: shannon_entropy(&lops.values()),
            tops: shannon_entropy(&tops.values()),
            lops_tops: shannon_entropy(&combined),
        }
    }
}

/// Discrete Shannon entropy, base 2, of a count vector.
///
/// An all-zero vector has no defined distribution and yields `NaN`, matching
/// the unguarded pass-through of counts into the entropy formula upstream.
pub fn shannon_entropy(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return f64::NAN;
    }
    let total = total as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// The complete analysis result for one formula. Immutable once built.
///
/// The nesting is flattening-safe: no two leaves collide under dotted-path
/// keys such as `stats.tops.G`.
#[derive(Debug, Clone, Serialize)]
pub struct FormulaStats {
    /// The formula exactly as received
    pub formula_raw: String,
    /// After synonym rewriting and whitespace normalization
    pub formula_normalized: String,
    /// After comparison erasure; the string actually parsed
    pub formula_parsable: String,
    /// Height of the parsed syntax tree
    pub height: usize,
    /// Distinct atomic proposition names, sorted
    pub ap: BTreeSet<String>,
    pub cops: ComparisonCounts,
    pub lops: LogicalCounts,
    pub tops: TemporalCounts,
    pub agg: Aggregates,
    pub entropy: EntropyStats,
    /// Spot classification of the raw formula, when a classifier was
    /// supplied and responded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spot: Option<Classification>,
    /// Requirement-text metrics, when text accompanied the formula
    #[serde(skip_serializing_if = "Option::is_none")]
    pub req: Option<TextMetrics>,
}

/// Analyze one formula, optionally with accompanying requirement text and
/// an extended classifier.
///
/// The classifier sees the raw, pre-normalization formula and its absence
/// or failure never fails the analysis. A formula that normalizes to the
/// empty string produces a zero-count record without touching the parser.
pub fn analyze(
    formula: &str,
    req_text: Option<&str>,
    classifier: Option<&dyn Classifier>,
) -> Result<FormulaStats, AnalysisError> {
    let formula_normalized = normalize_tokens(formula);
    let req = requirement_text_metrics(req_text);

    if formula_normalized.is_empty() {
        let empty = TemporalCounts::default();
        let entropy = EntropyStats::from_counts(&empty, &LogicalCounts::default());
        return Ok(FormulaStats {
            formula_raw: formula.to_string(),
            formula_normalized,
            formula_parsable: String::new(),
            height: 0,
            ap: BTreeSet::new(),
            cops: ComparisonCounts::default(),
            lops: LogicalCounts::default(),
            tops: empty,
            agg: Aggregates::default(),
            entropy,
            spot: None,
            req,
        });
    }

    let (cops, formula_parsable) = rewrite_comparisons(&formula_normalized);
    let tree = tlstats_syntax::parse(&formula_parsable).map_err(|source| {
        AnalysisError::Parse {
            formula: formula.to_string(),
            source,
        }
    })?;
    let outcome = walk(&tree);
    let agg = aggregate(&outcome.atomic_props, &cops, &outcome.logical, &outcome.temporal);
    let entropy = EntropyStats::from_counts(&outcome.temporal, &outcome.logical);
    let spot = classifier.and_then(|c| c.classify(formula));

    Ok(FormulaStats {
        formula_raw: formula.to_string(),
        formula_normalized,
        formula_parsable,
        height: outcome.height,
        ap: outcome.atomic_props,
        cops,
        lops: outcome.logical,
        tops: outcome.temporal,
        agg,
        entropy,
        spot,
        req,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Case {
        f_code: &'static str,
        height: usize,
        aps: usize,
        cops: usize,
        lops: usize,
        tops: usize,
    }

    const CASES: [Case; 5] = [
        Case {
            f_code: "p --> q",
            height: 1,
            aps: 2,
            cops: 0,
            lops: 1,
            tops: 0,
        },
        Case {
            f_code: "p == 0 --> q",
            height: 1,
            aps: 2,
            cops: 1,
            lops: 1,
            tops: 0,
        },
        Case {
            f_code: "G((x and (u == 9) and (i < 3)) --> G(not y or x))",
            height: 5,
            aps: 4,
            cops: 2,
            lops: 5,
            tops: 2,
        },
        Case {
            f_code: "G(Number_of_FCTs <= 7)",
            height: 1,
            aps: 1,
            cops: 1,
            lops: 0,
            tops: 1,
        },
        Case {
            f_code: "G(Number_of_FCTs >= seven)",
            height: 1,
            aps: 1,
            cops: 1,
            lops: 0,
            tops: 1,
        },
    ];

    #[test]
    fn literal_scenarios_match_expected_counts() {
        for case in &CASES {
            let stats = analyze(case.f_code, None, None).unwrap();
            assert_eq!(stats.height, case.height, "{}", case.f_code);
            assert_eq!(stats.agg.aps, case.aps, "{}", case.f_code);
            assert_eq!(stats.agg.cops, case.cops, "{}", case.f_code);
            assert_eq!(stats.agg.lops, case.lops, "{}", case.f_code);
            assert_eq!(stats.agg.tops, case.tops, "{}", case.f_code);
        }
    }

    #[test]
    fn aggregate_ap_count_matches_set_size() {
        for case in &CASES {
            let stats = analyze(case.f_code, None, None).unwrap();
            assert_eq!(stats.agg.aps, stats.ap.len(), "{}", case.f_code);
        }
    }

    #[test]
    fn eq_comparison_is_classified() {
        let stats = analyze("p == 0 --> q", None, None).unwrap();
        assert_eq!(stats.cops.eq, 1);
        assert_eq!(stats.lops.impl_, 1);
    }

    #[test]
    fn leq_comparison_inside_globally() {
        let stats = analyze("G(Number_of_FCTs <= 7)", None, None).unwrap();
        assert_eq!(stats.cops.leq, 1);
        assert_eq!(stats.tops.globally, 1);
        assert!(stats.ap.contains("Number_of_FCTs_leq_n7"));
    }

    #[test]
    fn parse_failure_carries_the_raw_formula() {
        let err = analyze("G (p -> ", None, None).unwrap_err();
        let AnalysisError::Parse { formula, .. } = err;
        assert_eq!(formula, "G (p -> ");
    }

    #[test]
    fn empty_formula_yields_zero_record() {
        let stats = analyze("", None, None).unwrap();
        assert_eq!(stats.height, 0);
        assert_eq!(stats.agg, Aggregates::default());
        assert!(stats.entropy.lops.is_nan());
    }

    #[test]
    fn entropy_of_uniform_distribution_is_log2_k() {
        let e = shannon_entropy(&[3, 3, 3, 3]);
        assert!((e - 2.0).abs() < 1e-12);
        let e = shannon_entropy(&[1, 1, 0, 0]);
        assert!((e - 1.0).abs() < 1e-12);
    }

    #[test]
    fn entropy_of_single_category_is_zero() {
        assert_eq!(shannon_entropy(&[7, 0, 0]), 0.0);
    }

    #[test]
    fn entropy_of_zero_vector_is_nan() {
        assert!(shannon_entropy(&[0, 0, 0]).is_nan());
        // A purely propositional formula has a zero temporal vector.
        let stats = analyze("p --> q", None, None).unwrap();
        assert!(stats.entropy.tops.is_nan());
        assert!(!stats.entropy.lops.is_nan());
    }

    #[test]
    fn combined_entropy_spans_both_groups() {
        // G (p U q): temporal G,U; logical empty.
        let stats = analyze("G (p U q)", None, None).unwrap();
        assert!((stats.entropy.tops - 1.0).abs() < 1e-12);
        assert!(stats.entropy.lops.is_nan());
        assert!((stats.entropy.lops_tops - 1.0).abs() < 1e-12);
    }

    #[test]
    fn operator_label_sets_are_disjoint() {
        assert!(EntropyStats::labels_are_disjoint());
    }

    #[test]
    fn record_flattens_without_key_collisions() {
        let stats = analyze(
            "G((x and (u == 9) and (i < 3)) --> G(not y or x))",
            Some("The system shall recover."),
            None,
        )
        .unwrap();
        // Serialized field names stay unique within every nesting level, so
        // dotted-path flattening is lossless.
        let json = serde_json::to_value(&stats).unwrap();
        fn walk_keys(value: &serde_json::Value, prefix: String, seen: &mut Vec<String>) {
            if let serde_json::Value::Object(map) = value {
                for (k, v) in map {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk_keys(v, key.clone(), seen);
                    seen.push(key);
                }
            }
        }
        let mut keys = Vec::new();
        walk_keys(&json, String::new(), &mut keys);
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(total, keys.len());
        assert!(keys.iter().any(|k| k == "tops.G"));
        assert!(keys.iter().any(|k| k == "req.chars"));
    }

    struct RecordingStub {
        calls: Mutex<Vec<String>>,
    }

    impl Classifier for RecordingStub {
        fn classify(&self, formula: &str) -> Option<Classification> {
            self.calls.lock().unwrap().push(formula.to_string());
            None
        }
    }

    struct SafetyStub;

    impl Classifier for SafetyStub {
        fn classify(&self, formula: &str) -> Option<Classification> {
            Some(Classification {
                formula: formula.to_string(),
                spot_formula: crate::normalize::normalize_tokens(formula),
                syntactic_safety: true,
                is_stutter_invariant_formula: true,
                manna_pnueli_class: "safety".to_string(),
            })
        }
    }

    #[test]
    fn responsive_classifier_verdict_is_merged_into_the_record() {
        let stats = analyze("G p", None, Some(&SafetyStub)).unwrap();
        let spot = stats.spot.expect("classification present");
        assert_eq!(spot.formula, "G p");
        assert_eq!(spot.spot_formula, "G p");
        assert!(spot.syntactic_safety);
        assert!(spot.is_stutter_invariant_formula);
        assert!(spot.manna_pnueli_class.to_lowercase().contains("safety"));
        // Classification is additive: base statistics are unchanged.
        assert_eq!(stats.tops.globally, 1);
        assert_eq!(stats.agg.aps, 1);
    }

    #[test]
    fn absent_classifier_result_leaves_base_counts_untouched() {
        let stub = RecordingStub {
            calls: Mutex::new(Vec::new()),
        };
        let with_stub = analyze("G p", None, Some(&stub)).unwrap();
        let without = analyze("G p", None, None).unwrap();

        assert!(with_stub.spot.is_none());
        assert_eq!(with_stub.agg, without.agg);
        assert_eq!(with_stub.tops, without.tops);
        assert_eq!(with_stub.lops, without.lops);
        assert_eq!(stub.calls.lock().unwrap().as_slice(), ["G p"]);
    }
}
