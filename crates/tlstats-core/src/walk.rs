//! Recursive syntax-tree statistics walker.

use std::collections::BTreeSet;

use tlstats_syntax::Formula;

use crate::stats::{LogicalCounts, TemporalCounts};

/// Everything a single depth-first walk extracts from a parsed formula.
#[derive(Debug, Clone, Default)]
pub struct WalkOutcome {
    /// Height of the whole tree; atoms sit at height 0.
    pub height: usize,
    /// Distinct atomic proposition names, in sorted order.
    pub atomic_props: BTreeSet<String>,
    pub logical: LogicalCounts,
    pub temporal: TemporalCounts,
}

/// Walk the tree once, classifying every node by operator kind.
///
/// N-ary `And`/`Or` nodes contribute `n - 1` occurrences for `n` children,
/// matching binary-operator-count semantics: a three-way conjunction is two
/// `&` operators. Node dispatch is an exhaustive match over [`Formula`], so
/// an unsupported node kind cannot reach this code.
pub fn walk(root: &Formula) -> WalkOutcome {
    let mut outcome = WalkOutcome {
        height: root.height(),
        ..WalkOutcome::default()
    };
    visit(root, &mut outcome);
    outcome
}

fn visit(node: &Formula, outcome: &mut WalkOutcome) {
    match node {
        Formula::Atom(name) => {
            outcome.atomic_props.insert(name.clone());
        }
        Formula::Not(f) => {
            outcome.logical.not += 1;
            visit(f, outcome);
        }
        Formula::And(fs) => {
            outcome.logical.and += fs.len().saturating_sub(1);
            for f in fs {
                visit(f, outcome);
            }
        }
        Formula::Or(fs) => {
            outcome.logical.or += fs.len().saturating_sub(1);
            for f in fs {
                visit(f, outcome);
            }
        }
        Formula::Imply(l, r) => {
            outcome.logical.impl_ += 1;
            visit(l, outcome);
            visit(r, outcome);
        }
        Formula::Next(f) => {
            outcome.temporal.next += 1;
            visit(f, outcome);
        }
        Formula::Finally(f) => {
            outcome.temporal.finally += 1;
            visit(f, outcome);
        }
        Formula::Globally(f) => {
            outcome.temporal.globally += 1;
            visit(f, outcome);
        }
        Formula::Until(l, r) => {
            outcome.temporal.until += 1;
            visit(l, outcome);
            visit(r, outcome);
        }
        Formula::Release(l, r) => {
            outcome.temporal.release += 1;
            visit(l, outcome);
            visit(r, outcome);
        }
        Formula::ForAll(f) => {
            outcome.temporal.forall += 1;
            visit(f, outcome);
        }
        Formula::Exists(f) => {
            outcome.temporal.exists += 1;
            visit(f, outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tlstats_syntax::parse;

    #[test]
    fn counts_simple_implication() {
        let outcome = walk(&parse("p -> q").unwrap());
        assert_eq!(outcome.height, 1);
        assert_eq!(outcome.atomic_props.len(), 2);
        assert_eq!(outcome.logical.impl_, 1);
        assert_eq!(outcome.logical.total(), 1);
        assert_eq!(outcome.temporal.total(), 0);
    }

    #[test]
    fn nary_conjunction_counts_n_minus_one() {
        let outcome = walk(&parse("x & y & z").unwrap());
        assert_eq!(outcome.logical.and, 2);
        assert_eq!(outcome.atomic_props.len(), 3);
    }

    #[test]
    fn repeated_atoms_collapse_in_the_set() {
        let outcome = walk(&parse("p & p & q").unwrap());
        assert_eq!(outcome.atomic_props.len(), 2);
        assert!(outcome.atomic_props.contains("p"));
    }

    #[test]
    fn temporal_operators_count_individually() {
        let outcome = walk(&parse("A G (p U (X q | F r))").unwrap());
        assert_eq!(outcome.temporal.forall, 1);
        assert_eq!(outcome.temporal.globally, 1);
        assert_eq!(outcome.temporal.until, 1);
        assert_eq!(outcome.temporal.next, 1);
        assert_eq!(outcome.temporal.finally, 1);
        assert_eq!(outcome.temporal.total(), 5);
        assert_eq!(outcome.logical.or, 1);
    }

    #[test]
    fn literal_scenario_nested_globally() {
        let outcome = walk(&parse("G ((x & u_eq_n9 & i_lt_n3) -> G (!y | x))").unwrap());
        assert_eq!(outcome.height, 5);
        assert_eq!(outcome.atomic_props.len(), 4);
        assert_eq!(outcome.logical.total(), 5); // 2 and, 1 or, 1 not, 1 impl
        assert_eq!(outcome.temporal.total(), 2);
    }
}
