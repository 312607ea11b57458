//! Syntax tree for CTL*-family temporal logic formulas.

/// A temporal logic formula.
///
/// `And` and `Or` are n-ary: associative chains like `p & q & r` collapse
/// into a single node with three children, so an n-child node represents
/// `n - 1` binary operator occurrences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Formula {
    /// Atomic proposition (a bare identifier, possibly comparison-derived)
    Atom(String),
    /// Negation: `! p`
    Not(Box<Formula>),
    /// Conjunction: `p & q [& ...]`, at least two children
    And(Vec<Formula>),
    /// Disjunction: `p | q [| ...]`, at least two children
    Or(Vec<Formula>),
    /// Implication: `p -> q`
    Imply(Box<Formula>, Box<Formula>),
    /// Next: `X p`
    Next(Box<Formula>),
    /// Finally/Eventually: `F p`
    Finally(Box<Formula>),
    /// Globally/Always: `G p`
    Globally(Box<Formula>),
    /// Until: `p U q`
    Until(Box<Formula>, Box<Formula>),
    /// Release: `p R q`
    Release(Box<Formula>, Box<Formula>),
    /// Universal path quantifier: `A p`
    ForAll(Box<Formula>),
    /// Existential path quantifier: `E p`
    Exists(Box<Formula>),
}

impl Formula {
    /// Direct subformulas of this node. Empty exactly for atoms.
    pub fn children(&self) -> Vec<&Formula> {
        match self {
            Formula::Atom(_) => Vec::new(),
            Formula::Not(f)
            | Formula::Next(f)
            | Formula::Finally(f)
            | Formula::Globally(f)
            | Formula::ForAll(f)
            | Formula::Exists(f) => vec![f],
            Formula::Imply(l, r) | Formula::Until(l, r) | Formula::Release(l, r) => {
                vec![l, r]
            }
            Formula::And(fs) | Formula::Or(fs) => fs.iter().collect(),
        }
    }

    /// Height of the subtree rooted at this node. Atoms have height 0.
    pub fn height(&self) -> usize {
        self.children()
            .iter()
            .map(|c| c.height())
            .max()
            .map_or(0, |h| h + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(s: &str) -> Formula {
        Formula::Atom(s.to_string())
    }

    #[test]
    fn atom_has_height_zero_and_no_children() {
        let f = atom("p");
        assert_eq!(f.height(), 0);
        assert!(f.children().is_empty());
    }

    #[test]
    fn implication_over_atoms_has_height_one() {
        let f = Formula::Imply(Box::new(atom("p")), Box::new(atom("q")));
        assert_eq!(f.height(), 1);
        assert_eq!(f.children().len(), 2);
    }

    #[test]
    fn height_follows_deepest_branch() {
        // G (p -> G (!q | p))
        let inner = Formula::Globally(Box::new(Formula::Or(vec![
            Formula::Not(Box::new(atom("q"))),
            atom("p"),
        ])));
        let f = Formula::Globally(Box::new(Formula::Imply(
            Box::new(atom("p")),
            Box::new(inner),
        )));
        assert_eq!(f.height(), 5);
    }

    #[test]
    fn nary_conjunction_counts_all_children() {
        let f = Formula::And(vec![atom("x"), atom("y"), atom("z")]);
        assert_eq!(f.children().len(), 3);
        assert_eq!(f.height(), 1);
    }
}
