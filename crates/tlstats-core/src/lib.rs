//! # tlstats-core
//!
//! Core library for computing structural and lexical statistics over
//! temporal-logic formulas paired with natural-language requirement text.
//!
//! The pipeline for a single formula: normalize friendly syntax to
//! canonical connectives, rewrite embedded relational comparisons into
//! parser-safe identifiers (counting them on the way), parse the result
//! with [`tlstats_syntax`], walk the syntax tree collecting operator
//! counts and atomic propositions, then aggregate and compute Shannon
//! entropy over the operator distributions. Spot-based classification of
//! the raw formula is an optional, injected capability.
//!
//! ## Modules
//!
//! - [`normalize`]: token normalization and comparison-operator rewriting
//! - [`walk`]: recursive syntax-tree statistics walker
//! - [`stats`]: the [`stats::FormulaStats`] record, aggregation and entropy
//! - [`text`]: requirement-text metrics
//! - [`spot`]: the [`spot::Classifier`] capability and its Spot CLI adapter
//! - [`error`]: analysis error types

pub mod error;
pub mod normalize;
pub mod spot;
pub mod stats;
pub mod text;
pub mod walk;

pub use error::AnalysisError;
pub use spot::{Classification, Classifier, SpotClassifier};
pub use stats::{analyze, FormulaStats};
