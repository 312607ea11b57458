//! # tlstats-syntax
//!
//! Syntax tree and parser for a CTL*-family temporal logic.
//!
//! The grammar covers path quantifiers (`A`, `E`), temporal operators
//! (`X`, `F`, `G`, `U`, `R`), the propositional connectives (`!`, `&`,
//! `|`, `->`) and atomic propositions. Input is expected in canonical
//! form: callers that accept friendly synonyms (`-->`, `not`, `and`,
//! `or`) or embedded relational comparisons rewrite them before parsing.
//!
//! ## Modules
//!
//! - [`ast`]: the [`Formula`] syntax tree
//! - [`parser`]: recursive-descent parser producing a [`Formula`]

pub mod ast;
pub mod parser;

pub use ast::Formula;
pub use parser::{parse, ParseError};
