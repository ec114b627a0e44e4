//! Syntactic analysis
//!
//! The parser is grammar-driven: [`PredictiveParser`] knows nothing about Python. It is
//! configured with a [`Grammar`](crate::pyll::grammar::Grammar) and the
//! [`ParseSets`](crate::pyll::sets::ParseSets) computed from it, and accepts or rejects a
//! token sequence. No syntax tree is built; the result is a verdict carrying the first
//! failure.
//!
//! The shipped Python-subset grammar and its sets are computed once per process and shared
//! read-only by every parse.

pub mod predictive;

pub use predictive::{PredictiveParser, DEFAULT_MAX_DEPTH};

use once_cell::sync::Lazy;

use crate::pyll::error::ParseError;
use crate::pyll::grammar::python_subset::python_subset;
use crate::pyll::lexing::Token;
use crate::pyll::sets::ParseSets;

static PYTHON_SUBSET_SETS: Lazy<ParseSets> = Lazy::new(|| ParseSets::compute(python_subset()));

/// FIRST/FOLLOW/PREDICT sets of the shipped grammar.
pub fn python_subset_sets() -> &'static ParseSets {
    &PYTHON_SUBSET_SETS
}

/// Parse a token sequence against the shipped grammar.
pub fn parse(tokens: &[Token]) -> Result<(), ParseError> {
    PredictiveParser::python_subset().parse(tokens)
}
