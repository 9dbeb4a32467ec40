use std::io;
use thiserror::Error;

use crate::grammar::GrammarClass;

/// Custom error types for rule parsing and grammar construction
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(
        "Invalid rule syntax: {0:?}. Rule must be in form p -> q where p and q \
         are words, and p has at least one nonterminal character."
    )]
    InvalidRuleSyntax(String),

    #[error("Rules not specified")]
    EmptyRuleSet,

    #[error("Grammar must contain at least one rule whose left side uses the axiom {0}")]
    MissingAxiom(char),

    #[error("{class} grammar violated: {expected}")]
    GrammarShapeViolation {
        /// The grammar class whose shape predicate rejected the rule set
        class: GrammarClass,
        /// Human-readable description of the required rule shape
        expected: &'static str,
    },
}

/// Result type for grammar operations
pub type Result<T> = std::result::Result<T, GrammarError>;
