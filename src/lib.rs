//! Chomsky-gram classifies formal grammars across the Chomsky hierarchy.
//!
//! Production rules are single-character words (`uppercase` nonterminals,
//! `lowercase`/digit terminals, `_` for the empty word). A rule set is
//! validated against a chosen grammar class (unrestricted, noncontracting,
//! context-free, left-linear or right-linear), and context-free grammars
//! can be simplified by removing unreachable and unproductive
//! nonterminals.
//!
//! # Example
//!
//! ```rust
//! use chomsky_gram::{Grammar, GrammarClass, Rule};
//!
//! let rules = ["S -> a", "S -> A", "A -> AB", "B -> b", "E -> Ff"]
//!     .iter()
//!     .map(|text| Rule::parse(text))
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//!
//! let mut grammar = Grammar::new(GrammarClass::ContextFree, rules).unwrap();
//!
//! // E is never derivable from the axiom S, so its rule disappears
//! grammar.remove_unreachable();
//! assert_eq!(grammar.rules().len(), 4);
//! assert!(!grammar.has_nonterminal('E'));
//! ```

pub mod grammar;
pub mod rule;
pub mod utils;

pub use grammar::{Grammar, GrammarClass, GrammarConfig};
pub use rule::{Rule, ARROW};
pub use utils::{GrammarError, Result};
