use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::utils::{GrammarError, Result};

/// The separator between the two sides of a production, fixed per build
pub const ARROW: &str = "->";

/// Whether a character is a nonterminal symbol (an uppercase letter)
pub fn is_nonterminal(c: char) -> bool {
    c.is_ascii_uppercase()
}

/// Whether a character is a terminal symbol: any printable character that
/// is not uppercase, not whitespace and not part of the arrow token. The
/// epsilon marker counts as a terminal for set-membership purposes.
pub fn is_terminal(c: char) -> bool {
    c.is_ascii_graphic() && !c.is_ascii_uppercase() && !ARROW.contains(c)
}

/// An immutable production `lhs -> rhs` over single-character symbols
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    lhs: String,
    rhs: String,
}

impl Rule {
    /// Parse a production from text of the form `p -> q`.
    ///
    /// Whitespace is insignificant and stripped. The left side must be a
    /// non-empty word containing at least one nonterminal; the right side
    /// must be a non-empty word (possibly the epsilon marker alone).
    pub fn parse(text: &str) -> Result<Rule> {
        // The alphabet is single ASCII characters, so the word classes
        // must stay ASCII; \w would admit Unicode symbols the
        // classifiers cannot place in either alphabet
        static TYPE0: OnceLock<Regex> = OnceLock::new();
        let type0 = TYPE0.get_or_init(|| {
            let pattern = format!(
                r"^[a-z0-9_]*[A-Z][0-9A-Za-z_]*{}[0-9A-Za-z_]+$",
                regex::escape(ARROW)
            );
            Regex::new(&pattern).unwrap()
        });

        let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        if !type0.is_match(&stripped) {
            return Err(GrammarError::InvalidRuleSyntax(text.to_string()));
        }

        // The pattern guarantees exactly one arrow occurrence
        let (lhs, rhs) = stripped.split_once(ARROW).unwrap();
        Ok(Rule {
            lhs: lhs.to_string(),
            rhs: rhs.to_string(),
        })
    }

    /// The left-hand side word
    pub fn lhs(&self) -> &str {
        &self.lhs
    }

    /// The right-hand side word
    pub fn rhs(&self) -> &str {
        &self.rhs
    }

    /// Whether the symbol occurs on either side of this rule
    pub fn mentions(&self, symbol: char) -> bool {
        self.lhs.contains(symbol) || self.rhs.contains(symbol)
    }

    /// Every symbol of the rule, left side first
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.lhs.chars().chain(self.rhs.chars())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, ARROW, self.rhs)
    }
}
