use std::collections::BTreeSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use serde::Serialize;

use crate::rule::{is_nonterminal, is_terminal, Rule};
use crate::utils::{GrammarError, Result};

/// The Chomsky-hierarchy class a grammar is validated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrammarClass {
    /// Type-0: any rule in form `p -> q`
    Unrestricted,
    /// Type-1: no right side shorter than its left side, with the
    /// classical axiom-to-epsilon exception
    NonContracting,
    /// Type-2: a single nonterminal on the left side
    ContextFree,
    /// Type-3: `A -> By` or `A -> y`
    LeftLinear,
    /// Type-3: `A -> yB` or `A -> y`
    RightLinear,
}

impl GrammarClass {
    /// Human-readable description of the rule shape this class requires
    pub fn expected_shape(&self) -> &'static str {
        match self {
            GrammarClass::Unrestricted => {
                "any rule in form p -> q where p contains a nonterminal"
            }
            GrammarClass::NonContracting => {
                "at least one rule whose right side is no shorter than its left side \
                 (or the axiom rewriting to epsilon when nothing produces the axiom)"
            }
            GrammarClass::ContextFree => {
                "at least one rule with a single nonterminal on the left side"
            }
            GrammarClass::LeftLinear => {
                "at least one rule rewriting a single nonterminal to a nonterminal \
                 followed by terminals, or to terminals only"
            }
            GrammarClass::RightLinear => {
                "at least one rule rewriting a single nonterminal to terminals \
                 followed by a nonterminal, or to terminals only"
            }
        }
    }

    /// Whether one rule has the shape this class requires. Noncontracting
    /// needs the whole rule set to decide the axiom-epsilon exception.
    fn rule_matches(&self, rule: &Rule, rules: &[Rule], config: &GrammarConfig) -> bool {
        match self {
            GrammarClass::Unrestricted => true,
            GrammarClass::NonContracting => {
                if word_is_epsilon(rule.rhs(), config.epsilon) {
                    // S -> _ is admitted only when no right side produces
                    // the axiom again
                    word_is_symbol(rule.lhs(), config.axiom)
                        && !rules.iter().any(|r| r.rhs().contains(config.axiom))
                } else {
                    rule.rhs().chars().count() >= rule.lhs().chars().count()
                }
            }
            GrammarClass::ContextFree => lhs_nonterminal(rule).is_some(),
            GrammarClass::LeftLinear => {
                let rhs: Vec<char> = rule.rhs().chars().collect();
                lhs_nonterminal(rule).is_some()
                    && (rhs.iter().all(|&c| is_terminal(c))
                        || (is_nonterminal(rhs[0])
                            && rhs[1..].iter().all(|&c| is_terminal(c))))
            }
            GrammarClass::RightLinear => {
                let rhs: Vec<char> = rule.rhs().chars().collect();
                lhs_nonterminal(rule).is_some()
                    && (rhs.iter().all(|&c| is_terminal(c))
                        || (is_nonterminal(rhs[rhs.len() - 1])
                            && rhs[..rhs.len() - 1].iter().all(|&c| is_terminal(c))))
            }
        }
    }

    fn shape_ok(&self, rules: &[Rule], config: &GrammarConfig, strict: bool) -> bool {
        if strict {
            rules.iter().all(|r| self.rule_matches(r, rules, config))
        } else {
            rules.iter().any(|r| self.rule_matches(r, rules, config))
        }
    }
}

impl fmt::Display for GrammarClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GrammarClass::Unrestricted => "unrestricted",
            GrammarClass::NonContracting => "noncontracting",
            GrammarClass::ContextFree => "context-free",
            GrammarClass::LeftLinear => "left-linear",
            GrammarClass::RightLinear => "right-linear",
        };
        f.write_str(name)
    }
}

/// Configuration of the grammar's distinguished symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrammarConfig {
    /// The start nonterminal
    pub axiom: char,
    /// The empty-word marker
    pub epsilon: char,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        GrammarConfig {
            axiom: 'S',
            epsilon: '_',
        }
    }
}

/// A formal grammar: a sorted rule sequence plus the terminal and
/// nonterminal alphabets derived from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grammar {
    class: GrammarClass,
    rules: Vec<Rule>,
    terminals: BTreeSet<char>,
    nonterminals: BTreeSet<char>,
    config: GrammarConfig,
}

impl Grammar {
    /// Build a grammar of the given class over the default alphabet
    /// (axiom `S`, epsilon `_`).
    ///
    /// The class's shape predicate is existential: construction succeeds
    /// when at least one rule has the required shape. See
    /// [`Grammar::new_strict`] for the universal variant.
    pub fn new(class: GrammarClass, rules: Vec<Rule>) -> Result<Grammar> {
        Self::build(class, rules, GrammarConfig::default(), false)
    }

    /// Build a grammar requiring every rule to match the class shape
    pub fn new_strict(class: GrammarClass, rules: Vec<Rule>) -> Result<Grammar> {
        Self::build(class, rules, GrammarConfig::default(), true)
    }

    /// Build a grammar with a custom axiom and epsilon marker
    pub fn with_config(
        class: GrammarClass,
        rules: Vec<Rule>,
        config: GrammarConfig,
    ) -> Result<Grammar> {
        Self::build(class, rules, config, false)
    }

    fn build(
        class: GrammarClass,
        mut rules: Vec<Rule>,
        config: GrammarConfig,
        strict: bool,
    ) -> Result<Grammar> {
        if rules.is_empty() {
            return Err(GrammarError::EmptyRuleSet);
        }

        if !rules.iter().any(|r| r.lhs().contains(config.axiom)) {
            return Err(GrammarError::MissingAxiom(config.axiom));
        }

        if !class.shape_ok(&rules, &config, strict) {
            return Err(GrammarError::GrammarShapeViolation {
                class,
                expected: class.expected_shape(),
            });
        }

        // Axiom rules first, the rest by the ordinal of their leftmost
        // symbol; sort_by_key is stable so ties keep their input order
        let axiom = config.axiom;
        rules.sort_by_key(|r| {
            r.lhs()
                .chars()
                .next()
                .map_or(u32::MAX, |c| if c == axiom { 0 } else { c as u32 })
        });

        let mut grammar = Grammar {
            class,
            rules,
            terminals: BTreeSet::new(),
            nonterminals: BTreeSet::new(),
            config,
        };
        grammar.reindex();
        Ok(grammar)
    }

    /// Load a grammar from a rule-per-line file. Blank lines and lines
    /// starting with `#` are skipped.
    pub fn from_file<P: AsRef<Path>>(path: P, class: GrammarClass) -> Result<Grammar> {
        let file = File::open(path).map_err(GrammarError::Io)?;
        let reader = io::BufReader::new(file);

        let mut rules = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(GrammarError::Io)?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            rules.push(Rule::parse(trimmed)?);
        }

        Grammar::new(class, rules)
    }

    /// Remove every rule whose left side is unreachable from the axiom.
    /// Context-free grammars only: the left side of each rule is read as
    /// a single nonterminal.
    ///
    /// The terminal and nonterminal sets shrink to exactly the symbols
    /// still present in the surviving rules (epsilon is never dropped).
    /// Idempotent once the grammar has stabilized.
    pub fn remove_unreachable(&mut self) {
        let mut reachable = BTreeSet::from([self.config.axiom]);

        // Monotone closure over a finite alphabet, so this terminates in
        // at most |nonterminals| rounds
        loop {
            let mut changed = false;
            for rule in &self.rules {
                let Some(head) = lhs_nonterminal(rule) else {
                    continue;
                };
                if reachable.contains(&head) {
                    for c in rule.rhs().chars().filter(|&c| is_nonterminal(c)) {
                        changed |= reachable.insert(c);
                    }
                }
            }
            if !changed {
                break;
            }
        }

        // Deletions only after the fixed point; removing mid-scan would
        // corrupt the closure
        self.rules
            .retain(|r| lhs_nonterminal(r).is_some_and(|n| reachable.contains(&n)));
        self.reindex();
    }

    /// Remove every rule that depends on a nonterminal unable to derive
    /// a terminal-only word. Context-free grammars only.
    ///
    /// A rule mentioning an unproductive nonterminal on either side is
    /// deleted, even when its own left side is productive. Idempotent
    /// once the grammar has stabilized.
    pub fn remove_unproductive(&mut self) {
        let mut productive: BTreeSet<char> = BTreeSet::new();

        loop {
            let mut changed = false;
            for rule in &self.rules {
                let Some(head) = lhs_nonterminal(rule) else {
                    continue;
                };
                if productive.contains(&head) {
                    continue;
                }
                let derives_terminals = rule
                    .rhs()
                    .chars()
                    .all(|c| is_terminal(c) || productive.contains(&c));
                if derives_terminals {
                    productive.insert(head);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        self.rules
            .retain(|r| r.symbols().all(|c| !is_nonterminal(c) || productive.contains(&c)));
        self.reindex();
    }

    /// Recompute the terminal and nonterminal sets from the current
    /// rules; the epsilon marker always stays a terminal
    fn reindex(&mut self) {
        self.terminals.clear();
        self.nonterminals.clear();
        for rule in &self.rules {
            for c in rule.symbols() {
                if is_nonterminal(c) {
                    self.nonterminals.insert(c);
                } else if is_terminal(c) {
                    self.terminals.insert(c);
                }
            }
        }
        self.terminals.insert(self.config.epsilon);
    }

    /// The rules in stored (sorted) order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The terminal alphabet, including the epsilon marker
    pub fn terminals(&self) -> &BTreeSet<char> {
        &self.terminals
    }

    /// The nonterminal alphabet
    pub fn nonterminals(&self) -> &BTreeSet<char> {
        &self.nonterminals
    }

    /// The class this grammar was validated against
    pub fn class(&self) -> GrammarClass {
        self.class
    }

    /// The distinguished-symbol configuration
    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    /// Whether the nonterminal occurs in any current rule
    pub fn has_nonterminal(&self, symbol: char) -> bool {
        self.nonterminals.contains(&symbol)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Terminals: {{{}}}", join_sorted(&self.terminals))?;
        writeln!(f, "Nonterminals: {{{}}}", join_sorted(&self.nonterminals))?;
        write!(f, "Rules:")?;
        for (i, rule) in self.rules.iter().enumerate() {
            write!(f, "\n{}) {}", i + 1, rule)?;
        }
        Ok(())
    }
}

fn join_sorted(set: &BTreeSet<char>) -> String {
    set.iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// The left side read as a single nonterminal, when it is one
fn lhs_nonterminal(rule: &Rule) -> Option<char> {
    let mut chars = rule.lhs().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if is_nonterminal(c) => Some(c),
        _ => None,
    }
}

/// Whether the word is exactly the epsilon marker
fn word_is_epsilon(word: &str, epsilon: char) -> bool {
    word_is_symbol(word, epsilon)
}

fn word_is_symbol(word: &str, symbol: char) -> bool {
    let mut chars = word.chars();
    chars.next() == Some(symbol) && chars.next().is_none()
}
