use chomsky_gram::{Grammar, GrammarClass, GrammarError, Rule};
use std::collections::BTreeSet;
use std::io::Write;

fn rules(specs: &[&str]) -> Vec<Rule> {
    specs.iter().map(|s| Rule::parse(s).unwrap()).collect()
}

#[test]
fn test_load_from_file() {
    // Comments and blank lines must be ignored
    let grammar_content = r#"
       # Example context-free grammar
       S -> a
       S -> A

       A -> AB
       B -> b
       "#;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(grammar_content.as_bytes()).unwrap();

    let grammar = Grammar::from_file(file.path(), GrammarClass::ContextFree).unwrap();

    assert_eq!(grammar.rules().len(), 4);
    assert!(grammar.has_nonterminal('A'));
    assert!(grammar.has_nonterminal('B'));
    assert_eq!(grammar.terminals(), &BTreeSet::from(['_', 'a', 'b']));
}

#[test]
fn test_load_from_file_rejects_bad_rule() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"S -> a\nnot a rule\n").unwrap();

    let result = Grammar::from_file(file.path(), GrammarClass::ContextFree);
    assert!(matches!(result, Err(GrammarError::InvalidRuleSyntax(_))));
}

#[test]
fn test_full_simplification_pipeline() {
    // D is unreachable, A is unproductive; both passes together leave a
    // grammar whose every nonterminal is reachable and productive
    let mut grammar = Grammar::new(
        GrammarClass::ContextFree,
        rules(&["S -> a", "S -> A", "A -> AB", "B -> b", "D -> d"]),
    )
    .unwrap();

    grammar.remove_unreachable();
    grammar.remove_unproductive();

    assert_eq!(grammar.rules(), rules(&["S -> a", "B -> b"]));
    assert_eq!(grammar.terminals(), &BTreeSet::from(['_', 'a', 'b']));
    assert_eq!(grammar.nonterminals(), &BTreeSet::from(['B', 'S']));

    // Re-running either pass is a no-op once stabilized
    let stabilized = grammar.clone();
    grammar.remove_unreachable();
    grammar.remove_unproductive();
    assert_eq!(grammar, stabilized);
}

#[test]
fn test_classification_across_hierarchy() {
    // Right-linear rules are accepted by every class that contains them
    let specs = &["S -> aS", "S -> b"];

    assert!(Grammar::new(GrammarClass::Unrestricted, rules(specs)).is_ok());
    assert!(Grammar::new(GrammarClass::NonContracting, rules(specs)).is_ok());
    assert!(Grammar::new(GrammarClass::ContextFree, rules(specs)).is_ok());
    assert!(Grammar::new(GrammarClass::RightLinear, rules(specs)).is_ok());

    // S -> b still satisfies the left-linear shape, so the existential
    // check accepts; the strict variant rejects on S -> aS
    assert!(Grammar::new(GrammarClass::LeftLinear, rules(specs)).is_ok());
    assert!(Grammar::new_strict(GrammarClass::LeftLinear, rules(specs)).is_err());
    assert!(Grammar::new_strict(GrammarClass::RightLinear, rules(specs)).is_ok());
}

#[test]
fn test_json_rendering() {
    let grammar = Grammar::new(GrammarClass::ContextFree, rules(&["S -> a"])).unwrap();
    let value = serde_json::to_value(&grammar).unwrap();

    assert_eq!(value["class"], "context-free");
    assert_eq!(value["rules"][0]["lhs"], "S");
    assert_eq!(value["rules"][0]["rhs"], "a");
    assert_eq!(value["config"]["axiom"], "S");
}

#[test]
fn test_display_matches_stored_order() {
    let grammar = Grammar::new(
        GrammarClass::ContextFree,
        rules(&["B -> b", "S -> Bb", "A -> a"]),
    )
    .unwrap();

    let rendered = grammar.to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "Terminals: {_, a, b}");
    assert_eq!(lines[1], "Nonterminals: {A, B, S}");
    assert_eq!(lines[2], "Rules:");
    assert_eq!(lines[3], "1) S -> Bb");
    assert_eq!(lines[4], "2) A -> a");
    assert_eq!(lines[5], "3) B -> b");
}
