use cairn_core::{Attributes, Value};
use cairn_parser::parse;
use cairn_rewrite::{Bindings, MatchOracle, PatternMatcher};
use std::collections::HashMap;

fn sym(s: &str) -> Value { Value::Symbol(s.into()) }
fn int(n: i64) -> Value { Value::Integer(n) }
fn call(h: &str, args: Vec<Value>) -> Value { Value::call(h, args) }

fn attrs() -> HashMap<String, Attributes> {
    let mut m = HashMap::new();
    m.insert("Plus".to_string(), Attributes::FLAT | Attributes::ORDERLESS);
    m
}

fn first(subject: &str, pattern: &str) -> Option<Bindings> {
    PatternMatcher.match_pattern(&parse(subject).unwrap(), &parse(pattern).unwrap(), &Bindings::new(), &attrs())
}

#[test]
fn blanks_and_heads() {
    assert!(first("f[5]", "f[_]").is_some());
    assert!(first("f[5]", "f[_Integer]").is_some());
    assert!(first("f[\"s\"]", "f[_Integer]").is_none());
    assert!(first("f[g[1]]", "f[_g]").is_some());
    assert!(first("f[1, 2]", "f[_]").is_none());
    assert!(first("g[1]", "f[_]").is_none());
}

#[test]
fn named_patterns_bind_and_agree() {
    let b = first("f[1, 2]", "f[x_, y_]").unwrap();
    assert_eq!(b.get("x"), Some(&int(1)));
    assert_eq!(b.get("y"), Some(&int(2)));
    assert!(first("f[1, 1]", "f[x_, x_]").is_some());
    assert!(first("f[1, 2]", "f[x_, x_]").is_none());
}

#[test]
fn pattern_in_head_position() {
    let b = first("g[3]", "h_[x_]").unwrap();
    assert_eq!(b.get("h"), Some(&sym("g")));
    assert_eq!(b.get("x"), Some(&int(3)));
}

#[test]
fn sequences_bind_as_sequence() {
    let b = first("f[1, 2, 3]", "f[x_, rest__]").unwrap();
    assert_eq!(b.get("rest"), Some(&call("Sequence", vec![int(2), int(3)])));
    let b = first("f[1]", "f[x_, rest___]").unwrap();
    assert_eq!(b.get("rest"), Some(&call("Sequence", vec![])));
    assert!(first("f[1]", "f[x_, rest__]").is_none());
    assert!(first("f[1, \"a\"]", "f[xs__Integer]").is_none());
}

#[test]
fn alternatives_and_hold_pattern() {
    assert!(first("a", "Alternatives[a, b]").is_some());
    assert!(first("b", "Alternatives[a, b]").is_some());
    assert!(first("c", "Alternatives[a, b]").is_none());
    assert!(first("f[1]", "HoldPattern[f[_]]").is_some());
}

#[test]
fn orderless_heads_match_as_multisets() {
    let b = first("Plus[1, a]", "Plus[x_Symbol, y_Integer]").unwrap();
    assert_eq!(b.get("x"), Some(&sym("a")));
    assert_eq!(b.get("y"), Some(&int(1)));
    let b = first("Plus[a, 1, b]", "Plus[n_Integer, rest__]").unwrap();
    assert_eq!(b.get("rest"), Some(&call("Sequence", vec![sym("a"), sym("b")])));
}

#[test]
fn iterate_yields_every_assignment_then_stays_done() {
    let subject = parse("f[1, 2]").unwrap();
    let pattern = parse("f[a___, b___]").unwrap();
    let mut it = PatternMatcher.iterate(&subject, &pattern, &Bindings::new(), &attrs());
    let mut seen = Vec::new();
    for b in it.by_ref() {
        seen.push(b.get("a").cloned());
    }
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0], Some(call("Sequence", vec![])));
    assert!(it.next().is_none());
    assert!(it.next().is_none());
}

#[test]
fn iterate_extends_given_bindings() {
    let seed: Bindings = vec![("x".to_string(), int(2))].into_iter().collect();
    let subject = parse("f[1, 2]").unwrap();
    let pattern = parse("f[_, x_]").unwrap();
    assert_eq!(PatternMatcher.iterate(&subject, &pattern, &seed, &attrs()).count(), 1);
    let pattern = parse("f[x_, _]").unwrap();
    assert_eq!(PatternMatcher.iterate(&subject, &pattern, &seed, &attrs()).count(), 0);
}
