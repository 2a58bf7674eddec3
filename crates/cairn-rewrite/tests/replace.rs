use cairn_core::{Attributes, Value};
use cairn_parser::parse;
use cairn_rewrite as rw;
use cairn_rewrite::{AttributeLookup, Bindings, MatchOracle, PatternMatcher, RewriteContext, Rule, RuleSet};
use std::collections::HashMap;

fn sym(s: &str) -> Value { Value::Symbol(s.into()) }
fn int(n: i64) -> Value { Value::Integer(n) }
fn call(h: &str, args: Vec<Value>) -> Value { Value::call(h, args) }

/// Just enough of a host to decide `Greater` guards on integers.
struct TestCtx {
    attrs: HashMap<String, Attributes>,
    matcher: PatternMatcher,
    evals: usize,
}

impl TestCtx {
    fn new() -> Self {
        let mut attrs = HashMap::new();
        attrs.insert("Plus".to_string(), Attributes::FLAT | Attributes::ORDERLESS);
        attrs.insert("Times".to_string(), Attributes::FLAT | Attributes::ORDERLESS);
        attrs.insert("Dot".to_string(), Attributes::FLAT);
        Self { attrs, matcher: PatternMatcher, evals: 0 }
    }
}

impl RewriteContext for TestCtx {
    fn lookup(&self) -> &dyn AttributeLookup { &self.attrs }
    fn oracle(&self) -> &dyn MatchOracle { &self.matcher }
    fn eval(&mut self, v: Value) -> Value {
        self.evals += 1;
        match (v.head_name(), v.args()) {
            (Some("Greater"), Some([Value::Integer(a), Value::Integer(b)])) => Value::boolean(a > b),
            _ => v,
        }
    }
}

fn rule(src: &str) -> Rule { Rule::from_value(&parse(src).unwrap()).unwrap() }

#[test]
fn replace_pd_substitutes_heads_and_args() {
    let b: Bindings = vec![("x".to_string(), int(2)), ("h".to_string(), sym("g"))].into_iter().collect();
    assert_eq!(rw::replace_pd(parse("h[x, y, f[x]]").unwrap(), &b), parse("g[2, y, f[2]]").unwrap());
    let untouched = parse("k[y]").unwrap();
    assert_eq!(rw::replace_pd(untouched.clone(), &b), untouched);
}

#[test]
fn replace_pd_inserts_bindings_without_rescanning() {
    let b: Bindings = vec![("x".to_string(), sym("y")), ("y".to_string(), int(1))].into_iter().collect();
    assert_eq!(rw::replace_pd(parse("f[x, y]").unwrap(), &b), parse("f[y, 1]").unwrap());
}

#[test]
fn replace_matches_whole_subject_only() {
    let mut ctx = TestCtx::new();
    let r = rule("f[x_] -> g[x]");
    assert_eq!(rw::replace(parse("f[1]").unwrap(), &r, &mut ctx), (parse("g[1]").unwrap(), true));
    let inner = parse("h[f[1]]").unwrap();
    assert_eq!(rw::replace(inner.clone(), &r, &mut ctx), (inner, false));
}

#[test]
fn guards_try_later_candidates() {
    let mut ctx = TestCtx::new();
    let r = rule("f[a___, x_, b___] :> x /; x > 2");
    let (out, hit) = rw::replace(parse("f[1, 5, 3]").unwrap(), &r, &mut ctx);
    assert!(hit);
    assert_eq!(out, int(5));
    let (out, hit) = rw::replace(parse("f[1, 2]").unwrap(), &r, &mut ctx);
    assert!(!hit);
    assert_eq!(out, parse("f[1, 2]").unwrap());
}

#[test]
fn lhs_condition_guards_too() {
    let mut ctx = TestCtx::new();
    let r = rule("Condition[f[x_], x > 0] -> pos");
    assert_eq!(rw::replace(parse("f[3]").unwrap(), &r, &mut ctx).0, sym("pos"));
    assert!(!rw::replace(parse("f[-3]").unwrap(), &r, &mut ctx).1);
}

#[test]
fn replace_all_stops_at_matches_and_restricted_heads() {
    let mut ctx = TestCtx::new();
    let r = rule("f[x_] -> x");
    assert_eq!(rw::replace_all(parse("g[f[1], f[f[2]]]").unwrap(), &r, None, &mut ctx), parse("g[1, f[2]]").unwrap());
    let held = parse("g[f[1], Function[f[2]]]").unwrap();
    assert_eq!(rw::replace_all(held, &r, Some("Function"), &mut ctx), parse("g[1, Function[f[2]]]").unwrap());
}

#[test]
fn replace_all_rewrites_heads() {
    let mut ctx = TestCtx::new();
    assert_eq!(rw::replace_all(parse("f[f]").unwrap(), &rule("f -> g"), None, &mut ctx), parse("g[g]").unwrap());
}

#[test]
fn replace_all_rule_lists_take_first_applicable() {
    let mut ctx = TestCtx::new();
    let rules = RuleSet::from_value(&parse("{a -> 1, a -> 2, b -> 3}").unwrap()).unwrap();
    assert_eq!(rw::replace_all_rules(parse("{a, b, c}").unwrap(), rules.as_slice(), None, &mut ctx), parse("{1, 3, c}").unwrap());
}

#[test]
fn orderless_submatch_keeps_leftovers() {
    let mut ctx = TestCtx::new();
    let out = rw::replace_all(parse("Plus[a, c, b]").unwrap(), &rule("Plus[a, b] -> d"), None, &mut ctx);
    assert_eq!(out, call("Plus", vec![sym("d"), sym("c")]));
}

#[test]
fn flat_replace_keeps_surroundings_in_order() {
    let mut ctx = TestCtx::new();
    let subject = parse("Dot[a, b, c, d]").unwrap();
    let (out, hit) = rw::flat_replace(subject.clone(), &parse("Dot[b, c]").unwrap(), &sym("x"), false, &mut ctx);
    assert!(hit);
    assert_eq!(out, parse("Dot[a, x, d]").unwrap());
    let (out, hit) = rw::flat_replace(subject.clone(), &parse("Dot[c, b]").unwrap(), &sym("x"), false, &mut ctx);
    assert!(!hit);
    assert_eq!(out, subject);
}

#[test]
fn flat_replace_orderless_picks_any_subset() {
    let mut ctx = TestCtx::new();
    let subject = parse("Times[a, b, c]").unwrap();
    let (out, hit) = rw::flat_replace(subject, &parse("Times[c, a]").unwrap(), &sym("x"), true, &mut ctx);
    assert!(hit);
    assert_eq!(out, call("Times", vec![sym("x"), sym("b")]));
}

#[test]
fn replace_repeated_reaches_fixed_point() {
    let mut ctx = TestCtx::new();
    let rules = RuleSet::from_value(&parse("{f[x_] -> x}").unwrap()).unwrap();
    assert_eq!(rw::replace_repeated(parse("f[f[f[1]]]").unwrap(), rules.as_slice(), None, &mut ctx), int(1));
    let looping = RuleSet::from_value(&parse("{a -> b, b -> a}").unwrap()).unwrap();
    assert_eq!(rw::replace_repeated(sym("a"), looping.as_slice(), Some(3), &mut ctx), sym("b"));
}

#[test]
fn rules_round_trip_and_upsert() {
    let r = rule("f[x_] :> x");
    assert_eq!(r.to_value(), parse("f[x_] :> x").unwrap());
    let mut set = RuleSet::new();
    set.upsert(rule("f[x_] -> 1"));
    set.upsert(rule("g[x_] -> 2"));
    set.upsert(rule("f[x_] -> 3"));
    assert_eq!(set.len(), 2);
    assert_eq!(set.as_slice()[0].rhs, int(3));
    assert!(RuleSet::from_value(&parse("{a -> 1, 2}").unwrap()).is_none());
}
