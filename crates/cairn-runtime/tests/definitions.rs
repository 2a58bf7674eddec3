use cairn_core::Value;
use cairn_parser::Parser;
use cairn_runtime::{Evaluator, RuleSource};

fn run(ev: &mut Evaluator, src: &str) -> Value {
    let mut p = Parser::from_source(src);
    let vals = p.parse_all().expect("parse");
    vals.into_iter().fold(Value::null(), |_, v| ev.eval(v))
}

fn eval_one(src: &str) -> String {
    let mut ev = Evaluator::new();
    let v = run(&mut ev, src);
    ev.format(&v)
}

#[test]
fn down_values_rewrite_calls() {
    assert_eq!(eval_one("f[x_] := x^2; f[3]"), "9");
    assert_eq!(eval_one("fact[0] = 1; fact[n_] := n * fact[n - 1]; fact[5]"), "120");
    assert_eq!(eval_one("f[x_, y_] := y; f[1]"), "f[1]");
}

#[test]
fn own_values_rewrite_symbols() {
    assert_eq!(eval_one("x = 5; x + 1"), "6");
    assert_eq!(eval_one("a := b; b = 3; a"), "3");
    assert_eq!(eval_one("x = 1; x = 2; x"), "2");
}

#[test]
fn set_returns_rhs_and_set_delayed_returns_null() {
    assert_eq!(eval_one("y = 1 + 2"), "3");
    assert_eq!(eval_one("g[x_] := x"), "Null");
    assert_eq!(eval_one("Set[1, 2]"), "Set[1, 2]");
}

#[test]
fn guarded_definitions_fall_through() {
    assert_eq!(eval_one("g[x_] := pos /; x > 0; g[x_] := nonpos; {g[2], g[-1]}"), "{pos, nonpos}");
    assert_eq!(eval_one("h[x_] := big /; x > 10; h[3]"), "h[3]");
}

#[test]
fn attributes_are_managed_per_symbol() {
    assert_eq!(eval_one("Attributes[Plus]"), "{Flat, Orderless}");
    assert_eq!(eval_one("Attributes[Hold]"), "{HoldAll}");
    assert_eq!(eval_one("SetAttributes[h, {Flat, HoldAll}]; Attributes[h]"), "{Flat, HoldAll}");
    assert_eq!(eval_one("SetAttributes[h, HoldFirst]; h[1 + 1, 2 + 2]"), "h[(1 + 1), 4]");
    assert_eq!(eval_one("SetAttributes[h, Bogus]"), "SetAttributes[h, Bogus]");
}

#[test]
fn clear_all_drops_definitions() {
    assert_eq!(eval_one("SetAttributes[h, Flat]; h[x_] := 1; ClearAll[h]; {Attributes[h], h[2]}"), "{{}, h[2]}");
    let mut ev = Evaluator::new();
    run(&mut ev, "SetAttributes[Plus, HoldAll]; ClearAll[Plus]");
    let r = run(&mut ev, "Attributes[Plus]");
    assert_eq!(ev.format(&r), "{Flat, Orderless}");
}

#[test]
fn user_rules_overlay_builtins() {
    let mut ev = Evaluator::new();
    run(&mut ev, "Plus[a, b] := c");
    assert!(matches!(ev.symbols().rule_source("Plus"), Some(RuleSource::Overlaid { .. })));
    let r = run(&mut ev, "b + a");
    assert_eq!(ev.format(&r), "c");
    let r = run(&mut ev, "1 + 2");
    assert_eq!(ev.format(&r), "3");
    assert!(matches!(ev.symbols().rule_source("Apply"), Some(RuleSource::Builtin(_))));
    assert!(ev.symbols().rule_source("nothing").is_none());
}

#[test]
fn replace_family() {
    assert_eq!(eval_one("Replace[f[2], f[x_] -> x + 1]"), "3");
    assert_eq!(eval_one("Replace[g[f[2]], f[x_] -> x]"), "g[f[2]]");
    assert_eq!(eval_one("Replace[5, {6 -> a, 5 -> b}]"), "b");
    assert_eq!(eval_one("ReplaceAll[g[f[2], f[3]], f[x_] -> x]"), "g[2, 3]");
    assert_eq!(eval_one("ReplaceRepeated[f[f[f[1]]], f[x_] -> x]"), "1");
    assert_eq!(eval_one("ReplaceAll[{1, 5, 20}, x_Integer :> big /; x > 4]"), "{1, big, big}");
    assert_eq!(eval_one("Replace[f[1], 7]"), "Replace[f[1], 7]");
}

#[test]
fn comparisons_and_predicates() {
    assert_eq!(eval_one("Order[a, b]"), "1");
    assert_eq!(eval_one("Order[b, a]"), "-1");
    assert_eq!(eval_one("Order[1, a]"), "1");
    assert_eq!(eval_one("Order[x, x]"), "0");
    assert_eq!(eval_one("1 === 1"), "True");
    assert_eq!(eval_one("SameQ[1, 1.0]"), "False");
    assert_eq!(eval_one("IntegerQ[3]"), "True");
    assert_eq!(eval_one("IntegerQ[x]"), "False");
    assert_eq!(eval_one("{2 < 3, 3 <= 3, 2.5 > 3, 4 >= 1}"), "{True, True, False, True}");
    assert_eq!(eval_one("x < 3"), "Less[x, 3]");
}

#[test]
fn arithmetic_folds() {
    assert_eq!(eval_one("Plus[]"), "0");
    assert_eq!(eval_one("Times[]"), "1");
    assert_eq!(eval_one("Plus[x]"), "x");
    assert_eq!(eval_one("0 * x"), "0");
    assert_eq!(eval_one("2 * 3.5"), "7.0");
    assert_eq!(eval_one("2^10"), "1024");
    assert_eq!(eval_one("a - a"), "(a + (-1 * a))");
}
