use cairn_core::{format_value, CairnError, Value};
use cairn_parser::{parse, Parser};

fn sym(s: &str) -> Value { Value::Symbol(s.into()) }
fn int(n: i64) -> Value { Value::Integer(n) }
fn call(h: &str, args: Vec<Value>) -> Value { Value::call(h, args) }

#[test]
fn full_form_calls() {
    assert_eq!(parse("foo[1, bar[x], \"s\"]").unwrap(), call("foo", vec![int(1), call("bar", vec![sym("x")]), Value::string("s")]));
    assert_eq!(parse("foo[]").unwrap(), call("foo", vec![]));
    assert_eq!(parse("f[1][2]").unwrap(), Value::expr(call("f", vec![int(1)]), vec![int(2)]));
}

#[test]
fn infix_arithmetic() {
    assert_eq!(parse("1 + 2 + x").unwrap(), call("Plus", vec![int(1), int(2), sym("x")]));
    assert_eq!(parse("a - b").unwrap(), call("Plus", vec![sym("a"), call("Times", vec![int(-1), sym("b")])]));
    assert_eq!(parse("2y").unwrap(), call("Times", vec![int(2), sym("y")]));
    assert_eq!(parse("x^2").unwrap(), call("Power", vec![sym("x"), int(2)]));
    assert_eq!(parse("a / b").unwrap(), call("Times", vec![sym("a"), call("Power", vec![sym("b"), int(-1)])]));
    assert_eq!(parse("-2").unwrap(), int(-2));
    assert_eq!(parse("2.5").unwrap(), Value::Real(2.5));
}

#[test]
fn slots_and_functions() {
    let body = call("Plus", vec![int(1), call("Slot", vec![int(1)]), call("Times", vec![int(2), call("Slot", vec![int(2)])])]);
    assert_eq!(parse("Function[1 + # + 2#2]").unwrap(), call("Function", vec![body.clone()]));
    assert_eq!(parse("(1 + # + 2#2)&").unwrap(), call("Function", vec![body]));
    assert_eq!(parse("#^2&[3]").unwrap(), Value::expr(call("Function", vec![call("Power", vec![call("Slot", vec![int(1)]), int(2)])]), vec![int(3)]));
}

#[test]
fn patterns_and_rules() {
    let x_ = call("Pattern", vec![sym("x"), call("Blank", vec![])]);
    assert_eq!(parse("f[x_] -> x").unwrap(), call("Rule", vec![call("f", vec![x_.clone()]), sym("x")]));
    assert_eq!(parse("x__Integer").unwrap(), call("Pattern", vec![sym("x"), call("BlankSequence", vec![sym("Integer")])]));
    assert_eq!(parse("___").unwrap(), call("BlankNullSequence", vec![]));
    assert_eq!(
        parse("x_ :> x /; x > 0").unwrap(),
        call("RuleDelayed", vec![x_.clone(), call("Condition", vec![sym("x"), call("Greater", vec![sym("x"), int(0)])])])
    );
    assert_eq!(parse("a === b").unwrap(), call("SameQ", vec![sym("a"), sym("b")]));
}

#[test]
fn apply_and_lists() {
    assert_eq!(parse("bar @@ foo[a, b]").unwrap(), call("Apply", vec![sym("bar"), call("foo", vec![sym("a"), sym("b")])]));
    assert_eq!(parse("{1, 2}").unwrap(), call("List", vec![int(1), int(2)]));
}

#[test]
fn parse_all_splits_statements() {
    let mut p = Parser::from_source("x = 1; (* note *) f[x]");
    let vals = p.parse_all().unwrap();
    assert_eq!(vals.len(), 2);
    assert_eq!(format_value(&vals[1]), "f[x]");
}

#[test]
fn reports_position_on_error() {
    match parse("f[1, ") {
        Err(CairnError::Parse { position, .. }) => assert_eq!(position, 5),
        other => panic!("expected parse error, got {:?}", other),
    }
    assert!(parse("f[1] )").is_err());
}
