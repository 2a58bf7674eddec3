use crate::eval::Evaluator;
use crate::symbols::NativeFn;
use cairn_core::attrs::Attributes;
use cairn_core::equality::Equality;
use cairn_core::order::ex_order;
use cairn_core::value::Value;
use std::cmp::Ordering;

/// Register equality, ordering and type predicates.
pub fn register_compare(ev: &mut Evaluator) {
    ev.register("SameQ", same_q as NativeFn, Attributes::empty());
    ev.register("Equal", equal_fn as NativeFn, Attributes::empty());
    ev.register("Order", order_fn as NativeFn, Attributes::empty());
    ev.register("Less", less_fn as NativeFn, Attributes::empty());
    ev.register("Greater", greater_fn as NativeFn, Attributes::empty());
    ev.register("LessEqual", less_equal_fn as NativeFn, Attributes::empty());
    ev.register("GreaterEqual", greater_equal_fn as NativeFn, Attributes::empty());
    ev.register("IntegerQ", integer_q as NativeFn, Attributes::empty());
}

fn same_q(_ev: &mut Evaluator, args: &[Value]) -> Option<Value> {
    let [a, b] = args else { return None };
    Some(Value::boolean(a == b))
}

// Unknown stays unevaluated.
fn equal_fn(_ev: &mut Evaluator, args: &[Value]) -> Option<Value> {
    let [a, b] = args else { return None };
    match a.is_equal(b) {
        Equality::True => Some(Value::boolean(true)),
        Equality::False => Some(Value::boolean(false)),
        Equality::Unknown => None,
    }
}

fn order_fn(_ev: &mut Evaluator, args: &[Value]) -> Option<Value> {
    let [a, b] = args else { return None };
    let n = match ex_order(a, b) {
        Ordering::Less => 1,
        Ordering::Equal => 0,
        Ordering::Greater => -1,
    };
    Some(Value::Integer(n))
}

fn numeric_cmp(args: &[Value]) -> Option<Ordering> {
    match args {
        [Value::Integer(a), Value::Integer(b)] => Some(a.cmp(b)),
        [a, b] if a.is_number() && b.is_number() => as_f64(a)?.partial_cmp(&as_f64(b)?),
        _ => None,
    }
}

fn as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Integer(n) => Some(*n as f64),
        Value::Real(x) => Some(*x),
        _ => None,
    }
}

fn less_fn(_ev: &mut Evaluator, args: &[Value]) -> Option<Value> { numeric_cmp(args).map(|o| Value::boolean(o.is_lt())) }

fn greater_fn(_ev: &mut Evaluator, args: &[Value]) -> Option<Value> { numeric_cmp(args).map(|o| Value::boolean(o.is_gt())) }

fn less_equal_fn(_ev: &mut Evaluator, args: &[Value]) -> Option<Value> { numeric_cmp(args).map(|o| Value::boolean(o.is_le())) }

fn greater_equal_fn(_ev: &mut Evaluator, args: &[Value]) -> Option<Value> { numeric_cmp(args).map(|o| Value::boolean(o.is_ge())) }

fn integer_q(_ev: &mut Evaluator, args: &[Value]) -> Option<Value> {
    let [x] = args else { return None };
    Some(Value::boolean(matches!(x, Value::Integer(_))))
}
