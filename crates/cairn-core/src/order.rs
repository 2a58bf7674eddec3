use crate::value::Value;
use std::cmp::Ordering;

// Canonical order used for ORDERLESS sorting: numbers, then strings, then
// symbols, then composites. Returns Equal exactly when the values are the same.
pub fn ex_order(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => x.cmp(y),
        (Value::Real(x), Value::Real(y)) => real_cmp(*x, *y),
        // equal magnitudes put the exact integer first
        (Value::Integer(x), Value::Real(y)) => real_cmp(*x as f64, *y).then(Ordering::Less),
        (Value::Real(x), Value::Integer(y)) => real_cmp(*x, *y as f64).then(Ordering::Greater),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Symbol(x), Value::Symbol(y)) => x.cmp(y),
        (Value::Expr { head: h1, args: a1 }, Value::Expr { head: h2, args: a2 }) => {
            ex_order(h1, h2).then_with(|| {
                for (x, y) in a1.iter().zip(a2.iter()) {
                    let o = ex_order(x, y);
                    if o != Ordering::Equal {
                        return o;
                    }
                }
                a1.len().cmp(&a2.len())
            })
        }
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(v: &Value) -> u8 {
    match v {
        Value::Integer(_) | Value::Real(_) => 0,
        Value::String(_) => 1,
        Value::Symbol(_) => 2,
        Value::Expr { .. } => 3,
    }
}

fn real_cmp(x: f64, y: f64) -> Ordering {
    match x.partial_cmp(&y) {
        Some(o) => o,
        None if x.is_nan() && y.is_nan() => Ordering::Equal,
        // NaN sorts after every number
        None if x.is_nan() => Ordering::Greater,
        None => Ordering::Less,
    }
}
