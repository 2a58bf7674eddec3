use crate::eval::Evaluator;
use crate::symbols::NativeFn;
use cairn_core::attrs::Attributes;
use cairn_core::value::Value;

/// Register `Plus`, `Times` and `Power`.
pub fn register_arith(ev: &mut Evaluator) {
    let ac = Attributes::FLAT | Attributes::ORDERLESS;
    ev.register("Plus", plus_fn as NativeFn, ac);
    ev.register("Times", times_fn as NativeFn, ac);
    ev.register("Power", power_fn as NativeFn, Attributes::empty());
}

#[derive(Debug, Clone, Copy)]
enum Num {
    I(i64),
    R(f64),
}

impl Num {
    fn of(v: &Value) -> Option<Num> {
        match v {
            Value::Integer(n) => Some(Num::I(*n)),
            Value::Real(x) => Some(Num::R(*x)),
            _ => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Num::I(n) => n as f64,
            Num::R(x) => x,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Num::I(n) => Value::Integer(n),
            Num::R(x) => Value::Real(x),
        }
    }

    fn add(self, other: Num) -> Num {
        match (self, other) {
            (Num::I(a), Num::I(b)) => a.checked_add(b).map_or(Num::R(a as f64 + b as f64), Num::I),
            (a, b) => Num::R(a.as_f64() + b.as_f64()),
        }
    }

    fn mul(self, other: Num) -> Num {
        match (self, other) {
            (Num::I(a), Num::I(b)) => a.checked_mul(b).map_or(Num::R(a as f64 * b as f64), Num::I),
            (a, b) => Num::R(a.as_f64() * b.as_f64()),
        }
    }
}

/// Folds the numeric arguments into one leading term and keeps the rest in order.
/// An exact `identity` term is dropped when symbolic terms remain. A fold that
/// would produce an infinite or NaN real is not performed.
fn fold(head: &str, args: &[Value], identity: i64, op: fn(Num, Num) -> Num) -> Option<Value> {
    match args {
        [] => return Some(Value::Integer(identity)),
        [x] => return Some(x.clone()),
        _ => {}
    }
    let mut acc: Option<Num> = None;
    let mut rest = Vec::new();
    for a in args {
        match Num::of(a) {
            Some(n) => acc = Some(acc.map_or(n, |m| op(m, n))),
            None => rest.push(a.clone()),
        }
    }
    if matches!(acc, Some(Num::R(x)) if !x.is_finite()) {
        return None;
    }
    let mut out = Vec::with_capacity(rest.len() + 1);
    match acc {
        Some(Num::I(n)) if n == identity && !rest.is_empty() => {}
        Some(n) => out.push(n.into_value()),
        None => {}
    }
    out.extend(rest);
    let result = match out.len() {
        0 => Value::Integer(identity),
        1 => out.pop().unwrap_or(Value::Integer(identity)),
        _ => Value::call(head, out),
    };
    match &result {
        Value::Expr { args: new_args, .. } if new_args.as_slice() == args => None,
        _ => Some(result),
    }
}

fn plus_fn(_ev: &mut Evaluator, args: &[Value]) -> Option<Value> { fold("Plus", args, 0, Num::add) }

fn times_fn(_ev: &mut Evaluator, args: &[Value]) -> Option<Value> {
    if args.iter().any(|a| matches!(a, Value::Integer(0))) {
        return Some(Value::Integer(0));
    }
    fold("Times", args, 1, Num::mul)
}

fn power_fn(_ev: &mut Evaluator, args: &[Value]) -> Option<Value> {
    let [base, exp] = args else { return None };
    match (Num::of(base), exp) {
        (Some(Num::I(0)), Value::Integer(0)) => None,
        (_, Value::Integer(0)) => Some(Value::Integer(1)),
        (_, Value::Integer(1)) => Some(base.clone()),
        (Some(Num::I(1)), Value::Integer(_)) => Some(Value::Integer(1)),
        (Some(Num::I(b)), Value::Integer(e)) if *e > 0 => {
            let folded = u32::try_from(*e).ok().and_then(|e| b.checked_pow(e));
            match folded {
                Some(n) => Some(Value::Integer(n)),
                None => finite((b as f64).powf(*e as f64)),
            }
        }
        (Some(Num::R(b)), Value::Integer(e)) => finite(b.powf(*e as f64)),
        (Some(b), Value::Real(e)) => finite(b.as_f64().powf(*e)),
        _ => None,
    }
}

fn finite(x: f64) -> Option<Value> { x.is_finite().then_some(Value::Real(x)) }
