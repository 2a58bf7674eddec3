//! Symbolic equality.
//!
//! Unlike structural sameness (`==` on [`Value`]), symbolic equality can be
//! undecided. A composite never reports [`Equality::False`] on its own: two
//! structurally different composites may still be algebraically equal (think of
//! unevaluated commutative forms), so any child mismatch collapses to
//! [`Equality::Unknown`].

use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Equality {
    True,
    False,
    Unknown,
}

impl Equality {
    fn from_bool(b: bool) -> Self { if b { Equality::True } else { Equality::False } }
}

impl Value {
    pub fn is_equal(&self, other: &Value) -> Equality {
        match (self, other) {
            (Value::Expr { head: h1, args: a1 }, Value::Expr { head: h2, args: a2 }) => {
                if a1.len() != a2.len() {
                    return Equality::Unknown;
                }
                let heads = std::iter::once((&**h1, &**h2));
                for (x, y) in heads.chain(a1.iter().zip(a2.iter())) {
                    if x.is_equal(y) != Equality::True {
                        return Equality::Unknown;
                    }
                }
                Equality::True
            }
            (Value::Expr { .. }, _) | (_, Value::Expr { .. }) => Equality::Unknown,
            (a, b) => atom_equal(a, b),
        }
    }
}

fn atom_equal(a: &Value, b: &Value) -> Equality {
    match (a, b) {
        (Value::Integer(x), Value::Integer(y)) => Equality::from_bool(x == y),
        (Value::Real(x), Value::Real(y)) => Equality::from_bool(x == y),
        (Value::Integer(x), Value::Real(y)) | (Value::Real(y), Value::Integer(x)) => {
            Equality::from_bool(*x as f64 == *y)
        }
        (Value::String(x), Value::String(y)) => Equality::from_bool(x == y),
        (Value::Symbol(x), Value::Symbol(y)) if x == y => Equality::True,
        (Value::Symbol(x), Value::Symbol(y)) if is_boolean(x) && is_boolean(y) => Equality::False,
        // an unassigned symbol may stand for anything
        (Value::Symbol(_), _) | (_, Value::Symbol(_)) => Equality::Unknown,
        // numbers and strings never coincide
        _ => Equality::False,
    }
}

fn is_boolean(name: &str) -> bool { name == "True" || name == "False" }
