use serde::{Deserialize, Serialize};

/// A node of the expression tree.
///
/// Composite nodes keep their head apart from the argument list, so a composite
/// always has a head and an expression with no parts cannot be built. Cloning a
/// value is a deep copy: no two owners ever share a mutable subtree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Integer(i64),
    Real(f64),
    String(String),
    Symbol(String),
    Expr { head: Box<Value>, args: Vec<Value> },
}

impl Value {
    pub fn symbol<S: Into<String>>(s: S) -> Self { Value::Symbol(s.into()) }
    pub fn string<S: Into<String>>(s: S) -> Self { Value::String(s.into()) }
    pub fn expr(head: Value, args: Vec<Value>) -> Self { Value::Expr { head: Box::new(head), args } }
    pub fn call<S: Into<String>>(head: S, args: Vec<Value>) -> Self { Value::expr(Value::symbol(head), args) }
    pub fn boolean(b: bool) -> Self { Value::symbol(if b { "True" } else { "False" }) }
    pub fn null() -> Self { Value::symbol("Null") }

    pub fn is_atom(&self) -> bool { !matches!(self, Value::Expr { .. }) }

    pub fn is_number(&self) -> bool { matches!(self, Value::Integer(_) | Value::Real(_)) }

    pub fn is_true(&self) -> bool { matches!(self, Value::Symbol(s) if s == "True") }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Name of the head symbol when this is a composite with a symbol head.
    pub fn head_name(&self) -> Option<&str> {
        match self {
            Value::Expr { head, .. } => head.as_symbol(),
            _ => None,
        }
    }

    pub fn has_head(&self, name: &str) -> bool { self.head_name() == Some(name) }

    pub fn args(&self) -> Option<&[Value]> {
        match self {
            Value::Expr { args, .. } => Some(args.as_slice()),
            _ => None,
        }
    }

    /// Splits a composite into head and arguments; atoms come back unchanged.
    pub fn into_parts(self) -> std::result::Result<(Value, Vec<Value>), Value> {
        match self {
            Value::Expr { head, args } => Ok((*head, args)),
            other => Err(other),
        }
    }

    /// True when a symbol named `name` occurs anywhere in the tree, heads included.
    pub fn contains_symbol(&self, name: &str) -> bool {
        match self {
            Value::Symbol(s) => s == name,
            Value::Expr { head, args } => head.contains_symbol(name) || args.iter().any(|a| a.contains_symbol(name)),
            _ => false,
        }
    }
}

// Structural sameness. Reals compare by value with every NaN equal to every
// other NaN, so the relation stays reflexive and agrees with `ex_order`.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::String(a), Value::String(b)) | (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Expr { head: h1, args: a1 }, Value::Expr { head: h2, args: a2 }) => h1 == h2 && a1 == a2,
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::pretty::format_value(self))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self { Value::Integer(n) }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self { Value::Real(x) }
}
