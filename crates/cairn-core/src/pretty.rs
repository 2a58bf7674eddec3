use crate::value::Value;
use std::collections::HashMap;

/// Custom formatter for one head symbol. Receives the arguments and returns
/// `None` to fall back to the default `head[args]` form.
pub type FormatFn = fn(&Printer, &[Value]) -> Option<String>;

/// Stringifier with per-head overrides.
#[derive(Clone, Default)]
pub struct Printer {
    formatters: HashMap<String, FormatFn>,
}

impl Printer {
    pub fn new() -> Self { Self::default() }

    pub fn register(&mut self, head: &str, f: FormatFn) {
        self.formatters.insert(head.to_string(), f);
    }

    pub fn format(&self, v: &Value) -> String {
        match v {
            Value::Expr { head, args } => {
                if let Some(f) = head.as_symbol().and_then(|h| self.formatters.get(h)) {
                    if let Some(s) = f(self, args) {
                        return s;
                    }
                }
                let h = self.format(head);
                let a: Vec<String> = args.iter().map(|x| self.format(x)).collect();
                format!("{}[{}]", h, a.join(", "))
            }
            atom => format_atom(atom),
        }
    }

    /// Formats every argument and joins them with `sep`.
    pub fn join(&self, args: &[Value], sep: &str) -> String {
        args.iter().map(|x| self.format(x)).collect::<Vec<_>>().join(sep)
    }
}

/// FullForm rendering with no custom formatters.
pub fn format_value(v: &Value) -> String { Printer::new().format(v) }

fn format_atom(v: &Value) -> String {
    match v {
        Value::Integer(n) => n.to_string(),
        Value::Real(f) => {
            if f.is_finite() && f.fract() == 0.0 { format!("{:.1}", f) } else { f.to_string() }
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Symbol(s) => s.clone(),
        Value::Expr { .. } => format_value(v),
    }
}
