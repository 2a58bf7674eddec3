use crate::eval::Evaluator;
use cairn_core::value::Value;
use cairn_rewrite::replace::replace_all;
use cairn_rewrite::rule::Rule;

impl Evaluator {
    /// Applies a `Function[...]` literal to `args`. `None` leaves the call unevaluated.
    ///
    /// `Function[body]` fills `Slot[n]` with the n-th argument; `Function[x, body]`
    /// binds the plain symbol `x` to the first argument and ignores the rest. Nested
    /// `Function` literals are not entered.
    pub(crate) fn apply_function(&mut self, function: &Value, args: &[Value]) -> Option<Value> {
        match function.args()? {
            [body] => {
                let mut out = body.clone();
                for (i, a) in args.iter().enumerate() {
                    let slot = Value::call("Slot", vec![Value::Integer(i as i64 + 1)]);
                    out = replace_all(out, &Rule::immediate(slot, a.clone()), Some("Function"), self);
                }
                Some(out)
            }
            [param @ Value::Symbol(_), body] => {
                let first = args.first()?;
                Some(replace_all(body.clone(), &Rule::immediate(param.clone(), first.clone()), Some("Function"), self))
            }
            _ => None,
        }
    }
}
