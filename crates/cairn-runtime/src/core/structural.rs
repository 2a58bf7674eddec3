use crate::eval::Evaluator;
use crate::symbols::NativeFn;
use cairn_core::attrs::Attributes;
use cairn_core::value::Value;

/// Register the structural symbols: splice markers, hold forms, pure functions,
/// rule and pattern constructors, and `Apply`.
pub fn register_structural(ev: &mut Evaluator) {
    let table = ev.symbols_mut();
    table.declare("Sequence", Attributes::empty());
    table.declare("Evaluate", Attributes::empty());
    table.declare("Hold", Attributes::HOLD_ALL);
    table.declare("Function", Attributes::HOLD_ALL);
    table.declare("Slot", Attributes::NHOLD_ALL);
    table.declare("Rule", Attributes::empty());
    table.declare("RuleDelayed", Attributes::HOLD_REST);
    table.declare("Condition", Attributes::HOLD_ALL);
    table.declare("Pattern", Attributes::HOLD_FIRST);
    ev.register("Apply", apply_fn as NativeFn, Attributes::empty());
}

/// `Apply[f, e]` swaps the head of `e` for `f`. A non-symbol `f` or an atomic `e` yields `e`.
fn apply_fn(_ev: &mut Evaluator, args: &[Value]) -> Option<Value> {
    let [f, e] = args else { return None };
    match (f, e) {
        (Value::Symbol(_), Value::Expr { args, .. }) => Some(Value::expr(f.clone(), args.clone())),
        _ => Some(e.clone()),
    }
}
