use crate::eval::Evaluator;
use crate::symbols::NativeFn;
use cairn_core::attrs::Attributes;
use cairn_core::value::Value;
use cairn_rewrite::lookup::AttributeLookup;
use cairn_rewrite::rule::Rule;
use tracing::debug;

/// Register assignment and attribute management: `Set`, `SetDelayed`,
/// `SetAttributes`, `Attributes`, `ClearAll`.
pub fn register_defs(ev: &mut Evaluator) {
    ev.register("Set", set_fn as NativeFn, Attributes::HOLD_FIRST);
    ev.register("SetDelayed", set_delayed_fn as NativeFn, Attributes::HOLD_ALL);
    ev.register("SetAttributes", set_attributes_fn as NativeFn, Attributes::HOLD_FIRST);
    ev.register("Attributes", attributes_fn as NativeFn, Attributes::HOLD_ALL);
    ev.register("ClearAll", clear_all_fn as NativeFn, Attributes::HOLD_ALL);
}

fn define(ev: &mut Evaluator, rule: Rule) -> bool {
    match ev.symbols_mut().define(rule) {
        Ok(()) => true,
        Err(e) => {
            debug!(error = %e, "definition rejected");
            false
        }
    }
}

fn set_fn(ev: &mut Evaluator, args: &[Value]) -> Option<Value> {
    let [lhs, rhs] = args else { return None };
    define(ev, Rule::immediate(lhs.clone(), rhs.clone())).then(|| rhs.clone())
}

fn set_delayed_fn(ev: &mut Evaluator, args: &[Value]) -> Option<Value> {
    let [lhs, rhs] = args else { return None };
    define(ev, Rule::delayed(lhs.clone(), rhs.clone())).then(Value::null)
}

fn set_attributes_fn(ev: &mut Evaluator, args: &[Value]) -> Option<Value> {
    let [Value::Symbol(name), wanted] = args else { return None };
    let names: Vec<&Value> = match wanted.head_name() {
        Some("List") => wanted.args()?.iter().collect(),
        _ => vec![wanted],
    };
    let mut attrs = Attributes::empty();
    for n in names {
        attrs |= Attributes::from_attr_name(n.as_symbol()?)?;
    }
    ev.symbols_mut().set_attributes(name, attrs);
    Some(Value::null())
}

fn attributes_fn(ev: &mut Evaluator, args: &[Value]) -> Option<Value> {
    let [Value::Symbol(name)] = args else { return None };
    let names = ev.symbols().attributes_of(name).names();
    Some(Value::call("List", names.into_iter().map(Value::symbol).collect()))
}

fn clear_all_fn(ev: &mut Evaluator, args: &[Value]) -> Option<Value> {
    let names: Vec<&str> = args.iter().map(Value::as_symbol).collect::<Option<_>>()?;
    for n in names {
        ev.symbols_mut().clear_all(n);
    }
    Some(Value::null())
}
