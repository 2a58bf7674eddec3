use crate::eval::Evaluator;
use crate::symbols::NativeFn;
use cairn_core::attrs::Attributes;
use cairn_core::value::Value;
use cairn_rewrite::replace::{replace, replace_all_rules, replace_repeated};
use cairn_rewrite::rule::RuleSet;

/// Register the replacement entry points. The second argument is a rule or a list of rules.
pub fn register_rules(ev: &mut Evaluator) {
    ev.register("Replace", replace_fn as NativeFn, Attributes::empty());
    ev.register("ReplaceAll", replace_all_fn as NativeFn, Attributes::empty());
    ev.register("ReplaceRepeated", replace_repeated_fn as NativeFn, Attributes::empty());
}

fn split(args: &[Value]) -> Option<(Value, RuleSet)> {
    let [subject, rules] = args else { return None };
    Some((subject.clone(), RuleSet::from_value(rules)?))
}

fn replace_fn(ev: &mut Evaluator, args: &[Value]) -> Option<Value> {
    let (mut subject, rules) = split(args)?;
    for rule in rules.iter() {
        let (out, hit) = replace(subject, rule, ev);
        if hit {
            return Some(out);
        }
        subject = out;
    }
    Some(subject)
}

fn replace_all_fn(ev: &mut Evaluator, args: &[Value]) -> Option<Value> {
    let (subject, rules) = split(args)?;
    Some(replace_all_rules(subject, rules.as_slice(), None, ev))
}

fn replace_repeated_fn(ev: &mut Evaluator, args: &[Value]) -> Option<Value> {
    let (subject, rules) = split(args)?;
    let max_passes = ev.config().replace_pass_limit;
    Some(replace_repeated(subject, rules.as_slice(), max_passes, ev))
}
