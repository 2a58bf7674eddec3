//! Rule application: whole-node replacement, bottom-up replace-all, pattern
//! variable substitution and the boundary-variable trick for partial matches
//! under `Flat` and `Orderless` heads.

use crate::bindings::Bindings;
use crate::lookup::RewriteContext;
use crate::rule::Rule;
use cairn_core::attrs::Attributes;
use cairn_core::value::Value;
use tracing::{debug, warn};

const START: &str = "Cairn`Private`start";
const END: &str = "Cairn`Private`end";

/// Substitutes every symbol bound in `bindings` by its binding, heads included.
/// The bound values are inserted as-is; they are not rewritten again.
pub fn replace_pd(target: Value, bindings: &Bindings) -> Value {
    if bindings.is_empty() || !bindings.names().any(|n| target.contains_symbol(n)) {
        return target;
    }
    substitute(target, bindings)
}

fn substitute(v: Value, b: &Bindings) -> Value {
    match v {
        Value::Symbol(s) => match b.get(&s) {
            Some(bound) => bound.clone(),
            None => Value::Symbol(s),
        },
        Value::Expr { head, args } => Value::Expr {
            head: Box::new(substitute(*head, b)),
            args: args.into_iter().map(|a| substitute(a, b)).collect(),
        },
        atom => atom,
    }
}

/// First candidate binding set for which every guard evaluates to `True`.
fn accept(subject: &Value, pattern: &Value, guards: &[&Value], ctx: &mut dyn RewriteContext) -> Option<Bindings> {
    if guards.is_empty() {
        return ctx.oracle().match_pattern(subject, pattern, &Bindings::new(), ctx.lookup());
    }
    let candidates = ctx.oracle().iterate(subject, pattern, &Bindings::new(), ctx.lookup());
    for b in candidates {
        if guards.iter().all(|t| ctx.eval(replace_pd((*t).clone(), &b)).is_true()) {
            return Some(b);
        }
        debug!(pattern = %pattern, "guard rejected candidate");
    }
    None
}

fn try_rule(subject: &Value, rule: &Rule, ctx: &mut dyn RewriteContext) -> Option<Value> {
    let g = rule.guarded();
    let b = accept(subject, g.pattern, &g.guards, ctx)?;
    debug!(subject = %subject, lhs = %g.pattern, "rule matched");
    Some(replace_pd(g.body.clone(), &b))
}

/// Applies `rule` to the whole of `subject`. The flag reports whether it matched;
/// on failure the subject comes back unchanged.
pub fn replace(subject: Value, rule: &Rule, ctx: &mut dyn RewriteContext) -> (Value, bool) {
    match try_rule(&subject, rule, ctx) {
        Some(v) => (v, true),
        None => (subject, false),
    }
}

/// Rewrites `subject` with `rule`: a node that matches is replaced and not
/// descended into; otherwise heads and arguments are rewritten bottom-up.
/// Nodes headed by `stop_at_head` are left alone entirely.
pub fn replace_all(subject: Value, rule: &Rule, stop_at_head: Option<&str>, ctx: &mut dyn RewriteContext) -> Value {
    replace_all_rules(subject, std::slice::from_ref(rule), stop_at_head, ctx)
}

/// [`replace_all`] over a rule list; the first applicable rule wins at each node.
pub fn replace_all_rules(subject: Value, rules: &[Rule], stop_at_head: Option<&str>, ctx: &mut dyn RewriteContext) -> Value {
    if let Some(stop) = stop_at_head {
        if subject.has_head(stop) {
            return subject;
        }
    }
    for rule in rules {
        if let Some(v) = try_rule(&subject, rule, ctx) {
            return v;
        }
    }
    if subject.is_atom() {
        return subject;
    }
    for rule in rules {
        if let Some(v) = orderless_submatch(&subject, rule, ctx) {
            return v;
        }
    }
    match subject {
        Value::Expr { head, args } => Value::Expr {
            head: Box::new(replace_all_rules(*head, rules, stop_at_head, ctx)),
            args: args.into_iter().map(|a| replace_all_rules(a, rules, stop_at_head, ctx)).collect(),
        },
        atom => atom,
    }
}

// A rule whose lhs shares the node's Orderless head may match a subset of its arguments.
fn orderless_submatch(node: &Value, rule: &Rule, ctx: &mut dyn RewriteContext) -> Option<Value> {
    let g = rule.guarded();
    let head = node.head_name()?;
    if g.pattern.head_name() != Some(head) || !ctx.lookup().attributes_of(head).contains(Attributes::ORDERLESS) {
        return None;
    }
    let lhs_args = g.pattern.args()?;
    splice_match(node, lhs_args, g.body, &g.guards, true, ctx)
}

/// Matches `lhs` against a contiguous run of `subject`'s arguments (any subset when
/// `orderless`), replacing the run by `rhs` and keeping the rest. Both must share a
/// `Flat` head; an lhs that is not a composite leaves the subject unchanged.
pub fn flat_replace(subject: Value, lhs: &Value, rhs: &Value, orderless: bool, ctx: &mut dyn RewriteContext) -> (Value, bool) {
    let rule = Rule::immediate(lhs.clone(), rhs.clone());
    let g = rule.guarded();
    let Some(lhs_args) = g.pattern.args() else {
        return (subject, false);
    };
    match splice_match(&subject, lhs_args, g.body, &g.guards, orderless, ctx) {
        Some(v) => (v, true),
        None => (subject, false),
    }
}

fn splice_match(subject: &Value, lhs_args: &[Value], rhs: &Value, guards: &[&Value], orderless: bool, ctx: &mut dyn RewriteContext) -> Option<Value> {
    let Value::Expr { head, .. } = subject else { return None };
    let mut loose = Vec::with_capacity(lhs_args.len() + 2);
    if !orderless {
        loose.push(boundary(START));
    }
    loose.extend(lhs_args.iter().cloned());
    loose.push(boundary(END));
    let pattern = Value::Expr { head: head.clone(), args: loose };
    let b = accept(subject, &pattern, guards, ctx)?;
    debug!(subject = %subject, orderless, "partial match under flat head");
    let mut args = Vec::new();
    if !orderless {
        args.extend(sequence_items(b.get(START)));
    }
    args.push(replace_pd(rhs.clone(), &b));
    args.extend(sequence_items(b.get(END)));
    Some(Value::Expr { head: head.clone(), args })
}

fn boundary(name: &str) -> Value { Value::call("Pattern", vec![Value::symbol(name), Value::call("BlankNullSequence", vec![])]) }

fn sequence_items(v: Option<&Value>) -> Vec<Value> {
    match v {
        Some(Value::Expr { head, args }) if head.as_symbol() == Some("Sequence") => args.clone(),
        Some(other) => vec![other.clone()],
        None => Vec::new(),
    }
}

/// Repeats [`replace_all_rules`] until the expression stops changing, giving up
/// after `max_passes` passes when a bound is given.
pub fn replace_repeated(subject: Value, rules: &[Rule], max_passes: Option<usize>, ctx: &mut dyn RewriteContext) -> Value {
    let mut cur = subject;
    let mut passes = 0usize;
    loop {
        if max_passes.is_some_and(|m| passes >= m) {
            warn!(passes, "replace_repeated stopped before reaching a fixed point");
            return cur;
        }
        let next = replace_all_rules(cur.clone(), rules, None, ctx);
        passes += 1;
        if next == cur {
            return cur;
        }
        cur = next;
    }
}
