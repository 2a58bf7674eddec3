use cairn_core::value::Value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Delayed {
    No,
    Yes,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rule {
    pub lhs: Value,
    pub rhs: Value,
    pub delayed: Delayed,
}

/// A rule split into its bare pattern, its body and the `Condition` tests guarding it.
#[derive(Debug)]
pub struct Guarded<'a> {
    pub pattern: &'a Value,
    pub body: &'a Value,
    pub guards: Vec<&'a Value>,
}

impl Rule {
    pub fn immediate(lhs: Value, rhs: Value) -> Self { Self { lhs, rhs, delayed: Delayed::No } }

    pub fn delayed(lhs: Value, rhs: Value) -> Self { Self { lhs, rhs, delayed: Delayed::Yes } }

    /// Reads `Rule[l, r]` or `RuleDelayed[l, r]`.
    pub fn from_value(v: &Value) -> Option<Rule> {
        match (v.head_name(), v.args()) {
            (Some("Rule"), Some([l, r])) => Some(Rule::immediate(l.clone(), r.clone())),
            (Some("RuleDelayed"), Some([l, r])) => Some(Rule::delayed(l.clone(), r.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        let head = match self.delayed {
            Delayed::No => "Rule",
            Delayed::Yes => "RuleDelayed",
        };
        Value::call(head, vec![self.lhs.clone(), self.rhs.clone()])
    }

    /// Peels `Condition` off either side. Tests from the lhs come first.
    pub fn guarded(&self) -> Guarded<'_> {
        let mut guards = Vec::new();
        let mut pattern = &self.lhs;
        while let Some((inner, test)) = condition_parts(pattern) {
            guards.push(test);
            pattern = inner;
        }
        let mut body = &self.rhs;
        while let Some((inner, test)) = condition_parts(body) {
            guards.push(test);
            body = inner;
        }
        Guarded { pattern, body, guards }
    }
}

fn condition_parts(v: &Value) -> Option<(&Value, &Value)> {
    match (v.head_name(), v.args()) {
        (Some("Condition"), Some([inner, test])) => Some((inner, test)),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuleSet(pub Vec<Rule>);

impl RuleSet {
    pub fn new() -> Self { Self(Vec::new()) }

    pub fn push(&mut self, r: Rule) { self.0.push(r); }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> { self.0.iter() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn as_slice(&self) -> &[Rule] { &self.0 }

    /// Adds `r`, replacing in place any rule with the same left-hand side and guards.
    pub fn upsert(&mut self, r: Rule) {
        let same = |old: &Rule| old.lhs == r.lhs && old.guarded().guards == r.guarded().guards;
        match self.0.iter_mut().find(|old| same(&**old)) {
            Some(old) => *old = r,
            None => self.0.push(r),
        }
    }

    /// A single rule or a `List` of rules; anything else is not a rule set.
    pub fn from_value(v: &Value) -> Option<RuleSet> {
        if let Some(r) = Rule::from_value(v) {
            return Some(RuleSet(vec![r]));
        }
        match (v.head_name(), v.args()) {
            (Some("List"), Some(items)) => items.iter().map(Rule::from_value).collect::<Option<Vec<_>>>().map(RuleSet),
            _ => None,
        }
    }
}
