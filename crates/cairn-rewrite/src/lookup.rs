use crate::matcher::MatchOracle;
use cairn_core::attrs::Attributes;
use cairn_core::value::Value;
use std::collections::HashMap;

/// Attribute source for head symbols. Must be total: unknown names have no attributes.
pub trait AttributeLookup {
    fn attributes_of(&self, name: &str) -> Attributes;
}

impl AttributeLookup for HashMap<String, Attributes> {
    fn attributes_of(&self, name: &str) -> Attributes { self.get(name).copied().unwrap_or_default() }
}

/// What the replacement engine needs from its host: attributes and a match
/// oracle for matching, and an evaluator for rule guards.
pub trait RewriteContext {
    fn lookup(&self) -> &dyn AttributeLookup;
    fn oracle(&self) -> &dyn MatchOracle;
    fn eval(&mut self, v: Value) -> Value;
}
