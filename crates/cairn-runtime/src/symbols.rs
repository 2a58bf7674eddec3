use crate::eval::Evaluator;
use cairn_core::attrs::Attributes;
use cairn_core::error::{CairnError, Result};
use cairn_core::value::Value;
use cairn_rewrite::defs::{DefKind, DefinitionStore};
use cairn_rewrite::lookup::AttributeLookup;
use cairn_rewrite::rule::{Rule, RuleSet};
use std::collections::HashMap;

/// Built-in handler. Receives normalized arguments; `None` means no rule applied.
pub type NativeFn = fn(&mut Evaluator, &[Value]) -> Option<Value>;

/// Where the one-step rewrite for a head symbol comes from.
#[derive(Clone)]
pub enum RuleSource {
    UserDefined(RuleSet),
    Builtin(NativeFn),
    /// User rules are tried first, then the handler.
    Overlaid { rules: RuleSet, builtin: NativeFn },
}

/// Per-session symbol state: attributes, built-in handlers and user definitions.
#[derive(Clone, Default)]
pub struct SymbolTable {
    attrs: HashMap<String, Attributes>,
    registered: HashMap<String, Attributes>,
    builtins: HashMap<String, NativeFn>,
    defs: DefinitionStore,
}

impl SymbolTable {
    pub fn new() -> Self { Self::default() }

    pub fn register(&mut self, name: &str, f: NativeFn, attrs: Attributes) {
        self.builtins.insert(name.to_string(), f);
        self.declare(name, attrs);
    }

    /// Gives `name` attributes without a handler; `ClearAll` restores these.
    pub fn declare(&mut self, name: &str, attrs: Attributes) {
        self.registered.insert(name.to_string(), attrs);
        self.attrs.insert(name.to_string(), attrs);
    }

    pub fn set_attributes(&mut self, name: &str, attrs: Attributes) {
        let entry = self.attrs.entry(name.to_string()).or_default();
        *entry |= attrs;
    }

    /// Drops user definitions and user-set attributes of `name`.
    pub fn clear_all(&mut self, name: &str) {
        self.defs.clear(name);
        match self.registered.get(name) {
            Some(a) => {
                self.attrs.insert(name.to_string(), *a);
            }
            None => {
                self.attrs.remove(name);
            }
        }
    }

    /// Stores a definition under the symbol its lhs is keyed by: a bare symbol gets
    /// an own value, `f[...]` a down value of `f`.
    pub fn define(&mut self, rule: Rule) -> Result<()> {
        let (kind, key) = definition_key(&rule.lhs)
            .ok_or_else(|| CairnError::Contract(format!("cannot attach a definition to {}", rule.lhs)))?;
        let key = key.to_string();
        self.defs.define(kind, &key, rule);
        Ok(())
    }

    pub fn own_values(&self, name: &str) -> Option<&RuleSet> { self.defs.rules(DefKind::Own, name).filter(|r| !r.is_empty()) }

    pub fn down_values(&self, name: &str) -> Option<&RuleSet> { self.defs.rules(DefKind::Down, name).filter(|r| !r.is_empty()) }

    pub fn rule_source(&self, name: &str) -> Option<RuleSource> {
        match (self.down_values(name), self.builtins.get(name)) {
            (Some(rules), Some(f)) => Some(RuleSource::Overlaid { rules: rules.clone(), builtin: *f }),
            (Some(rules), None) => Some(RuleSource::UserDefined(rules.clone())),
            (None, Some(f)) => Some(RuleSource::Builtin(*f)),
            (None, None) => None,
        }
    }
}

impl AttributeLookup for SymbolTable {
    fn attributes_of(&self, name: &str) -> Attributes { self.attrs.get(name).copied().unwrap_or_default() }
}

fn definition_key(lhs: &Value) -> Option<(DefKind, &str)> {
    match lhs {
        Value::Symbol(s) => Some((DefKind::Own, s.as_str())),
        Value::Expr { head, args } => match (head.as_symbol(), args.as_slice()) {
            (Some("Condition"), [inner, _]) | (Some("HoldPattern"), [inner]) => definition_key(inner),
            (Some(f), _) => Some((DefKind::Down, f)),
            (None, _) => None,
        },
        _ => None,
    }
}
