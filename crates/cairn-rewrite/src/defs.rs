use crate::rule::{Rule, RuleSet};
use std::collections::HashMap;

/// `Own` rules rewrite a bare symbol; `Down` rules rewrite calls headed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefKind {
    Own,
    Down,
}

#[derive(Debug, Default, Clone)]
pub struct DefinitionStore {
    own: HashMap<String, RuleSet>,
    down: HashMap<String, RuleSet>,
}

impl DefinitionStore {
    pub fn new() -> Self { Self::default() }

    pub fn rules(&self, kind: DefKind, sym: &str) -> Option<&RuleSet> {
        match kind {
            DefKind::Own => self.own.get(sym),
            DefKind::Down => self.down.get(sym),
        }
    }

    pub fn rules_mut(&mut self, kind: DefKind, sym: &str) -> &mut RuleSet {
        let map = match kind {
            DefKind::Own => &mut self.own,
            DefKind::Down => &mut self.down,
        };
        map.entry(sym.to_string()).or_default()
    }

    pub fn define(&mut self, kind: DefKind, sym: &str, rule: Rule) { self.rules_mut(kind, sym).upsert(rule); }

    pub fn clear(&mut self, sym: &str) {
        self.own.remove(sym);
        self.down.remove(sym);
    }
}
