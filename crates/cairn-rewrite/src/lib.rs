pub mod bindings;
pub mod defs;
pub mod lookup;
pub mod matcher;
pub mod replace;
pub mod rule;

pub use bindings::Bindings;
pub use defs::{DefKind, DefinitionStore};
pub use lookup::{AttributeLookup, RewriteContext};
pub use matcher::{MatchIter, MatchOracle, PatternMatcher};
pub use replace::{flat_replace, replace, replace_all, replace_all_rules, replace_pd, replace_repeated};
pub use rule::{Delayed, Rule, RuleSet};
