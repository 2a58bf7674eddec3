pub mod config;
pub mod core;
pub mod eval;
pub mod symbols;
pub mod trace;
mod function;
mod splice;

pub use config::{ConfigError, ConfigResult, EvalConfig, DEFAULT_REPLACE_PASSES};
pub use eval::{evaluate, Evaluator};
pub use symbols::{NativeFn, RuleSource, SymbolTable};
pub use trace::TraceStep;
