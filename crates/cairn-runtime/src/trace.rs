use cairn_core::value::Value;
use serde::Serialize;

/// One recorded evaluation action. Only collected when tracing is enabled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TraceStep {
    /// Argument positions (1-based) left unevaluated by hold attributes.
    Hold { head: String, held: Vec<usize> },
    SequenceSplice { head: String, target: String },
    FlatFlatten { head: String },
    OrderlessSort { head: String },
    RuleMatch { head: String, lhs: Value },
    BuiltinApplied { head: String },
    PureFunction { function: Value },
}
