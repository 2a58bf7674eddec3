use crate::config::EvalConfig;
use crate::symbols::{NativeFn, RuleSource, SymbolTable};
use crate::trace::TraceStep;
use cairn_core::attrs::Attributes;
use cairn_core::error::{CairnError, Result};
use cairn_core::order::ex_order;
use cairn_core::pretty::Printer;
use cairn_core::value::Value;
use cairn_rewrite::lookup::{AttributeLookup, RewriteContext};
use cairn_rewrite::matcher::{MatchOracle, PatternMatcher};
use cairn_rewrite::replace::replace;
use cairn_rewrite::rule::RuleSet;
use tracing::{trace, warn};

/// Fixed-point evaluator. Owns the session's symbol table, the match oracle
/// used by rule dispatch and the printer used to render results.
pub struct Evaluator {
    symbols: SymbolTable,
    oracle: Box<dyn MatchOracle>,
    printer: Printer,
    config: EvalConfig,
    steps: usize,
    depth: usize,
    aborted: bool,
    trace_steps: Vec<TraceStep>,
}

impl Default for Evaluator {
    fn default() -> Self { Self::new() }
}

impl Evaluator {
    pub fn new() -> Self { Self::with_config(EvalConfig::default()) }

    pub fn with_config(config: EvalConfig) -> Self {
        let mut ev = Self {
            symbols: SymbolTable::new(),
            oracle: Box::new(PatternMatcher),
            printer: Printer::new(),
            config,
            steps: 0,
            depth: 0,
            aborted: false,
            trace_steps: Vec::new(),
        };
        crate::core::register_core(&mut ev);
        ev
    }

    /// Replaces the match oracle used for definitions and the `Replace*` builtins.
    pub fn with_oracle(mut self, oracle: Box<dyn MatchOracle>) -> Self {
        self.oracle = oracle;
        self
    }

    pub fn register(&mut self, name: &str, f: NativeFn, attrs: Attributes) { self.symbols.register(name, f, attrs); }

    pub fn symbols(&self) -> &SymbolTable { &self.symbols }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable { &mut self.symbols }

    pub fn printer_mut(&mut self) -> &mut Printer { &mut self.printer }

    pub fn config(&self) -> &EvalConfig { &self.config }

    pub fn format(&self, v: &Value) -> String { self.printer.format(v) }

    /// Steps consumed by the current (or last) top-level evaluation.
    pub fn steps(&self) -> usize { self.steps }

    pub fn take_trace(&mut self) -> Vec<TraceStep> { std::mem::take(&mut self.trace_steps) }

    pub(crate) fn record(&mut self, step: TraceStep) {
        if self.config.trace {
            self.trace_steps.push(step);
        }
    }

    /// Evaluates to a fixed point. When the step budget runs out the partially
    /// evaluated expression is returned; use [`Evaluator::try_eval`] to observe that.
    pub fn eval(&mut self, v: Value) -> Value {
        if self.depth == 0 {
            self.steps = 0;
            self.aborted = false;
        }
        self.depth += 1;
        let out = self.fixed_point(v);
        self.depth -= 1;
        out
    }

    pub fn try_eval(&mut self, v: Value) -> Result<Value> {
        let out = self.eval(v);
        if self.aborted {
            return Err(CairnError::EvaluationAborted { steps: self.steps });
        }
        Ok(out)
    }

    fn tick(&mut self) -> bool {
        if self.aborted {
            return false;
        }
        if let Some(limit) = self.config.step_limit {
            if self.steps >= limit {
                warn!(steps = self.steps, "step budget exhausted, aborting evaluation");
                self.aborted = true;
                return false;
            }
        }
        self.steps += 1;
        true
    }

    fn fixed_point(&mut self, expr: Value) -> Value {
        let mut previous = expr.clone();
        let mut current = expr;
        loop {
            if !self.tick() {
                return current;
            }
            trace!(step = self.steps, expr = %current, "eval");
            let next = match current {
                Value::Expr { head, args } => self.step(*head, args),
                atom => match self.own_value(&atom) {
                    Some(v) => v,
                    None => return atom,
                },
            };
            if next == previous {
                return next;
            }
            previous = next.clone();
            current = next;
        }
    }

    fn own_value(&mut self, atom: &Value) -> Option<Value> {
        let name = atom.as_symbol()?;
        let rules = self.symbols.own_values(name)?.clone();
        let head = name.to_string();
        self.apply_rules(&head, &rules, atom.clone()).ok()
    }

    /// One pass of the loop body over a composite: hold-aware argument evaluation,
    /// splicing, flattening, sorting and rule dispatch.
    fn step(&mut self, head: Value, mut args: Vec<Value>) -> Value {
        let name = head.as_symbol().map(str::to_owned);
        let attrs = name.as_deref().map_or(Attributes::empty(), |n| self.symbols.attributes_of(n));
        let label = name.clone().unwrap_or_else(|| self.format(&head));

        let mut held = Vec::new();
        for (i, arg) in args.iter_mut().enumerate() {
            if attrs.evaluates_arg(i + 1) {
                let a = std::mem::replace(arg, Value::null());
                *arg = self.eval(a);
            } else {
                held.push(i + 1);
            }
        }
        if !held.is_empty() {
            self.record(TraceStep::Hold { head: label.clone(), held });
        }

        for (target, should_eval) in [("Sequence", false), ("Evaluate", true)] {
            if self.merge_sequences(&mut args, target, should_eval) {
                self.record(TraceStep::SequenceSplice { head: label.clone(), target: target.to_string() });
            }
        }
        if let Some(n) = name.as_deref() {
            if attrs.contains(Attributes::FLAT) && self.merge_sequences(&mut args, n, false) {
                self.record(TraceStep::FlatFlatten { head: label.clone() });
            }
        }
        if attrs.contains(Attributes::ORDERLESS) && !args.windows(2).all(|w| ex_order(&w[0], &w[1]).is_le()) {
            args.sort_by(ex_order);
            self.record(TraceStep::OrderlessSort { head: label.clone() });
        }

        // partial arguments must not reach rules or handlers with side effects
        if self.aborted {
            return Value::Expr { head: Box::new(head), args };
        }

        if let Some(n) = name {
            let expr = Value::Expr { head: Box::new(head), args };
            return match self.symbols.rule_source(&n) {
                Some(source) => self.dispatch(&n, source, expr),
                None => expr,
            };
        }
        if head.has_head("Function") {
            if let Some(out) = self.apply_function(&head, &args) {
                self.record(TraceStep::PureFunction { function: head });
                return out;
            }
        }
        Value::Expr { head: Box::new(head), args }
    }

    fn dispatch(&mut self, name: &str, source: RuleSource, expr: Value) -> Value {
        let (rules, builtin) = match source {
            RuleSource::UserDefined(rules) => (Some(rules), None),
            RuleSource::Builtin(f) => (None, Some(f)),
            RuleSource::Overlaid { rules, builtin } => (Some(rules), Some(builtin)),
        };
        let expr = match rules {
            Some(rules) => match self.apply_rules(name, &rules, expr) {
                Ok(out) => return out,
                Err(unchanged) => unchanged,
            },
            None => expr,
        };
        if let (Some(f), Some(args)) = (builtin, expr.args()) {
            if let Some(out) = f(self, args) {
                self.record(TraceStep::BuiltinApplied { head: name.to_string() });
                return out;
            }
        }
        expr
    }

    /// First rule of `rules` that rewrites the whole of `expr`; the subject comes back as `Err` otherwise.
    fn apply_rules(&mut self, name: &str, rules: &RuleSet, expr: Value) -> std::result::Result<Value, Value> {
        let mut expr = expr;
        for rule in rules.iter() {
            let (out, hit) = replace(expr, rule, self);
            if hit {
                self.record(TraceStep::RuleMatch { head: name.to_string(), lhs: rule.lhs.clone() });
                return Ok(out);
            }
            expr = out;
        }
        Err(expr)
    }
}

impl RewriteContext for Evaluator {
    fn lookup(&self) -> &dyn AttributeLookup { &self.symbols }

    fn oracle(&self) -> &dyn MatchOracle { self.oracle.as_ref() }

    fn eval(&mut self, v: Value) -> Value { Evaluator::eval(self, v) }
}

/// Evaluates `v` in a fresh session.
pub fn evaluate(v: Value) -> Value { Evaluator::new().eval(v) }
