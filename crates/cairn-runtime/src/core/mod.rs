use crate::eval::Evaluator;

pub mod arith;
pub mod compare;
pub mod defs;
pub mod forms;
pub mod rules;
pub mod structural;

/// Installs the kernel rules, attributes and output forms.
pub fn register_core(ev: &mut Evaluator) {
    structural::register_structural(ev);
    arith::register_arith(ev);
    compare::register_compare(ev);
    rules::register_rules(ev);
    defs::register_defs(ev);
    forms::register_forms(ev.printer_mut());
}
