use cairn_core::pretty::Printer;
use cairn_core::value::Value;

/// Register infix output for arithmetic, lists and rules. Everything else prints in FullForm.
pub fn register_forms(p: &mut Printer) {
    p.register("Plus", plus_form);
    p.register("Times", times_form);
    p.register("List", list_form);
    p.register("Rule", rule_form);
    p.register("RuleDelayed", rule_delayed_form);
}

fn infix(p: &Printer, args: &[Value], sep: &str) -> Option<String> {
    if args.len() < 2 {
        return None;
    }
    Some(format!("({})", p.join(args, sep)))
}

fn plus_form(p: &Printer, args: &[Value]) -> Option<String> { infix(p, args, " + ") }

fn times_form(p: &Printer, args: &[Value]) -> Option<String> { infix(p, args, " * ") }

fn list_form(p: &Printer, args: &[Value]) -> Option<String> { Some(format!("{{{}}}", p.join(args, ", "))) }

fn arrow(p: &Printer, args: &[Value], op: &str) -> Option<String> {
    let [l, r] = args else { return None };
    Some(format!("{} {} {}", p.format(l), op, p.format(r)))
}

fn rule_form(p: &Printer, args: &[Value]) -> Option<String> { arrow(p, args, "->") }

fn rule_delayed_form(p: &Printer, args: &[Value]) -> Option<String> { arrow(p, args, ":>") }
