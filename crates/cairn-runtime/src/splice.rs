use crate::eval::Evaluator;
use cairn_core::value::Value;

impl Evaluator {
    /// Replaces every argument headed by `target` with its own arguments, in place.
    ///
    /// Only the elements present on entry are scanned: content spliced in is not
    /// examined again in the same pass. With `should_eval` the spliced parts are
    /// evaluated first. Returns whether anything was spliced.
    pub fn merge_sequences(&mut self, args: &mut Vec<Value>, target: &str, should_eval: bool) -> bool {
        let original_len = args.len();
        let mut pos = 0;
        let mut changed = false;
        for _ in 0..original_len {
            if !args[pos].has_head(target) {
                pos += 1;
                continue;
            }
            let parts = match std::mem::replace(&mut args[pos], Value::null()).into_parts() {
                Ok((_, parts)) => parts,
                Err(atom) => {
                    args[pos] = atom;
                    pos += 1;
                    continue;
                }
            };
            let parts: Vec<Value> = if should_eval { parts.into_iter().map(|p| self.eval(p)).collect() } else { parts };
            let inserted = parts.len();
            args.splice(pos..pos + 1, parts);
            pos += inserted;
            changed = true;
        }
        changed
    }
}
