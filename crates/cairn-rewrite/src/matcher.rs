use crate::bindings::Bindings;
use crate::lookup::AttributeLookup;
use cairn_core::attrs::Attributes;
use cairn_core::value::Value;
use std::iter::FusedIterator;

/// Decides whether an expression matches a pattern and produces bindings.
pub trait MatchOracle {
    /// First binding set (extending `bindings`) under which `subject` matches `pattern`.
    fn match_pattern(&self, subject: &Value, pattern: &Value, bindings: &Bindings, attrs: &dyn AttributeLookup) -> Option<Bindings> {
        self.iterate(subject, pattern, bindings, attrs).next()
    }

    /// Every candidate binding set, for patterns with choice points.
    fn iterate(&self, subject: &Value, pattern: &Value, bindings: &Bindings, attrs: &dyn AttributeLookup) -> MatchIter;
}

/// Finite, fused sequence of candidate binding sets. `None` is the single end signal;
/// restarting means calling [`MatchOracle::iterate`] again.
#[derive(Debug)]
pub struct MatchIter {
    inner: std::vec::IntoIter<Bindings>,
}

impl MatchIter {
    pub fn new(candidates: Vec<Bindings>) -> Self { Self { inner: candidates.into_iter() } }
    pub fn empty() -> Self { Self::new(Vec::new()) }
}

impl Iterator for MatchIter {
    type Item = Bindings;
    fn next(&mut self) -> Option<Bindings> { self.inner.next() }
    fn size_hint(&self) -> (usize, Option<usize>) { self.inner.size_hint() }
}

impl FusedIterator for MatchIter {}

/// Backtracking matcher for `Blank`/`Pattern`/`Alternatives` patterns.
///
/// Matching is written in continuation-passing style: every successful partial
/// match calls the continuation, which returns `true` to stop the search.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternMatcher;

type Cont<'k> = &'k mut dyn FnMut(Bindings) -> bool;

impl MatchOracle for PatternMatcher {
    fn match_pattern(&self, subject: &Value, pattern: &Value, bindings: &Bindings, attrs: &dyn AttributeLookup) -> Option<Bindings> {
        let mut found = None;
        self.go(attrs, pattern, subject, bindings.clone(), &mut |b| {
            found = Some(b);
            true
        });
        found
    }

    fn iterate(&self, subject: &Value, pattern: &Value, bindings: &Bindings, attrs: &dyn AttributeLookup) -> MatchIter {
        let mut all = Vec::new();
        self.go(attrs, pattern, subject, bindings.clone(), &mut |b| {
            all.push(b);
            false
        });
        MatchIter::new(all)
    }
}

impl PatternMatcher {
    fn go(&self, attrs: &dyn AttributeLookup, pat: &Value, subj: &Value, b: Bindings, k: Cont<'_>) -> bool {
        let Value::Expr { head, args } = pat else {
            return if pat == subj { k(b) } else { false };
        };
        if let Value::Symbol(h) = &**head {
            match (h.as_str(), args.as_slice()) {
                ("Pattern", [Value::Symbol(name), inner]) => {
                    return self.go(attrs, inner, subj, b, &mut |mut b2| b2.bind(name, subj.clone()) && k(b2));
                }
                ("Blank" | "BlankSequence" | "BlankNullSequence", _) => {
                    return if head_ok(args.first(), subj) { k(b) } else { false };
                }
                ("Alternatives", alts) => {
                    for alt in alts {
                        if self.go(attrs, alt, subj, b.clone(), &mut *k) {
                            return true;
                        }
                    }
                    return false;
                }
                ("HoldPattern", [inner]) => return self.go(attrs, inner, subj, b, k),
                _ => {}
            }
        }
        let Value::Expr { head: sh, args: sargs } = subj else { return false };
        let orderless = head.as_symbol().is_some_and(|h| attrs.attributes_of(h).contains(Attributes::ORDERLESS));
        self.go(attrs, head, sh, b, &mut |b2| {
            if orderless {
                let avail: Vec<usize> = (0..sargs.len()).collect();
                self.match_orderless(attrs, args, sargs, &avail, b2, &mut *k)
            } else {
                self.match_seq(attrs, args, sargs, b2, &mut *k)
            }
        })
    }

    fn match_seq(&self, attrs: &dyn AttributeLookup, pats: &[Value], subjs: &[Value], b: Bindings, k: Cont<'_>) -> bool {
        let Some((p0, rest)) = pats.split_first() else {
            return subjs.is_empty() && k(b);
        };
        if let Some(sp) = SeqPat::of(p0) {
            let need = min_required(rest);
            if subjs.len() < need {
                return false;
            }
            for take in sp.min..=subjs.len() - need {
                let (chunk, tail) = subjs.split_at(take);
                if !chunk.iter().all(|e| head_ok(sp.head, e)) {
                    break;
                }
                let mut b2 = b.clone();
                if !sp.bind(&mut b2, chunk.to_vec()) {
                    continue;
                }
                if self.match_seq(attrs, rest, tail, b2, &mut *k) {
                    return true;
                }
            }
            return false;
        }
        let Some((s0, stail)) = subjs.split_first() else { return false };
        self.go(attrs, p0, s0, b, &mut |b2| self.match_seq(attrs, rest, stail, b2, &mut *k))
    }

    // Multiset matching for ORDERLESS heads; `avail` holds indices of unclaimed subjects.
    fn match_orderless(&self, attrs: &dyn AttributeLookup, pats: &[Value], subjs: &[Value], avail: &[usize], b: Bindings, k: Cont<'_>) -> bool {
        let Some((p0, rest)) = pats.split_first() else {
            return avail.is_empty() && k(b);
        };
        if let Some(sp) = SeqPat::of(p0) {
            let need = min_required(rest);
            if avail.len() < need {
                return false;
            }
            // a trailing sequence takes whatever is left
            let sizes = if rest.is_empty() { avail.len()..=avail.len() } else { sp.min..=avail.len() - need };
            for size in sizes.filter(|s| *s >= sp.min) {
                for chosen in combinations(avail, size) {
                    if !chosen.iter().all(|&i| head_ok(sp.head, &subjs[i])) {
                        continue;
                    }
                    let mut b2 = b.clone();
                    if !sp.bind(&mut b2, chosen.iter().map(|&i| subjs[i].clone()).collect()) {
                        continue;
                    }
                    let left: Vec<usize> = avail.iter().copied().filter(|i| !chosen.contains(i)).collect();
                    if self.match_orderless(attrs, rest, subjs, &left, b2, &mut *k) {
                        return true;
                    }
                }
            }
            return false;
        }
        for (pos, &i) in avail.iter().enumerate() {
            let left: Vec<usize> = avail.iter().enumerate().filter(|(p, _)| *p != pos).map(|(_, &j)| j).collect();
            if self.go(attrs, p0, &subjs[i], b.clone(), &mut |b2| self.match_orderless(attrs, rest, subjs, &left, b2, &mut *k)) {
                return true;
            }
        }
        false
    }
}

/// A pattern element that may absorb several arguments.
struct SeqPat<'a> {
    name: Option<&'a str>,
    min: usize,
    head: Option<&'a Value>,
}

impl<'a> SeqPat<'a> {
    fn of(p: &'a Value) -> Option<Self> {
        let (name, blank) = match p.head_name() {
            Some("Pattern") => match p.args() {
                Some([Value::Symbol(n), inner]) => (Some(n.as_str()), inner),
                _ => return None,
            },
            _ => (None, p),
        };
        let min = match blank.head_name() {
            Some("BlankSequence") => 1,
            Some("BlankNullSequence") => 0,
            _ => return None,
        };
        Some(SeqPat { name, min, head: blank.args().and_then(|a| a.first()) })
    }

    fn bind(&self, b: &mut Bindings, items: Vec<Value>) -> bool {
        match self.name {
            Some(n) => b.bind(n, Value::call("Sequence", items)),
            None => true,
        }
    }
}

fn min_required(pats: &[Value]) -> usize {
    pats.iter().map(|p| SeqPat::of(p).map_or(1, |s| s.min)).sum()
}

fn head_ok(head: Option<&Value>, e: &Value) -> bool {
    let Some(h) = head else { return true };
    match e {
        Value::Expr { head: eh, .. } => **eh == *h,
        Value::Integer(_) => h.as_symbol() == Some("Integer"),
        Value::Real(_) => h.as_symbol() == Some("Real"),
        Value::String(_) => h.as_symbol() == Some("String"),
        Value::Symbol(_) => h.as_symbol() == Some("Symbol"),
    }
}

fn combinations(items: &[usize], k: usize) -> Vec<Vec<usize>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    if items.len() < k {
        return Vec::new();
    }
    let mut out = Vec::new();
    for (i, &first) in items.iter().enumerate() {
        for mut tail in combinations(&items[i + 1..], k - 1) {
            tail.insert(0, first);
            out.push(tail);
        }
    }
    out
}
