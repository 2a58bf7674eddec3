use cairn_core::error::{CairnError, Result};
use cairn_core::value::Value;

pub type ParseResult<T> = Result<T>;

/// Parses a single expression, rejecting trailing input.
pub fn parse(src: &str) -> ParseResult<Value> {
    let mut p = Parser::from_source(src);
    p.skip_ws();
    let v = p.expr()?;
    p.skip_ws();
    if p.pos < p.src.len() {
        return Err(p.error("unexpected trailing input"));
    }
    Ok(v)
}

pub struct Parser { src: Vec<char>, pos: usize }

fn sym(s: &str) -> Value { Value::Symbol(s.into()) }

impl Parser {
    pub fn from_source(source: &str) -> Self { Self { src: source.chars().collect(), pos: 0 } }

    fn peekc(&self) -> Option<char> { self.src.get(self.pos).cloned() }
    fn peek_at(&self, k: usize) -> Option<char> { self.src.get(self.pos + k).cloned() }
    fn nextc(&mut self) -> Option<char> { let c = self.src.get(self.pos).cloned(); if c.is_some() { self.pos += 1; } c }
    fn starts_with(&self, s: &str) -> bool {
        self.pos + s.chars().count() <= self.src.len() && self.src[self.pos..].iter().zip(s.chars()).all(|(a, b)| *a == b)
    }
    fn eat_str(&mut self, s: &str) -> bool { if self.starts_with(s) { self.pos += s.chars().count(); true } else { false } }
    fn error(&self, message: &str) -> CairnError { CairnError::Parse { message: message.into(), position: self.pos } }
    fn expect(&mut self, c: char) -> ParseResult<()> {
        self.skip_ws();
        if self.nextc() == Some(c) { Ok(()) } else { Err(self.error(&format!("expected '{}'", c))) }
    }
    fn skip_ws(&mut self) {
        loop {
            while matches!(self.peekc(), Some(c) if c.is_whitespace()) { self.pos += 1; }
            if self.starts_with("(*") {
                self.pos += 2;
                while self.pos + 1 < self.src.len() && !self.starts_with("*)") { self.pos += 1; }
                if self.starts_with("*)") { self.pos += 2; }
                continue;
            }
            break;
        }
    }

    /// Parses every `;`-separated expression in the source.
    pub fn parse_all(&mut self) -> ParseResult<Vec<Value>> {
        let mut out = Vec::new();
        while self.pos < self.src.len() {
            self.skip_ws();
            if self.pos >= self.src.len() { break; }
            out.push(self.expr()?);
            self.skip_ws();
            if self.peekc() == Some(';') { self.nextc(); }
        }
        Ok(out)
    }

    fn expr(&mut self) -> ParseResult<Value> {
        let lhs = self.parse_function()?;
        self.skip_ws();
        if self.eat_str(":=") {
            let rhs = self.expr()?;
            return Ok(Value::call("SetDelayed", vec![lhs, rhs]));
        }
        if self.peekc() == Some('=') && self.peek_at(1) != Some('=') {
            self.nextc();
            let rhs = self.expr()?;
            return Ok(Value::call("Set", vec![lhs, rhs]));
        }
        Ok(lhs)
    }

    fn parse_function(&mut self) -> ParseResult<Value> {
        let mut v = self.parse_rule()?;
        self.skip_ws();
        // `&` binds loosest; `body &[args]` is an immediate call
        while self.peekc() == Some('&') && self.peek_at(1) != Some('&') {
            self.nextc();
            v = Value::call("Function", vec![v]);
            v = self.call_suffix(v)?;
            self.skip_ws();
        }
        Ok(v)
    }

    fn parse_rule(&mut self) -> ParseResult<Value> {
        let lhs = self.parse_condition()?;
        self.skip_ws();
        if self.eat_str("->") {
            let rhs = self.parse_rule()?;
            return Ok(Value::call("Rule", vec![lhs, rhs]));
        }
        if self.eat_str(":>") {
            let rhs = self.parse_rule()?;
            return Ok(Value::call("RuleDelayed", vec![lhs, rhs]));
        }
        Ok(lhs)
    }

    fn parse_condition(&mut self) -> ParseResult<Value> {
        let mut lhs = self.parse_comparison()?;
        loop {
            self.skip_ws();
            if self.eat_str("/;") {
                let test = self.parse_comparison()?;
                lhs = Value::call("Condition", vec![lhs, test]);
                continue;
            }
            return Ok(lhs);
        }
    }

    fn parse_comparison(&mut self) -> ParseResult<Value> {
        let lhs = self.parse_additive()?;
        self.skip_ws();
        let head = if self.eat_str("===") { "SameQ" }
            else if self.eat_str("==") { "Equal" }
            else if self.eat_str("<=") { "LessEqual" }
            else if self.eat_str(">=") { "GreaterEqual" }
            else if self.peekc() == Some('<') { self.nextc(); "Less" }
            else if self.peekc() == Some('>') { self.nextc(); "Greater" }
            else { return Ok(lhs) };
        let rhs = self.parse_additive()?;
        Ok(Value::call(head, vec![lhs, rhs]))
    }

    fn parse_additive(&mut self) -> ParseResult<Value> {
        let first = self.parse_term()?;
        let mut terms = vec![first];
        loop {
            self.skip_ws();
            // `->` belongs to the rule level
            if self.peekc() == Some('+') { self.nextc(); terms.push(self.parse_term()?); continue; }
            if self.peekc() == Some('-') && self.peek_at(1) != Some('>') {
                self.nextc();
                let t = self.parse_term()?;
                terms.push(negate(t));
                continue;
            }
            break;
        }
        Ok(if terms.len() == 1 { terms.remove(0) } else { Value::call("Plus", terms) })
    }

    fn parse_term(&mut self) -> ParseResult<Value> {
        let first = self.parse_unary()?;
        let mut factors = vec![first];
        loop {
            self.skip_ws();
            match self.peekc() {
                Some('*') => { self.nextc(); factors.push(self.parse_unary()?); }
                Some('/') if self.peek_at(1) != Some(';') => {
                    self.nextc();
                    let d = self.parse_unary()?;
                    factors.push(Value::call("Power", vec![d, Value::Integer(-1)]));
                }
                Some(c) if starts_primary(c) => { factors.push(self.parse_power()?); }
                _ => break,
            }
        }
        Ok(if factors.len() == 1 { factors.remove(0) } else { Value::call("Times", factors) })
    }

    fn parse_unary(&mut self) -> ParseResult<Value> {
        self.skip_ws();
        if self.peekc() == Some('-') && self.peek_at(1) != Some('>') {
            self.nextc();
            let v = self.parse_unary()?;
            return Ok(negate(v));
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> ParseResult<Value> {
        let base = self.parse_apply()?;
        self.skip_ws();
        if self.peekc() == Some('^') {
            self.nextc();
            let exp = self.parse_unary()?;
            return Ok(Value::call("Power", vec![base, exp]));
        }
        Ok(base)
    }

    fn parse_apply(&mut self) -> ParseResult<Value> {
        let f = self.parse_postfix()?;
        self.skip_ws();
        if self.eat_str("@@") {
            let e = self.parse_apply()?;
            return Ok(Value::call("Apply", vec![f, e]));
        }
        Ok(f)
    }

    fn parse_postfix(&mut self) -> ParseResult<Value> {
        let p = self.parse_primary()?;
        self.call_suffix(p)
    }

    fn call_suffix(&mut self, mut v: Value) -> ParseResult<Value> {
        // no whitespace allowed between a head and its bracket
        while self.peekc() == Some('[') {
            self.nextc();
            let args = self.parse_seq(']')?;
            v = Value::expr(v, args);
        }
        Ok(v)
    }

    fn parse_seq(&mut self, close: char) -> ParseResult<Vec<Value>> {
        let mut args = Vec::new();
        self.skip_ws();
        if self.peekc() == Some(close) { self.nextc(); return Ok(args); }
        loop {
            args.push(self.expr()?);
            self.skip_ws();
            match self.nextc() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(args),
                _ => return Err(self.error(&format!("expected ',' or '{}'", close))),
            }
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Value> {
        self.skip_ws();
        match self.peekc() {
            None => Err(self.error("unexpected end of input")),
            Some('(') => {
                self.nextc();
                let v = self.expr()?;
                self.expect(')')?;
                Ok(v)
            }
            Some('{') => {
                self.nextc();
                let items = self.parse_seq('}')?;
                Ok(Value::call("List", items))
            }
            Some('"') => self.parse_string(),
            Some('#') => {
                self.nextc();
                let start = self.pos;
                while matches!(self.peekc(), Some(c) if c.is_ascii_digit()) { self.pos += 1; }
                let n = if self.pos == start { 1 } else { self.number_text(start).parse::<i64>().map_err(|_| self.error("bad slot index"))? };
                Ok(Value::call("Slot", vec![Value::Integer(n)]))
            }
            Some('_') => self.parse_blank(None),
            Some(c) if c.is_ascii_digit() || (c == '.' && matches!(self.peek_at(1), Some(d) if d.is_ascii_digit())) => self.parse_number(),
            Some(c) if is_ident_start(c) => {
                let name = self.parse_ident();
                if self.peekc() == Some('_') { return self.parse_blank(Some(name)); }
                Ok(Value::Symbol(name))
            }
            Some(c) => Err(self.error(&format!("unexpected character '{}'", c))),
        }
    }

    fn parse_ident(&mut self) -> String {
        let start = self.pos;
        while matches!(self.peekc(), Some(c) if c.is_alphanumeric() || c == '$' || c == '`') { self.pos += 1; }
        self.src[start..self.pos].iter().collect()
    }

    fn parse_blank(&mut self, name: Option<String>) -> ParseResult<Value> {
        let mut n = 0;
        while self.peekc() == Some('_') && n < 3 { self.nextc(); n += 1; }
        let blank = match n { 1 => "Blank", 2 => "BlankSequence", _ => "BlankNullSequence" };
        let head: Vec<Value> = match self.peekc() {
            Some(c) if is_ident_start(c) => vec![Value::Symbol(self.parse_ident())],
            _ => vec![],
        };
        let b = Value::call(blank, head);
        Ok(match name { Some(x) => Value::call("Pattern", vec![sym(&x), b]), None => b })
    }

    fn number_text(&self, start: usize) -> String { self.src[start..self.pos].iter().collect() }

    fn parse_number(&mut self) -> ParseResult<Value> {
        let start = self.pos;
        while matches!(self.peekc(), Some(c) if c.is_ascii_digit()) { self.pos += 1; }
        let mut real = false;
        if self.peekc() == Some('.') && self.peek_at(1) != Some('.') {
            real = true;
            self.nextc();
            while matches!(self.peekc(), Some(c) if c.is_ascii_digit()) { self.pos += 1; }
        }
        let text = self.number_text(start);
        if real {
            text.parse::<f64>().map(Value::Real).map_err(|_| CairnError::Parse { message: format!("bad real '{}'", text), position: start })
        } else {
            text.parse::<i64>().map(Value::Integer).map_err(|_| CairnError::Parse { message: format!("integer out of range '{}'", text), position: start })
        }
    }

    fn parse_string(&mut self) -> ParseResult<Value> {
        let start = self.pos;
        self.nextc();
        let mut s = String::new();
        loop {
            match self.nextc() {
                None => return Err(CairnError::Parse { message: "unterminated string".into(), position: start }),
                Some('"') => return Ok(Value::String(s)),
                Some('\\') => match self.nextc() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some(c) => s.push(c),
                    None => return Err(CairnError::Parse { message: "unterminated string".into(), position: start }),
                },
                Some(c) => s.push(c),
            }
        }
    }
}

fn is_ident_start(c: char) -> bool { c.is_alphabetic() || c == '$' || c == '`' }

fn starts_primary(c: char) -> bool { c.is_ascii_digit() || is_ident_start(c) || c == '#' || c == '(' }

fn negate(v: Value) -> Value {
    match v {
        Value::Integer(n) => Value::Integer(-n),
        Value::Real(x) => Value::Real(-x),
        other => Value::call("Times", vec![Value::Integer(-1), other]),
    }
}
