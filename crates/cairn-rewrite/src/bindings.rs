use cairn_core::value::Value;
use std::collections::HashMap;

/// Pattern-variable name to matched sub-expression.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings(HashMap<String, Value>);

impl Bindings {
    pub fn new() -> Self { Self::default() }

    pub fn contains(&self, name: &str) -> bool { self.0.contains_key(name) }

    pub fn get(&self, name: &str) -> Option<&Value> { self.0.get(name) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn names(&self) -> impl Iterator<Item = &str> { self.0.keys().map(|k| k.as_str()) }

    /// Binds `name` to `value`, failing when it is already bound to something else.
    pub fn bind(&mut self, name: &str, value: Value) -> bool {
        match self.0.get(name) {
            Some(prev) => *prev == value,
            None => {
                self.0.insert(name.to_string(), value);
                true
            }
        }
    }
}

impl FromIterator<(String, Value)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self { Bindings(iter.into_iter().collect()) }
}
