//! # Raw Request Parameters
//!
//! Untyped query-string input as handed over by the HTTP layer. A key
//! that appears once holds a single value; a repeated key keeps every
//! value in arrival order (`price=gte_10&price=lte_50`).

use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Value of one query-string key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    Many(Vec<String>),
}

impl ParamValue {
    /// All values in arrival order
    pub fn values(&self) -> &[String] {
        match self {
            ParamValue::Single(value) => std::slice::from_ref(value),
            ParamValue::Many(values) => values,
        }
    }

    /// Append another value, promoting a single value to a list
    fn push(&mut self, value: String) {
        match self {
            ParamValue::Single(existing) => {
                let first = std::mem::take(existing);
                *self = ParamValue::Many(vec![first, value]);
            }
            ParamValue::Many(values) => values.push(value),
        }
    }
}

/// Parsed query-string parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawParams {
    entries: HashMap<String, ParamValue>,
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from decoded `(key, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (key, value) in pairs {
            params.insert(key, value);
        }
        params
    }

    /// Add a value for `key`, keeping earlier values
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.entries.entry(key.into()) {
            Entry::Occupied(mut existing) => existing.get_mut().push(value),
            Entry::Vacant(slot) => {
                slot.insert(ParamValue::Single(value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First non-blank value of a scalar parameter, trimmed
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key)?
            .values()
            .iter()
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
    }

    /// A comma-list parameter; repeated keys are joined into one list
    pub fn list(&self, key: &str) -> Option<String> {
        let joined = self
            .get(key)?
            .values()
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(",");

        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }

    /// Every non-blank value of a repeatable parameter, trimmed
    pub fn terms(&self, key: &str) -> Vec<&str> {
        self.get(key)
            .map(|value| {
                value
                    .values()
                    .iter()
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
