//! Insertion-ordered storage for named parameters.

use crate::qb::param::ParamValue;
use std::collections::HashMap;

/// Named parameters in first-insertion order.
///
/// Updating an existing name keeps its position; removing a name shifts the
/// later entries down without reordering them.
#[derive(Clone, Debug, Default)]
pub struct NamedParams {
    entries: Vec<(String, ParamValue)>,
    index: HashMap<String, usize>,
}

impl NamedParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new name at the end, or replace the value of an existing one in place.
    pub fn set(&mut self, name: &str, value: ParamValue) {
        match self.index.get(name) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(name.to_string(), self.entries.len());
                self.entries.push((name.to_string(), value));
            }
        }
    }

    /// Remove a name, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        let i = self.index.remove(name)?;
        let (_, value) = self.entries.remove(i);
        for (_, pos) in self.index.iter_mut() {
            if *pos > i {
                *pos -= 1;
            }
        }
        Some(value)
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Total positional slots across all values.
    pub fn slots(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.slots()).sum()
    }
}
