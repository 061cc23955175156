/// KeySwitch: key → bulk property assignment table.
///
/// Each bound key carries an ordered list of `(property, value)` pairs.
/// Pressing the key applies the whole list through a [`PropertyTable`] in
/// one atomic step. Unbound keys are ignored.

use rustc_hash::FxHashMap;
use winit::keyboard::KeyCode;
use crate::error::Result;
use super::props::{PropValue, PropertyTable};

#[derive(Debug, Clone, Default)]
pub struct KeySwitch {
    bindings: FxHashMap<KeyCode, Vec<(String, PropValue)>>,
}

impl KeySwitch {
    pub fn new() -> Self {
        Self { bindings: FxHashMap::default() }
    }

    /// Builder-style [`KeySwitch::bind`]
    pub fn with(mut self, key: KeyCode, assignments: &[(&str, PropValue)]) -> Self {
        self.bind(key, assignments);
        self
    }

    /// Bind `key` to a list of assignments, replacing any previous binding
    pub fn bind(&mut self, key: KeyCode, assignments: &[(&str, PropValue)]) {
        let assignments = assignments
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        self.bindings.insert(key, assignments);
    }

    pub fn unbind(&mut self, key: KeyCode) -> bool {
        self.bindings.remove(&key).is_some()
    }

    pub fn is_bound(&self, key: KeyCode) -> bool {
        self.bindings.contains_key(&key)
    }

    pub fn assignments(&self, key: KeyCode) -> Option<&[(String, PropValue)]> {
        self.bindings.get(&key).map(|a| a.as_slice())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Apply the binding for `key` to `target`.
    ///
    /// Returns `Ok(false)` for an unbound key, `Ok(true)` once every
    /// assignment has been applied.
    pub fn apply<S>(&self, key: KeyCode, target: &mut S, properties: &PropertyTable<S>) -> Result<bool> {
        match self.bindings.get(&key) {
            Some(assignments) => {
                properties.apply_all(target, assignments)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
#[path = "key_switch_tests.rs"]
mod tests;
