//! Variable storage with per-entry persistence.

use std::collections::HashMap;

use callweave_foundation::Value;

struct VariableEntry {
    value: Value,
    persistent: bool,
}

/// Named values shared by all methods of an engine.
///
/// Each entry is either transient or persistent. Transient entries are
/// swept at the end of every top-level execution, so methods can pass
/// scratch state to each other within one line without leaking it into the
/// next. Setting a variable replaces the whole entry, including its
/// persistence flag.
#[derive(Default)]
pub struct VariableStore {
    entries: HashMap<String, VariableEntry>,
}

impl VariableStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a transient variable.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.set_with_persistency(name, value, false);
    }

    /// Sets a persistent variable.
    pub fn set_persistent(&mut self, name: impl Into<String>, value: Value) {
        self.set_with_persistency(name, value, true);
    }

    /// Sets a variable with an explicit persistence flag.
    pub fn set_with_persistency(&mut self, name: impl Into<String>, value: Value, persistent: bool) {
        self.entries
            .insert(name.into(), VariableEntry { value, persistent });
    }

    /// Returns the value of a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name).map(|entry| &entry.value)
    }

    /// Removes a variable, returning its value.
    pub fn unset(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name).map(|entry| entry.value)
    }

    /// Returns true if the variable exists.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns true if the variable exists and is persistent.
    #[must_use]
    pub fn is_persistent(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(|entry| entry.persistent)
    }

    /// Changes the persistence flag of an existing variable. Returns false
    /// if the variable is not set.
    pub fn set_persistency(&mut self, name: &str, persistent: bool) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.persistent = persistent;
                true
            }
            None => false,
        }
    }

    /// Removes all transient variables.
    pub fn sweep(&mut self) {
        self.entries.retain(|_, entry| entry.persistent);
    }

    /// Removes all variables, persistent ones included.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no variables are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
