//! Name and arity dispatch for registered methods.

use std::collections::HashMap;
use std::sync::Arc;

use callweave_foundation::{Error, Result};

use crate::method::Method;

struct MethodEntry {
    method: Arc<dyn Method>,
    persistent: bool,
}

/// Maps `(name, arity)` pairs to handlers.
///
/// Arities are signed: a non-negative arity matches exactly that many
/// arguments, a negative arity `-n` matches "at least n". Resolution tries
/// the exact count first and then the tightest "at least" bound, so a
/// handler registered at `-3` beats one at `-1` for a four-argument call.
///
/// Entries registered as persistent survive [`MethodRegistry::clear`] and
/// cannot be overwritten or unregistered, which lets a host pin its own
/// methods before handing the registry to less trusted configuration.
#[derive(Default)]
pub struct MethodRegistry {
    methods: HashMap<String, HashMap<i32, MethodEntry>>,
}

impl MethodRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a method name: non-empty, no whitespace, and none of the
    /// tokenizer's structural characters.
    ///
    /// # Errors
    /// Returns [`Error`] with the offending name and reason.
    pub fn check_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::invalid_name(name, "name is empty"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(Error::invalid_name(name, "name contains whitespace"));
        }
        if name.contains(['(', ')', ',', '"', '\\']) {
            return Err(Error::invalid_name(name, "name contains a structural character"));
        }
        Ok(())
    }

    /// Registers `method` under `name` for the given arities.
    ///
    /// An empty arity list defaults to `[0, -1]`, covering every argument
    /// count. Existing non-persistent entries are overwritten; persistent
    /// entries are left untouched and not counted. Returns the number of
    /// entries that were overwritten.
    ///
    /// # Errors
    /// Returns an error if the name fails validation.
    pub fn register(&mut self, name: &str, method: &Arc<dyn Method>, arities: &[i32]) -> Result<usize> {
        self.register_inner(name, method, arities, false)
    }

    /// Like [`MethodRegistry::register`], but the new entries are
    /// persistent.
    ///
    /// # Errors
    /// Returns an error if the name fails validation.
    pub fn register_persistent(
        &mut self,
        name: &str,
        method: &Arc<dyn Method>,
        arities: &[i32],
    ) -> Result<usize> {
        self.register_inner(name, method, arities, true)
    }

    fn register_inner(
        &mut self,
        name: &str,
        method: &Arc<dyn Method>,
        arities: &[i32],
        persistent: bool,
    ) -> Result<usize> {
        Self::check_name(name)?;
        let table = self.methods.entry(name.to_string()).or_default();
        let mut overwritten = 0;
        let default_arities = [0, -1];
        let arities = if arities.is_empty() {
            &default_arities[..]
        } else {
            arities
        };
        for &arity in arities {
            match table.get(&arity) {
                Some(entry) if entry.persistent => {}
                existing => {
                    if existing.is_some() {
                        overwritten += 1;
                    }
                    table.insert(
                        arity,
                        MethodEntry {
                            method: Arc::clone(method),
                            persistent,
                        },
                    );
                }
            }
        }
        Ok(overwritten)
    }

    /// Removes the entries for `name` at the given arities (all arities
    /// when the list is empty). Persistent entries are immune. Returns the
    /// number of entries removed.
    pub fn unregister(&mut self, name: &str, arities: &[i32]) -> usize {
        let Some(table) = self.methods.get_mut(name) else {
            return 0;
        };
        let before = table.len();
        if arities.is_empty() {
            table.retain(|_, entry| entry.persistent);
        } else {
            for arity in arities {
                if table.get(arity).is_some_and(|entry| !entry.persistent) {
                    table.remove(arity);
                }
            }
        }
        let removed = before - table.len();
        if table.is_empty() {
            self.methods.remove(name);
        }
        removed
    }

    /// Resolves a method for `argc` arguments: exact arity first, then
    /// `-argc` up through `-1`.
    #[must_use]
    pub fn resolve(&self, name: &str, argc: usize) -> Option<Arc<dyn Method>> {
        let table = self.methods.get(name)?;
        let argc = i32::try_from(argc).ok()?;
        if let Some(entry) = table.get(&argc) {
            return Some(Arc::clone(&entry.method));
        }
        let mut bound = -argc;
        while bound <= -1 {
            if let Some(entry) = table.get(&bound) {
                return Some(Arc::clone(&entry.method));
            }
            bound += 1;
        }
        None
    }

    /// Returns the entry registered at exactly this arity key.
    #[must_use]
    pub fn resolve_arity(&self, name: &str, arity: i32) -> Option<Arc<dyn Method>> {
        self.methods
            .get(name)
            .and_then(|table| table.get(&arity))
            .map(|entry| Arc::clone(&entry.method))
    }

    /// Returns the arity keys registered under `name`.
    #[must_use]
    pub fn arities_of(&self, name: &str) -> Vec<i32> {
        self.methods
            .get(name)
            .map(|table| table.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Returns true if any entry exists under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    /// Returns true if the entry at this arity key is persistent.
    #[must_use]
    pub fn is_persistent(&self, name: &str, arity: i32) -> bool {
        self.methods
            .get(name)
            .and_then(|table| table.get(&arity))
            .is_some_and(|entry| entry.persistent)
    }

    /// Removes all non-persistent entries.
    pub fn clear(&mut self) {
        self.methods.retain(|_, table| {
            table.retain(|_, entry| entry.persistent);
            !table.is_empty()
        });
    }
}
