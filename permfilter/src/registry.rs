//! Process-wide mapping from permission identifiers to dense bit indices.
//!
//! Indices are handed out in first-registration order starting at zero. Once an
//! identifier has an index it keeps it for the life of the process: there is no
//! removal, reset, or reuse.
//!
//! Generated filters register their identifiers through [`Registry::global`]
//! before the first redaction. Callers assembling a mask use the same instance
//! so that both sides agree on every index.

use std::{collections::HashMap, sync::OnceLock};

use parking_lot::RwLock;

use crate::mask::BitSet;

#[derive(Debug, Default)]
struct Entries {
    by_identifier: HashMap<String, usize>,
    // Position is the index.
    identifiers: Vec<String>,
}

/// Assigns stable integer indices to permission identifiers.
///
/// Safe for any number of concurrent readers and writers. Only the first
/// registration of a new identifier takes the write lock.
#[derive(Debug, Default)]
pub struct Registry {
    entries: RwLock<Entries>,
}

impl Registry {
    /// Creates an empty registry, independent of the global one.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide registry used by generated code.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::new)
    }

    /// Registers `identifier` and returns its index.
    ///
    /// Registering an identifier that already has an index returns that index.
    /// Otherwise the next unused index (the current number of identifiers) is
    /// assigned.
    pub fn register(&self, identifier: &str) -> usize {
        if let Some(index) = self.lookup(identifier) {
            return index;
        }

        let mut entries = self.entries.write();
        // Another writer may have won the race between the two locks.
        if let Some(&index) = entries.by_identifier.get(identifier) {
            return index;
        }
        let index = entries.identifiers.len();
        entries.identifiers.push(identifier.to_owned());
        entries.by_identifier.insert(identifier.to_owned(), index);
        index
    }

    /// Returns the index of `identifier`, if it has been registered.
    pub fn lookup(&self, identifier: &str) -> Option<usize> {
        self.entries.read().by_identifier.get(identifier).copied()
    }

    /// Returns the identifier registered at `index`.
    pub fn identifier(&self, index: usize) -> Option<String> {
        self.entries.read().identifiers.get(index).cloned()
    }

    /// Number of distinct identifiers registered so far.
    pub fn len(&self) -> usize {
        self.entries.read().identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Builds a mask holding every permission in `permissions`.
    ///
    /// Identifiers are registered on the way in, so a mask assembled before the
    /// generated filters have run still lines up with their indices. The
    /// registry never forgets an identifier; build masks from a closed set of
    /// identifiers, or use [`Registry::known_mask`] for untrusted input.
    pub fn mask<I, S>(&self, permissions: I) -> BitSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        permissions
            .into_iter()
            .map(|permission| self.register(permission.as_ref()))
            .collect()
    }

    /// Builds a mask from the identifiers in `permissions` that are already
    /// registered, skipping the rest.
    ///
    /// Never grows the registry. Fields guarded by an identifier that was not
    /// registered yet stay cleared.
    pub fn known_mask<I, S>(&self, permissions: I) -> BitSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        permissions
            .into_iter()
            .filter_map(|permission| self.lookup(permission.as_ref()))
            .collect()
    }
}
