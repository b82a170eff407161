//! String interner for identifier deduplication.
//!
//! Identifier and property names are interned into a shared pool and passed
//! around as `Atom` indices. Comparisons become integer comparisons instead
//! of string comparisons, and name-heavy structures (symbol tables, property
//! shapes) store a u32 per name.

use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use std::sync::RwLock;

/// An interned string identifier.
///
/// Atoms are cheap to copy (just a u32) and can be compared with `==` in
/// O(1). To get the actual string, use `Interner::resolve(atom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// Sentinel value representing no atom / empty string.
    pub const NONE: Atom = Atom(0);

    /// Check if this is the empty/none atom.
    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Get the raw index value.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Names the checker looks up constantly: language keywords, the standard
/// generic types recognized by the classification layer, and the ArkTS
/// concurrency API names. Preseeding keeps their atoms stable and avoids
/// first-use write contention.
const COMMON_STRINGS: &[&str] = &[
    "var",
    "let",
    "const",
    "class",
    "interface",
    "enum",
    "function",
    "static",
    "delete",
    "typeof",
    "instanceof",
    "constructor",
    "global",
    "iterator",
    "Array",
    "ReadonlyArray",
    "Record",
    "Partial",
    "Required",
    "Readonly",
    "Function",
    "Map",
    "Set",
    "Object",
    "String",
    "Number",
    "Boolean",
    "BigInt",
    "Error",
    "Promise",
    "Symbol",
    "SymbolConstructor",
    "ISendable",
    "Sendable",
    "ESObject",
    "lang",
    "collections",
];

/// Thread-safe string interner.
///
/// Lookup goes through a concurrent map; resolution reads an append-only
/// table guarded by a read-write lock. Atom 0 is reserved for the empty
/// string.
pub struct Interner {
    map: DashMap<Arc<str>, Atom>,
    strings: RwLock<Vec<Arc<str>>>,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    /// Create a new interner preseeded with the common strings.
    pub fn new() -> Self {
        let interner = Self {
            map: DashMap::new(),
            strings: RwLock::new(Vec::with_capacity(COMMON_STRINGS.len() + 1)),
        };
        // Atom::NONE maps to the empty string.
        interner.intern("");
        for s in COMMON_STRINGS {
            interner.intern(s);
        }
        interner
    }

    /// Intern a string, returning its atom. Repeated calls with the same
    /// string return the same atom.
    pub fn intern(&self, text: &str) -> Atom {
        if let Some(existing) = self.map.get(text) {
            return *existing;
        }
        let mut strings = self.strings.write().expect("interner lock poisoned");
        // Re-check under the write lock: another thread may have interned
        // the string between the map probe and lock acquisition.
        if let Some(existing) = self.map.get(text) {
            return *existing;
        }
        let arc: Arc<str> = Arc::from(text);
        let atom = Atom(strings.len() as u32);
        strings.push(arc.clone());
        self.map.insert(arc, atom);
        atom
    }

    /// Look up a string without interning it.
    pub fn get(&self, text: &str) -> Option<Atom> {
        self.map.get(text).map(|a| *a)
    }

    /// Resolve an atom back to its string.
    pub fn resolve(&self, atom: Atom) -> Arc<str> {
        let strings = self.strings.read().expect("interner lock poisoned");
        strings
            .get(atom.0 as usize)
            .cloned()
            .unwrap_or_else(|| Arc::from(""))
    }

    /// Number of interned strings (including the empty-string sentinel).
    pub fn len(&self) -> usize {
        self.strings.read().expect("interner lock poisoned").len()
    }

    /// Check if the interner holds only the sentinel.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_returns_stable_atoms() {
        let interner = Interner::new();
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        assert_eq!(a, b);
        assert_eq!(&*interner.resolve(a), "foo");
    }

    #[test]
    fn distinct_strings_get_distinct_atoms() {
        let interner = Interner::new();
        let a = interner.intern("foo");
        let b = interner.intern("bar");
        assert_ne!(a, b);
    }

    #[test]
    fn none_atom_is_empty_string() {
        let interner = Interner::new();
        assert_eq!(interner.intern(""), Atom::NONE);
        assert_eq!(&*interner.resolve(Atom::NONE), "");
    }

    #[test]
    fn common_strings_are_preseeded() {
        let interner = Interner::new();
        assert!(interner.get("Array").is_some());
        assert!(interner.get("ISendable").is_some());
    }
}
