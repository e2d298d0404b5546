//! String interning for identifiers and string-literal contents.
//!
//! Interning means every distinct string is stored exactly once; a
//! [`Symbol`] is a cheap, `Copy` handle into that table, so comparing two
//! identifiers for equality is a pointer/integer comparison instead of a
//! byte-by-byte scan.

use rustc_hash::FxHashMap;
use std::sync::{Mutex, OnceLock};

struct Interner {
    strings: Vec<&'static str>,
    names: FxHashMap<&'static str, u32>,
}

impl Interner {
    fn new() -> Self {
        Interner {
            strings: Vec::new(),
            names: FxHashMap::default(),
        }
    }

    fn intern(&mut self, s: &str) -> u32 {
        if let Some(&id) = self.names.get(s) {
            return id;
        }
        let id = self.strings.len() as u32;
        // Leaked once per distinct string for the process lifetime, which is
        // the entire point of interning a compiler's identifier table: it is
        // never freed until the process exits.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        self.strings.push(leaked);
        self.names.insert(leaked, id);
        id
    }

    fn resolve(&self, id: u32) -> &'static str {
        self.strings[id as usize]
    }
}

fn interner() -> &'static Mutex<Interner> {
    static INTERNER: OnceLock<Mutex<Interner>> = OnceLock::new();
    INTERNER.get_or_init(|| Mutex::new(Interner::new()))
}

/// An interned string. Two symbols compare equal iff their underlying text
/// is equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(text: &str) -> Symbol {
        Symbol(interner().lock().unwrap().intern(text))
    }

    pub fn as_str(&self) -> &'static str {
        interner().lock().unwrap().resolve(self.0)
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::intern(s)
    }
}
