use rustc_hash::FxHashMap;
use std::borrow::Borrow;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::dataset::Transaction;
use crate::substitute::UsedSet;

/// An ordered, fixed-length run of item identifiers used as a dictionary
/// lookup key. Equality and hashing are position-sensitive over the element
/// sequence: `[1, 2]` and `[2, 1]` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceKey(Box<[u64]>);

impl SequenceKey {
    pub fn new(items: &[u64]) -> Self {
        Self(items.into())
    }

    pub fn items(&self) -> &[u64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Lets the dictionary probe with a borrowed `&[u64]` window instead of
// allocating a key per lookup. Sound because the derived `Hash` defers to
// the slice's hash.
impl Borrow<[u64]> for SequenceKey {
    fn borrow(&self) -> &[u64] {
        &self.0
    }
}

impl fmt::Display for SequenceKey {
    /// Trailing-comma text form, e.g. `1,2,3,`: the key half of a persisted
    /// dictionary line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.0 {
            write!(f, "{},", item)?;
        }
        Ok(())
    }
}

/// Key -> code map shared across all window lengths.
///
/// Codes come from a single running counter that is never reset between
/// length classes: a key gets the next code the first time it is seen and
/// keeps it for the lifetime of the run. No two keys ever share a code.
#[derive(Debug, Default)]
pub struct SequenceDictionary {
    entries: FxHashMap<SequenceKey, u64>,
    next_code: u64,
}

impl SequenceDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The code the next unseen key would receive.
    pub fn next_code(&self) -> u64 {
        self.next_code
    }

    /// Code for the window starting at a cursor, or `None` when the window
    /// was never recorded. A miss is "not a match", never an error.
    pub fn code_for_window(&self, window: &[u64]) -> Option<u64> {
        self.entries.get(window).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SequenceKey, u64)> {
        self.entries.iter().map(|(key, &code)| (key, code))
    }

    /// Slide a width-`length` window across every transaction (offsets
    /// `0..=len - length`) and assign a fresh code to each key on first
    /// sight. Keys already present are left untouched, so codes are strictly
    /// increasing in first-seen order: dataset order, then left to right
    /// within a transaction. Transactions shorter than `length` contribute
    /// nothing. The dataset itself is never mutated here; every
    /// identification pass must therefore run before the first substitution
    /// pass rewrites it.
    pub fn record_windows(&mut self, dataset: &[Transaction], length: usize) {
        assert!(length >= 1, "window length must be at least 1");
        for transaction in dataset {
            for window in transaction.windows(length) {
                if !self.entries.contains_key(window) {
                    self.entries.insert(SequenceKey::new(window), self.next_code);
                    self.next_code += 1;
                }
            }
        }
    }

    /// Drop every entry whose key never made it into the rewritten output.
    /// Idempotent: pruning again with the same used-set removes nothing.
    pub fn prune(&mut self, used: &UsedSet) {
        self.entries.retain(|key, _| used.contains(key));
    }

    /// Entries sorted by code. The underlying map is unordered; sorting here
    /// makes the persisted file and decode tables reproducible across runs.
    pub fn entries_by_code(&self) -> Vec<(&SequenceKey, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by_key(|&(_, code)| code);
        entries
    }

    /// Persist as plain text, one `<key-with-trailing-comma> <code>` line per
    /// entry, sorted by code.
    pub fn save_to_file(&self, path: &Path) -> std::io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        for (key, code) in self.entries_by_code() {
            writeln!(out, "{} {}", key, code)?;
        }
        out.flush()
    }
}
