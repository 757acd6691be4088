//! Fixed-size transposition memo keyed by Zobrist hash.
//!
//! Direct-indexed with depth-preferred replacement. A table lives for a single
//! search call, so there is no aging.

use crate::search::board_scoring::Score;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// True value is at least `score`.
    Lower,
    /// True value is at most `score`.
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u8,
    pub score: Score,
    pub bound: Bound,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
}

impl TranspositionTable {
    const DEPTH_REPLACE_MARGIN: u8 = 2;

    pub fn new_with_mb(size_mb: usize) -> Self {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let entry_size = std::mem::size_of::<Option<TTEntry>>().max(1);
        let count = (bytes / entry_size).max(1);
        Self {
            entries: vec![None; count],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    fn idx(&self, key: u64) -> usize {
        (key as usize) % self.entries.len()
    }

    pub fn probe(&self, key: u64) -> Option<TTEntry> {
        self.entries[self.idx(key)].filter(|e| e.key == key)
    }

    pub fn store(&mut self, entry: TTEntry) {
        let idx = self.idx(entry.key);
        let replace = match self.entries[idx] {
            None => true,
            Some(existing) if existing.key == entry.key => entry.depth >= existing.depth,
            Some(existing) => {
                entry.depth.saturating_add(Self::DEPTH_REPLACE_MARGIN) >= existing.depth
            }
        };
        if replace {
            self.entries[idx] = Some(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Bound, TTEntry, TranspositionTable};

    fn entry(key: u64, depth: u8, score: i32, bound: Bound) -> TTEntry {
        TTEntry {
            key,
            depth,
            score,
            bound,
        }
    }

    #[test]
    fn store_and_probe_round_trip() {
        let mut tt = TranspositionTable::new_with_mb(1);
        let stored = entry(123, 5, 42, Bound::Exact);
        tt.store(stored);
        assert_eq!(tt.probe(123), Some(stored));
        assert_eq!(tt.probe(124), None);
    }

    #[test]
    fn depth_preferred_replacement() {
        let mut tt = TranspositionTable::new_with_mb(1);
        let key = 555;
        tt.store(entry(key, 2, 1, Bound::Upper));
        tt.store(entry(key, 1, 9, Bound::Exact));
        assert_eq!(tt.probe(key).expect("exists").score, 1);

        tt.store(entry(key, 6, 3, Bound::Lower));
        let got = tt.probe(key).expect("exists");
        assert_eq!(got.depth, 6);
        assert_eq!(got.bound, Bound::Lower);
    }

    #[test]
    fn colliding_shallow_entry_does_not_evict_deep_one() {
        let mut tt = TranspositionTable::new_with_mb(1);
        let len = tt.len() as u64;
        tt.store(entry(7, 6, 10, Bound::Exact));
        tt.store(entry(7 + len, 1, 20, Bound::Exact));
        assert_eq!(tt.probe(7).expect("kept").score, 10);
        assert_eq!(tt.probe(7 + len), None);
    }
}
