//! Per-query memo of full match result sets.

use std::collections::HashMap;
use std::num::NonZeroUsize;

use crate::matcher::Match;

/// One cached result set: `results[id]` is the match outcome for tree
/// node `id` under the keyed query.
pub type Results = Vec<Option<Match>>;

/// Bounded LRU cache keyed by the exact query string. A hit is
/// bit-for-bit identical to a fresh recompute against the same tree;
/// any tree content change must go through [`MatchCache::clear`].
pub struct MatchCache {
    capacity: usize,
    entries: HashMap<String, Results>,
    /// Least recently touched first. Small (tens of entries), so the
    /// linear recency update is fine.
    recency: Vec<String>,
}

impl MatchCache {
    pub fn new(capacity: NonZeroUsize) -> MatchCache {
        MatchCache {
            capacity: capacity.get(),
            entries: HashMap::new(),
            recency: Vec::new(),
        }
    }

    /// Look up a query, refreshing its recency on a hit.
    pub fn get(&mut self, query: &str) -> Option<&Results> {
        if !self.entries.contains_key(query) {
            return None;
        }
        self.touch(query);
        self.entries.get(query)
    }

    /// Store a result set, evicting the least recently touched entry
    /// on overflow.
    pub fn put(&mut self, query: String, results: Results) {
        self.entries.insert(query.clone(), results);
        self.touch(&query);
        while self.entries.len() > self.capacity {
            let oldest = self.recency.remove(0);
            self.entries.remove(&oldest);
        }
    }

    /// Drop everything. Required whenever tree content changes
    /// (collapse toggles are view-only and do not need this).
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn touch(&mut self, query: &str) {
        if let Some(i) = self.recency.iter().position(|q| q == query) {
            self.recency.remove(i);
        }
        self.recency.push(query.to_string());
    }
}
