//! Explicit frequency counting with a deterministic mode.
//!
//! Every "most common" statistic goes through [`FrequencyTable`] so that ties
//! always resolve to the smallest value, whatever the input order.

use std::collections::BTreeMap;

use serde::Serialize;

/// A value together with how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mode<T> {
    pub value: T,
    pub count: usize,
}

/// Occurrence counts keyed by value.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    counts: BTreeMap<K, usize>,
}

impl<K: Ord> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `key`.
    pub fn add(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Distinct keys in ascending order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> {
        self.counts.keys()
    }

    /// The most frequent key; the smallest key wins ties.
    ///
    /// Keys are visited in ascending order and only a strictly greater count
    /// replaces the current best.
    pub fn mode(&self) -> Option<Mode<K>> {
        let mut best: Option<(&K, usize)> = None;
        for (key, &count) in &self.counts {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((key, count));
            }
        }
        best.map(|(key, count)| Mode {
            value: key.clone(),
            count,
        })
    }

    /// All (key, count) pairs, most frequent first; equal counts in ascending
    /// key order.
    pub fn sorted_by_count(&self) -> Vec<(K, usize)> {
        let mut pairs: Vec<(K, usize)> = self
            .counts
            .iter()
            .map(|(k, &c)| (k.clone(), c))
            .collect();
        // Stable sort keeps the BTreeMap's ascending key order among ties.
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }
}

impl<K: Ord + Clone> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for key in iter {
            table.add(key);
        }
        table
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
