//! Pair counting for BPE training.
//!
//! Counts are kept in first-seen order so that ties on the highest count are
//! always won by the pair that appeared earliest in the sequence. A plain hash
//! map iterates in an unspecified order and cannot give that guarantee, so the
//! map here only indexes into an ordered ledger.

use ahash::AHashMap;

/// A pair of adjacent symbol IDs.
pub type Pair = (u32, u32);

/// Insertion-ordered table of adjacent pair frequencies.
#[derive(Debug, Clone, Default)]
pub struct PairCounter {
    /// Pair -> position in `entries`
    index: AHashMap<Pair, usize>,
    /// (pair, count) in first-seen order
    entries: Vec<(Pair, u64)>,
}

impl PairCounter {
    /// Create a new pair counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new pair counter with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: AHashMap::with_capacity(capacity),
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Count every adjacent pair of a symbol sequence, left to right.
    pub fn from_symbols(symbols: &[u32]) -> Self {
        let mut counter = Self::with_capacity(symbols.len().saturating_sub(1));
        for window in symbols.windows(2) {
            counter.add((window[0], window[1]));
        }
        counter
    }

    /// Record one occurrence of a pair.
    pub fn add(&mut self, pair: Pair) {
        match self.index.get(&pair) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(pair, self.entries.len());
                self.entries.push((pair, 1));
            }
        }
    }

    /// Get the current count for a pair.
    pub fn get(&self, pair: Pair) -> Option<u64> {
        self.index.get(&pair).map(|&slot| self.entries[slot].1)
    }

    /// The pair with the highest count; the earliest-seen pair wins ties.
    pub fn most_frequent(&self) -> Option<(Pair, u64)> {
        let mut best: Option<(Pair, u64)> = None;
        for &(pair, count) in &self.entries {
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((pair, count));
            }
        }
        best
    }

    /// Iterate over `(pair, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (Pair, u64)> + '_ {
        self.entries.iter().copied()
    }

    /// Get the number of distinct pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no pairs were counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_pairs() {
        let counter = PairCounter::from_symbols(&[0, 1, 2, 0, 1]);

        assert_eq!(counter.len(), 3);
        assert_eq!(counter.get((0, 1)), Some(2));
        assert_eq!(counter.get((1, 2)), Some(1));
        assert_eq!(counter.get((2, 0)), Some(1));
        assert_eq!(counter.get((1, 0)), None);
    }

    #[test]
    fn test_overlapping_pairs_counted() {
        let counter = PairCounter::from_symbols(&[7, 7, 7, 7]);
        assert_eq!(counter.get((7, 7)), Some(3));
    }

    #[test]
    fn test_first_seen_order() {
        let counter = PairCounter::from_symbols(&[3, 2, 1, 0]);
        let pairs: Vec<Pair> = counter.iter().map(|(pair, _)| pair).collect();
        assert_eq!(pairs, vec![(3, 2), (2, 1), (1, 0)]);
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        // (5, 1) and (1, 0) both occur twice; (5, 1) is seen first
        let counter = PairCounter::from_symbols(&[5, 1, 0, 5, 1, 0]);
        assert_eq!(counter.get((5, 1)), Some(2));
        assert_eq!(counter.get((1, 0)), Some(2));
        assert_eq!(counter.most_frequent(), Some(((5, 1), 2)));
    }

    #[test]
    fn test_strictly_higher_count_wins() {
        let counter = PairCounter::from_symbols(&[9, 8, 0, 1, 0, 1, 0, 1]);
        assert_eq!(counter.most_frequent(), Some(((0, 1), 3)));
    }

    #[test]
    fn test_too_short_for_pairs() {
        assert!(PairCounter::from_symbols(&[]).is_empty());
        assert!(PairCounter::from_symbols(&[4]).is_empty());
        assert_eq!(PairCounter::new().most_frequent(), None);
    }
}
