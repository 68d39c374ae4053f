//! The working corpus during training.

use super::counter::{Pair, PairCounter};

/// Training text as a sequence of symbol IDs, coalesced as merges apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolSequence {
    symbols: Vec<u32>,
}

impl SymbolSequence {
    pub fn new(symbols: Vec<u32>) -> Self {
        Self { symbols }
    }

    /// Count adjacent pairs in the current sequence.
    pub fn count_pairs(&self) -> PairCounter {
        PairCounter::from_symbols(&self.symbols)
    }

    /// Replace every non-overlapping occurrence of `pair` with `new_id`.
    ///
    /// Single left-to-right pass: a match consumes both symbols, so `x x x`
    /// merged on `(x, x)` becomes `xx x`. Returns the number of replacements.
    pub fn merge_pair(&mut self, pair: Pair, new_id: u32) -> usize {
        let mut merged = Vec::with_capacity(self.symbols.len());
        let mut replaced = 0;
        let mut i = 0;

        while i < self.symbols.len() {
            if i + 1 < self.symbols.len() && (self.symbols[i], self.symbols[i + 1]) == pair {
                merged.push(new_id);
                replaced += 1;
                i += 2;
            } else {
                merged.push(self.symbols[i]);
                i += 1;
            }
        }

        self.symbols = merged;
        replaced
    }

    pub fn symbols(&self) -> &[u32] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
