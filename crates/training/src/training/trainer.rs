//! BPE trainer implementation.
//!
//! Builds a vocabulary by repeatedly merging the most frequent adjacent pair
//! of symbols. The pair table is recounted from scratch on every iteration.

use super::counter::Pair;
use super::sequence::SymbolSequence;
use ahash::AHashMap;
use charbpe_core::{Result, TokenizerError, Vocabulary};
use compact_str::CompactString;
use std::collections::BTreeSet;

/// Configuration for BPE training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingConfig {
    /// Target vocabulary size
    pub vocab_size: usize,
    /// Stop merging once the best pair occurs fewer times than this
    pub min_frequency: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            vocab_size: 256,
            min_frequency: 1,
        }
    }
}

impl TrainingConfig {
    fn validate(&self) -> Result<()> {
        if self.min_frequency == 0 {
            return Err(TokenizerError::InvalidConfig(
                "min_frequency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// One merge performed during training.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merge {
    /// Left and right symbols that were joined
    pub pair: (CompactString, CompactString),
    /// Occurrences of the pair when it was selected
    pub count: u64,
    /// The joined token
    pub token: CompactString,
}

/// Tokens discovered so far, with ids in discovery order.
#[derive(Debug, Default)]
struct SymbolTable {
    tokens: Vec<CompactString>,
    ids: AHashMap<CompactString, u32>,
}

impl SymbolTable {
    /// Returns the token's id and whether it was newly added.
    fn enroll(&mut self, token: CompactString) -> (u32, bool) {
        if let Some(&id) = self.ids.get(&token) {
            return (id, false);
        }
        let id = self.tokens.len() as u32;
        self.ids.insert(token.clone(), id);
        self.tokens.push(token);
        (id, true)
    }

    fn token(&self, id: u32) -> &CompactString {
        &self.tokens[id as usize]
    }

    fn len(&self) -> usize {
        self.tokens.len()
    }
}

/// BPE trainer.
///
/// Initial tokens are the distinct characters of the text in sorted order;
/// each merged token is appended as it is created, so ids reflect discovery
/// order. Training the same text with the same config always yields the same
/// vocabulary.
#[derive(Debug, Clone, Default)]
pub struct BpeTrainer {
    config: TrainingConfig,
}

impl BpeTrainer {
    /// Create a new BPE trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self { config }
    }

    /// Create a new BPE trainer with default configuration.
    pub fn with_vocab_size(vocab_size: usize) -> Self {
        Self::new(TrainingConfig {
            vocab_size,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train on the given text.
    ///
    /// Returns the vocabulary (at most `vocab_size` tokens) and the merges in
    /// the order they were performed. Running out of pairs, or of pairs
    /// frequent enough, ends training early with a smaller vocabulary.
    pub fn train(&self, text: &str) -> Result<(Vocabulary, Vec<Merge>)> {
        self.config.validate()?;
        let vocab_size = self.config.vocab_size;

        let mut table = SymbolTable::default();
        let alphabet: BTreeSet<char> = text.chars().collect();
        let mut char_ids: AHashMap<char, u32> = AHashMap::with_capacity(alphabet.len());
        for &ch in &alphabet {
            let mut buf = [0u8; 4];
            let (id, _) = table.enroll(CompactString::new(ch.encode_utf8(&mut buf)));
            char_ids.insert(ch, id);
        }

        let mut sequence = SymbolSequence::new(text.chars().map(|ch| char_ids[&ch]).collect());

        log::info!(
            "training on {} characters ({} distinct), target vocab size {}",
            sequence.len(),
            alphabet.len(),
            vocab_size
        );

        let mut merges = Vec::new();

        while table.len() < vocab_size {
            let counts = sequence.count_pairs();
            let Some((pair, count)) = counts.most_frequent() else {
                log::debug!("no adjacent pairs left after {} merges", merges.len());
                break;
            };

            if count < self.config.min_frequency {
                log::debug!(
                    "best pair occurs {} times, below min_frequency {}",
                    count,
                    self.config.min_frequency
                );
                break;
            }

            let merge = self.apply_merge(&mut table, &mut sequence, pair, count);
            merges.push(merge);
        }

        let mut tokens = table.tokens;
        tokens.truncate(vocab_size);
        let vocab = Vocabulary::from_tokens(&tokens)?;

        log::info!(
            "training finished: {} tokens after {} merges",
            vocab.len(),
            merges.len()
        );

        Ok((vocab, merges))
    }

    fn apply_merge(
        &self,
        table: &mut SymbolTable,
        sequence: &mut SymbolSequence,
        pair: Pair,
        count: u64,
    ) -> Merge {
        let left = table.token(pair.0).clone();
        let right = table.token(pair.1).clone();
        let mut token = left.clone();
        token.push_str(&right);

        let (new_id, added) = table.enroll(token.clone());
        if added {
            log::debug!(
                "merge {:?} + {:?} -> {:?} (count {}, id {})",
                left,
                right,
                token,
                count,
                new_id
            );
        } else {
            // Spelled the same as an earlier token; reuse its id. No known
            // corpus reaches this, but enrolling a duplicate would break the
            // token -> id bijection.
            log::debug!(
                "merge {:?} + {:?} -> {:?} already enrolled as id {}",
                left,
                right,
                token,
                new_id
            );
        }

        sequence.merge_pair(pair, new_id);

        Merge {
            pair: (left, right),
            count,
            token,
        }
    }
}
