//! Vocabulary storage and lookup.
//!
//! Ids are dense: the token at position `i` of the reverse table has id `i`,
//! and that order is the order in which training discovered the tokens.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;

/// Forward mapping: token string -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// Reverse mapping: ID -> token string, indexed by ID
pub type VocabR = Vec<CompactString>;

/// Ordered vocabulary with forward and reverse mappings.
///
/// A `Vocabulary` is immutable once built. The forward map is always derived
/// from the reverse table and never edited on its own.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Forward mapping: token string -> ID
    vocab: Vocab,
    /// Reverse mapping: ID -> token string
    vocab_r: VocabR,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self {
            vocab: Vocab::new(),
            vocab_r: VocabR::new(),
        }
    }

    /// Build a vocabulary from tokens in id order.
    ///
    /// Fails on an empty token string or a token that appears twice.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens.into_iter();
        let (lower, _) = tokens.size_hint();
        let mut vocab = Vocab::with_capacity(lower);
        let mut vocab_r = VocabR::with_capacity(lower);

        for token in tokens {
            let token = token.as_ref();
            if token.is_empty() {
                return Err(TokenizerError::InvalidToken(format!(
                    "empty token at id {}",
                    vocab_r.len()
                )));
            }

            let id = next_id(vocab_r.len(), token)?;
            let token = CompactString::new(token);
            if let Some(existing) = vocab.insert(token.clone(), id) {
                return Err(TokenizerError::InvalidToken(format!(
                    "{:?} appears at both id {} and id {}",
                    token, existing, id
                )));
            }
            vocab_r.push(token);
        }

        Ok(Self { vocab, vocab_r })
    }

    /// Get the ID for a token string.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    /// Get the token string for an ID.
    #[inline]
    pub fn get_token(&self, id: u32) -> Option<&str> {
        self.vocab_r.get(id as usize).map(|s| s.as_str())
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab_r.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab_r.is_empty()
    }

    /// Tokens in id order.
    pub fn tokens(&self) -> &[CompactString] {
        &self.vocab_r
    }

    /// Iterate over `(id, token)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.vocab_r
            .iter()
            .enumerate()
            .map(|(id, token)| (id as u32, token.as_str()))
    }

    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }
}

/// Id for the token stored at position `len`, if it fits in a `u32`.
fn next_id(len: usize, token: &str) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        TokenizerError::InvalidToken(format!(
            "{:?} at position {} does not fit in the u32 id space",
            token, len
        ))
    })
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Vocabulary {
    fn eq(&self, other: &Self) -> bool {
        self.vocab_r == other.vocab_r
    }
}

impl Eq for Vocabulary {}
