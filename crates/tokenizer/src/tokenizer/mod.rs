//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that ties a fitted
//! vocabulary to encoding, decoding and persistence.

use crate::io::{TokenizerLoader, TokenizerSaver};
use charbpe_core::{CharLevelEncoder, Result, TokenizerError, Vocabulary};
use charbpe_training::{BpeTrainer, Merge, TrainingConfig};
use std::io::{Read, Write};
use std::path::Path;

/// Configuration for building a tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Target vocabulary size
    pub vocab_size: usize,
    /// Minimum pair frequency for merges during fitting
    pub min_frequency: u64,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        let training = TrainingConfig::default();
        Self {
            vocab_size: training.vocab_size,
            min_frequency: training.min_frequency,
        }
    }
}

impl From<TrainingConfig> for TokenizerConfig {
    fn from(config: TrainingConfig) -> Self {
        Self {
            vocab_size: config.vocab_size,
            min_frequency: config.min_frequency,
        }
    }
}

impl From<&TokenizerConfig> for TrainingConfig {
    fn from(config: &TokenizerConfig) -> Self {
        Self {
            vocab_size: config.vocab_size,
            min_frequency: config.min_frequency,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target vocabulary size.
    pub fn vocab_size(mut self, size: usize) -> Self {
        self.config.vocab_size = size;
        self
    }

    /// Set the minimum frequency for merges.
    pub fn min_frequency(mut self, freq: u64) -> Self {
        self.config.min_frequency = freq;
        self
    }

    /// Build an empty tokenizer, ready to be fitted.
    pub fn build(self) -> Tokenizer {
        Tokenizer::new(self.config)
    }
}

/// Main tokenizer struct.
///
/// Starts empty, is populated once by [`Tokenizer::fit`] or by loading, and
/// is read-only afterwards. An empty tokenizer encodes every character to the
/// fallback id `0` and decodes everything to the empty string.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    config: TokenizerConfig,
    encoder: CharLevelEncoder,
}

impl Tokenizer {
    /// Create a new, unfitted tokenizer with the given configuration.
    pub fn new(config: TokenizerConfig) -> Self {
        Self {
            config,
            encoder: CharLevelEncoder::default(),
        }
    }

    /// Create an unfitted tokenizer with a target vocabulary size.
    pub fn with_vocab_size(vocab_size: usize) -> Self {
        Self::builder().vocab_size(vocab_size).build()
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Rebuild a tokenizer around an existing vocabulary.
    ///
    /// The vocabulary must fit within `config.vocab_size`, and
    /// `config.min_frequency` must be at least 1, so that whatever this
    /// tokenizer saves can be loaded again.
    pub fn from_vocab(vocab: Vocabulary, config: TokenizerConfig) -> Result<Self> {
        if vocab.len() > config.vocab_size {
            return Err(TokenizerError::InvalidConfig(format!(
                "{} tokens exceed vocab_size {}",
                vocab.len(),
                config.vocab_size
            )));
        }
        if config.min_frequency == 0 {
            return Err(TokenizerError::InvalidConfig(
                "min_frequency must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            config,
            encoder: CharLevelEncoder::new(vocab),
        })
    }

    /// Fit the vocabulary on text.
    ///
    /// Replaces any previous vocabulary and returns the merges performed.
    pub fn fit(&mut self, text: &str) -> Result<Vec<Merge>> {
        let trainer = BpeTrainer::new(TrainingConfig::from(&self.config));
        let (vocab, merges) = trainer.train(text)?;
        self.encoder = CharLevelEncoder::new(vocab);
        Ok(merges)
    }

    /// Encode text to token IDs.
    ///
    /// Characters the vocabulary does not cover become id `0`.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        self.encoder.encode(text)
    }

    /// Encode text, also reporting which positions used the fallback id.
    pub fn encode_with_details(&self, text: &str) -> Encoding {
        let (ids, unknown) = self.encoder.encode_with_details(text);
        Encoding { ids, unknown }
    }

    /// Decode token IDs back to text.
    ///
    /// IDs outside the vocabulary are skipped.
    pub fn decode(&self, ids: &[u32]) -> String {
        self.encoder.decode(ids)
    }

    /// Get the configured vocabulary cap.
    pub fn vocab_size(&self) -> usize {
        self.config.vocab_size
    }

    /// Get the number of tokens actually in the vocabulary.
    pub fn len(&self) -> usize {
        self.encoder.vocab().len()
    }

    /// Check if the vocabulary is empty.
    pub fn is_empty(&self) -> bool {
        self.encoder.vocab().is_empty()
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        self.encoder.vocab()
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    pub fn id_to_token(&self, id: u32) -> Option<&str> {
        self.encoder.vocab().get_token(id)
    }

    pub fn token_to_id(&self, token: &str) -> Option<u32> {
        self.encoder.vocab().get_id(token)
    }

    /// Serialize the fitted state to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.saver().to_bytes()
    }

    /// Reconstruct a tokenizer from bytes produced by [`Tokenizer::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (vocab, config) = TokenizerLoader::from_bytes(bytes)?;
        Self::from_vocab(vocab, config.into())
    }

    /// Serialize the fitted state to a writer.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        self.saver().to_writer(writer)
    }

    /// Reconstruct a tokenizer from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let (vocab, config) = TokenizerLoader::from_reader(reader)?;
        Self::from_vocab(vocab, config.into())
    }

    /// Save the tokenizer to a directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.saver().save(path)
    }

    /// Load a tokenizer from a directory.
    pub fn load(path: &Path) -> Result<Self> {
        let (vocab, config) = TokenizerLoader::load(path)?;
        Self::from_vocab(vocab, config.into())
    }

    fn saver(&self) -> TokenizerSaver<'_> {
        TokenizerSaver::new(self.encoder.vocab(), TrainingConfig::from(&self.config))
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerConfig::default())
    }
}

/// Result of encoding text with details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    /// Token IDs
    pub ids: Vec<u32>,
    /// Character offsets (into the input) that fell back to id `0`
    pub unknown: Vec<usize>,
}

impl Encoding {
    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True if any position used the fallback id.
    pub fn has_unknown(&self) -> bool {
        !self.unknown.is_empty()
    }
}
