//! charbpe-training - Vocabulary construction by iterative pair merging
//!
//! This crate learns a character-level BPE vocabulary from a single
//! in-memory text.
//!
//! # Features
//!
//! - Insertion-ordered pair counting so ties resolve deterministically
//! - Non-overlapping left-to-right merge passes
//! - Configurable target vocabulary size and minimum pair frequency
//! - Ordered merge log returned alongside the vocabulary
//!
//! # Example
//!
//! ```rust
//! use charbpe_training::{BpeTrainer, TrainingConfig};
//!
//! let trainer = BpeTrainer::new(TrainingConfig {
//!     vocab_size: 8,
//!     ..Default::default()
//! });
//! let (vocab, merges) = trainer.train("aaabdaaabac")?;
//!
//! assert_eq!(vocab.len(), 8);
//! assert_eq!(merges[0].token, "aa");
//! # Ok::<(), charbpe_training::TokenizerError>(())
//! ```

pub use charbpe_core::{Result, TokenizerError};

pub mod training;
pub use training::{BpeTrainer, Merge, Pair, PairCounter, SymbolSequence, TrainingConfig};
