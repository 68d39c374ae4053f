//! charbpe-tokenizer - High-level character-level BPE tokenizer
//!
//! This crate ties vocabulary construction, greedy longest-match encoding
//! and persistence together behind a single `Tokenizer` type.
//!
//! # Features
//!
//! - Builder pattern for tokenizer configuration
//! - Deterministic fitting from a single in-memory text
//! - Encoding with optional reporting of unknown characters
//! - Saving and loading as JSON, to bytes, streams or directories
//!
//! # Example
//!
//! ```rust
//! use charbpe_tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::builder().vocab_size(8).build();
//! tokenizer.fit("aaabdaaabac")?;
//!
//! let ids = tokenizer.encode("aaabdaaabac");
//! assert_eq!(ids, vec![7, 6, 0, 2]);
//! assert_eq!(tokenizer.decode(&ids), "aaabdaaabac");
//!
//! let restored = Tokenizer::from_bytes(&tokenizer.to_bytes()?)?;
//! assert_eq!(restored.encode("abac"), tokenizer.encode("abac"));
//! # Ok::<(), charbpe_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use charbpe_core::{Result, TokenizerError, Vocabulary, FALLBACK_ID};
pub use charbpe_training::{Merge, TrainingConfig};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Encoding, Tokenizer, TokenizerBuilder, TokenizerConfig};

// IO/Serialization
pub mod io;
pub use io::{SerializedTokenizer, TokenizerLoader, TokenizerSaver};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
