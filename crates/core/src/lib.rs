//! charbpe-core - Core character-level BPE data structures
//!
//! This crate provides the fitted vocabulary and the greedy longest-match
//! encoder that every other charbpe crate builds on.
//!
//! # Features
//!
//! - Dense id <-> token mappings using `AHashMap` and compact strings
//! - Trie-backed longest-match encoding with a silent fallback id
//! - Permissive decoding that drops unknown ids
//! - A single error type shared across the workspace
//!
//! # Example
//!
//! ```rust
//! use charbpe_core::{CharLevelEncoder, Vocabulary};
//!
//! let vocab = Vocabulary::from_tokens(["a", "b", "ab"])?;
//! let encoder = CharLevelEncoder::new(vocab);
//!
//! assert_eq!(encoder.encode("abba"), vec![2, 1, 0]);
//! assert_eq!(encoder.decode(&[2, 1, 0]), "abba");
//! # Ok::<(), charbpe_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

pub mod core;
pub use crate::core::{Vocab, VocabR, Vocabulary};

pub mod encoding;
pub use encoding::{CharLevelEncoder, FALLBACK_ID};
