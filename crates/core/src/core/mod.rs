//! Core data structures shared by training and tokenization.

pub mod vocab;

pub use vocab::{Vocab, VocabR, Vocabulary};
