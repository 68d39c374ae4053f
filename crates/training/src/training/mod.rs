//! Training infrastructure for character-level BPE.
//!
//! This module holds the merge loop and the transient structures it works
//! on: the pair frequency table and the symbol sequence.

pub mod counter;
pub mod sequence;
pub mod trainer;

pub use counter::{Pair, PairCounter};
pub use sequence::SymbolSequence;
pub use trainer::{BpeTrainer, Merge, TrainingConfig};
