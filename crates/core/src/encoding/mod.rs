//! Encoding strategies for fitted vocabularies.
//!
//! Only character-level greedy longest-match segmentation is provided.

pub mod char_level;

pub use char_level::{CharLevelEncoder, FALLBACK_ID};
