//! Persisted layout of a fitted tokenizer.
//!
//! The training settings and the id -> token table are stored; the
//! token -> id direction is rebuilt on load.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version tag written into every saved tokenizer.
pub const FORMAT_VERSION: &str = "1";

/// File name used when saving to or loading from a directory.
pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Complete tokenizer serialization format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedTokenizer {
    /// Format version
    pub version: String,
    /// Configured vocabulary cap
    pub vocab_size: usize,
    /// Minimum pair frequency used when fitting
    #[serde(default = "default_min_frequency")]
    pub min_frequency: u64,
    /// Reverse vocabulary (ID -> token), ordered by ID
    pub id2token: BTreeMap<u32, String>,
}

fn default_min_frequency() -> u64 {
    1
}
