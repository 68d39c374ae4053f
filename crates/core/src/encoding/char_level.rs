//! Character-level greedy longest-match encoding.
//!
//! At each position the longest vocabulary token spelling the upcoming
//! characters wins. Since tokens are distinct, at most one token of a given
//! length can match, so a trie walk yields the same segmentation as testing
//! tokens longest-first.

use crate::core::vocab::Vocabulary;
use ahash::AHashMap;

/// Id emitted for a character that no vocabulary token covers.
///
/// This is also the id of the first vocabulary token; use
/// [`CharLevelEncoder::encode_with_details`] to tell the two apart.
pub const FALLBACK_ID: u32 = 0;

/// Trie node for efficient longest-match tokenization.
#[derive(Debug, Clone, Default)]
struct CharTrieNode {
    /// Child nodes indexed by character
    children: AHashMap<char, CharTrieNode>,
    /// Token ID if this node represents a complete token
    token_id: Option<u32>,
}

/// Trie structure for fast prefix lookup of tokens at character level.
#[derive(Debug, Clone, Default)]
struct CharVocabTrie {
    root: CharTrieNode,
}

impl CharVocabTrie {
    /// Insert a token string into the trie.
    fn insert(&mut self, token: &str, token_id: u32) {
        let mut node = &mut self.root;

        for ch in token.chars() {
            node = node.children.entry(ch).or_default();
        }

        node.token_id = Some(token_id);
    }

    /// Build a trie from a vocabulary.
    fn from_vocab(vocab: &Vocabulary) -> Self {
        let mut trie = Self::default();

        for (token_id, token) in vocab.iter() {
            trie.insert(token, token_id);
        }

        trie
    }

    /// Find the longest matching token starting at the given position.
    ///
    /// Returns the token id and its length in characters.
    fn find_longest_match(&self, chars: &[char], pos: usize) -> Option<(u32, usize)> {
        let mut node = &self.root;
        let mut best_match = None;

        for (offset, ch) in chars[pos..].iter().enumerate() {
            match node.children.get(ch) {
                Some(child) => {
                    node = child;
                    if let Some(token_id) = node.token_id {
                        best_match = Some((token_id, offset + 1));
                    }
                }
                None => break,
            }
        }

        best_match
    }
}

/// Character-level encoder over a fitted vocabulary.
#[derive(Debug, Clone, Default)]
pub struct CharLevelEncoder {
    vocab: Vocabulary,
    vocab_trie: CharVocabTrie,
}

impl CharLevelEncoder {
    /// Create a new character-level encoder.
    pub fn new(vocab: Vocabulary) -> Self {
        let vocab_trie = CharVocabTrie::from_vocab(&vocab);
        Self { vocab, vocab_trie }
    }

    /// The vocabulary this encoder segments against.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Encode text with greedy longest-match segmentation.
    ///
    /// Characters with no vocabulary entry become [`FALLBACK_ID`].
    pub fn encode(&self, text: &str) -> Vec<u32> {
        self.encode_with(text, |_| {})
    }

    /// Encode text and also report the character offsets that fell back to
    /// [`FALLBACK_ID`] because nothing in the vocabulary covered them.
    pub fn encode_with_details(&self, text: &str) -> (Vec<u32>, Vec<usize>) {
        let mut unknown = Vec::new();
        let ids = self.encode_with(text, |pos| unknown.push(pos));
        (ids, unknown)
    }

    fn encode_with<F>(&self, text: &str, mut on_unknown: F) -> Vec<u32>
    where
        F: FnMut(usize),
    {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::with_capacity(chars.len());
        let mut pos = 0;

        while pos < chars.len() {
            match self.vocab_trie.find_longest_match(&chars, pos) {
                Some((token_id, length)) => {
                    tokens.push(token_id);
                    pos += length;
                }
                None => {
                    // Single-character lookup, then the shared fallback id.
                    let mut buf = [0u8; 4];
                    let ch = chars[pos].encode_utf8(&mut buf);
                    let token_id = match self.vocab.get_id(ch) {
                        Some(id) => id,
                        None => {
                            log::trace!("no token for {:?} at offset {}", ch, pos);
                            on_unknown(pos);
                            FALLBACK_ID
                        }
                    };
                    tokens.push(token_id);
                    pos += 1;
                }
            }
        }

        tokens
    }

    /// Decode token IDs back to text.
    ///
    /// Ids outside the vocabulary contribute nothing.
    pub fn decode(&self, ids: &[u32]) -> String {
        let mut text = String::new();
        for &id in ids {
            match self.vocab.get_token(id) {
                Some(token) => text.push_str(token),
                None => log::trace!("dropping unknown token id {}", id),
            }
        }
        text
    }
}
