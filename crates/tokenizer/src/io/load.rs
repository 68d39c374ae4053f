//! Load functionality for fitted tokenizers.
//!
//! The whole record is validated before anything is handed back, so a failed
//! load never yields a partially populated vocabulary.

use super::format::{SerializedTokenizer, FORMAT_VERSION, TOKENIZER_FILE};
use super::json_error;
use charbpe_core::{Result, TokenizerError, Vocabulary};
use charbpe_training::TrainingConfig;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Tokenizer loader - handles reading fitted vocabularies.
///
/// Each method returns the vocabulary together with the settings it was
/// fitted with.
pub struct TokenizerLoader;

impl TokenizerLoader {
    /// Load from an in-memory JSON document.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Vocabulary, TrainingConfig)> {
        let serialized: SerializedTokenizer = serde_json::from_slice(bytes)?;
        Self::deserialize(serialized)
    }

    /// Load from a caller-supplied reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<(Vocabulary, TrainingConfig)> {
        let serialized: SerializedTokenizer =
            serde_json::from_reader(reader).map_err(|e| json_error(e, None))?;
        Self::deserialize(serialized)
    }

    /// Load a tokenizer from a directory.
    ///
    /// Expects a `tokenizer.json` file in the given directory.
    pub fn load(path: &Path) -> Result<(Vocabulary, TrainingConfig)> {
        let file_path = path.join(TOKENIZER_FILE);
        let file = File::open(&file_path).map_err(|err| TokenizerError::Io {
            path: file_path.clone(),
            err,
        })?;

        let reader = BufReader::new(file);
        let serialized: SerializedTokenizer =
            serde_json::from_reader(reader).map_err(|e| json_error(e, Some(&file_path)))?;

        let loaded = Self::deserialize(serialized)?;
        log::info!(
            "loaded {} tokens from {}",
            loaded.0.len(),
            file_path.display()
        );
        Ok(loaded)
    }

    /// Validate a serialized record and rebuild the vocabulary.
    pub fn deserialize(data: SerializedTokenizer) -> Result<(Vocabulary, TrainingConfig)> {
        if data.version != FORMAT_VERSION {
            return Err(TokenizerError::Format(format!(
                "unsupported format version {:?} (expected {:?})",
                data.version, FORMAT_VERSION
            )));
        }

        if data.id2token.len() > data.vocab_size {
            return Err(TokenizerError::Format(format!(
                "{} tokens exceed vocab_size {}",
                data.id2token.len(),
                data.vocab_size
            )));
        }

        if data.min_frequency == 0 {
            return Err(TokenizerError::Format(
                "min_frequency must be at least 1".to_string(),
            ));
        }

        // Keys iterate in ascending order, so density means key == position.
        for (expected, &id) in data.id2token.keys().enumerate() {
            if id as usize != expected {
                return Err(TokenizerError::Format(format!(
                    "token ids are not dense: expected id {}, found {}",
                    expected, id
                )));
            }
        }

        let vocab = Vocabulary::from_tokens(data.id2token.values())
            .map_err(|e| TokenizerError::Format(e.to_string()))?;

        let config = TrainingConfig {
            vocab_size: data.vocab_size,
            min_frequency: data.min_frequency,
        };
        Ok((vocab, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::save::TokenizerSaver;
    use std::collections::BTreeMap;

    fn record(vocab_size: usize, tokens: &[(u32, &str)]) -> SerializedTokenizer {
        SerializedTokenizer {
            version: FORMAT_VERSION.to_string(),
            vocab_size,
            min_frequency: 1,
            id2token: tokens
                .iter()
                .map(|&(id, token)| (id, token.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let vocab = Vocabulary::from_tokens(["a", "b", "ab"]).unwrap();
        let config = TrainingConfig {
            vocab_size: 5,
            min_frequency: 3,
        };

        TokenizerSaver::new(&vocab, config.clone()).save(dir.path()).unwrap();
        let (loaded, loaded_config) = TokenizerLoader::load(dir.path()).unwrap();

        assert_eq!(loaded, vocab);
        assert_eq!(loaded_config, config);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let vocab = Vocabulary::from_tokens(["q", "u", "qu"]).unwrap();
        let config = TrainingConfig {
            vocab_size: 3,
            ..Default::default()
        };
        let bytes = TokenizerSaver::new(&vocab, config.clone()).to_bytes().unwrap();

        let (loaded, loaded_config) = TokenizerLoader::from_bytes(&bytes).unwrap();
        assert_eq!(loaded, vocab);
        assert_eq!(loaded_config, config);

        let (from_reader, _) = TokenizerLoader::from_reader(bytes.as_slice()).unwrap();
        assert_eq!(from_reader, vocab);
    }

    #[test]
    fn test_missing_file_is_io() {
        let dir = tempfile::tempdir().unwrap();

        let err = TokenizerLoader::load(dir.path()).unwrap_err();
        assert!(err.is_io());
        assert!(matches!(err, TokenizerError::Io { .. }));
    }

    #[test]
    fn test_garbage_is_format() {
        let err = TokenizerLoader::from_bytes(b"\x00not json").unwrap_err();
        assert!(err.is_format());

        let err = TokenizerLoader::from_bytes(br#"{"version":"1","vocab_size":2}"#).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_truncated_file_is_format() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TOKENIZER_FILE), br#"{"version":"1","voc"#).unwrap();

        let err = TokenizerLoader::load(dir.path()).unwrap_err();
        assert!(err.is_format());
        assert!(!err.is_io());
    }

    #[test]
    fn test_sparse_ids_rejected() {
        let err = TokenizerLoader::deserialize(record(4, &[(0, "a"), (2, "b")])).unwrap_err();
        assert!(matches!(err, TokenizerError::Format(_)));
    }

    #[test]
    fn test_duplicate_tokens_rejected() {
        let err = TokenizerLoader::deserialize(record(4, &[(0, "a"), (1, "a")])).unwrap_err();
        assert!(matches!(err, TokenizerError::Format(_)));
    }

    #[test]
    fn test_empty_token_rejected() {
        let err = TokenizerLoader::deserialize(record(4, &[(0, "")])).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_oversized_vocabulary_rejected() {
        let err = TokenizerLoader::deserialize(record(1, &[(0, "a"), (1, "b")])).unwrap_err();
        assert!(matches!(err, TokenizerError::Format(_)));
    }

    #[test]
    fn test_zero_min_frequency_rejected() {
        let mut data = record(2, &[(0, "a")]);
        data.min_frequency = 0;

        let err = TokenizerLoader::deserialize(data).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_missing_min_frequency_defaults_to_one() {
        let (_, config) =
            TokenizerLoader::from_bytes(br#"{"version":"1","vocab_size":2,"id2token":{"0":"a"}}"#)
                .unwrap();
        assert_eq!(config.min_frequency, 1);
        assert_eq!(config.vocab_size, 2);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let mut data = record(1, &[(0, "a")]);
        data.version = "99".to_string();

        let err = TokenizerLoader::deserialize(data).unwrap_err();
        assert!(matches!(err, TokenizerError::Format(_)));
    }

    #[test]
    fn test_empty_vocabulary_loads() {
        let (vocab, config) = TokenizerLoader::deserialize(record(7, &[])).unwrap();
        assert!(vocab.is_empty());
        assert_eq!(config.vocab_size, 7);
    }
}
