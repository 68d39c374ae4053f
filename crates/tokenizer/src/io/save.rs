//! Save functionality for fitted tokenizers.

use super::format::{SerializedTokenizer, FORMAT_VERSION, TOKENIZER_FILE};
use super::json_error;
use charbpe_core::{Result, TokenizerError, Vocabulary};
use charbpe_training::TrainingConfig;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Tokenizer saver - handles writing fitted vocabularies.
pub struct TokenizerSaver<'a> {
    /// Vocabulary reference
    vocab: &'a Vocabulary,
    /// Settings the vocabulary was fitted with
    config: TrainingConfig,
}

impl<'a> TokenizerSaver<'a> {
    /// Create a new tokenizer saver.
    pub fn new(vocab: &'a Vocabulary, config: TrainingConfig) -> Self {
        Self { vocab, config }
    }

    /// Serialize to an in-memory JSON document.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.serialize())?)
    }

    /// Serialize to a caller-supplied writer.
    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer(&mut writer, &self.serialize()).map_err(|e| json_error(e, None))?;
        writer.flush().map_err(TokenizerError::StreamIo)
    }

    /// Save the tokenizer to a directory.
    ///
    /// Writes a single `tokenizer.json`, creating the directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|err| TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        })?;

        let file_path = path.join(TOKENIZER_FILE);
        let file = File::create(&file_path).map_err(|err| TokenizerError::Io {
            path: file_path.clone(),
            err,
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.serialize())
            .map_err(|e| json_error(e, Some(&file_path)))?;
        writer.flush().map_err(|err| TokenizerError::Io {
            path: file_path.clone(),
            err,
        })?;

        log::info!(
            "saved {} tokens to {}",
            self.vocab.len(),
            file_path.display()
        );
        Ok(())
    }

    /// Serialize the tokenizer to a structure.
    pub fn serialize(&self) -> SerializedTokenizer {
        SerializedTokenizer {
            version: FORMAT_VERSION.to_string(),
            vocab_size: self.config.vocab_size,
            min_frequency: self.config.min_frequency,
            id2token: self
                .vocab
                .iter()
                .map(|(id, token)| (id, token.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(vocab_size: usize) -> TrainingConfig {
        TrainingConfig {
            vocab_size,
            ..Default::default()
        }
    }

    #[test]
    fn test_serialize() {
        let vocab = Vocabulary::from_tokens(["a", "b", "ab"]).unwrap();

        let saver = TokenizerSaver::new(
            &vocab,
            TrainingConfig {
                vocab_size: 10,
                min_frequency: 4,
            },
        );
        let serialized = saver.serialize();

        assert_eq!(serialized.version, FORMAT_VERSION);
        assert_eq!(serialized.vocab_size, 10);
        assert_eq!(serialized.min_frequency, 4);
        assert_eq!(serialized.id2token.len(), 3);
        assert_eq!(serialized.id2token[&2], "ab");
    }

    #[test]
    fn test_to_writer_matches_to_bytes() {
        let vocab = Vocabulary::from_tokens(["x", "y"]).unwrap();
        let saver = TokenizerSaver::new(&vocab, config(2));

        let mut buf = Vec::new();
        saver.to_writer(&mut buf).unwrap();
        assert_eq!(buf, saver.to_bytes().unwrap());
    }

    #[test]
    fn test_writer_failure_is_io() {
        struct FailingWriter;

        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let vocab = Vocabulary::from_tokens(["x"]).unwrap();
        let err = TokenizerSaver::new(&vocab, config(1))
            .to_writer(FailingWriter)
            .unwrap_err();

        assert!(err.is_io());
        assert!(matches!(err, TokenizerError::StreamIo(_)));
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("model");
        let vocab = Vocabulary::from_tokens(["a"]).unwrap();

        TokenizerSaver::new(&vocab, config(1)).save(&target).unwrap();

        assert!(target.join(TOKENIZER_FILE).is_file());
    }
}
