//! Serialization and deserialization of fitted tokenizers.
//!
//! The wire format is JSON. Failures are split into storage errors
//! (`TokenizerError::is_io`) and malformed-data errors
//! (`TokenizerError::is_format`).

pub mod format;
pub mod load;
pub mod save;

pub use format::{SerializedTokenizer, FORMAT_VERSION, TOKENIZER_FILE};
pub use load::TokenizerLoader;
pub use save::TokenizerSaver;

use charbpe_core::TokenizerError;
use std::path::Path;

/// Route serde_json failures caused by the underlying reader or writer to
/// the I/O variants, keeping syntax and shape failures as `Json`.
pub(crate) fn json_error(err: serde_json::Error, path: Option<&Path>) -> TokenizerError {
    if !err.is_io() {
        return TokenizerError::Json(err);
    }
    let err = std::io::Error::from(err);
    match path {
        Some(path) => TokenizerError::Io {
            path: path.to_path_buf(),
            err,
        },
        None => TokenizerError::StreamIo(err),
    }
}
