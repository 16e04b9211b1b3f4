//! Error types for loading `.msg` definitions.

use genpy_core::MsgGenerationError;

/// Errors produced while reading, parsing or registering `.msg` files.
#[derive(Debug, thiserror::Error)]
pub enum MsgLoadError {
    /// I/O error while reading a file or listing a directory.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The `.msg` text could not be tokenized.
    #[error("failed to parse '{full_name}': {detail}")]
    Parse { full_name: String, detail: String },

    /// Valid syntax that this message model has no counterpart for.
    #[error("unsupported construct in '{full_name}': {detail}")]
    Unsupported { full_name: String, detail: String },

    /// A message name that is not `pkg/Type` or `pkg/msg/Type`.
    #[error("invalid message name format: {name}")]
    InvalidName { name: String },

    /// The parsed definition violates the message model.
    #[error(transparent)]
    Generation(#[from] MsgGenerationError),
}
