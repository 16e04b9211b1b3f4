//! Error types for whole-message generation.

use genpy_core::MsgGenerationError;

/// Errors produced by [`generate_message`](crate::generate_message).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    /// One of the per-message computations failed.
    #[error("failed to generate '{full_name}': {source}")]
    Message {
        full_name: String,
        #[source]
        source: MsgGenerationError,
    },
}
