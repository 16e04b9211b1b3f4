//! Error type for the generation pipeline.

/// Raised when a required artifact cannot be resolved or computed.
///
/// "No default available" is not an error: value computations report it as
/// `Ok(None)` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MsgGenerationError {
    /// A type reference that does not follow the `T`, `pkg/T`, `T[]`, `T[n]` grammar.
    #[error("illegal message type: {type_ref}")]
    IllegalType { type_ref: String },

    /// A fully-qualified name that is required but not present in the registry.
    #[error("message type '{name}' is not registered")]
    Unregistered { name: String },

    /// A short name that is not registered in the current package but exists elsewhere.
    #[error(
        "message type '{name}' is not registered in package '{namespace}' (found in: {})",
        .candidates.join(", ")
    )]
    Ambiguous {
        name: String,
        namespace: String,
        candidates: Vec<String>,
    },

    /// A syntactically valid type the generator has no encoding for.
    #[error("unsupported type '{type_ref}': {reason}")]
    Unsupported { type_ref: String, reason: String },

    /// A specification that violates the model invariants.
    #[error("invalid message spec '{full_name}': {detail}")]
    InvalidSpec { full_name: String, detail: String },

    /// A constant literal that does not fit its declared type.
    #[error("invalid constant '{name}' of type '{ty}': {detail}")]
    InvalidConstant {
        name: String,
        ty: String,
        detail: String,
    },
}
