//! Target-independent message model shared by the genpy crates.
//!
//! Key components:
//! - [`MsgSpec`] / [`Constant`] — immutable message specifications as produced by a parser
//! - [`MsgContext`] — registry of specifications keyed by fully-qualified name
//! - [`TypeRef`] / [`BuiltinType`] — the field-type grammar (`T`, `pkg/T`, `T[]`, `T[n]`)
//! - [`MsgGenerationError`] — the single error kind raised by generation stages

mod builtin;
mod context;
mod error;
mod format;
mod msg_spec;
mod type_ref;

pub use builtin::BuiltinType;
pub use context::MsgContext;
pub use error::MsgGenerationError;
pub use format::format_msg_spec;
pub use msg_spec::{Constant, ConstantValue, MsgSpec};
pub use type_ref::{ArrayLen, HEADER_FULL_NAME, SEP, TypeRef, bare_msg_type, is_header_type};
