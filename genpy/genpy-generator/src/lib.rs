//! Type resolution and Python code generation for message definitions.
//!
//! Given a populated [`MsgContext`](genpy_core::MsgContext), [`PyGenerator`] computes
//! per message:
//! - cross-package imports ([`compute_import`])
//! - flattened field layouts ([`flatten`])
//! - default values and constructors ([`compute_default_value`], [`compute_constructor`])
//! - serializer/deserializer operations ([`WireOp`]), rendered to Python by [`python::render`]

mod config;
mod defaults;
mod emitter;
mod flatten;
mod generator;
mod imports;
pub mod python;
mod reserved;
mod resolver;
mod sanitize;
mod shape;
mod special;
mod wire;

pub use config::{GeneratorConfig, GeneratorConfigBuilder};
pub use defaults::{
    Constructor, DefaultValue, MAX_LITERAL_ITEMS, compute_constructor, compute_default_value,
};
pub use emitter::{len_serializer_generator, string_serializer_generator};
pub use flatten::flatten;
pub use generator::PyGenerator;
pub use imports::{Import, compute_dependencies, compute_import};
pub use reserved::{RESERVED_MARKER, ReservedWords};
pub use resolver::{Resolution, compute_pkg_type, get_registered_ex, resolve, resolve_strict};
pub use sanitize::make_python_safe;
pub use shape::FieldShape;
pub use special::{SpecialType, SpecialTypeTable, VAR_PLACEHOLDER};
pub use wire::{Count, Payload, StructFormat, Unpack, WireOp};
