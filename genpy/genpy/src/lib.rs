//! Python message generation over a populated registry.
//!
//! ```no_run
//! use genpy::{MsgContext, PyGenerator, generate_all, msg::load_package_dir};
//!
//! let mut ctx = MsgContext::create_default();
//! ctx.ensure_builtin_specs();
//! load_package_dir(&mut ctx, "geometry_msgs", "msg")?;
//!
//! let generator = PyGenerator::new(&ctx);
//! for (name, result) in generate_all(&generator) {
//!     println!("{name}: {}", result.is_ok());
//! }
//! # Ok::<(), genpy::msg::MsgLoadError>(())
//! ```

mod bundle;
mod error;

pub use bundle::{
    GeneratedField, GeneratedMessage, format_generated, generate_all, generate_message,
};
pub use error::GenerateError;
pub use genpy_core as core;
pub use genpy_core::{MsgContext, MsgGenerationError, MsgSpec};
pub use genpy_generator as generator;
pub use genpy_generator::{GeneratorConfig, PyGenerator};
pub use genpy_msg as msg;
