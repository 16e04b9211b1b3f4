//! `.msg` loading for the genpy generator.
//!
//! ```text
//! package dir
//!   └─ load_package_dir   – *.msg files in name order
//!       └─ load_msg_file  – read + register as pkg/<stem>
//!           └─ parse_msg  – re_ros_msg parser → MsgSpec
//! ```

mod error;
mod loader;
mod parser;

pub use error::MsgLoadError;
pub use loader::{load_msg_file, load_package_dir};
pub use parser::parse_msg;
