use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use genpy::{PyGenerator, core::format_msg_spec};

use super::{RegistryArgs, ensure_registered, write_output};

#[derive(Args)]
pub struct FlattenArgs {
    /// Full message name, e.g. geometry_msgs/Pose
    full_name: String,

    #[command(flatten)]
    registry: RegistryArgs,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl FlattenArgs {
    pub fn run(self) -> Result<()> {
        let ctx = self.registry.load_context()?;
        ensure_registered(&ctx, &self.full_name)?;

        let generator = PyGenerator::with_config(&ctx, self.registry.config());
        let spec = generator.get_registered_ex(&self.full_name)?;
        let flat = generator.flatten(spec)?;
        let text = format_msg_spec(&flat)?;

        write_output(self.output, &text)
    }
}
