use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use genpy::{PyGenerator, format_generated, generate_message};

use super::{RegistryArgs, ensure_registered, write_output};

#[derive(Args)]
pub struct GenerateArgs {
    /// Full message name, e.g. geometry_msgs/Point
    full_name: String,

    #[command(flatten)]
    registry: RegistryArgs,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl GenerateArgs {
    pub fn run(self) -> Result<()> {
        let ctx = self.registry.load_context()?;
        ensure_registered(&ctx, &self.full_name)?;

        let generator = PyGenerator::with_config(&ctx, self.registry.config());
        let message = generate_message(&generator, &self.full_name)?;
        let text = format_generated(&message)?;

        write_output(self.output, &text)
    }
}
