use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use genpy::PyGenerator;

use super::{RegistryArgs, write_output};

#[derive(Args)]
pub struct ImportsArgs {
    /// Type reference, short or package-qualified
    type_ref: String,

    /// Package used to resolve short type names
    #[arg(short, long)]
    package: String,

    #[command(flatten)]
    registry: RegistryArgs,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ImportsArgs {
    pub fn run(self) -> Result<()> {
        let ctx = self.registry.load_context()?;
        let generator = PyGenerator::with_config(&ctx, self.registry.config());
        let statements = generator.compute_import(&self.package, &self.type_ref)?;

        write_output(self.output, &statements.join("\n"))
    }
}
