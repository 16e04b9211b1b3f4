use std::{fmt::Write, path::PathBuf};

use anyhow::{Result, bail};
use clap::Args;
use genpy::{PyGenerator, format_generated, generate_all};
use tracing::warn;

use super::{RegistryArgs, write_output};

#[derive(Args)]
pub struct AllArgs {
    #[command(flatten)]
    registry: RegistryArgs,

    /// Keep going and exit successfully even if some messages fail
    #[arg(long)]
    keep_going: bool,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl AllArgs {
    pub fn run(self) -> Result<()> {
        let ctx = self.registry.load_context()?;
        let generator = PyGenerator::with_config(&ctx, self.registry.config());

        let mut text = String::new();
        let mut failed = 0usize;
        for (name, result) in generate_all(&generator) {
            match result {
                Ok(message) => {
                    if !text.is_empty() {
                        writeln!(text)?;
                    }
                    text.push_str(&format_generated(&message)?);
                }
                Err(err) => {
                    warn!(%name, "{err:#}");
                    failed += 1;
                }
            }
        }

        write_output(self.output, &text)?;
        if failed > 0 && !self.keep_going {
            bail!("{failed} message(s) failed to generate");
        }
        Ok(())
    }
}
