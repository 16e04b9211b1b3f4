pub mod all;
pub mod flatten;
pub mod generate;
pub mod imports;

use std::{fs, path::PathBuf, str::FromStr};

use anyhow::{Context, Result, bail};
use clap::Args;
use genpy::{GeneratorConfig, MsgContext, msg::load_package_dir};
use tracing::info;

/// `PKG=DIR` pair naming a package and its directory of `.msg` files.
#[derive(Debug, Clone)]
pub struct SearchPath {
    pub package: String,
    pub dir: PathBuf,
}

impl FromStr for SearchPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (package, dir) = s
            .split_once('=')
            .ok_or_else(|| format!("expected PKG=DIR, got '{s}'"))?;
        if package.is_empty() || dir.is_empty() {
            return Err(format!("expected PKG=DIR, got '{s}'"));
        }
        Ok(Self {
            package: package.to_string(),
            dir: PathBuf::from(dir),
        })
    }
}

/// Options shared by every subcommand that needs a populated registry.
#[derive(Args)]
pub struct RegistryArgs {
    /// Message search path as PKG=DIR (repeatable)
    #[arg(short, long = "search", value_name = "PKG=DIR", required = true)]
    search: Vec<SearchPath>,

    /// Extra identifier to treat as reserved (repeatable)
    #[arg(long = "extra-reserved", value_name = "WORD")]
    extra_reserved: Vec<String>,
}

impl RegistryArgs {
    pub fn load_context(&self) -> Result<MsgContext> {
        let mut ctx = MsgContext::create_default();
        ctx.ensure_builtin_specs();
        for path in &self.search {
            let loaded = load_package_dir(&mut ctx, &path.package, &path.dir)
                .with_context(|| format!("failed to load package '{}'", path.package))?;
            info!(package = %path.package, count = loaded.len(), "loaded search path");
        }
        Ok(ctx)
    }

    pub fn config(&self) -> GeneratorConfig {
        self.extra_reserved
            .iter()
            .fold(GeneratorConfig::builder(), |builder, word| {
                builder.extra_reserved_word(word.clone())
            })
            .build()
    }
}

/// Require `full_name` to be registered, listing a few known names otherwise.
pub fn ensure_registered(ctx: &MsgContext, full_name: &str) -> Result<()> {
    if ctx.is_registered(full_name) {
        return Ok(());
    }
    let known = ctx.names();
    let shown: Vec<&str> = known.iter().take(8).copied().collect();
    bail!(
        "message '{full_name}' is not loaded ({} known: {})",
        known.len(),
        shown.join(", ")
    )
}

/// Write `text` to `output`, or stdout, with a single trailing newline.
pub fn write_output(output: Option<PathBuf>, text: &str) -> Result<()> {
    let text = text.trim_end();
    match output {
        Some(path) => fs::write(&path, format!("{text}\n"))
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{text}"),
    }
    Ok(())
}
