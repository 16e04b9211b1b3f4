mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{
    all::AllArgs, flatten::FlattenArgs, generate::GenerateArgs, imports::ImportsArgs,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "genpyc", about = "Generate Python message artifacts from .msg files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the generated artifacts of one message
    Generate(GenerateArgs),
    /// Print the Python import statements a type needs
    Imports(ImportsArgs),
    /// Print the flattened field layout of one message
    Flatten(FlattenArgs),
    /// Generate every loaded message and report failures
    All(AllArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => args.run(),
        Commands::Imports(args) => args.run(),
        Commands::Flatten(args) => args.run(),
        Commands::All(args) => args.run(),
    }
}
