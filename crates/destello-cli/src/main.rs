//! Destello CLI - offline renderer and preset tool for the destello synth.

mod commands;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "destello")]
#[command(author, version, about = "Destello synthesizer CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render notes offline to a stereo WAV file
    Render(commands::render::RenderArgs),

    /// Create, inspect, and convert presets
    Preset(commands::preset::PresetArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Preset(args) => commands::preset::run(args),
    }
}
