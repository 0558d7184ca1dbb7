//! Preset management commands.

use anyhow::Context;
use clap::{Args, Subcommand};
use destello_engine::Params;
use destello_state::{Preset, PresetWaveform, decode_params, encode_params};
use std::fs::File;
use std::path::PathBuf;

#[derive(Args)]
pub struct PresetArgs {
    #[command(subcommand)]
    command: PresetCommand,
}

#[derive(Subcommand)]
enum PresetCommand {
    /// Write a preset file with default parameters
    Init {
        /// Output TOML file
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Preset name
        #[arg(long, default_value = "Init")]
        name: String,
    },

    /// Print a preset's parameters
    Show {
        /// Preset TOML file
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Convert a TOML preset to the binary persisted-state format
    Export {
        /// Preset TOML file
        #[arg(value_name = "PRESET")]
        preset: PathBuf,

        /// Output binary state file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Print the parameters stored in a binary state file
    Import {
        /// Binary state file
        #[arg(value_name = "STATE")]
        state: PathBuf,
    },
}

pub fn run(args: PresetArgs) -> anyhow::Result<()> {
    match args.command {
        PresetCommand::Init { path, name } => {
            let preset = Preset::new(&name);
            preset
                .save(&path)
                .with_context(|| format!("saving preset '{}'", path.display()))?;
            println!("Wrote preset '{}' to {}", name, path.display());
            Ok(())
        }

        PresetCommand::Show { path } => {
            let preset = Preset::load(&path)
                .with_context(|| format!("loading preset '{}'", path.display()))?;
            print_preset(&preset);
            Ok(())
        }

        PresetCommand::Export { preset, output } => {
            let preset = Preset::load(&preset)
                .with_context(|| format!("loading preset '{}'", preset.display()))?;
            let params = preset.to_params()?;

            let mut file = File::create(&output)
                .with_context(|| format!("creating '{}'", output.display()))?;
            encode_params(&params, &mut file)?;
            println!("Exported '{}' to {}", preset.name, output.display());
            Ok(())
        }

        PresetCommand::Import { state } => {
            let mut file = File::open(&state)
                .with_context(|| format!("opening '{}'", state.display()))?;
            let params = decode_params(&mut file)
                .with_context(|| format!("decoding '{}'", state.display()))?;
            print_params(&params);
            Ok(())
        }
    }
}

fn print_preset(preset: &Preset) {
    println!("Preset: {}", preset.name);
    if let Some(description) = &preset.description {
        println!("  {description}");
    }
    println!("  sample rate: {} Hz", preset.sample_rate);
    println!("  waveform:    {}", waveform_name(preset.waveform));
    println!("  master gain: {:.3}", preset.master_gain);
    println!("  osc1 mix:    {:.3}", preset.osc1_mix);
    println!("  osc2 mix:    {:.3}", preset.osc2_mix);
}

fn print_params(params: &Params) {
    println!("  waveform:    {}", waveform_name(params.waveform.into()));
    println!("  master gain: {:.3}", params.master_gain);
    println!("  osc1 mix:    {:.3}", params.osc1_mix);
    println!("  osc2 mix:    {:.3}", params.osc2_mix);
}

fn waveform_name(waveform: PresetWaveform) -> &'static str {
    match waveform {
        PresetWaveform::Sine => "sine",
        PresetWaveform::Saw => "saw",
        PresetWaveform::Square => "square",
    }
}
