//! Offline note rendering command.

use anyhow::Context;
use clap::{Args, ValueEnum};
use destello_engine::{Engine, NoteEvent, Params, Waveform};
use destello_state::Preset;
use std::path::PathBuf;

use crate::wav;

/// Waveform names for the CLI.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliWaveform {
    #[default]
    Sine,
    Saw,
    Square,
}

impl From<CliWaveform> for Waveform {
    fn from(w: CliWaveform) -> Self {
        match w {
            CliWaveform::Sine => Waveform::Sine,
            CliWaveform::Saw => Waveform::Saw,
            CliWaveform::Square => Waveform::Square,
        }
    }
}

#[derive(Args)]
pub struct RenderArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// MIDI pitches to play, 0-127 (repeatable)
    #[arg(long = "pitch", default_values_t = vec![69u8])]
    pitches: Vec<u8>,

    /// Note-on velocity (0-1); enters the mix as a 1-velocity trim
    #[arg(long, default_value = "0.0")]
    velocity: f32,

    /// Time in seconds at which the notes are released
    #[arg(long, default_value = "1.0")]
    gate: f32,

    /// Total duration in seconds
    #[arg(long, default_value = "2.0")]
    duration: f32,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Render block size in frames
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Waveform
    #[arg(long, value_enum, default_value_t = CliWaveform::Sine)]
    waveform: CliWaveform,

    /// Master gain (0-1)
    #[arg(long, default_value = "1.0")]
    gain: f32,

    /// Oscillator 1 mix (0-1)
    #[arg(long, default_value = "0.8")]
    osc1: f32,

    /// Oscillator 2 mix (0-1)
    #[arg(long, default_value = "0.8")]
    osc2: f32,

    /// Load parameters from a TOML preset instead of the flags above
    #[arg(long)]
    preset: Option<PathBuf>,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let sample_rate = args.sample_rate as f32;
    let mut engine = Engine::new(sample_rate);

    if let Some(path) = &args.preset {
        let preset = Preset::load(path)
            .with_context(|| format!("loading preset '{}'", path.display()))?;
        tracing::info!(preset = %preset.name, "using preset parameters");
        engine.set_params(preset.to_params()?);
    } else {
        engine.set_params(Params {
            waveform: args.waveform.into(),
            master_gain: args.gain,
            osc1_mix: args.osc1,
            osc2_mix: args.osc2,
        });
    }

    let total_frames = (args.duration * sample_rate) as usize;
    let gate_frame = (args.gate * sample_rate) as usize;
    let block_size = args.block_size.max(1);

    tracing::info!(
        frames = total_frames,
        pitches = ?args.pitches,
        sample_rate = args.sample_rate,
        "rendering"
    );

    let mut left = vec![0.0f32; block_size];
    let mut right = vec![0.0f32; block_size];
    let mut interleaved = Vec::with_capacity(total_frames * 2);

    let mut events: Vec<NoteEvent> = Vec::with_capacity(args.pitches.len());
    let mut frame = 0usize;
    let mut released = false;
    while frame < total_frames {
        let frames = block_size.min(total_frames - frame);

        // Events land at block boundaries: note-ons before the first
        // sample, note-offs at the start of the block containing the gate
        events.clear();
        if frame == 0 {
            events.extend(args.pitches.iter().map(|&pitch| NoteEvent::On {
                pitch,
                velocity: args.velocity,
            }));
        }
        if !released && frame >= gate_frame {
            events.extend(
                args.pitches
                    .iter()
                    .map(|&pitch| NoteEvent::Off { pitch }),
            );
            released = true;
        }

        engine.process_block(&[], &events, &mut left[..frames], &mut right[..frames]);
        for i in 0..frames {
            interleaved.push(left[i]);
            interleaved.push(right[i]);
        }
        frame += frames;
    }

    wav::write_stereo(&args.output, &interleaved, args.sample_rate)
        .with_context(|| format!("writing '{}'", args.output.display()))?;

    tracing::info!(path = %args.output.display(), "wrote WAV");
    println!(
        "Rendered {} frames ({:.2}s) to {}",
        total_frames,
        args.duration,
        args.output.display()
    );
    Ok(())
}
