//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::StateError;
use destello_engine::{Params, Waveform};

/// Waveform names as they appear in preset files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetWaveform {
    /// Pure sine tone.
    #[default]
    Sine,
    /// Sawtooth ramp.
    Saw,
    /// Square wave.
    Square,
}

impl From<PresetWaveform> for Waveform {
    fn from(w: PresetWaveform) -> Self {
        match w {
            PresetWaveform::Sine => Waveform::Sine,
            PresetWaveform::Saw => Waveform::Saw,
            PresetWaveform::Square => Waveform::Square,
        }
    }
}

impl From<Waveform> for PresetWaveform {
    fn from(w: Waveform) -> Self {
        match w {
            Waveform::Sine => PresetWaveform::Sine,
            Waveform::Saw => PresetWaveform::Saw,
            Waveform::Square => PresetWaveform::Square,
        }
    }
}

/// A synthesizer preset stored as TOML.
///
/// # TOML Format
///
/// ```toml
/// name = "Bright Stab"
/// description = "Detuned square chord sound"
/// sample_rate = 48000
/// waveform = "square"
/// master_gain = 0.9
/// osc1_mix = 1.0
/// osc2_mix = 0.4
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate hint (defaults to 48000). May be overridden at
    /// render time.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Oscillator waveform.
    #[serde(default)]
    pub waveform: PresetWaveform,

    /// Master output gain, 0-1.
    #[serde(default = "default_master_gain")]
    pub master_gain: f32,

    /// Oscillator 1 mix multiplier, 0-1.
    #[serde(default = "default_osc_mix")]
    pub osc1_mix: f32,

    /// Oscillator 2 mix multiplier, 0-1.
    #[serde(default = "default_osc_mix")]
    pub osc2_mix: f32,
}

fn default_sample_rate() -> u32 {
    48000
}

fn default_master_gain() -> f32 {
    1.0
}

fn default_osc_mix() -> f32 {
    0.8
}

impl Preset {
    /// Create a preset with default engine parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_params(name, &Params::default())
    }

    /// Create a preset from a parameter bank.
    pub fn from_params(name: impl Into<String>, params: &Params) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: 48000,
            waveform: params.waveform.into(),
            master_gain: params.master_gain,
            osc1_mix: params.osc1_mix,
            osc2_mix: params.osc2_mix,
        }
    }

    /// Add a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Convert to an engine parameter bank, validating value ranges.
    pub fn to_params(&self) -> Result<Params, StateError> {
        for (param, value) in [
            ("master_gain", self.master_gain),
            ("osc1_mix", self.osc1_mix),
            ("osc2_mix", self.osc2_mix),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(StateError::OutOfRange { param, value });
            }
        }
        Ok(Params {
            waveform: self.waveform.into(),
            master_gain: self.master_gain,
            osc1_mix: self.osc1_mix,
            osc2_mix: self.osc2_mix,
        })
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StateError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| StateError::read_file(path, e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, StateError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories as
    /// needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StateError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| StateError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| StateError::write_file(path, e))
    }
}
