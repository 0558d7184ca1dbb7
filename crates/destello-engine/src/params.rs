//! Global control parameters and the block-rate change feed.
//!
//! The parameter bank holds the current values of the four global
//! controls. It is mutated only between renders — the host feed delivers
//! at most one change per parameter per block, carrying the newest value
//! of that parameter's automation queue (last-write-wins, no
//! interpolation across the block).

use crate::waveform::Waveform;

/// Parameter ids used by the host-facing change feed.
///
/// The numeric values match the plugin's automation ids.
pub mod param_id {
    /// Waveform selector; value is the wire index 0, 1, or 2.
    pub const WAVEFORM: u32 = 100;
    /// Oscillator 1 mix multiplier, 0-1.
    pub const OSC1_MIX: u32 = 200;
    /// Oscillator 2 mix multiplier, 0-1.
    pub const OSC2_MIX: u32 = 201;
    /// Master output gain, 0-1.
    pub const MASTER_GAIN: u32 = 300;
}

/// One entry of the per-block parameter change feed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamChange {
    /// Target parameter id (see [`param_id`]).
    pub id: u32,
    /// Newest value of the parameter's queue within the block.
    pub value: f32,
}

/// Current values of the global controls.
///
/// Read by every voice during a render; values persist across calls until
/// overwritten and are never reset mid-block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Params {
    /// Oscillator waveform shared by both per-voice oscillators.
    pub waveform: Waveform,
    /// Master output gain, nominal range 0-1.
    pub master_gain: f32,
    /// Contribution multiplier for oscillator 1.
    pub osc1_mix: f32,
    /// Contribution multiplier for oscillator 2.
    pub osc2_mix: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            waveform: Waveform::Sine,
            master_gain: 1.0,
            osc1_mix: 0.8,
            osc2_mix: 0.8,
        }
    }
}

impl Params {
    /// Apply one change from the feed.
    ///
    /// Unrecognized ids and out-of-range waveform indices are ignored —
    /// a malformed feed entry never aborts the block.
    pub fn apply(&mut self, change: ParamChange) {
        match change.id {
            param_id::WAVEFORM => {
                // Guard before casting: `as u32` saturates negative and
                // non-finite floats to a valid index.
                if change.value.is_finite()
                    && change.value >= 0.0
                    && let Some(waveform) = Waveform::from_index(change.value as u32)
                {
                    self.waveform = waveform;
                }
            }
            param_id::OSC1_MIX => self.osc1_mix = change.value,
            param_id::OSC2_MIX => self.osc2_mix = change.value,
            param_id::MASTER_GAIN => self.master_gain = change.value,
            _ => {}
        }
    }
}
