//! Waveform generation for the per-voice oscillator pair.
//!
//! A [`Waveform`] maps a phase angle to a sample value in [-1, 1]. The
//! mapping is pure and stateless; callers own the phase accumulators.

use core::f32::consts::PI;
use libm::sinf;

/// One full oscillator period in radians.
pub const TWO_PI: f32 = 2.0 * PI;

/// Oscillator waveform selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    /// Pure sine tone.
    #[default]
    Sine,
    /// Linear ramp from -1 to +1 across one period.
    Saw,
    /// Square derived from the sign of the sine — odd harmonics.
    Square,
}

impl Waveform {
    /// Map a wire index to a waveform: 0 = sine, 1 = saw, 2 = square.
    ///
    /// These are the values carried by the parameter feed and the
    /// persisted state; anything else is rejected.
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Waveform::Sine),
            1 => Some(Waveform::Saw),
            2 => Some(Waveform::Square),
            _ => None,
        }
    }

    /// Wire index of this waveform.
    pub fn index(self) -> u32 {
        match self {
            Waveform::Sine => 0,
            Waveform::Saw => 1,
            Waveform::Square => 2,
        }
    }

    /// Evaluate the waveform at a phase angle in radians.
    ///
    /// Sine and square inherit the natural periodicity of `sin` and are
    /// defined for any finite phase. Saw reads the caller-maintained
    /// wrapped phase directly and is only meaningful in [0, 2π).
    /// Always returns a finite value for finite input.
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => sinf(phase),
            Waveform::Saw => 2.0 * (phase / TWO_PI) - 1.0,
            Waveform::Square => {
                if sinf(phase) >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}
