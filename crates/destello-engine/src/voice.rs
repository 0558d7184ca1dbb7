//! A single sounding note and the fixed-capacity voice pool.
//!
//! Each voice owns a pair of phase accumulators at a fixed 2:1 rate
//! relation, a captured velocity trim, and an attack/release envelope.
//! The pool is a plain 8-slot array: slots are value-reinitialized in
//! place, never swapped or heap-allocated, so rendering stays free of
//! allocator calls.

use crate::envelope::Envelope;
use crate::params::Params;
use crate::waveform::TWO_PI;
use libm::{fabsf, floorf, powf};

/// Maximum number of simultaneous voices. Note-ons beyond this are
/// dropped — no voice stealing.
pub const MAX_VOICES: usize = 8;

/// Nominal per-voice level applied before envelope and gain scaling.
const VOICE_LEVEL: f32 = 0.3;

/// Absolute tolerance in Hz when matching a note-off to sounding voices.
/// The comparison is exclusive: a difference of exactly 0.001 Hz does
/// not match.
const FREQ_MATCH_EPSILON: f32 = 0.001;

/// Euclidean remainder for f32, compatible with no_std.
///
/// Used for phase wrapping: a plain conditional subtraction would fail
/// once the increment exceeds one full turn per sample at the top of the
/// MIDI range.
#[inline]
fn rem_euclid_f32(a: f32, b: f32) -> f32 {
    let r = a - b * floorf(a / b);
    if r < 0.0 { r + b } else { r }
}

/// Convert MIDI note number to frequency in Hz.
///
/// Equal temperament with A4 (note 69) = 440 Hz.
#[inline]
pub fn midi_to_freq(pitch: u8) -> f32 {
    440.0 * powf(2.0, (pitch as f32 - 69.0) / 12.0)
}

/// One voice slot: a single sounding or fading note.
#[derive(Debug, Clone)]
pub struct Voice {
    /// Whether this slot is currently sounding or fading
    active: bool,
    /// Note frequency in Hz, fixed at note-on (no pitch glide)
    frequency: f32,
    /// Phase advance per sample in radians, fixed for the voice lifetime
    phase_inc: f32,
    /// Phase accumulator for oscillator 1
    phase1: f32,
    /// Phase accumulator for oscillator 2 (advances at 2x rate)
    phase2: f32,
    /// Velocity captured at note-on; higher values trim the level down
    velocity_gain: f32,
    /// Amplitude envelope
    envelope: Envelope,
}

impl Voice {
    fn new(sample_rate: f32) -> Self {
        Self {
            active: false,
            frequency: 0.0,
            phase_inc: 0.0,
            phase1: 0.0,
            phase2: 0.0,
            velocity_gain: 0.0,
            envelope: Envelope::new(sample_rate),
        }
    }

    /// Whether the slot is sounding or fading.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Frequency bound at note-on, in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Read access to the amplitude envelope.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn note_on(&mut self, pitch: u8, velocity: f32, sample_rate: f32) {
        self.frequency = midi_to_freq(pitch);
        self.phase_inc = TWO_PI * self.frequency / sample_rate;
        self.phase1 = 0.0;
        self.phase2 = 0.0;
        self.velocity_gain = velocity.clamp(0.0, 1.0);
        self.envelope.set_sample_rate(sample_rate);
        self.envelope.trigger();
        self.active = true;
    }

    /// Release the voice if its bound frequency matches within tolerance.
    fn release_if_matches(&mut self, frequency: f32) {
        if self.active && fabsf(self.frequency - frequency) < FREQ_MATCH_EPSILON {
            self.envelope.release();
        }
    }

    fn reset(&mut self) {
        self.active = false;
        self.frequency = 0.0;
        self.phase_inc = 0.0;
        self.phase1 = 0.0;
        self.phase2 = 0.0;
        self.velocity_gain = 0.0;
        self.envelope.reset();
    }

    /// Render one sample and advance envelope and oscillator state.
    ///
    /// The envelope level enters the mix twice, linearly and squared —
    /// the extra weighting near zero gives a softer approach to silence
    /// and is kept exactly as the plugin shipped it.
    #[inline]
    fn render(&mut self, params: &Params) -> f32 {
        let level = self.envelope.advance();

        let osc1 = params.osc1_mix * params.waveform.sample(self.phase1);
        let osc2 = params.osc2_mix * params.waveform.sample(self.phase2);
        let out = (osc1 + osc2)
            * VOICE_LEVEL
            * level
            * params.master_gain
            * (1.0 - self.velocity_gain)
            * level;

        self.phase1 = rem_euclid_f32(self.phase1 + self.phase_inc, TWO_PI);
        self.phase2 = rem_euclid_f32(self.phase2 + 2.0 * self.phase_inc, TWO_PI);

        if self.envelope.is_finished() {
            self.active = false;
        }
        out
    }
}

/// Fixed pool of [`MAX_VOICES`] voice slots.
///
/// Owns the allocation policy: note-on binds the first free slot in index
/// order and is silently dropped when none is free; note-off releases
/// every active voice whose frequency matches the recomputed target.
///
/// # Example
///
/// ```rust
/// use destello_engine::VoicePool;
///
/// let mut pool = VoicePool::new(48000.0);
/// pool.note_on(60, 0.5, 48000.0);
/// pool.note_on(64, 0.5, 48000.0);
/// assert_eq!(pool.active_count(), 2);
///
/// pool.note_off(60);
/// pool.reset_all();
/// assert_eq!(pool.active_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct VoicePool {
    voices: [Voice; MAX_VOICES],
}

impl VoicePool {
    /// Create a pool with all slots inactive.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            voices: core::array::from_fn(|_| Voice::new(sample_rate)),
        }
    }

    /// Bind a note to the first free slot in index order.
    ///
    /// With all 8 slots active the event is dropped: polyphony above the
    /// cap silently truncates rather than stealing a sounding voice.
    pub fn note_on(&mut self, pitch: u8, velocity: f32, sample_rate: f32) {
        for voice in &mut self.voices {
            if !voice.is_active() {
                voice.note_on(pitch, velocity, sample_rate);
                return;
            }
        }
    }

    /// Release every active voice sounding the given pitch.
    ///
    /// Matching recomputes the note-on frequency and compares within an
    /// absolute tolerance — there is no note identity tag, so retriggered
    /// copies of the same pitch all release together.
    pub fn note_off(&mut self, pitch: u8) {
        let frequency = midi_to_freq(pitch);
        for voice in &mut self.voices {
            voice.release_if_matches(frequency);
        }
    }

    /// Force every slot back to its zero, inactive state. Idempotent.
    pub fn reset_all(&mut self) {
        for voice in &mut self.voices {
            voice.reset();
        }
    }

    /// Number of slots currently sounding or fading.
    pub fn active_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    /// Read access to all slots.
    pub fn voices(&self) -> &[Voice; MAX_VOICES] {
        &self.voices
    }

    /// Set envelope attack time on every slot.
    pub fn set_attack_secs(&mut self, secs: f32) {
        for voice in &mut self.voices {
            voice.envelope.set_attack_secs(secs);
        }
    }

    /// Set envelope release time on every slot.
    pub fn set_release_secs(&mut self, secs: f32) {
        for voice in &mut self.voices {
            voice.envelope.set_release_secs(secs);
        }
    }

    /// Propagate a sample rate change to every slot's envelope.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        for voice in &mut self.voices {
            voice.envelope.set_sample_rate(sample_rate);
        }
    }

    /// Mix one sample from every active voice (mono sum, unclamped).
    #[inline]
    pub(crate) fn render_frame(&mut self, params: &Params) -> f32 {
        let mut mix = 0.0;
        for voice in &mut self.voices {
            if voice.active {
                mix += voice.render(params);
            }
        }
        mix
    }
}
