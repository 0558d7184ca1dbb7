//! Block renderer: parameter ingestion, event ingestion, sample loop.
//!
//! One processing call ingests the block's parameter changes and note
//! events, then renders N frames by mixing all active voices into a
//! hard-clipped stereo pair. The left and right buses carry the identical
//! mono sum — there is no stereo spread between voices.

use crate::params::{ParamChange, Params};
use crate::voice::VoicePool;

/// A note event from the host feed.
///
/// Events are applied in delivery order before sample 0 of the block;
/// intra-block timestamps are not honored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoteEvent {
    /// Key down: bind a free voice slot.
    On {
        /// MIDI pitch, 0-127.
        pitch: u8,
        /// Normalized velocity, 0-1. Enters the mix as a `1 - velocity`
        /// trim.
        velocity: f32,
    },
    /// Key up: release every voice sounding the pitch.
    Off {
        /// MIDI pitch, 0-127.
        pitch: u8,
    },
}

/// The polyphonic synthesis engine.
///
/// Owns the voice pool and the parameter bank; both live exactly as long
/// as the engine instance, tied to plugin activation rather than static
/// storage. Rendering is synchronous and single-threaded: the host
/// guarantees serialized calls, and the engine is not reentrant.
///
/// # Example
///
/// ```rust
/// use destello_engine::{Engine, NoteEvent, ParamChange, param_id};
///
/// let mut engine = Engine::new(48000.0);
///
/// let changes = [ParamChange { id: param_id::MASTER_GAIN, value: 0.8 }];
/// let events = [
///     NoteEvent::On { pitch: 60, velocity: 0.5 },
///     NoteEvent::On { pitch: 64, velocity: 0.5 },
/// ];
///
/// let mut left = [0.0f32; 512];
/// let mut right = [0.0f32; 512];
/// engine.process_block(&changes, &events, &mut left, &mut right);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    pool: VoicePool,
    params: Params,
    sample_rate: f32,
}

impl Engine {
    /// Create an engine with default parameters and an empty pool.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            pool: VoicePool::new(sample_rate),
            params: Params::default(),
            sample_rate,
        }
    }

    /// Set the sample rate for subsequent note-ons and envelope steps.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.pool.set_sample_rate(sample_rate);
    }

    /// Current sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Snapshot of the parameter bank.
    pub fn params(&self) -> Params {
        self.params
    }

    /// Replace the whole parameter bank at once.
    ///
    /// Used when installing decoded persisted state; the caller only
    /// calls this with a fully decoded bank, keeping loads all-or-nothing.
    pub fn set_params(&mut self, params: Params) {
        self.params = params;
    }

    /// Read access to the voice pool.
    pub fn pool(&self) -> &VoicePool {
        &self.pool
    }

    /// Bind a note to a free voice (drops silently when the pool is full).
    pub fn note_on(&mut self, pitch: u8, velocity: f32) {
        self.pool.note_on(pitch, velocity, self.sample_rate);
    }

    /// Release every voice sounding the pitch.
    pub fn note_off(&mut self, pitch: u8) {
        self.pool.note_off(pitch);
    }

    /// Set envelope attack time on every voice.
    pub fn set_attack_secs(&mut self, secs: f32) {
        self.pool.set_attack_secs(secs);
    }

    /// Set envelope release time on every voice.
    pub fn set_release_secs(&mut self, secs: f32) {
        self.pool.set_release_secs(secs);
    }

    /// Lifecycle hook for plugin deactivation: clears every voice so no
    /// state leaks into the next activation.
    pub fn deactivate(&mut self) {
        self.pool.reset_all();
    }

    /// Render one block.
    ///
    /// Ingests `changes` (newest value per parameter, last write wins)
    /// and `events` in delivery order, then fills `left` and `right` with
    /// the clamped mono sum of all active voices. The number of frames
    /// rendered is the shorter of the two buffers.
    ///
    /// Never allocates, blocks, or panics; all failure modes inside the
    /// block (full pool, malformed parameter id) are absorbed by policy.
    pub fn process_block(
        &mut self,
        changes: &[ParamChange],
        events: &[NoteEvent],
        left: &mut [f32],
        right: &mut [f32],
    ) {
        for &change in changes {
            self.params.apply(change);
        }

        for &event in events {
            match event {
                NoteEvent::On { pitch, velocity } => {
                    self.pool.note_on(pitch, velocity, self.sample_rate);
                }
                NoteEvent::Off { pitch } => self.pool.note_off(pitch),
            }
        }

        let frames = left.len().min(right.len());
        for i in 0..frames {
            let mixed = self.pool.render_frame(&self.params);
            let clamped = mixed.clamp(-1.0, 1.0);
            left[i] = clamped;
            right[i] = clamped;
        }
    }
}
