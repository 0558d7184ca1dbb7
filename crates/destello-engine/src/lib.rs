//! Destello Engine - polyphonic synthesis core for the destello plugin
//!
//! This crate contains the voice management and signal generation engine:
//! voice allocation on note-on, attack/release amplitude shaping,
//! multi-waveform oscillation, per-sample mixing, and parameter-change
//! ingestion. The host-plugin lifecycle protocol, persisted-state byte
//! layout, and GUI binding live outside this crate; the engine only
//! consumes their feeds.
//!
//! # Core Components
//!
//! ## Waveforms
//!
//! Pure phase-to-sample mapping over three shapes:
//!
//! ```rust
//! use destello_engine::Waveform;
//!
//! let value = Waveform::Saw.sample(core::f32::consts::PI);
//! assert!((value - 0.0).abs() < 1e-6);
//! ```
//!
//! ## Envelopes
//!
//! Two-stage attack/release envelopes — there is no sustain stage, a voice
//! ramps up while held and decays exponentially once released:
//!
//! ```rust
//! use destello_engine::{Envelope, EnvelopeStage};
//!
//! let mut env = Envelope::new(48000.0);
//! env.trigger();
//! let level = env.advance();
//! assert!(level > 0.0);
//! assert_eq!(env.stage(), EnvelopeStage::Attack);
//! ```
//!
//! ## Voices
//!
//! - [`Voice`] - one sounding note: oscillator phase pair plus envelope
//! - [`VoicePool`] - fixed pool of 8 slots with first-free allocation
//!
//! ## Block Rendering
//!
//! [`Engine`] orchestrates one processing call: parameter ingestion, note
//! event ingestion, then the sample loop that mixes all active voices into
//! a hard-clipped stereo pair.
//!
//! ```rust
//! use destello_engine::{Engine, NoteEvent};
//!
//! let mut engine = Engine::new(48000.0);
//! let events = [NoteEvent::On { pitch: 69, velocity: 0.5 }];
//!
//! let mut left = [0.0f32; 256];
//! let mut right = [0.0f32; 256];
//! engine.process_block(&[], &events, &mut left, &mut right);
//! ```
//!
//! # Real-time contract
//!
//! Rendering is single-threaded and synchronous: one block runs to
//! completion on the calling thread, never allocates, and never calls
//! outside the engine. The engine is not reentrant; the host serializes
//! calls. All storage is pre-sized.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! destello-engine = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod engine;
pub mod envelope;
pub mod params;
pub mod voice;
pub mod waveform;

// Re-export main types at crate root
pub use engine::{Engine, NoteEvent};
pub use envelope::{Envelope, EnvelopeStage, RELEASE_FLOOR};
pub use params::{ParamChange, Params, param_id};
pub use voice::{MAX_VOICES, Voice, VoicePool, midi_to_freq};
pub use waveform::{TWO_PI, Waveform};
