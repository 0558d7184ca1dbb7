//! Destello State - persisted parameters for the destello synthesizer
//!
//! Two representations of the engine's parameter bank:
//!
//! - a binary codec matching the plugin's persisted-state layout — a flat
//!   little-endian sequence of four 4-byte floats in the fixed order
//!   waveform index, master gain, oscillator 1 mix, oscillator 2 mix
//!   ([`encode_params`] / [`decode_params`]);
//! - a human-readable TOML preset format for offline tooling
//!   ([`Preset`]).
//!
//! Binary loads are all-or-nothing: a short read at any point fails the
//! whole load and nothing is handed to the caller.
//!
//! # Example
//!
//! ```rust
//! use destello_engine::Params;
//! use destello_state::{decode_params, encode_params};
//!
//! let params = Params::default();
//! let mut bytes = Vec::new();
//! encode_params(&params, &mut bytes)?;
//!
//! let decoded = decode_params(&mut bytes.as_slice())?;
//! assert_eq!(decoded, params);
//! # Ok::<(), destello_state::StateError>(())
//! ```

pub mod codec;
pub mod error;
pub mod preset;

pub use codec::{decode_params, encode_params};
pub use error::StateError;
pub use preset::{Preset, PresetWaveform};
