//! Binary codec for the persisted parameter state.
//!
//! The layout is owned by the host-plugin layer but its logical fields
//! and their order are fixed here: four little-endian 4-byte floats,
//! `[waveform_index, master_gain, osc1_mix, osc2_mix]`. Decoding is
//! all-or-nothing — any truncation fails the whole load and no partial
//! bank is ever returned.

use crate::error::StateError;
use destello_engine::{Params, Waveform};
use std::io::{ErrorKind, Read, Write};

fn read_f32(reader: &mut impl Read, field: &'static str) -> Result<f32, StateError> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            StateError::Truncated { field }
        } else {
            StateError::Io(e)
        }
    })?;
    Ok(f32::from_le_bytes(buf))
}

/// Decode a full parameter bank from a state stream.
///
/// Fails on any short read and on a waveform value outside the known
/// index set — negative and non-finite floats included, which a bare
/// `as u32` cast would otherwise saturate into a valid index. On
/// failure nothing is returned, so the caller cannot install a
/// partially decoded bank.
pub fn decode_params(reader: &mut impl Read) -> Result<Params, StateError> {
    let waveform_value = read_f32(reader, "waveform")?;
    let master_gain = read_f32(reader, "master_gain")?;
    let osc1_mix = read_f32(reader, "osc1_mix")?;
    let osc2_mix = read_f32(reader, "osc2_mix")?;

    let waveform = if waveform_value.is_finite() && waveform_value >= 0.0 {
        Waveform::from_index(waveform_value as u32)
    } else {
        None
    };
    let waveform = waveform.ok_or(StateError::InvalidWaveform(waveform_value))?;

    Ok(Params {
        waveform,
        master_gain,
        osc1_mix,
        osc2_mix,
    })
}

/// Encode a parameter bank in the persisted layout.
pub fn encode_params(params: &Params, writer: &mut impl Write) -> Result<(), StateError> {
    let fields = [
        params.waveform.index() as f32,
        params.master_gain,
        params.osc1_mix,
        params.osc2_mix,
    ];
    for value in fields {
        writer.write_all(&value.to_le_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_all_fields() {
        let params = Params {
            waveform: Waveform::Saw,
            master_gain: 0.5,
            osc1_mix: 0.8,
            osc2_mix: 0.6,
        };

        let mut bytes = Vec::new();
        encode_params(&params, &mut bytes).unwrap();
        assert_eq!(bytes.len(), 16);

        let decoded = decode_params(&mut bytes.as_slice()).unwrap();
        assert_eq!(decoded, params);
    }

    #[test]
    fn layout_is_little_endian_in_fixed_order() {
        let params = Params {
            waveform: Waveform::Square,
            master_gain: 1.0,
            osc1_mix: 0.25,
            osc2_mix: 0.0,
        };
        let mut bytes = Vec::new();
        encode_params(&params, &mut bytes).unwrap();

        assert_eq!(&bytes[0..4], &2.0f32.to_le_bytes());
        assert_eq!(&bytes[4..8], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[8..12], &0.25f32.to_le_bytes());
        assert_eq!(&bytes[12..16], &0.0f32.to_le_bytes());
    }

    #[test]
    fn truncation_at_every_boundary_fails_whole_load() {
        let mut bytes = Vec::new();
        encode_params(&Params::default(), &mut bytes).unwrap();

        let expected_fields = ["waveform", "master_gain", "osc1_mix", "osc2_mix"];
        for (i, expected) in expected_fields.iter().enumerate() {
            // Cut mid-field and exactly at the field boundary
            for len in [i * 4, i * 4 + 2] {
                let err = decode_params(&mut &bytes[..len]).unwrap_err();
                match err {
                    StateError::Truncated { field } => assert_eq!(field, *expected),
                    other => panic!("expected Truncated, got {other:?}"),
                }
            }
        }
    }

    fn state_with_waveform(waveform_value: f32) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&waveform_value.to_le_bytes());
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        bytes.extend_from_slice(&0.8f32.to_le_bytes());
        bytes.extend_from_slice(&0.8f32.to_le_bytes());
        bytes
    }

    #[test]
    fn invalid_waveform_index_rejected() {
        let bytes = state_with_waveform(5.0);
        let err = decode_params(&mut bytes.as_slice()).unwrap_err();
        match err {
            StateError::InvalidWaveform(v) => assert_eq!(v, 5.0),
            other => panic!("expected InvalidWaveform, got {other:?}"),
        }
    }

    #[test]
    fn negative_waveform_value_rejected() {
        let bytes = state_with_waveform(-1.0);
        let err = decode_params(&mut bytes.as_slice()).unwrap_err();
        match err {
            StateError::InvalidWaveform(v) => assert_eq!(v, -1.0),
            other => panic!("expected InvalidWaveform, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_waveform_value_rejected() {
        for value in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let bytes = state_with_waveform(value);
            let err = decode_params(&mut bytes.as_slice()).unwrap_err();
            assert!(
                matches!(err, StateError::InvalidWaveform(_)),
                "waveform {value} must fail the load, got {err:?}"
            );
        }
    }

    #[test]
    fn trailing_bytes_are_left_unread() {
        let mut bytes = Vec::new();
        encode_params(&Params::default(), &mut bytes).unwrap();
        bytes.extend_from_slice(&[0xAA; 8]);

        let mut reader = bytes.as_slice();
        let decoded = decode_params(&mut reader).unwrap();
        assert_eq!(decoded, Params::default());
        assert_eq!(reader.len(), 8);
    }
}
