//! Stereo WAV output.

use std::path::Path;

/// Write interleaved stereo samples as a 32-bit float WAV file.
pub fn write_stereo(path: &Path, interleaved: &[f32], sample_rate: u32) -> hound::Result<()> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in interleaved {
        writer.write_sample(sample)?;
    }
    writer.finalize()
}
