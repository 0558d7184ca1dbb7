//! Integration tests for destello-cli.
//!
//! Cover binary invocation end to end: rendering to WAV, preset creation,
//! and TOML-to-binary state conversion.

use std::process::Command;

/// Helper to get the path to the `destello` binary built by cargo.
fn destello_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_destello"))
}

#[test]
fn cli_render_writes_wav() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("note.wav");

    let output = destello_bin()
        .args(["render", out.to_str().unwrap()])
        .args(["--duration", "0.2", "--gate", "0.1"])
        .output()
        .expect("failed to run destello render");

    assert!(
        output.status.success(),
        "render failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let reader = hound::WavReader::open(&out).unwrap();
    assert_eq!(reader.spec().channels, 2);
    assert_eq!(reader.spec().sample_rate, 48000);
    assert_eq!(reader.len(), 2 * (0.2f32 * 48000.0) as u32);
}

#[test]
fn cli_render_chord_stays_in_range() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("chord.wav");

    let output = destello_bin()
        .args(["render", out.to_str().unwrap()])
        .args(["--pitch", "60", "--pitch", "64", "--pitch", "67"])
        .args(["--waveform", "square", "--duration", "0.2", "--gate", "0.1"])
        .output()
        .expect("failed to run destello render");

    assert!(output.status.success());
    let reader = hound::WavReader::open(&out).unwrap();
    for sample in reader.into_samples::<f32>() {
        let sample = sample.unwrap();
        assert!((-1.0..=1.0).contains(&sample), "clipped output: {sample}");
    }
}

#[test]
fn cli_preset_init_then_show() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("init.toml");

    let output = destello_bin()
        .args(["preset", "init", path.to_str().unwrap()])
        .args(["--name", "My Patch"])
        .output()
        .expect("failed to run destello preset init");
    assert!(output.status.success());
    assert!(path.exists());

    let output = destello_bin()
        .args(["preset", "show", path.to_str().unwrap()])
        .output()
        .expect("failed to run destello preset show");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("My Patch"), "got: {stdout}");
    assert!(stdout.contains("sine"), "got: {stdout}");
}

#[test]
fn cli_preset_export_import_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let toml_path = dir.path().join("patch.toml");
    let bin_path = dir.path().join("patch.state");

    std::fs::write(
        &toml_path,
        "name = \"Round Trip\"\nwaveform = \"saw\"\nmaster_gain = 0.5\nosc1_mix = 0.8\nosc2_mix = 0.6\n",
    )
    .unwrap();

    let output = destello_bin()
        .args([
            "preset",
            "export",
            toml_path.to_str().unwrap(),
            bin_path.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run destello preset export");
    assert!(output.status.success());
    assert_eq!(std::fs::metadata(&bin_path).unwrap().len(), 16);

    let output = destello_bin()
        .args(["preset", "import", bin_path.to_str().unwrap()])
        .output()
        .expect("failed to run destello preset import");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("saw"), "got: {stdout}");
    assert!(stdout.contains("0.500"), "got: {stdout}");
}

#[test]
fn cli_preset_import_truncated_state_fails() {
    let dir = tempfile::tempdir().unwrap();
    let bin_path = dir.path().join("short.state");
    std::fs::write(&bin_path, [0u8; 10]).unwrap();

    let output = destello_bin()
        .args(["preset", "import", bin_path.to_str().unwrap()])
        .output()
        .expect("failed to run destello preset import");

    assert!(!output.status.success(), "truncated state must fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("truncated"), "got: {stderr}");
}
