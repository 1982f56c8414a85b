//! Integration tests that run the `thermoscope` binary.
//!
//! Tests verify:
//! - Exit codes for success, missing input, and bad parameters
//! - JSON output format
//! - Human-readable report lines
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p thermoscope-cli --test cli
//! ```

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn thermoscope(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_thermoscope"))
        .args(args)
        .output()
        .expect("Failed to execute thermoscope")
}

/// Writes a capture with a burst on `[start, start + len)` of both channels,
/// the right channel delayed by `skew` samples.
fn write_burst_capture(path: &Path, frames: usize, start: usize, len: usize, skew: usize) {
    let level = |i: usize, start: usize| -> i16 {
        let sign = if i % 2 == 0 { 1 } else { -1 };
        if i >= start && i < start + len {
            sign * 10_000
        } else {
            sign * 12
        }
    };
    let raw: Vec<u8> = (0..frames)
        .flat_map(|i| {
            let [lh, ll] = level(i, start).to_be_bytes();
            let [rh, rl] = level(i, start + skew).to_be_bytes();
            [lh, ll, rh, rl]
        })
        .collect();
    fs::write(path, raw).unwrap();
}

#[test]
fn test_bin2wav_human_output() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("adc_dump.bin");
    let output = tmp.path().join("wav").join("adc_dump.wav");
    fs::write(&input, [0u8, 1, 0, 2, 0, 3, 0, 4, 9]).unwrap();

    let result = thermoscope(&[
        "bin2wav",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&result.stdout);
    let stderr = String::from_utf8_lossy(&result.stderr);

    assert!(result.status.success(), "stderr: {}", stderr);
    assert!(stdout.contains("sample_rate=1000000Hz"), "stdout: {}", stdout);
    assert!(stdout.contains("frames=2, duration=0.000002 sec, bytes=8"), "stdout: {}", stdout);
    assert!(stderr.contains("Trimming to 8"), "stderr: {}", stderr);
    assert_eq!(fs::metadata(&output).unwrap().len(), 44 + 8);
}

#[test]
fn test_convert_json_output() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("capture.bin");
    let output = tmp.path().join("capture.wav");
    write_burst_capture(&input, 20_000, 5000, 2000, 0);

    let result = thermoscope(&[
        "convert",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "--json",
    ]);
    assert!(result.status.success());

    let json: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["result"]["source_rate"], 1_000_000);
    assert_eq!(json["result"]["source_frames"], 20_000);
    assert_eq!(json["result"]["sample_rate"], 48_000);
    assert_eq!(json["result"]["frames"], 960);
    assert_eq!(json["result"]["bytes"], 3840);
    assert!(json["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn test_timing_reports_skew() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("capture.bin");
    write_burst_capture(&input, 30_000, 10_000, 5000, 125);

    let result = thermoscope(&["timing", "-i", input.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&result.stdout);

    assert!(result.status.success());
    assert!(stdout.contains("RMS window: 200 samples (200.0 us)"), "stdout: {}", stdout);
    assert!(stdout.contains("L: noise_floor="), "stdout: {}", stdout);
    assert!(stdout.contains("R: start="), "stdout: {}", stdout);
    assert!(stdout.contains("125.0 us"), "stdout: {}", stdout);
}

#[test]
fn test_timing_json_not_found() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("quiet.bin");
    write_burst_capture(&input, 10_000, 0, 0, 0);

    let result = thermoscope(&["timing", "-i", input.to_str().unwrap(), "--json"]);
    assert!(result.status.success());

    let json: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert!(json["result"]["left"]["start_index"].is_null());
    assert!(json["result"]["right"]["end_index"].is_null());
    assert!(json["result"]["start_diff_us"].is_null());
}

#[test]
fn test_timing_json_unconfirmed_offset_warning() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("late.bin");
    write_burst_capture(&input, 10_000, 9000, 1000, 0);

    let result = thermoscope(&["timing", "-i", input.to_str().unwrap(), "--json"]);
    assert!(result.status.success());

    let json: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(json["result"]["left"]["end_index"], 9999);
    assert_eq!(json["result"]["left"]["offset_confirmed"], false);
    let codes: Vec<&str> = json["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|w| w["code"].as_str())
        .collect();
    assert_eq!(codes, vec!["CLI_W002", "CLI_W002"]);
}

#[test]
fn test_missing_input_exits_with_error() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("missing.bin");

    let result = thermoscope(&["timing", "-i", missing.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert_eq!(result.status.code(), Some(1));
    assert!(stderr.contains("missing.bin"), "stderr: {}", stderr);

    let result = thermoscope(&["bin2wav", "-i", missing.to_str().unwrap(), "--json"]);
    assert_eq!(result.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["errors"][0]["code"], "CLI_001");
}

#[test]
fn test_nonpositive_multiplier_rejected() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("capture.bin");
    write_burst_capture(&input, 1000, 0, 0, 0);

    let result = thermoscope(&["timing", "-i", input.to_str().unwrap(), "-k", "0", "--json"]);
    assert_eq!(result.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(json["errors"][0]["code"], "CLI_003");
}

#[test]
fn test_rate_too_high_for_wav_header_rejected() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("capture.bin");
    let output = tmp.path().join("capture.wav");
    write_burst_capture(&input, 100, 0, 0, 0);

    let result = thermoscope(&[
        "bin2wav",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
        "--rate",
        "2000000000",
        "--json",
    ]);
    assert_eq!(result.status.code(), Some(1));

    let json: serde_json::Value = serde_json::from_slice(&result.stdout).unwrap();
    assert_eq!(json["errors"][0]["code"], "CLI_003");
    assert!(!output.exists());
}

#[test]
fn test_huge_rms_window_does_not_crash() {
    let tmp = tempdir().unwrap();
    let input = tmp.path().join("capture.bin");
    write_burst_capture(&input, 1000, 0, 0, 0);

    let result = thermoscope(&["timing", "-i", input.to_str().unwrap(), "--win-us", "1e30"]);
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    assert!(stdout.contains("not found"), "stdout: {}", stdout);
}
