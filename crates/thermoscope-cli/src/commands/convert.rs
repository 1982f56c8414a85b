//! Convert command implementation
//!
//! Decodes a raw capture and writes it as a 16-bit stereo WAV file,
//! resampling first when a target rate is configured.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use thermoscope_core::wav::compute_pcm_hash;
use thermoscope_core::{encode_capture, CaptureError, ConvertConfig, WavResult};

use super::json_output::{error_codes, ConvertOutput, ConvertResult, JsonError};
use super::reporting::{print_warning, truncation_warning};
use crate::input::{load_capture, LoadedCapture};

/// Run the convert command
///
/// # Arguments
/// * `config` - Input/output paths and rates
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(config: &ConvertConfig, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(config)
    } else {
        run_human(config)
    }
}

/// Run convert with human-readable (colored) output
fn run_human(config: &ConvertConfig) -> Result<ExitCode> {
    config.validate()?;

    let loaded = load_capture(&config.input_path, config.sample_rate)?;
    if let Some(message) = loaded.truncation_warning() {
        print_warning(&message);
    }

    let wav = encode_capture(&loaded.decoded.capture, config.output_rate)?;
    write_verified(&wav, &config.output_path)?;

    let result = convert_result(config, &loaded, &wav);
    println!("{} {}", "Wrote WAV:".green().bold(), result.output);
    if config.output_rate.is_some() {
        println!(
            "  {} {} Hz, {} frames",
            "source:".dimmed(),
            result.source_rate,
            result.source_frames
        );
    }
    println!(
        "  channels={}, sampwidth={}bit, sample_rate={}Hz",
        result.channels, result.bits_per_sample, result.sample_rate
    );
    println!(
        "  frames={}, duration={:.6} sec, bytes={}",
        result.frames, result.duration_seconds, result.bytes
    );

    Ok(ExitCode::SUCCESS)
}

/// Run convert with machine-readable JSON output
fn run_json(config: &ConvertConfig) -> Result<ExitCode> {
    let mut warnings = Vec::new();

    if let Err(e) = config.validate() {
        let error = JsonError::new(error_codes::INVALID_PARAMETER, e.to_string());
        return print_output(&ConvertOutput::failure(vec![error], warnings));
    }

    let loaded = match load_capture(&config.input_path, config.sample_rate) {
        Ok(loaded) => loaded,
        Err(e) => {
            let error = JsonError::new(error_codes::FILE_READ, e.to_string())
                .with_file(config.input_path.display().to_string());
            return print_output(&ConvertOutput::failure(vec![error], warnings));
        }
    };
    if let Some(message) = loaded.truncation_warning() {
        warnings.push(truncation_warning(message));
    }

    let wav = match encode_capture(&loaded.decoded.capture, config.output_rate) {
        Ok(wav) => wav,
        Err(e) => {
            let code = match &e {
                CaptureError::Io(_) => error_codes::FILE_WRITE,
                _ => error_codes::INVALID_PARAMETER,
            };
            let error = JsonError::new(code, e.to_string())
                .with_file(config.output_path.display().to_string());
            return print_output(&ConvertOutput::failure(vec![error], warnings));
        }
    };

    if let Err(e) = write_verified(&wav, &config.output_path) {
        let error = JsonError::new(error_codes::FILE_WRITE, format!("{:#}", e))
            .with_file(config.output_path.display().to_string());
        return print_output(&ConvertOutput::failure(vec![error], warnings));
    }

    let result = convert_result(config, &loaded, &wav);
    print_output(&ConvertOutput::success(result, warnings))
}

fn print_output(output: &ConvertOutput) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Writes the WAV file and checks the payload on disk against the encoded one.
fn write_verified(wav: &WavResult, path: &Path) -> Result<()> {
    wav.save(path)
        .with_context(|| format!("Failed to write WAV file: {}", path.display()))?;

    let written =
        fs::read(path).with_context(|| format!("Failed to read back WAV file: {}", path.display()))?;
    if compute_pcm_hash(&written).as_deref() != Some(wav.pcm_hash.as_str()) {
        anyhow::bail!("WAV file {} does not match the encoded payload", path.display());
    }
    Ok(())
}

fn convert_result(config: &ConvertConfig, loaded: &LoadedCapture, wav: &WavResult) -> ConvertResult {
    ConvertResult {
        input: loaded.path.display().to_string(),
        output: config.output_path.display().to_string(),
        channels: wav.format.channels,
        bits_per_sample: wav.format.bits_per_sample,
        source_rate: loaded.decoded.capture.sample_rate,
        source_frames: loaded.decoded.capture.num_frames(),
        sample_rate: wav.format.sample_rate,
        frames: wav.num_frames,
        duration_seconds: wav.duration_seconds(),
        bytes: wav.payload_bytes(),
        pcm_hash: wav.pcm_hash.clone(),
        discarded_bytes: loaded.decoded.discarded_bytes,
    }
}
