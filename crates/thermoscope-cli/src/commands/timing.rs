//! Timing command implementation
//!
//! Locates the transient event on each channel of a raw capture and reports
//! start/end times and the left/right start skew.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use thermoscope_core::{analyze_timing, ChannelTiming, TimingConfig, TimingReport};

use super::json_output::{error_codes, JsonError, JsonWarning, TimingOutput, TimingResult};
use super::reporting::{
    format_event, format_threshold, print_warning, truncation_warning, unconfirmed_offset_warning,
};
use crate::input::load_capture;

/// Run the timing command
///
/// A capture without a detectable event is a successful run; the channel is
/// reported as not found.
///
/// # Arguments
/// * `config` - Input path and detection parameters
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(config: &TimingConfig, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(config)
    } else {
        run_human(config)
    }
}

/// Run timing with human-readable (colored) output
fn run_human(config: &TimingConfig) -> Result<ExitCode> {
    config.validate()?;

    let loaded = load_capture(&config.input_path, config.sample_rate)?;
    if let Some(message) = loaded.truncation_warning() {
        print_warning(&message);
    }

    let report = analyze_timing(&loaded.decoded.capture, config)?;

    println!("{} {}", "file:".dimmed(), loaded.path.display());
    println!(
        "frames: {}  duration: {:.3} ms  fs={} Hz",
        report.num_frames, report.duration_ms, report.sample_rate
    );
    println!(
        "RMS window: {} samples ({:.1} us)",
        report.window_samples, report.window_us
    );
    print_channel("L", &report.left, report.threshold_multiplier);
    print_channel("R", &report.right, report.threshold_multiplier);

    if let Some(diff) = report.start_diff_us {
        println!("{} {:.1} us", "start diff (R-L):".cyan().bold(), diff);
    }

    for warning in offset_warnings(&report) {
        print_warning(&warning.message);
    }

    Ok(ExitCode::SUCCESS)
}

fn print_channel(name: &str, timing: &ChannelTiming, k: f64) {
    println!("{}: {}", name, format_threshold(timing, k));
    let event = format_event(timing);
    if timing.detection.is_found() {
        println!("{}: {}", name, event);
    } else {
        println!("{}: {}", name, event.yellow());
    }
}

/// Run timing with machine-readable JSON output
fn run_json(config: &TimingConfig) -> Result<ExitCode> {
    let mut warnings = Vec::new();

    if let Err(e) = config.validate() {
        let error = JsonError::new(error_codes::INVALID_PARAMETER, e.to_string());
        return print_output(&TimingOutput::failure(vec![error], warnings));
    }

    let loaded = match load_capture(&config.input_path, config.sample_rate) {
        Ok(loaded) => loaded,
        Err(e) => {
            let error = JsonError::new(error_codes::FILE_READ, e.to_string())
                .with_file(config.input_path.display().to_string());
            return print_output(&TimingOutput::failure(vec![error], warnings));
        }
    };
    if let Some(message) = loaded.truncation_warning() {
        warnings.push(truncation_warning(message));
    }

    let report = match analyze_timing(&loaded.decoded.capture, config) {
        Ok(report) => report,
        Err(e) => {
            let error = JsonError::new(error_codes::INVALID_PARAMETER, e.to_string());
            return print_output(&TimingOutput::failure(vec![error], warnings));
        }
    };
    warnings.extend(offset_warnings(&report));

    let result = TimingResult {
        input: loaded.path.display().to_string(),
        report,
    };
    print_output(&TimingOutput::success(result, warnings))
}

fn print_output(output: &TimingOutput) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn offset_warnings(report: &TimingReport) -> Vec<JsonWarning> {
    [("L", &report.left), ("R", &report.right)]
        .into_iter()
        .filter_map(|(name, timing)| unconfirmed_offset_warning(name, timing))
        .collect()
}
