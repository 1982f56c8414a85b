//! Thermoscope CLI - Conversion and timing tools for thermophone ADC captures
//!
//! This binary converts raw dual-channel captures to WAV and measures when the
//! transient event starts and ends on each channel.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

// Use modules from the library crate
use thermoscope_cli::commands;
use thermoscope_core::config::{
    DEFAULT_HOLD_US, DEFAULT_INPUT_PATH, DEFAULT_NOISE_MS, DEFAULT_OUTPUT_PATH,
    DEFAULT_OUTPUT_RATE, DEFAULT_SAMPLE_RATE, DEFAULT_THRESHOLD_MULTIPLIER, DEFAULT_WINDOW_US,
};
use thermoscope_core::{ConvertConfig, TimingConfig};

/// Thermoscope - ADC capture conversion and event timing
#[derive(Parser)]
#[command(name = "thermoscope")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a raw capture to WAV, resampling to a target rate
    Convert {
        /// Raw capture file
        #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
        input: PathBuf,

        /// WAV file to write (parent directories are created)
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,

        /// Capture sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        rate: u32,

        /// Output sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_OUTPUT_RATE)]
        out_rate: u32,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Convert a raw capture to WAV at the capture rate
    Bin2wav {
        /// Raw capture file
        #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
        input: PathBuf,

        /// WAV file to write (parent directories are created)
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,

        /// Capture sample rate in Hz, written to the WAV header
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        rate: u32,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Report event start/end on each channel and the left/right start skew
    Timing {
        /// Raw capture file
        #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
        input: PathBuf,

        /// Capture sample rate in Hz
        #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
        fs: u32,

        /// RMS window in microseconds
        #[arg(long, default_value_t = DEFAULT_WINDOW_US)]
        win_us: f64,

        /// Noise estimation window from the start of the capture, in milliseconds
        #[arg(long, default_value_t = DEFAULT_NOISE_MS)]
        noise_ms: f64,

        /// Threshold multiplier over the noise floor
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD_MULTIPLIER)]
        k: f64,

        /// Time the envelope must stay above/below threshold, in microseconds
        #[arg(long, default_value_t = DEFAULT_HOLD_US)]
        hold_us: f64,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            rate,
            out_rate,
            json,
        } => {
            let config = ConvertConfig {
                input_path: input,
                output_path: output,
                sample_rate: rate,
                output_rate: Some(out_rate),
            };
            commands::convert::run(&config, json)
        }
        Commands::Bin2wav {
            input,
            output,
            rate,
            json,
        } => commands::bin2wav::run(&input, &output, rate, json),
        Commands::Timing {
            input,
            fs,
            win_us,
            noise_ms,
            k,
            hold_us,
            json,
        } => {
            let config = TimingConfig {
                input_path: input,
                sample_rate: fs,
                window_us: win_us,
                noise_ms,
                threshold_multiplier: k,
                hold_us,
            };
            commands::timing::run(&config, json)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
