//! Bin2wav command implementation
//!
//! Native-rate conversion: the WAV header carries the capture rate and the
//! samples are written unchanged.

use anyhow::Result;
use std::path::Path;
use std::process::ExitCode;

use thermoscope_core::ConvertConfig;

use super::convert;

/// Run the bin2wav command
///
/// # Arguments
/// * `input` - Raw capture path
/// * `output` - WAV output path
/// * `sample_rate` - Capture rate, written to the WAV header
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(input: &Path, output: &Path, sample_rate: u32, json_output: bool) -> Result<ExitCode> {
    let config = ConvertConfig {
        input_path: input.to_path_buf(),
        output_path: output.to_path_buf(),
        sample_rate,
        output_rate: None,
    };
    convert::run(&config, json_output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_bin2wav_keeps_bytes_swapped() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("adc_dump.bin");
        let output = dir.path().join("adc_dump.wav");
        std::fs::write(&input, [0x12, 0x34, 0xAB, 0xCD, 0x00, 0x01, 0x80, 0x00]).unwrap();

        let code = run(&input, &output, 1_000_000, false).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let wav = std::fs::read(&output).unwrap();
        assert_eq!(
            u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]),
            1_000_000
        );
        assert_eq!(&wav[44..], &[0x34, 0x12, 0xCD, 0xAB, 0x01, 0x00, 0x00, 0x80]);
    }
}
