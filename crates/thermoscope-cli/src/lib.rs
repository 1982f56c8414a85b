//! Thermoscope CLI library.
//!
//! Command implementations for converting raw ADC captures to WAV and
//! reporting transient event timing.

pub mod commands;
pub mod input;
