//! CLI command implementations

pub mod bin2wav;
pub mod convert;
pub mod json_output;
pub mod timing;

mod reporting;
