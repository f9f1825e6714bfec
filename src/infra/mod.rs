//! Process-level plumbing for the binary: errors and telemetry.

pub mod error;
pub mod telemetry;
