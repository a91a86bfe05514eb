//! Command handlers for the Lumos CLI.

pub mod config;
pub mod enhance;
pub mod telemetry;
