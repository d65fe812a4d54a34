//! # Roster Server Library
//!
//! Dependency injection wiring, telemetry, metrics, and startup helpers
//! shared by the `roster-server` and `roster-migrate` binaries.

pub mod di;
pub mod prometheus;
pub mod startup;
pub mod telemetry;
