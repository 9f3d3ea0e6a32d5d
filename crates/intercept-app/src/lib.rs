//! Headless comparison runner for the interception simulator.
//!
//! Wires configuration loading, logging, the two-engine comparison loop and
//! metrics export together for the `intercept` binary.

pub mod comparison;
pub mod config_file;
pub mod export;
pub mod logging;

pub use intercept_sim::core;
