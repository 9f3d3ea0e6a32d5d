//! Threat behavior for the interception simulator.
//!
//! Implements the engagement phase state machine, motion-pattern steering,
//! and pattern/class profiles used when spawning.

pub mod fsm;
pub mod motion;
pub mod profiles;

pub use intercept_core as core;

#[cfg(test)]
mod tests;
