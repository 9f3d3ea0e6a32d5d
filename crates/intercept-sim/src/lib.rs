//! Headless interception simulator.
//!
//! Owns the hecs ECS world, advances it in simulated time, and produces
//! statistics snapshots for comparing two interception algorithms.

pub mod clock;
pub mod engagement;
pub mod engine;
pub mod guidance;
pub mod systems;
pub mod world_setup;

pub use engine::SimulationEngine;
pub use intercept_core as core;
