//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state. Entity state lives in components; aggregates are
//! passed in by the engine.

pub mod cleanup;
pub mod engagement_policy;
pub mod interceptor_flight;
pub mod population;
pub mod snapshot;
pub mod telemetry;
pub mod threat_motion;
pub mod tracker;
