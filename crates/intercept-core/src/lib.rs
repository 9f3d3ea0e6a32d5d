//! Core types and definitions for the interception comparison simulator.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, configuration, statistics snapshots, events, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
