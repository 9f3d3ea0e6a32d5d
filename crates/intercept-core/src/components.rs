//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods, except for the trail
//! buffer which owns its capacity rule. Simulation logic lives in systems.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Position, Velocity};

/// Marker: this entity is a threat.
#[derive(Debug, Clone, Copy)]
pub struct Threat;

/// Marker: this entity is an interceptor.
#[derive(Debug, Clone, Copy)]
pub struct Interceptor;

/// Immutable spawn-time description of a threat plus its motion clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatProfile {
    /// Engine-unique identifier, stable across despawn.
    pub serial: u32,
    pub class: ThreatClass,
    pub pattern: MotionPattern,
    /// Point this threat flies toward (near the defended origin).
    pub aim_point: Position,
    /// Scalar speed (units/s).
    pub speed: f64,
    /// Straight-line velocity toward the aim point at spawn.
    pub base_velocity: Velocity,
    /// Seconds of patterned flight accumulated so far.
    pub pattern_time: f64,
}

/// Engagement status flags and the current phase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreatStatus {
    pub phase: ThreatPhase,
    /// Simulated time at which `phase` was entered.
    pub phase_entered_at: f64,
    pub detected: bool,
    /// Killed by an interceptor.
    pub intercepted: bool,
    /// Removed from play: intercepted, reached its aim point, or leaked.
    pub destroyed: bool,
    /// False once the threat has left the world bounds.
    pub active: bool,
}

/// Detection and launch-window timing for a threat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackingClock {
    /// Simulated time of first detection.
    pub detected_at: Option<f64>,
    /// Simulated seconds since detection.
    pub tracking_secs: f64,
    /// Destroy-phase entry time awaiting a launch decision. Cleared once the
    /// decision is taken, whatever its outcome.
    pub launch_window_opened_at: Option<f64>,
    /// Set on first entry into Destroy.
    pub engaged: bool,
    /// Progress through the current phase band, 0..=100.
    pub progress: f64,
}

/// Bounded ring of recent positions (oldest first).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionHistory {
    pub positions: VecDeque<Position>,
    pub capacity: usize,
}

impl PositionHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a position, dropping the oldest beyond capacity.
    pub fn push(&mut self, position: Position) {
        if self.capacity == 0 {
            return;
        }
        self.positions.push_back(position);
        while self.positions.len() > self.capacity {
            self.positions.pop_front();
        }
    }
}

/// Interceptor flight state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterceptorState {
    /// Serial of the targeted threat, which may have been despawned since launch.
    pub target_serial: u32,
    /// Scalar speed (units/s).
    pub speed: f64,
    pub active: bool,
    /// Set when this interceptor killed its target.
    pub intercepted: bool,
    /// Where the kill happened, if it did.
    pub kill_position: Option<Position>,
    /// Simulated time of launch.
    pub launched_at: f64,
}
