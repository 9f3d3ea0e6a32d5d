//! Statistics snapshot: the complete visible state of one engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{PhaseTable, Position, Velocity};

/// Counts and progress for one engagement phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseStat {
    /// Detected, live threats currently in this phase.
    pub active: u32,
    /// Highest progress among those threats through the phase band (0..=100).
    pub progress: f64,
}

/// Aggregate statistics built after each step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub algorithm: Algorithm,
    pub elapsed_secs: f64,
    pub running: bool,
    pub paused: bool,

    /// Threats currently in play.
    pub threats_active: u32,
    pub threats_destroyed: u32,
    pub threats_spawned: u32,
    /// Threats that ever entered Destroy.
    pub threats_engaged: u32,
    pub threats_intercepted: u32,
    pub threats_missed: u32,

    pub interceptors_active: u32,
    pub interceptors_launched: u32,

    /// `100 * intercepted / (intercepted + missed)`, 0 when both are 0.
    pub success_rate: f64,

    pub phase_stats: PhaseTable<PhaseStat>,
    pub threat_limit: u32,
    /// Illustrative CPU heuristic, percent.
    pub cpu_usage: f64,

    /// Mean measured dwell (Tracing, Warning) or decision wait (Destroy), ms.
    pub response_times_ms: PhaseTable<f64>,
    pub total_response_time_ms: f64,
    /// Configured processing delays, ms.
    pub processing_delays_ms: PhaseTable<f64>,

    /// Mean detection-to-removal tracking time of destroyed threats, ms.
    pub avg_interception_time_ms: f64,
    /// Tracking time of each live detected threat, keyed by serial, ms.
    pub current_interception_times_ms: BTreeMap<u32, f64>,

    pub detections_per_scan: u32,
    pub processing_time_per_scan_ms: f64,
}

/// A live threat, for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThreatView {
    pub serial: u32,
    pub class: ThreatClass,
    pub pattern: MotionPattern,
    pub position: Position,
    pub velocity: Velocity,
    pub phase: ThreatPhase,
    pub progress: f64,
    pub detected: bool,
    pub engaged: bool,
    /// Horizontal range to the defended point.
    pub range: f64,
    /// Position history for trail dots.
    pub history: Vec<Position>,
}

/// A live interceptor, for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterceptorView {
    pub target_serial: u32,
    pub position: Position,
    pub velocity: Velocity,
    pub flight_secs: f64,
    pub history: Vec<Position>,
}
