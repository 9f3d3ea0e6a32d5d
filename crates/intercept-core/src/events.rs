//! Events emitted by the simulation for log and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// Something notable that happened during a step. Drained by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A new threat entered play.
    ThreatSpawned {
        serial: u32,
        class: ThreatClass,
        pattern: MotionPattern,
        position: Position,
    },
    /// A threat moved into a later engagement phase.
    PhaseChanged { serial: u32, phase: ThreatPhase },
    /// An interceptor was launched at a threat.
    Launched { target_serial: u32, speed: f64 },
    /// A launch decision was taken but the interceptor did not fire.
    LaunchFailed { target_serial: u32 },
    /// An interceptor destroyed its target.
    Intercepted {
        serial: u32,
        position: Position,
        /// Seconds from launch to kill.
        flight_secs: f64,
    },
    /// An engaged threat leaked through and was counted as missed.
    Missed { serial: u32, position: Position },
}
