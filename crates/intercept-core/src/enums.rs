//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Engagement phase of a threat, assigned from its distance to the defended point.
///
/// Ordered: `Tracing < Warning < Destroy`. A threat's phase only ever moves
/// forward in this order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ThreatPhase {
    /// Detected and being tracked at long range.
    #[default]
    Tracing,
    /// Medium range: trajectory is being evaluated.
    Warning,
    /// Close range: eligible for interceptor launch.
    Destroy,
}

impl ThreatPhase {
    pub const ALL: [ThreatPhase; 3] = [
        ThreatPhase::Tracing,
        ThreatPhase::Warning,
        ThreatPhase::Destroy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ThreatPhase::Tracing => "Tracing",
            ThreatPhase::Warning => "Warning",
            ThreatPhase::Destroy => "Destroy",
        }
    }
}

/// Flight path a threat follows toward its aim point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionPattern {
    #[default]
    Straight,
    /// Smooth sinusoidal lateral deviation.
    Curved,
    /// Hard side-to-side alternation.
    Zigzag,
    /// Corkscrew around the straight-line path.
    Spiral,
}

/// Threat class. Affects speed and erratic-motion bias only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatClass {
    #[default]
    Missile,
    Drone,
}

/// Attack scenario; selects the motion pattern of spawned threats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    #[default]
    Single,
    Wave,
    Saturation,
    /// Uses the user-selected custom pattern.
    Custom,
}

/// Which interception algorithm an engine models.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Sequential processing with slow, fallible launch decisions.
    #[default]
    #[serde(alias = "old")]
    Conventional,
    /// Parallel processing with fast, reliable launch decisions.
    #[serde(alias = "new")]
    LowLatency,
}

impl Algorithm {
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Conventional => "conventional",
            Algorithm::LowLatency => "low-latency",
        }
    }
}

/// Engine run state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Unrecognised name when parsing an enum from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl FromStr for MotionPattern {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "straight" => Ok(MotionPattern::Straight),
            "curved" => Ok(MotionPattern::Curved),
            "zigzag" => Ok(MotionPattern::Zigzag),
            "spiral" => Ok(MotionPattern::Spiral),
            _ => Err(ParseEnumError {
                kind: "motion pattern",
                value: s.to_string(),
                expected: "straight, curved, zigzag, spiral",
            }),
        }
    }
}

impl FromStr for ThreatClass {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "missile" | "missiles" => Ok(ThreatClass::Missile),
            "drone" | "drones" => Ok(ThreatClass::Drone),
            _ => Err(ParseEnumError {
                kind: "threat class",
                value: s.to_string(),
                expected: "missile, drone",
            }),
        }
    }
}

impl FromStr for Scenario {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "single" => Ok(Scenario::Single),
            "wave" => Ok(Scenario::Wave),
            "saturation" => Ok(Scenario::Saturation),
            "custom" => Ok(Scenario::Custom),
            _ => Err(ParseEnumError {
                kind: "scenario",
                value: s.to_string(),
                expected: "single, wave, saturation, custom",
            }),
        }
    }
}

impl fmt::Display for ThreatPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
