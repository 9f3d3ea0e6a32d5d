//! Static configuration supplied to an engine at construction time.
//!
//! Fields without a serde default are required: a configuration file that
//! omits them fails to deserialize. `validate` rejects values that would make
//! the phase state machine or the spawn geometry meaningless.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::Algorithm;
use crate::types::PhaseTable;

/// Invalid configuration. Always fatal at construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must be a finite non-negative number, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a probability in [0, 1], got {value}")]
    NotProbability { field: &'static str, value: f64 },

    #[error("{outer} ({outer_value}) must be greater than {inner} ({inner_value})")]
    RangeOrder {
        outer: &'static str,
        outer_value: f64,
        inner: &'static str,
        inner_value: f64,
    },

    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
}

/// Distance thresholds of the engagement phase state machine, measured
/// horizontally from the defended point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeConfig {
    /// Entry gate: threats closer than this become detected.
    pub detection_range: f64,
    /// Inner bound of the Tracing progress band.
    #[serde(default = "default_tracing_range")]
    pub tracing_range: f64,
    /// Below this, a detected threat is in Warning.
    #[serde(default = "default_warning_range")]
    pub warning_range: f64,
    /// Below this, a detected threat is in Destroy.
    #[serde(default = "default_destroy_range")]
    pub destroy_range: f64,
    /// Interceptor kill distance; inner bound of the Destroy band.
    pub success_threshold: f64,
    /// Engaged threats closer than this to the defended point are destroyed.
    #[serde(default = "default_defended_radius")]
    pub defended_radius: f64,
}

/// Spawn ring geometry and per-class speed scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub ring_min_radius: f64,
    pub ring_max_radius: f64,
    pub min_height: f64,
    pub max_height: f64,
    pub aim_jitter: f64,
    pub missile_speed_factor: f64,
    pub drone_speed_factor: f64,
    pub seed_stride: u64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            ring_min_radius: SPAWN_RING_MIN_RADIUS,
            ring_max_radius: SPAWN_RING_MAX_RADIUS,
            min_height: SPAWN_MIN_HEIGHT,
            max_height: SPAWN_MAX_HEIGHT,
            aim_jitter: SPAWN_AIM_JITTER,
            missile_speed_factor: MISSILE_SPEED_FACTOR,
            drone_speed_factor: DRONE_SPEED_FACTOR,
            seed_stride: SPAWN_SEED_STRIDE,
        }
    }
}

/// Shared simulation parameters (identical for both algorithms).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(flatten)]
    pub ranges: RangeConfig,
    /// Base speed unit; threat and interceptor speeds are multiples of it.
    pub default_speed: f64,
    pub interceptor_speed_multiplier: f64,
    /// Threat count used by `start` when the caller does not specify one.
    pub default_threat_count: u32,
    /// Capacity of every entity's position trail.
    pub trail_length: usize,
    #[serde(default)]
    pub spawn: SpawnConfig,
    #[serde(default = "default_escape_radius")]
    pub escape_radius: f64,
    #[serde(default = "default_aim_epsilon")]
    pub aim_epsilon: f64,
    #[serde(default = "default_scan_interval")]
    pub scan_interval: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ranges: RangeConfig {
                detection_range: 100.0,
                tracing_range: DEFAULT_TRACING_RANGE,
                warning_range: DEFAULT_WARNING_RANGE,
                destroy_range: DEFAULT_DESTROY_RANGE,
                success_threshold: 2.0,
                defended_radius: DEFAULT_DEFENDED_RADIUS,
            },
            default_speed: 5.0,
            interceptor_speed_multiplier: 4.0,
            default_threat_count: 5,
            trail_length: 20,
            spawn: SpawnConfig::default(),
            escape_radius: DEFAULT_ESCAPE_RADIUS,
            aim_epsilon: DEFAULT_AIM_EPSILON,
            scan_interval: DEFAULT_SCAN_INTERVAL,
        }
    }
}

impl SimConfig {
    /// Check every numeric invariant. Called by the engine constructor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.ranges;
        positive("detection_range", r.detection_range)?;
        positive("tracing_range", r.tracing_range)?;
        positive("warning_range", r.warning_range)?;
        positive("destroy_range", r.destroy_range)?;
        positive("success_threshold", r.success_threshold)?;
        non_negative("defended_radius", r.defended_radius)?;

        at_least("detection_range", r.detection_range, "tracing_range", r.tracing_range)?;
        at_least("tracing_range", r.tracing_range, "warning_range", r.warning_range)?;
        greater("warning_range", r.warning_range, "destroy_range", r.destroy_range)?;
        greater(
            "destroy_range",
            r.destroy_range,
            "success_threshold",
            r.success_threshold,
        )?;

        positive("default_speed", self.default_speed)?;
        positive(
            "interceptor_speed_multiplier",
            self.interceptor_speed_multiplier,
        )?;
        positive("aim_epsilon", self.aim_epsilon)?;
        positive("scan_interval", self.scan_interval)?;

        let s = &self.spawn;
        positive("spawn.ring_min_radius", s.ring_min_radius)?;
        at_least(
            "spawn.ring_max_radius",
            s.ring_max_radius,
            "spawn.ring_min_radius",
            s.ring_min_radius,
        )?;
        non_negative("spawn.min_height", s.min_height)?;
        at_least(
            "spawn.max_height",
            s.max_height,
            "spawn.min_height",
            s.min_height,
        )?;
        non_negative("spawn.aim_jitter", s.aim_jitter)?;
        positive("spawn.missile_speed_factor", s.missile_speed_factor)?;
        positive("spawn.drone_speed_factor", s.drone_speed_factor)?;
        greater(
            "escape_radius",
            self.escape_radius,
            "spawn.ring_max_radius",
            s.ring_max_radius,
        )?;
        Ok(())
    }
}

/// Scan-throughput cost model used for the illustrative processing-time metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ScanCostModel {
    /// `base_ms * detections^exponent / divisor`.
    Superlinear {
        base_ms: f64,
        exponent: f64,
        divisor: f64,
        jitter: f64,
        min_ms: f64,
        max_ms: f64,
    },
    /// `per_detection_ms * detections`.
    Linear {
        per_detection_ms: f64,
        jitter: f64,
        min_ms: f64,
        max_ms: f64,
    },
}

impl ScanCostModel {
    /// Cost before jitter and clamping.
    pub fn nominal_cost_ms(&self, detections: u32) -> f64 {
        let d = detections as f64;
        match *self {
            ScanCostModel::Superlinear {
                base_ms,
                exponent,
                divisor,
                ..
            } => base_ms * d.powf(exponent) / divisor,
            ScanCostModel::Linear {
                per_detection_ms, ..
            } => per_detection_ms * d,
        }
    }

    /// Relative jitter half-width.
    pub fn jitter(&self) -> f64 {
        match *self {
            ScanCostModel::Superlinear { jitter, .. } | ScanCostModel::Linear { jitter, .. } => {
                jitter
            }
        }
    }

    pub fn bounds_ms(&self) -> (f64, f64) {
        match *self {
            ScanCostModel::Superlinear { min_ms, max_ms, .. }
            | ScanCostModel::Linear { min_ms, max_ms, .. } => (min_ms, max_ms),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            ScanCostModel::Superlinear {
                base_ms, divisor, ..
            } => {
                non_negative("scan_cost.base_ms", base_ms)?;
                positive("scan_cost.divisor", divisor)?;
            }
            ScanCostModel::Linear {
                per_detection_ms, ..
            } => non_negative("scan_cost.per_detection_ms", per_detection_ms)?,
        }
        let jitter = self.jitter();
        if !(0.0..1.0).contains(&jitter) {
            return Err(ConfigError::NotProbability {
                field: "scan_cost.jitter",
                value: jitter,
            });
        }
        let (min_ms, max_ms) = self.bounds_ms();
        non_negative("scan_cost.min_ms", min_ms)?;
        at_least("scan_cost.max_ms", max_ms, "scan_cost.min_ms", min_ms)
    }
}

/// Everything that differs between the two interception algorithms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Seconds of processing before a phase's decision can be taken.
    /// The Destroy entry gates interceptor launch.
    pub processing_delays: PhaseTable<f64>,
    /// Launch decisions allowed per tick; `None` means unlimited.
    #[serde(default)]
    pub max_decisions_per_tick: Option<u32>,
    /// Probability that a launch decision actually fires an interceptor.
    #[serde(alias = "success_rate")]
    pub launch_success_rate: f64,
    /// Multiplier on interceptor speed (faster trajectory analysis).
    pub interceptor_speed_factor: f64,
    /// Base CPU load fraction for the CPU heuristic.
    pub cpu_overhead: f64,
    /// Advisory maximum threat load the algorithm is rated for.
    pub threat_limit: u32,
    pub scan_cost: ScanCostModel,
}

impl PolicyConfig {
    /// Sequential, slow and fallible.
    pub fn conventional() -> Self {
        Self {
            algorithm: Algorithm::Conventional,
            processing_delays: PhaseTable::new(0.5, 0.8, 1.2),
            max_decisions_per_tick: Some(1),
            launch_success_rate: 0.85,
            interceptor_speed_factor: 1.0,
            cpu_overhead: 0.45,
            threat_limit: 15,
            scan_cost: ScanCostModel::Superlinear {
                base_ms: 50.0,
                exponent: 1.5,
                divisor: 10.0,
                jitter: 0.1,
                min_ms: 100.0,
                max_ms: 30_000.0,
            },
        }
    }

    /// Parallel, fast and reliable.
    pub fn low_latency() -> Self {
        Self {
            algorithm: Algorithm::LowLatency,
            processing_delays: PhaseTable::new(0.05, 0.08, 0.15),
            max_decisions_per_tick: None,
            launch_success_rate: 1.0,
            interceptor_speed_factor: 1.5,
            cpu_overhead: 0.15,
            threat_limit: 30,
            scan_cost: ScanCostModel::Linear {
                per_detection_ms: 0.05,
                jitter: 0.05,
                min_ms: 0.1,
                max_ms: 50.0,
            },
        }
    }

    /// Preset for the given algorithm.
    pub fn preset(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Conventional => Self::conventional(),
            Algorithm::LowLatency => Self::low_latency(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("processing_delays.tracing", self.processing_delays.tracing)?;
        non_negative("processing_delays.warning", self.processing_delays.warning)?;
        non_negative("processing_delays.destroy", self.processing_delays.destroy)?;
        if self.max_decisions_per_tick == Some(0) {
            return Err(ConfigError::Zero {
                field: "max_decisions_per_tick",
            });
        }
        probability("launch_success_rate", self.launch_success_rate)?;
        positive("interceptor_speed_factor", self.interceptor_speed_factor)?;
        probability("cpu_overhead", self.cpu_overhead)?;
        self.scan_cost.validate()
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::NotProbability { field, value })
    }
}

fn greater(
    outer: &'static str,
    outer_value: f64,
    inner: &'static str,
    inner_value: f64,
) -> Result<(), ConfigError> {
    if outer_value > inner_value {
        Ok(())
    } else {
        Err(ConfigError::RangeOrder {
            outer,
            outer_value,
            inner,
            inner_value,
        })
    }
}

fn at_least(
    outer: &'static str,
    outer_value: f64,
    inner: &'static str,
    inner_value: f64,
) -> Result<(), ConfigError> {
    if outer_value >= inner_value {
        Ok(())
    } else {
        Err(ConfigError::RangeOrder {
            outer,
            outer_value,
            inner,
            inner_value,
        })
    }
}

fn default_tracing_range() -> f64 {
    DEFAULT_TRACING_RANGE
}

fn default_warning_range() -> f64 {
    DEFAULT_WARNING_RANGE
}

fn default_destroy_range() -> f64 {
    DEFAULT_DESTROY_RANGE
}

fn default_defended_radius() -> f64 {
    DEFAULT_DEFENDED_RADIUS
}

fn default_escape_radius() -> f64 {
    DEFAULT_ESCAPE_RADIUS
}

fn default_aim_epsilon() -> f64 {
    DEFAULT_AIM_EPSILON
}

fn default_scan_interval() -> f64 {
    DEFAULT_SCAN_INTERVAL
}
