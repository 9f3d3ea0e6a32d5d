//! Engagement accounting: running counters and response-time logs.
//!
//! Stored in `SimulationEngine`, NOT as ECS entities. Per-threat timing lives
//! on the threat's components; these are the aggregates built from it.

use intercept_core::enums::ThreatPhase;
use intercept_core::types::PhaseTable;

/// Running score state tracked by the engine.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    pub threats_spawned: u32,
    pub threats_destroyed: u32,
    /// Threats that entered Destroy, counted once each.
    pub threats_engaged: u32,
    pub threats_intercepted: u32,
    pub threats_missed: u32,
    pub interceptors_launched: u32,
}

impl ScoreState {
    /// Percentage of resolved engagements that ended in an intercept.
    pub fn success_rate(&self) -> f64 {
        let attempts = self.threats_intercepted + self.threats_missed;
        if attempts == 0 {
            return 0.0;
        }
        self.threats_intercepted as f64 / attempts as f64 * 100.0
    }
}

/// Completed phase durations and interception times, in simulated seconds.
#[derive(Debug, Clone, Default)]
pub struct ResponseLog {
    /// Tracing and Warning: time spent in the phase. Destroy: wait from
    /// Destroy entry to launch.
    pub phase_durations: PhaseTable<Vec<f64>>,
    /// Detection-to-removal time of each destroyed, detected threat.
    pub interception_times: Vec<f64>,
}

impl ResponseLog {
    /// Append a dwell time. Non-positive dwell times carry no information and are dropped.
    pub fn record(&mut self, phase: ThreatPhase, secs: f64) {
        if secs > 0.0 {
            self.phase_durations.get_mut(phase).push(secs);
        }
    }

    /// Append the Destroy-entry-to-launch wait. A launch in the tick the
    /// window opened waits 0 s and still counts.
    pub fn record_launch_wait(&mut self, secs: f64) {
        if secs >= 0.0 {
            self.phase_durations.destroy.push(secs);
        }
    }

    pub fn record_interception(&mut self, secs: f64) {
        self.interception_times.push(secs);
    }

    /// Mean duration per phase in milliseconds (0 for empty lists).
    pub fn mean_response_ms(&self) -> PhaseTable<f64> {
        self.phase_durations.map(|times| mean(times) * 1000.0)
    }

    pub fn mean_interception_ms(&self) -> f64 {
        mean(&self.interception_times) * 1000.0
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
