//! Scan-throughput and CPU heuristics.
//!
//! Illustrative numbers only: nothing here feeds back into the simulation.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use intercept_core::config::PolicyConfig;
use intercept_core::constants::*;
use intercept_core::enums::{Scenario, ThreatClass};

#[derive(Debug, Clone, Default)]
pub struct TelemetryState {
    pub cpu_usage: f64,
    pub detections_per_scan: u32,
    pub processing_time_per_scan_ms: f64,
    last_scan_at: Option<f64>,
}

/// Radar reflections one threat produces per scan.
pub fn reflections_per_threat(scenario: Scenario, class: ThreatClass) -> u32 {
    match (scenario, class) {
        (Scenario::Single, ThreatClass::Missile) => 5,
        (Scenario::Single, ThreatClass::Drone) => 3,
        (Scenario::Wave, ThreatClass::Missile) => 8,
        (Scenario::Wave, ThreatClass::Drone) => 5,
        (Scenario::Saturation, ThreatClass::Missile) => 12,
        (Scenario::Saturation, ThreatClass::Drone) => 8,
        (Scenario::Custom, ThreatClass::Missile) => 6,
        (Scenario::Custom, ThreatClass::Drone) => 4,
    }
}

/// Recompute the scan metrics if a scan interval has elapsed.
#[allow(clippy::too_many_arguments)]
pub fn scan(
    state: &mut TelemetryState,
    policy: &PolicyConfig,
    scenario: Scenario,
    class: ThreatClass,
    live_threats: u32,
    now: f64,
    scan_interval: f64,
    rng: &mut ChaCha8Rng,
) {
    if let Some(last) = state.last_scan_at {
        if now - last < scan_interval {
            return;
        }
    }
    state.last_scan_at = Some(now);

    let reflections = f64::from(live_threats * reflections_per_threat(scenario, class));
    let jitter = rng.gen_range(1.0 - DETECTION_JITTER..=1.0 + DETECTION_JITTER);
    state.detections_per_scan = (reflections * jitter) as u32;

    let model = &policy.scan_cost;
    let j = model.jitter();
    let (min_ms, max_ms) = model.bounds_ms();
    let cost = model.nominal_cost_ms(state.detections_per_scan) * rng.gen_range(1.0 - j..=1.0 + j);
    state.processing_time_per_scan_ms = cost.clamp(min_ms, max_ms);
}

/// Recompute the CPU heuristic.
pub fn update_cpu(
    state: &mut TelemetryState,
    policy: &PolicyConfig,
    live_threats: u32,
    live_interceptors: u32,
    rng: &mut ChaCha8Rng,
) {
    let base = policy.cpu_overhead * 100.0;
    let load = 1.0
        + f64::from(live_threats) * CPU_LOAD_PER_THREAT
        + f64::from(live_interceptors) * CPU_LOAD_PER_INTERCEPTOR;
    let cpu = (base * load).min(CPU_MAX) + rng.gen_range(-CPU_JITTER..=CPU_JITTER);
    state.cpu_usage = cpu.clamp(CPU_MIN_RUNNING, CPU_MAX);
}

/// Forget the last scan so the next call rescans immediately.
pub fn reset(state: &mut TelemetryState) {
    *state = TelemetryState::default();
}
