//! Snapshot system: queries the ECS world and builds statistics and views.
//!
//! This system is read-only. It never modifies the world.

use std::collections::BTreeMap;

use hecs::World;

use intercept_core::components::*;
use intercept_core::config::PolicyConfig;
use intercept_core::enums::RunState;
use intercept_core::state::*;
use intercept_core::types::{PhaseTable, Position, SimTime, Velocity};

use crate::engagement::{ResponseLog, ScoreState};
use crate::systems::telemetry::TelemetryState;

/// Everything the statistics builder reads besides the world.
pub struct StatisticsInputs<'a> {
    pub policy: &'a PolicyConfig,
    pub time: &'a SimTime,
    pub run_state: RunState,
    pub score: &'a ScoreState,
    pub responses: &'a ResponseLog,
    pub telemetry: &'a TelemetryState,
}

/// Build the aggregate statistics from the current world state.
pub fn build_statistics(world: &World, inputs: &StatisticsInputs<'_>) -> StatisticsSnapshot {
    let score = inputs.score;
    let running = inputs.run_state == RunState::Running;

    let mut threats_active = 0;
    let mut phase_stats: PhaseTable<PhaseStat> = PhaseTable::default();
    let mut current_interception_times_ms = BTreeMap::new();

    for (_, (_, profile, status, clock)) in world
        .query::<(&Threat, &ThreatProfile, &ThreatStatus, &TrackingClock)>()
        .iter()
    {
        if !status.active || status.destroyed {
            continue;
        }
        threats_active += 1;
        if !status.detected {
            continue;
        }
        let stat = phase_stats.get_mut(status.phase);
        stat.active += 1;
        stat.progress = stat.progress.max(clock.progress);
        current_interception_times_ms.insert(profile.serial, clock.tracking_secs * 1000.0);
    }

    let interceptors_active = world
        .query::<(&Interceptor, &InterceptorState)>()
        .iter()
        .filter(|(_, (_, state))| state.active)
        .count() as u32;

    let response_times_ms = inputs.responses.mean_response_ms();
    let total_response_time_ms: f64 = response_times_ms.iter().map(|(_, ms)| ms).sum();

    StatisticsSnapshot {
        algorithm: inputs.policy.algorithm,
        elapsed_secs: inputs.time.elapsed_secs,
        running: inputs.run_state != RunState::Idle,
        paused: inputs.run_state == RunState::Paused,
        threats_active,
        threats_destroyed: score.threats_destroyed,
        threats_spawned: score.threats_spawned,
        threats_engaged: score.threats_engaged,
        threats_intercepted: score.threats_intercepted,
        threats_missed: score.threats_missed,
        interceptors_active,
        interceptors_launched: score.interceptors_launched,
        success_rate: score.success_rate(),
        phase_stats,
        threat_limit: inputs.policy.threat_limit,
        cpu_usage: if running {
            inputs.telemetry.cpu_usage
        } else {
            0.0
        },
        response_times_ms,
        total_response_time_ms,
        processing_delays_ms: inputs.policy.processing_delays.map(|secs| secs * 1000.0),
        avg_interception_time_ms: inputs.responses.mean_interception_ms(),
        current_interception_times_ms,
        detections_per_scan: inputs.telemetry.detections_per_scan,
        processing_time_per_scan_ms: inputs.telemetry.processing_time_per_scan_ms,
    }
}

/// Build ThreatView list from all live threats, in spawn order.
pub fn build_threats(world: &World) -> Vec<ThreatView> {
    let defended = Position::default();
    let mut views: Vec<ThreatView> = world
        .query::<(
            &Threat,
            &Position,
            &Velocity,
            &ThreatProfile,
            &ThreatStatus,
            &TrackingClock,
            &PositionHistory,
        )>()
        .iter()
        .filter(|(_, (_, _, _, _, status, _, _))| status.active && !status.destroyed)
        .map(|(_, (_, pos, vel, profile, status, clock, history))| ThreatView {
            serial: profile.serial,
            class: profile.class,
            pattern: profile.pattern,
            position: *pos,
            velocity: *vel,
            phase: status.phase,
            progress: clock.progress,
            detected: status.detected,
            engaged: clock.engaged,
            range: pos.horizontal_range_to(&defended),
            history: history.positions.iter().copied().collect(),
        })
        .collect();
    views.sort_by_key(|v| v.serial);
    views
}

/// Build InterceptorView list from all active interceptors.
pub fn build_interceptors(world: &World, now: f64) -> Vec<InterceptorView> {
    let mut views: Vec<InterceptorView> = world
        .query::<(
            &Interceptor,
            &Position,
            &Velocity,
            &InterceptorState,
            &PositionHistory,
        )>()
        .iter()
        .filter(|(_, (_, _, _, state, _))| state.active)
        .map(|(_, (_, pos, vel, state, history))| InterceptorView {
            target_serial: state.target_serial,
            position: *pos,
            velocity: *vel,
            flight_secs: now - state.launched_at,
            history: history.positions.iter().copied().collect(),
        })
        .collect();
    views.sort_by_key(|v| v.target_serial);
    views
}
