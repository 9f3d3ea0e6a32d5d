//! Engagement phase finite state machine.
//!
//! Pure functions that compute phase classification, transitions and
//! progress for threat entities from their distance to the defended point.
//! No ECS dependency: operates on plain data.

use intercept_core::config::RangeConfig;
use intercept_core::enums::ThreatPhase;

/// Input to the phase FSM for a single threat.
pub struct TrackContext<'a> {
    pub ranges: &'a RangeConfig,
    pub phase: ThreatPhase,
    /// Horizontal distance to the defended point.
    pub range: f64,
}

/// Output from the phase FSM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseUpdate {
    pub new_phase: ThreatPhase,
    pub phase_changed: bool,
    /// Progress through the new phase's band, 0..=100.
    pub progress: f64,
}

/// Evaluate the FSM for one detected threat.
pub fn evaluate(ctx: &TrackContext<'_>) -> PhaseUpdate {
    let new_phase = next_phase(ctx.phase, ctx.range, ctx.ranges);
    PhaseUpdate {
        new_phase,
        phase_changed: new_phase != ctx.phase,
        progress: phase_progress(new_phase, ctx.range, ctx.ranges),
    }
}

/// Whether an undetected threat at `range` is picked up this tick.
pub fn is_detected(range: f64, ranges: &RangeConfig) -> bool {
    range < ranges.detection_range
}

/// Phase purely from distance, ignoring history.
pub fn classify(range: f64, ranges: &RangeConfig) -> ThreatPhase {
    if range < ranges.destroy_range {
        ThreatPhase::Destroy
    } else if range < ranges.warning_range {
        ThreatPhase::Warning
    } else {
        ThreatPhase::Tracing
    }
}

/// Phase after this tick. Never earlier than `current`.
pub fn next_phase(current: ThreatPhase, range: f64, ranges: &RangeConfig) -> ThreatPhase {
    current.max(classify(range, ranges))
}

/// Progress through the band belonging to `phase`, 0..=100.
///
/// Each band spans the ranges `classify` keeps the phase in, so Tracing runs
/// from detection down to the warning boundary.
pub fn phase_progress(phase: ThreatPhase, range: f64, ranges: &RangeConfig) -> f64 {
    let (outer, inner) = match phase {
        ThreatPhase::Tracing => (ranges.detection_range, ranges.warning_range),
        ThreatPhase::Warning => (ranges.warning_range, ranges.destroy_range),
        ThreatPhase::Destroy => (ranges.destroy_range, ranges.success_threshold),
    };
    band_progress(range, outer, inner)
}

/// Linear progress from `outer` (0) to `inner` (100), clamped.
/// A zero-width band reads 100 once inside it, 0 outside.
pub fn band_progress(range: f64, outer: f64, inner: f64) -> f64 {
    let width = outer - inner;
    if width <= f64::EPSILON {
        return if range <= inner { 100.0 } else { 0.0 };
    }
    ((outer - range) / width * 100.0).clamp(0.0, 100.0)
}
