//! Engagement tracker: detection and phase transitions from range to the defended point.

use hecs::World;
use tracing::trace;

use intercept_core::components::{Threat, ThreatProfile, ThreatStatus, TrackingClock};
use intercept_core::config::RangeConfig;
use intercept_core::enums::ThreatPhase;
use intercept_core::events::SimEvent;
use intercept_core::types::Position;
use intercept_threat_ai::fsm::{self, TrackContext};

use crate::engagement::{ResponseLog, ScoreState};

/// Detect new threats and advance the phase of every detected live threat.
pub fn run(
    world: &mut World,
    ranges: &RangeConfig,
    now: f64,
    responses: &mut ResponseLog,
    score: &mut ScoreState,
    events: &mut Vec<SimEvent>,
) {
    let defended = Position::default();

    for (_entity, (_threat, profile, pos, status, clock)) in world.query_mut::<(
        &Threat,
        &ThreatProfile,
        &Position,
        &mut ThreatStatus,
        &mut TrackingClock,
    )>() {
        if !status.active || status.destroyed {
            continue;
        }

        let range = pos.horizontal_range_to(&defended);

        if !status.detected {
            if !fsm::is_detected(range, ranges) {
                continue;
            }
            status.detected = true;
            status.phase = ThreatPhase::Tracing;
            status.phase_entered_at = now;
            clock.detected_at = Some(now);
            clock.tracking_secs = 0.0;
            trace!(serial = profile.serial, range, "threat detected");
        }

        let update = fsm::evaluate(&TrackContext {
            ranges,
            phase: status.phase,
            range,
        });
        clock.progress = update.progress;

        if !update.phase_changed {
            continue;
        }

        responses.record(status.phase, now - status.phase_entered_at);
        status.phase = update.new_phase;
        status.phase_entered_at = now;

        if update.new_phase == ThreatPhase::Destroy && !clock.engaged {
            clock.engaged = true;
            clock.launch_window_opened_at = Some(now);
            score.threats_engaged += 1;
        }

        trace!(
            serial = profile.serial,
            phase = %update.new_phase,
            range,
            "phase transition"
        );
        events.push(SimEvent::PhaseChanged {
            serial: profile.serial,
            phase: update.new_phase,
        });
    }
}
