//! Cleanup system: settles the accounting for finished entities and removes them.

use hecs::{Entity, World};
use tracing::debug;

use intercept_core::components::*;
use intercept_core::enums::ThreatPhase;
use intercept_core::events::SimEvent;
use intercept_core::types::Position;

use crate::engagement::{ResponseLog, ScoreState};

/// Remove destroyed or inactive threats and inactive interceptors.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    now: f64,
    score: &mut ScoreState,
    responses: &mut ResponseLog,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();

    for (entity, (_threat, profile, status, clock, pos)) in world
        .query::<(
            &Threat,
            &ThreatProfile,
            &ThreatStatus,
            &TrackingClock,
            &Position,
        )>()
        .iter()
    {
        if status.active && !status.destroyed {
            continue;
        }

        if status.destroyed {
            score.threats_destroyed += 1;
            if clock.detected_at.is_some() {
                responses.record_interception(clock.tracking_secs);
            }
        }

        // Escaped threats that were engaged also count as missed.
        if clock.engaged {
            if status.intercepted {
                score.threats_intercepted += 1;
            } else {
                score.threats_missed += 1;
                debug!(serial = profile.serial, "threat missed");
                events.push(SimEvent::Missed {
                    serial: profile.serial,
                    position: *pos,
                });
            }
        }

        if status.detected && status.phase == ThreatPhase::Tracing {
            responses.record(ThreatPhase::Tracing, now - status.phase_entered_at);
        }

        despawn_buffer.push(entity);
    }

    for (entity, (_interceptor, state)) in world.query::<(&Interceptor, &InterceptorState)>().iter()
    {
        if !state.active {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
