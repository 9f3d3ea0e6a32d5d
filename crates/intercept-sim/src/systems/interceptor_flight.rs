//! Interceptor flight system: guidance, integration and proximity kills.

use std::collections::HashMap;

use hecs::{Entity, World};
use tracing::debug;

use intercept_core::components::*;
use intercept_core::events::SimEvent;
use intercept_core::types::{Position, Velocity};

use crate::guidance;

/// Steer and move every active interceptor, then resolve kills.
pub fn run(
    world: &mut World,
    success_threshold: f64,
    dt: f64,
    now: f64,
    events: &mut Vec<SimEvent>,
) {
    // Live targets by serial.
    let targets: HashMap<u32, (Entity, Position, Velocity)> = world
        .query::<(&Threat, &ThreatProfile, &ThreatStatus, &Position, &Velocity)>()
        .iter()
        .filter(|(_, (_, _, status, _, _))| status.active && !status.destroyed)
        .map(|(entity, (_, profile, _, pos, vel))| (profile.serial, (entity, *pos, *vel)))
        .collect();

    let mut kills: Vec<(Entity, u32, Position, f64)> = Vec::new();

    for (_entity, (_interceptor, state, pos, vel, history)) in world.query_mut::<(
        &Interceptor,
        &mut InterceptorState,
        &mut Position,
        &mut Velocity,
        &mut PositionHistory,
    )>() {
        if !state.active {
            continue;
        }

        let Some((target_entity, target_pos, target_vel)) = targets.get(&state.target_serial)
        else {
            // Target gone: hold heading and stand down.
            *vel = guidance::intercept_velocity(pos, state.speed, None);
            state.active = false;
            continue;
        };

        *vel = guidance::intercept_velocity(pos, state.speed, Some((target_pos, target_vel)));
        pos.advance(vel, dt);
        history.push(*pos);

        if pos.range_to(target_pos) < success_threshold {
            state.intercepted = true;
            state.active = false;
            let kill_position = *state.kill_position.get_or_insert(*pos);
            kills.push((
                *target_entity,
                state.target_serial,
                kill_position,
                now - state.launched_at,
            ));
        }
    }

    for (target, serial, position, flight_secs) in kills {
        if let Ok(mut status) = world.get::<&mut ThreatStatus>(target) {
            status.intercepted = true;
            status.destroyed = true;
            status.active = false;
        }
        debug!(serial, flight_secs, "threat intercepted");
        events.push(SimEvent::Intercepted {
            serial,
            position,
            flight_secs,
        });
    }
}
