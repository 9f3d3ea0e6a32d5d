//! Engagement policy system: launch decisions for threats in the Destroy phase.
//!
//! Both algorithms share this code; they differ only in their `PolicyConfig`
//! (processing delay, decisions per tick, launch success rate, speed factor).

use std::collections::HashSet;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use intercept_core::components::*;
use intercept_core::config::{PolicyConfig, SimConfig};
use intercept_core::enums::ThreatPhase;
use intercept_core::events::SimEvent;
use intercept_core::types::{Position, Velocity};

use crate::engagement::{ResponseLog, ScoreState};
use crate::world_setup;

/// A threat whose launch decision is due this tick.
struct Candidate {
    entity: Entity,
    serial: u32,
    window_opened_at: f64,
    position: Position,
    velocity: Velocity,
}

/// Run the engagement policy for one tick. Returns the number of launches.
#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    policy: &PolicyConfig,
    config: &SimConfig,
    rng: &mut ChaCha8Rng,
    now: f64,
    score: &mut ScoreState,
    responses: &mut ResponseLog,
    events: &mut Vec<SimEvent>,
) -> u32 {
    let candidates = collect_candidates(world, policy, now);
    let cap = policy
        .max_decisions_per_tick
        .map_or(usize::MAX, |n| n as usize);

    let speed = interceptor_speed(config, policy);
    let mut launches = 0;

    for candidate in candidates.into_iter().take(cap) {
        // The window closes whatever the outcome.
        if let Ok(mut clock) = world.get::<&mut TrackingClock>(candidate.entity) {
            clock.launch_window_opened_at = None;
        }

        if !roll_launch(policy.launch_success_rate, rng) {
            debug!(serial = candidate.serial, "launch decision failed");
            events.push(SimEvent::LaunchFailed {
                target_serial: candidate.serial,
            });
            continue;
        }

        world_setup::spawn_interceptor(
            world,
            Position::default(),
            candidate.serial,
            Some((&candidate.position, &candidate.velocity)),
            speed,
            now,
            config.trail_length,
        );

        let waited = now - candidate.window_opened_at;
        responses.record_launch_wait(waited);
        score.interceptors_launched += 1;
        launches += 1;

        debug!(serial = candidate.serial, speed, waited, "interceptor launched");
        events.push(SimEvent::Launched {
            target_serial: candidate.serial,
            speed,
        });
    }

    launches
}

/// Interceptor speed for a policy.
pub fn interceptor_speed(config: &SimConfig, policy: &PolicyConfig) -> f64 {
    config.default_speed * config.interceptor_speed_multiplier * policy.interceptor_speed_factor
}

/// Qualifying threats in spawn order: live, in Destroy, window open for at
/// least the Destroy processing delay, and not already targeted.
fn collect_candidates(world: &World, policy: &PolicyConfig, now: f64) -> Vec<Candidate> {
    let targeted: HashSet<u32> = world
        .query::<(&Interceptor, &InterceptorState)>()
        .iter()
        .filter(|(_, (_, state))| state.active)
        .map(|(_, (_, state))| state.target_serial)
        .collect();

    let delay = policy.processing_delays.destroy;

    let mut candidates: Vec<Candidate> = world
        .query::<(
            &Threat,
            &ThreatProfile,
            &ThreatStatus,
            &TrackingClock,
            &Position,
            &Velocity,
        )>()
        .iter()
        .filter_map(|(entity, (_, profile, status, clock, pos, vel))| {
            if !status.active || status.destroyed || status.phase != ThreatPhase::Destroy {
                return None;
            }
            let opened = clock.launch_window_opened_at?;
            if now - opened < delay || targeted.contains(&profile.serial) {
                return None;
            }
            Some(Candidate {
                entity,
                serial: profile.serial,
                window_opened_at: opened,
                position: *pos,
                velocity: *vel,
            })
        })
        .collect();

    candidates.sort_by_key(|c| c.serial);
    candidates
}

fn roll_launch(success_rate: f64, rng: &mut ChaCha8Rng) -> bool {
    success_rate >= 1.0 || rng.gen_bool(success_rate.clamp(0.0, 1.0))
}
