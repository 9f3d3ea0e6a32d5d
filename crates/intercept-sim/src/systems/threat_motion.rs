//! Threat motion system.
//!
//! Steers each live threat along its motion pattern, integrates position,
//! records the trail, and resolves arrival, escape and leak-through.

use hecs::World;

use intercept_core::components::*;
use intercept_core::config::SimConfig;
use intercept_core::types::{Position, Velocity};
use intercept_threat_ai::motion::{steer, MotionContext};

/// Advance every live threat by `dt` simulated seconds.
pub fn run(world: &mut World, config: &SimConfig, dt: f64) {
    let defended = Position::default();

    for (_entity, (_threat, pos, vel, profile, status, clock, history)) in world.query_mut::<(
        &Threat,
        &mut Position,
        &mut Velocity,
        &mut ThreatProfile,
        &mut ThreatStatus,
        &mut TrackingClock,
        &mut PositionHistory,
    )>() {
        if !status.active || status.destroyed {
            continue;
        }

        profile.pattern_time += dt;
        *vel = steer(&MotionContext {
            pattern: profile.pattern,
            position: *pos,
            aim_point: profile.aim_point,
            speed: profile.speed,
            base_velocity: profile.base_velocity,
            pattern_time: profile.pattern_time,
        });

        pos.advance(vel, dt);
        history.push(*pos);

        if pos.range_to(&profile.aim_point) < config.aim_epsilon {
            status.active = false;
            status.destroyed = true;
        }

        if pos.magnitude() > config.escape_radius {
            status.active = false;
        }

        // Leaked inside the defended radius while engaged.
        if clock.engaged && status.active && pos.range_to(&defended) < config.ranges.defended_radius
        {
            status.active = false;
            status.destroyed = true;
        }

        if status.detected && status.active {
            clock.tracking_secs += dt;
        }
    }
}
