//! Entity spawn factories.
//!
//! Creates threat and interceptor entities with the appropriate component
//! bundles.

use hecs::World;

use intercept_core::components::*;
use intercept_core::enums::*;
use intercept_core::types::{Position, Velocity};
use intercept_threat_ai::motion::straight_velocity;

use crate::guidance;

/// Everything needed to place one threat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    pub position: Position,
    pub aim_point: Position,
    pub speed: f64,
    pub class: ThreatClass,
    pub pattern: MotionPattern,
}

/// Spawn a single threat heading for its aim point.
/// The threat starts undetected; the tracker picks it up once in range.
pub fn spawn_threat(
    world: &mut World,
    serial: u32,
    plan: &SpawnPlan,
    trail_length: usize,
) -> hecs::Entity {
    let base_velocity = straight_velocity(&plan.position, &plan.aim_point, plan.speed);

    let profile = ThreatProfile {
        serial,
        class: plan.class,
        pattern: plan.pattern,
        aim_point: plan.aim_point,
        speed: plan.speed,
        base_velocity,
        pattern_time: 0.0,
    };

    let status = ThreatStatus {
        active: true,
        ..ThreatStatus::default()
    };

    let mut history = PositionHistory::new(trail_length);
    history.push(plan.position);

    world.spawn((
        Threat,
        plan.position,
        base_velocity,
        profile,
        status,
        TrackingClock::default(),
        history,
    ))
}

/// Spawn an interceptor at `origin`, already steering toward its target.
pub fn spawn_interceptor(
    world: &mut World,
    origin: Position,
    target_serial: u32,
    target: Option<(&Position, &Velocity)>,
    speed: f64,
    launched_at: f64,
    trail_length: usize,
) -> hecs::Entity {
    let velocity = guidance::intercept_velocity(&origin, speed, target);

    let state = InterceptorState {
        target_serial,
        speed,
        active: true,
        intercepted: false,
        kill_position: None,
        launched_at,
    };

    let mut history = PositionHistory::new(trail_length);
    history.push(origin);

    world.spawn((Interceptor, origin, velocity, state, history))
}
