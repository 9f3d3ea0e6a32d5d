//! Motion-pattern steering.
//!
//! Each tick a threat re-aims at its aim point and, for non-straight
//! patterns, blends a lateral offset into the unit forward direction.

use glam::DVec3;
use intercept_core::constants::{PATTERN_MIN_AIM_DISTANCE, PERPENDICULAR_MIN_LENGTH};
use intercept_core::enums::MotionPattern;
use intercept_core::types::{Position, Velocity};

use crate::profiles::pattern_profile;

/// Input to the steering function for a single threat.
pub struct MotionContext {
    pub pattern: MotionPattern,
    pub position: Position,
    pub aim_point: Position,
    pub speed: f64,
    pub base_velocity: Velocity,
    /// Pattern time including the current step.
    pub pattern_time: f64,
}

/// Velocity for this tick.
pub fn steer(ctx: &MotionContext) -> Velocity {
    let Some(profile) = pattern_profile(ctx.pattern) else {
        return ctx.base_velocity;
    };

    let to_aim = ctx.aim_point.as_dvec3() - ctx.position.as_dvec3();
    let distance = to_aim.length();
    if distance <= PATTERN_MIN_AIM_DISTANCE {
        return ctx.base_velocity;
    }
    let forward = to_aim / distance;
    let (p1, p2) = perpendicular_basis(forward);
    let phase = ctx.pattern_time * profile.frequency;

    let offset = match ctx.pattern {
        MotionPattern::Curved => p1 * (phase.sin() * profile.amplitude),
        MotionPattern::Zigzag => p1 * (sign(phase.sin()) * profile.amplitude),
        MotionPattern::Spiral => (p1 * phase.cos() + p2 * phase.sin()) * profile.amplitude,
        MotionPattern::Straight => DVec3::ZERO,
    };

    let dir = (forward + offset * profile.blend).normalize_or_zero();
    if dir == DVec3::ZERO {
        return ctx.base_velocity;
    }
    Velocity::from(dir * ctx.speed)
}

/// Two unit vectors orthogonal to `forward` (and to each other).
///
/// The first is `forward x up`; when `forward` is nearly vertical that
/// product is too short and `forward x X` is used instead.
pub fn perpendicular_basis(forward: DVec3) -> (DVec3, DVec3) {
    let mut p1 = forward.cross(DVec3::Z);
    if p1.length() < PERPENDICULAR_MIN_LENGTH {
        p1 = forward.cross(DVec3::X);
    }
    let p1 = p1.normalize_or_zero();
    let p2 = forward.cross(p1).normalize_or_zero();
    (p1, p2)
}

/// Straight-line velocity from `from` toward `to` at `speed`; zero when they coincide.
pub fn straight_velocity(from: &Position, to: &Position, speed: f64) -> Velocity {
    let dir = (to.as_dvec3() - from.as_dvec3()).normalize_or_zero();
    Velocity::from(dir * speed)
}

/// Sign with `sign(0) == 0`.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
