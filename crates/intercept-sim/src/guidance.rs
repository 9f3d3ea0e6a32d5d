//! Guidance for interceptors.
//!
//! Provides closing-speed time-to-intercept estimation, lead predicted
//! intercept point calculation, and the per-tick intercept velocity.

use intercept_core::constants::*;
use intercept_core::types::{Position, Velocity};

/// Velocity an interceptor at `own_pos` should fly this tick.
///
/// With no valid target the interceptor holds a fixed forward heading.
/// Otherwise it leads the target when it can out-close it, and pursues the
/// target's current position when it cannot.
pub fn intercept_velocity(
    own_pos: &Position,
    speed: f64,
    target: Option<(&Position, &Velocity)>,
) -> Velocity {
    let Some((target_pos, target_vel)) = target else {
        return Velocity::new(0.0, speed, 0.0);
    };

    let range = own_pos.range_to(target_pos);
    if range < GUIDANCE_MIN_RANGE {
        return Velocity::zero();
    }

    if target_vel.speed() > 0.0 {
        if let Some(tti) = estimate_tti(own_pos, speed, target_pos, target_vel) {
            let pip = predicted_position(target_pos, target_vel, tti);
            if own_pos.range_to(&pip) > 0.0 {
                return pure_pursuit(own_pos, &pip, speed);
            }
        }
    }

    pure_pursuit(own_pos, target_pos, speed)
}

/// Time-to-intercept from the closing speed along the line of sight.
///
/// Closing speed is own speed minus the target's velocity component along
/// the interceptor-to-target line. `None` when it cannot out-close the target.
pub fn estimate_tti(
    own_pos: &Position,
    speed: f64,
    target_pos: &Position,
    target_vel: &Velocity,
) -> Option<f64> {
    let los = target_pos.as_dvec3() - own_pos.as_dvec3();
    let range = los.length();
    if range < GUIDANCE_MIN_RANGE {
        return Some(0.0);
    }
    let closing = speed - target_vel.as_dvec3().dot(los / range);
    (closing > GUIDANCE_MIN_CLOSING_SPEED).then(|| range / closing)
}

/// Where the target will be after `tti` seconds on its current velocity.
pub fn predicted_position(target_pos: &Position, target_vel: &Velocity, tti: f64) -> Position {
    Position::new(
        target_pos.x + target_vel.x * tti,
        target_pos.y + target_vel.y * tti,
        target_pos.z + target_vel.z * tti,
    )
}

/// Pure pursuit: velocity pointing directly at `to` at constant speed.
fn pure_pursuit(from: &Position, to: &Position, speed: f64) -> Velocity {
    let dir = (to.as_dvec3() - from.as_dvec3()).normalize_or_zero();
    Velocity::from(dir * speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stationary_target_direct_pursuit() {
        let own = Position::new(0.0, 0.0, 0.0);
        let target = Position::new(30.0, 40.0, 0.0);
        let v = intercept_velocity(&own, 20.0, Some((&target, &Velocity::zero())));

        assert!((v.speed() - 20.0).abs() < 1e-9);
        assert!((v.x - 12.0).abs() < 1e-9);
        assert!((v.y - 16.0).abs() < 1e-9);
        assert_eq!(v.z, 0.0);
    }

    #[test]
    fn test_invalid_target_holds_heading() {
        let v = intercept_velocity(&Position::new(5.0, 5.0, 5.0), 12.0, None);
        assert_eq!(v, Velocity::new(0.0, 12.0, 0.0));
    }

    #[test]
    fn test_coincident_target_zero_velocity() {
        let own = Position::new(1.0, 1.0, 1.0);
        let target = Position::new(1.0, 1.05, 1.0);
        let v = intercept_velocity(&own, 10.0, Some((&target, &Velocity::new(3.0, 0.0, 0.0))));
        assert_eq!(v, Velocity::zero());
    }

    #[test]
    fn test_lead_ahead_of_crossing_target() {
        // Target 50 north, crossing east.
        let own = Position::new(0.0, 0.0, 0.0);
        let target = Position::new(0.0, 50.0, 0.0);
        let target_vel = Velocity::new(5.0, 0.0, 0.0);
        let v = intercept_velocity(&own, 20.0, Some((&target, &target_vel)));

        assert!(v.x > 0.0, "should lead the target east, got {v:?}");
        assert!((v.speed() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_outrunning_target_falls_back_to_pursuit() {
        // Target flees along the line of sight faster than the interceptor.
        let own = Position::new(0.0, 0.0, 0.0);
        let target = Position::new(10.0, 0.0, 0.0);
        let target_vel = Velocity::new(30.0, 0.0, 0.0);

        assert!(estimate_tti(&own, 20.0, &target, &target_vel).is_none());
        let v = intercept_velocity(&own, 20.0, Some((&target, &target_vel)));
        assert!((v.x - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_tti_head_on() {
        let own = Position::new(0.0, 0.0, 0.0);
        let target = Position::new(0.0, 90.0, 0.0);
        let tti = estimate_tti(&own, 20.0, &target, &Velocity::new(0.0, -10.0, 0.0)).unwrap();
        assert!((tti - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_guided_flight_converges() {
        let mut own = Position::new(0.0, 0.0, 0.0);
        let mut target = Position::new(60.0, 40.0, 20.0);
        let target_vel = Velocity::new(-10.0, 0.0, 0.0);
        let dt = 0.05;
        let mut min_range = f64::MAX;

        for _ in 0..400 {
            let range = own.range_to(&target);
            min_range = min_range.min(range);
            if range < 2.0 {
                break;
            }
            let v = intercept_velocity(&own, 30.0, Some((&target, &target_vel)));
            own.advance(&v, dt);
            target.advance(&target_vel, dt);
        }

        assert!(min_range < 2.0, "min range {min_range:.2}");
    }
}
