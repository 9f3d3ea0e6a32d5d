#[cfg(test)]
mod tests {
    use glam::DVec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use intercept_core::config::RangeConfig;
    use intercept_core::enums::{MotionPattern, Scenario, ThreatClass, ThreatPhase};
    use intercept_core::types::{Position, Velocity};

    use crate::fsm::{classify, evaluate, is_detected, next_phase, phase_progress, TrackContext};
    use crate::motion::{perpendicular_basis, steer, straight_velocity, MotionContext};
    use crate::profiles::{choose_pattern, scenario_pattern};

    fn ranges() -> RangeConfig {
        RangeConfig {
            detection_range: 100.0,
            tracing_range: 80.0,
            warning_range: 50.0,
            destroy_range: 30.0,
            success_threshold: 2.0,
            defended_radius: 2.0,
        }
    }

    fn motion(pattern: MotionPattern, position: Position, pattern_time: f64) -> MotionContext {
        let aim_point = Position::default();
        MotionContext {
            pattern,
            position,
            aim_point,
            speed: 15.0,
            base_velocity: straight_velocity(&position, &aim_point, 15.0),
            pattern_time,
        }
    }

    // ---- Phase FSM ----

    #[test]
    fn test_detection_gate_is_strict() {
        let r = ranges();
        assert!(!is_detected(100.0, &r));
        assert!(is_detected(99.9, &r));
    }

    #[test]
    fn test_classify_by_range() {
        let r = ranges();
        assert_eq!(classify(90.0, &r), ThreatPhase::Tracing);
        assert_eq!(classify(50.0, &r), ThreatPhase::Tracing);
        assert_eq!(classify(49.9, &r), ThreatPhase::Warning);
        assert_eq!(classify(30.0, &r), ThreatPhase::Warning);
        assert_eq!(classify(29.9, &r), ThreatPhase::Destroy);
        assert_eq!(classify(0.0, &r), ThreatPhase::Destroy);
    }

    #[test]
    fn test_phase_never_moves_backward() {
        let r = ranges();
        // Threat turns away after reaching Destroy.
        assert_eq!(
            next_phase(ThreatPhase::Destroy, 90.0, &r),
            ThreatPhase::Destroy
        );
        assert_eq!(
            next_phase(ThreatPhase::Warning, 70.0, &r),
            ThreatPhase::Warning
        );
        // Skipping a phase in one step is allowed.
        assert_eq!(
            next_phase(ThreatPhase::Tracing, 10.0, &r),
            ThreatPhase::Destroy
        );
    }

    #[test]
    fn test_evaluate_reports_change() {
        let r = ranges();
        let update = evaluate(&TrackContext {
            ranges: &r,
            phase: ThreatPhase::Tracing,
            range: 40.0,
        });
        assert_eq!(update.new_phase, ThreatPhase::Warning);
        assert!(update.phase_changed);
        assert!((update.progress - 50.0).abs() < 1e-9);

        let update = evaluate(&TrackContext {
            ranges: &r,
            phase: ThreatPhase::Warning,
            range: 45.0,
        });
        assert!(!update.phase_changed);
    }

    #[test]
    fn test_phase_progress_bands() {
        let r = ranges();
        assert_eq!(phase_progress(ThreatPhase::Tracing, 100.0, &r), 0.0);
        assert!((phase_progress(ThreatPhase::Tracing, 75.0, &r) - 50.0).abs() < 1e-9);
        assert_eq!(phase_progress(ThreatPhase::Tracing, 50.0, &r), 100.0);
        assert_eq!(phase_progress(ThreatPhase::Warning, 50.0, &r), 0.0);
        assert_eq!(phase_progress(ThreatPhase::Warning, 30.0, &r), 100.0);
        assert!((phase_progress(ThreatPhase::Destroy, 16.0, &r) - 50.0).abs() < 1e-9);
        assert_eq!(phase_progress(ThreatPhase::Destroy, 0.5, &r), 100.0);
    }

    #[test]
    fn test_tracing_progress_spans_whole_tracing_band() {
        let r = ranges();
        // Still Tracing between the tracing range and the warning boundary.
        for range in [79.0, 70.0, 60.0, 51.0] {
            assert_eq!(classify(range, &r), ThreatPhase::Tracing);
            let p = phase_progress(ThreatPhase::Tracing, range, &r);
            assert!(p < 100.0, "tracing progress saturated at {range}");
        }
        assert!(
            phase_progress(ThreatPhase::Tracing, 60.0, &r)
                > phase_progress(ThreatPhase::Tracing, 70.0, &r)
        );
    }

    #[test]
    fn test_progress_monotonic_while_closing() {
        let r = ranges();
        for phase in ThreatPhase::ALL {
            let mut last = -1.0;
            let mut range = 110.0;
            while range > 0.0 {
                let p = phase_progress(phase, range, &r);
                assert!((0.0..=100.0).contains(&p));
                assert!(p >= last, "{phase} progress fell at {range}");
                last = p;
                range -= 0.5;
            }
        }
    }

    // ---- Motion ----

    #[test]
    fn test_straight_ignores_pattern_time() {
        let ctx = motion(MotionPattern::Straight, Position::new(60.0, 0.0, 10.0), 3.0);
        assert_eq!(steer(&ctx), ctx.base_velocity);
    }

    #[test]
    fn test_patterns_keep_speed() {
        let start = Position::new(50.0, 40.0, 20.0);
        for pattern in [
            MotionPattern::Curved,
            MotionPattern::Zigzag,
            MotionPattern::Spiral,
        ] {
            for step in 1..40 {
                let t = step as f64 * 0.1;
                let v = steer(&motion(pattern, start, t));
                assert!((v.speed() - 15.0).abs() < 1e-9, "{pattern:?} at {t}");
            }
        }
    }

    #[test]
    fn test_patterns_deviate_but_close_in() {
        let start = Position::new(60.0, 0.0, 0.0);
        for pattern in [
            MotionPattern::Curved,
            MotionPattern::Zigzag,
            MotionPattern::Spiral,
        ] {
            let v = steer(&motion(pattern, start, 0.8));
            let base = Velocity::new(-15.0, 0.0, 0.0);
            assert_ne!(v, base, "{pattern:?} did not deviate");
            // Still heading toward the aim point.
            assert!(v.x < 0.0);
        }
    }

    #[test]
    fn test_zigzag_flips_sides() {
        let start = Position::new(60.0, 0.0, 0.0);
        // Zigzag frequency 2: sin(2t) changes sign between t=0.5 and t=2.0.
        let a = steer(&motion(MotionPattern::Zigzag, start, 0.5));
        let b = steer(&motion(MotionPattern::Zigzag, start, 2.0));
        assert!(a.y * b.y < 0.0);
    }

    #[test]
    fn test_pattern_reverts_at_aim_point() {
        let ctx = motion(MotionPattern::Spiral, Position::new(0.05, 0.0, 0.0), 1.0);
        assert_eq!(steer(&ctx), ctx.base_velocity);
    }

    #[test]
    fn test_perpendicular_basis_orthonormal() {
        for forward in [
            DVec3::new(-1.0, 0.0, 0.0),
            DVec3::new(0.6, -0.8, 0.0),
            DVec3::new(0.3, 0.2, -0.9).normalize(),
        ] {
            let (p1, p2) = perpendicular_basis(forward);
            assert!((p1.length() - 1.0).abs() < 1e-9);
            assert!((p2.length() - 1.0).abs() < 1e-9);
            assert!(p1.dot(forward).abs() < 1e-9);
            assert!(p2.dot(forward).abs() < 1e-9);
            assert!(p1.dot(p2).abs() < 1e-9);
        }
    }

    #[test]
    fn test_perpendicular_basis_vertical_forward() {
        let (p1, p2) = perpendicular_basis(DVec3::new(0.0, 0.0, -1.0));
        assert!(p1.is_finite() && p2.is_finite());
        assert!((p1.length() - 1.0).abs() < 1e-9);
        assert!((p2.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_vertical_dive_steers_without_nan() {
        let ctx = motion(MotionPattern::Curved, Position::new(0.0, 0.0, 40.0), 1.3);
        let v = steer(&ctx);
        assert!(v.x.is_finite() && v.y.is_finite() && v.z.is_finite());
        assert!((v.speed() - 15.0).abs() < 1e-9);
    }

    // ---- Profiles ----

    #[test]
    fn test_scenario_patterns() {
        let custom = MotionPattern::Spiral;
        assert_eq!(scenario_pattern(Scenario::Single, custom), MotionPattern::Straight);
        assert_eq!(scenario_pattern(Scenario::Wave, custom), MotionPattern::Curved);
        assert_eq!(
            scenario_pattern(Scenario::Saturation, custom),
            MotionPattern::Zigzag
        );
        assert_eq!(scenario_pattern(Scenario::Custom, custom), MotionPattern::Spiral);
    }

    #[test]
    fn test_missiles_never_turn_erratic() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            let p = choose_pattern(
                Scenario::Single,
                ThreatClass::Missile,
                MotionPattern::Spiral,
                &mut rng,
            );
            assert_eq!(p, MotionPattern::Straight);
        }
    }

    #[test]
    fn test_drones_sometimes_zigzag() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let zigzags = (0..200)
            .filter(|_| {
                choose_pattern(
                    Scenario::Single,
                    ThreatClass::Drone,
                    MotionPattern::Straight,
                    &mut rng,
                ) == MotionPattern::Zigzag
            })
            .count();
        assert!((50..150).contains(&zigzags), "zigzags {zigzags}");
    }

    #[test]
    fn test_custom_scenario_has_no_erratic_roll() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..50 {
            let p = choose_pattern(
                Scenario::Custom,
                ThreatClass::Drone,
                MotionPattern::Straight,
                &mut rng,
            );
            assert_eq!(p, MotionPattern::Straight);
        }
    }
}
