#[cfg(test)]
mod tests {
    use crate::components::PositionHistory;
    use crate::config::*;
    use crate::enums::*;
    use crate::events::SimEvent;
    use crate::state::StatisticsSnapshot;
    use crate::types::{PhaseTable, Position, SimTime, Velocity};

    #[test]
    fn test_phase_ordering() {
        assert!(ThreatPhase::Tracing < ThreatPhase::Warning);
        assert!(ThreatPhase::Warning < ThreatPhase::Destroy);
        assert_eq!(
            ThreatPhase::Warning.max(ThreatPhase::Tracing),
            ThreatPhase::Warning
        );
        assert_eq!(ThreatPhase::default(), ThreatPhase::Tracing);
    }

    /// The short aliases from older config files still parse.
    #[test]
    fn test_algorithm_aliases() {
        let old: Algorithm = serde_json::from_str("\"old\"").unwrap();
        let new: Algorithm = serde_json::from_str("\"new\"").unwrap();
        assert_eq!(old, Algorithm::Conventional);
        assert_eq!(new, Algorithm::LowLatency);
        assert_eq!(
            serde_json::to_string(&Algorithm::LowLatency).unwrap(),
            "\"low_latency\""
        );
    }

    #[test]
    fn test_enum_from_str() {
        assert_eq!("ZigZag".parse::<MotionPattern>().unwrap(), MotionPattern::Zigzag);
        assert_eq!("drones".parse::<ThreatClass>().unwrap(), ThreatClass::Drone);
        assert_eq!("wave".parse::<Scenario>().unwrap(), Scenario::Wave);

        let err = "loop".parse::<MotionPattern>().unwrap_err();
        assert_eq!(err.value, "loop");
        assert!(err.to_string().contains("straight"));
    }

    #[test]
    fn test_default_config_is_valid() {
        SimConfig::default().validate().unwrap();
        PolicyConfig::conventional().validate().unwrap();
        PolicyConfig::low_latency().validate().unwrap();
    }

    #[test]
    fn test_range_order_rejected() {
        let mut config = SimConfig::default();
        config.ranges.warning_range = 20.0;
        config.ranges.destroy_range = 30.0;
        match config.validate() {
            Err(ConfigError::RangeOrder { outer, inner, .. }) => {
                assert_eq!(outer, "warning_range");
                assert_eq!(inner, "destroy_range");
            }
            other => panic!("expected RangeOrder, got {other:?}"),
        }
    }

    #[test]
    fn test_non_positive_rejected() {
        let mut config = SimConfig::default();
        config.default_speed = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "default_speed",
                ..
            })
        ));

        let mut config = SimConfig::default();
        config.ranges.success_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_policy_validation() {
        let mut policy = PolicyConfig::conventional();
        policy.launch_success_rate = 1.5;
        assert!(matches!(
            policy.validate(),
            Err(ConfigError::NotProbability { .. })
        ));

        let mut policy = PolicyConfig::low_latency();
        policy.max_decisions_per_tick = Some(0);
        assert!(matches!(policy.validate(), Err(ConfigError::Zero { .. })));

        let mut policy = PolicyConfig::low_latency();
        policy.processing_delays.destroy = -0.1;
        assert!(matches!(policy.validate(), Err(ConfigError::Negative { .. })));
    }

    /// Phase ranges fall back to documented defaults when omitted.
    #[test]
    fn test_config_json_defaults() {
        let json = r#"{
            "detection_range": 100.0,
            "success_threshold": 2.0,
            "default_speed": 5.0,
            "interceptor_speed_multiplier": 4.0,
            "default_threat_count": 3,
            "trail_length": 10
        }"#;
        let config: SimConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.ranges.tracing_range, 80.0);
        assert_eq!(config.ranges.warning_range, 50.0);
        assert_eq!(config.ranges.destroy_range, 30.0);
        assert_eq!(config.ranges.defended_radius, 2.0);
        assert_eq!(config.spawn, SpawnConfig::default());
        config.validate().unwrap();
    }

    #[test]
    fn test_config_json_missing_required() {
        let json = r#"{ "detection_range": 100.0, "default_speed": 5.0 }"#;
        assert!(serde_json::from_str::<SimConfig>(json).is_err());
    }

    #[test]
    fn test_policy_json() {
        let json = r#"{
            "algorithm": "old",
            "processing_delays": { "tracing": 0.5, "warning": 0.8, "destroy": 1.2 },
            "max_decisions_per_tick": 1,
            "success_rate": 0.85,
            "interceptor_speed_factor": 1.0,
            "cpu_overhead": 0.45,
            "threat_limit": 15,
            "scan_cost": { "model": "linear", "per_detection_ms": 0.05,
                           "jitter": 0.05, "min_ms": 0.1, "max_ms": 50.0 }
        }"#;
        let policy: PolicyConfig = serde_json::from_str(json).unwrap();
        assert_eq!(policy.algorithm, Algorithm::Conventional);
        assert_eq!(policy.launch_success_rate, 0.85);
        assert!((policy.scan_cost.nominal_cost_ms(10) - 0.5).abs() < 1e-12);
        policy.validate().unwrap();
    }

    #[test]
    fn test_scan_cost_models() {
        let superlinear = PolicyConfig::conventional().scan_cost;
        // 50 * 4^1.5 / 10 = 40
        assert!((superlinear.nominal_cost_ms(4) - 40.0).abs() < 1e-9);
        assert_eq!(superlinear.bounds_ms(), (100.0, 30_000.0));

        let linear = PolicyConfig::low_latency().scan_cost;
        assert!((linear.nominal_cost_ms(100) - 5.0).abs() < 1e-9);
        assert_eq!(linear.nominal_cost_ms(0), 0.0);
    }

    #[test]
    fn test_presets_differ() {
        let old = PolicyConfig::preset(Algorithm::Conventional);
        let new = PolicyConfig::preset(Algorithm::LowLatency);
        assert!(old.processing_delays.destroy > new.processing_delays.destroy);
        assert_eq!(old.max_decisions_per_tick, Some(1));
        assert_eq!(new.max_decisions_per_tick, None);
        assert!(new.interceptor_speed_factor > old.interceptor_speed_factor);
        assert!(new.threat_limit > old.threat_limit);
    }

    #[test]
    fn test_phase_table_access() {
        let mut table = PhaseTable::new(1.0, 2.0, 3.0);
        *table.get_mut(ThreatPhase::Warning) += 10.0;
        assert_eq!(*table.get(ThreatPhase::Warning), 12.0);

        let doubled = table.map(|v| v * 2.0);
        assert_eq!(doubled.destroy, 6.0);

        let phases: Vec<_> = table.iter().map(|(phase, _)| phase).collect();
        assert_eq!(phases, ThreatPhase::ALL.to_vec());
    }

    #[test]
    fn test_position_history_capacity() {
        let mut history = PositionHistory::new(3);
        for i in 0..5 {
            history.push(Position::new(i as f64, 0.0, 0.0));
        }
        assert_eq!(history.positions.len(), 3);
        assert_eq!(history.positions.front().unwrap().x, 2.0);
        assert_eq!(history.positions.back().unwrap().x, 4.0);

        let mut none = PositionHistory::new(0);
        none.push(Position::default());
        assert!(none.positions.is_empty());
    }

    #[test]
    fn test_event_serde() {
        let event = SimEvent::Intercepted {
            serial: 7,
            position: Position::new(1.0, 2.0, 3.0),
            flight_secs: 1.25,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"Intercepted\""));
        let back: SimEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = StatisticsSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: StatisticsSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.threats_spawned, 0);
        assert_eq!(back.success_rate, 0.0);
        assert_eq!(back.algorithm, Algorithm::Conventional);
    }

    /// Verify Position geometry calculations.
    #[test]
    fn test_position_range() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 4.0, 12.0);
        assert!((a.range_to(&b) - 13.0).abs() < 1e-10);
        assert!((a.horizontal_range_to(&b) - 5.0).abs() < 1e-10);
        assert!((b.magnitude() - 13.0).abs() < 1e-10);
    }

    #[test]
    fn test_position_advance() {
        let mut p = Position::new(1.0, 1.0, 1.0);
        p.advance(&Velocity::new(2.0, -4.0, 0.0), 0.5);
        assert_eq!(p, Position::new(2.0, -1.0, 1.0));
    }

    #[test]
    fn test_velocity_speed() {
        let v = Velocity::new(3.0, 4.0, 0.0);
        assert!((v.speed() - 5.0).abs() < 1e-10);
        assert_eq!(Velocity::zero().speed(), 0.0);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..20 {
            time.advance(0.05);
        }
        assert_eq!(time.tick, 20);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }
}
