//! JSON configuration file.
//!
//! ```json
//! {
//!   "simulation": { "detection_range": 100, "success_threshold": 2, "default_speed": 5, ... },
//!   "algorithms": { "old": { ... }, "new": { ... } }
//! }
//! ```
//!
//! Both sections are optional; whatever is missing falls back to the built-in
//! defaults and presets. A section that is present must be complete.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use intercept_sim::core::config::{PolicyConfig, SimConfig};
use intercept_sim::core::enums::Algorithm;

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    simulation: Option<SimConfig>,
    #[serde(default)]
    algorithms: AlgorithmSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AlgorithmSection {
    #[serde(default, alias = "old")]
    conventional: Option<PolicyConfig>,
    #[serde(default, alias = "new")]
    low_latency: Option<PolicyConfig>,
}

/// Validated configuration for one comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub simulation: SimConfig,
    pub conventional: PolicyConfig,
    pub low_latency: PolicyConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimConfig::default(),
            conventional: PolicyConfig::conventional(),
            low_latency: PolicyConfig::low_latency(),
        }
    }
}

impl Settings {
    /// Read `path`, or use the built-in defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let file: ConfigFile = serde_json::from_str(text)?;
        let defaults = Self::default();

        let mut conventional = file.algorithms.conventional.unwrap_or(defaults.conventional);
        conventional.algorithm = Algorithm::Conventional;
        let mut low_latency = file.algorithms.low_latency.unwrap_or(defaults.low_latency);
        low_latency.algorithm = Algorithm::LowLatency;

        let settings = Self {
            simulation: file.simulation.unwrap_or(defaults.simulation),
            conventional,
            low_latency,
        };
        settings
            .simulation
            .validate()
            .context("simulation section")?;
        settings
            .conventional
            .validate()
            .context("conventional algorithm")?;
        settings
            .low_latency
            .validate()
            .context("low-latency algorithm")?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: &str = r#"{
        "processing_delays": { "tracing": 0.2, "warning": 0.3, "destroy": 0.4 },
        "max_decisions_per_tick": 2,
        "success_rate": 0.9,
        "interceptor_speed_factor": 1.2,
        "cpu_overhead": 0.3,
        "threat_limit": 20,
        "scan_cost": { "model": "linear", "per_detection_ms": 0.1, "jitter": 0.05, "min_ms": 0.1, "max_ms": 50.0 }
    }"#;

    fn simulation_section(detection_range: f64, success_threshold: f64) -> String {
        format!(
            r#"{{ "simulation": {{
                "detection_range": {detection_range},
                "success_threshold": {success_threshold},
                "default_speed": 5.0,
                "interceptor_speed_multiplier": 4.0,
                "default_threat_count": 5,
                "trail_length": 20
            }} }}"#
        )
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_old_new_aliases() {
        let text = format!(r#"{{ "algorithms": {{ "old": {POLICY}, "new": {POLICY} }} }}"#);
        let settings = Settings::from_json(&text).unwrap();

        assert_eq!(settings.conventional.algorithm, Algorithm::Conventional);
        assert_eq!(settings.low_latency.algorithm, Algorithm::LowLatency);
        assert_eq!(settings.conventional.max_decisions_per_tick, Some(2));
        assert!((settings.low_latency.launch_success_rate - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_partial_algorithms_keep_other_preset() {
        let text = format!(r#"{{ "algorithms": {{ "conventional": {POLICY} }} }}"#);
        let settings = Settings::from_json(&text).unwrap();
        assert_eq!(settings.low_latency, PolicyConfig::low_latency());
    }

    #[test]
    fn test_simulation_section() {
        let text = simulation_section(120.0, 1.5);
        let settings = Settings::from_json(&text).unwrap();
        assert_eq!(settings.simulation.ranges.detection_range, 120.0);
        assert_eq!(settings.simulation.ranges.success_threshold, 1.5);
        assert_eq!(settings.simulation.ranges.destroy_range, 30.0);
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let text = r#"{ "simulation": { "detection_range": 120, "success_threshold": 2 } }"#;
        assert!(Settings::from_json(text).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let text = simulation_section(20.0, 2.0);
        let err = Settings::from_json(&text).unwrap_err();
        assert!(format!("{err:#}").contains("simulation section"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Settings::load(Some(Path::new("/nonexistent/intercept.json"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/intercept.json"));
    }
}
