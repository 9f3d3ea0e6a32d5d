//! Comparison loop: drives one engine per algorithm from a shared seed.
//!
//! Runs either as fast as possible with a fixed simulated step, or in real
//! time through `SimulationEngine::update` at the nominal tick rate.

use std::fmt;
use std::time::{Duration, Instant};

use anyhow::ensure;
use tracing::info;

use intercept_sim::core::config::ConfigError;
use intercept_sim::core::constants::{DT, TICK_RATE};
use intercept_sim::core::enums::{MotionPattern, Scenario, ThreatClass, ThreatPhase};
use intercept_sim::core::state::StatisticsSnapshot;
use intercept_sim::SimulationEngine;

use crate::config_file::Settings;

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How a comparison is run. Knobs apply to both engines alike.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Initial batch size; the configured default when `None`.
    pub threats: Option<u32>,
    /// Random when `None`; the chosen seed is reported either way.
    pub seed: Option<u64>,
    /// Simulated seconds to run.
    pub duration_secs: f64,
    /// Fixed step for headless runs.
    pub dt: f64,
    /// Speed multiplier for `run_realtime`. Headless runs ignore it.
    pub speed: f64,
    pub scenario: Scenario,
    pub threat_class: ThreatClass,
    pub custom_pattern: MotionPattern,
    pub max_concurrent_threats: Option<u32>,
    /// Simulated seconds between progress log lines.
    pub report_interval_secs: f64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            threats: None,
            seed: None,
            duration_secs: 60.0,
            dt: DT,
            speed: 1.0,
            scenario: Scenario::Single,
            threat_class: ThreatClass::Missile,
            custom_pattern: MotionPattern::Straight,
            max_concurrent_threats: None,
            report_interval_secs: 10.0,
        }
    }
}

/// Final statistics of both engines.
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub seed: u64,
    pub conventional: StatisticsSnapshot,
    pub low_latency: StatisticsSnapshot,
}

pub struct Comparison {
    seed: u64,
    options: RunOptions,
    conventional: SimulationEngine,
    low_latency: SimulationEngine,
}

impl Comparison {
    pub fn new(settings: &Settings, options: &RunOptions) -> Result<Self, ConfigError> {
        let mut conventional =
            SimulationEngine::new(settings.simulation.clone(), settings.conventional.clone())?;
        let mut low_latency =
            SimulationEngine::new(settings.simulation.clone(), settings.low_latency.clone())?;
        configure(&mut conventional, options);
        configure(&mut low_latency, options);

        Ok(Self {
            seed: options.seed.unwrap_or_else(rand::random),
            options: options.clone(),
            conventional,
            low_latency,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run headless with the fixed step until the duration is reached.
    pub fn run_fixed(&mut self) {
        self.start();
        let dt = self.options.dt;
        // 5 s at 1/30 s is 150 ticks even when the division lands just above 150.
        let ticks = (self.options.duration_secs / dt - 1e-9).ceil().max(0.0) as u64;
        let mut next_report = self.options.report_interval_secs;

        for _ in 0..ticks {
            self.conventional.advance(dt);
            self.low_latency.advance(dt);
            self.maybe_report(&mut next_report);
        }
    }

    /// Run against the wall clock at the nominal tick rate.
    ///
    /// Fails without running when the speed would freeze simulated time.
    pub fn run_realtime(&mut self) -> anyhow::Result<()> {
        let speed = self.conventional.simulation_speed();
        ensure!(
            speed > 0.0,
            "simulation speed must be positive in real time, got {speed}"
        );
        self.start();
        let mut next_report = self.options.report_interval_secs;
        let mut next_tick_time = Instant::now();

        while self.elapsed() < self.options.duration_secs {
            self.conventional.update();
            self.low_latency.update();
            self.maybe_report(&mut next_report);

            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind; skip ahead instead of catching up.
                next_tick_time = now;
            }
        }
        Ok(())
    }

    pub fn result(&self) -> ComparisonResult {
        ComparisonResult {
            seed: self.seed,
            conventional: self.conventional.statistics(),
            low_latency: self.low_latency.statistics(),
        }
    }

    fn start(&mut self) {
        info!(
            seed = self.seed,
            duration = self.options.duration_secs,
            scenario = ?self.options.scenario,
            class = ?self.options.threat_class,
            "starting comparison"
        );
        self.conventional.start(self.options.threats, Some(self.seed));
        self.low_latency.start(self.options.threats, Some(self.seed));
    }

    fn elapsed(&self) -> f64 {
        self.conventional.time().elapsed_secs
    }

    fn maybe_report(&self, next_report: &mut f64) {
        if self.options.report_interval_secs <= 0.0 || self.elapsed() < *next_report {
            return;
        }
        *next_report += self.options.report_interval_secs;
        let old = self.conventional.statistics();
        let new = self.low_latency.statistics();
        info!(
            elapsed = self.elapsed(),
            old_intercepted = old.threats_intercepted,
            old_missed = old.threats_missed,
            new_intercepted = new.threats_intercepted,
            new_missed = new.threats_missed,
            "progress"
        );
    }
}

fn configure(engine: &mut SimulationEngine, options: &RunOptions) {
    engine.set_simulation_speed(options.speed);
    engine.set_scenario(options.scenario);
    engine.set_threat_class(options.threat_class);
    engine.set_custom_pattern(options.custom_pattern);
    if let Some(max) = options.max_concurrent_threats {
        engine.set_max_concurrent_threats(max);
    }
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (old, new) = (&self.conventional, &self.low_latency);
        writeln!(f, "seed {}  elapsed {:.1} s", self.seed, old.elapsed_secs)?;
        writeln!(
            f,
            "{:<28}{:>14}{:>14}",
            "",
            old.algorithm.label(),
            new.algorithm.label()
        )?;

        let mut line =
            |label: &str, a: String, b: String| writeln!(f, "{label:<28}{a:>14}{b:>14}");
        line(
            "threats spawned",
            old.threats_spawned.to_string(),
            new.threats_spawned.to_string(),
        )?;
        line(
            "threats engaged",
            old.threats_engaged.to_string(),
            new.threats_engaged.to_string(),
        )?;
        line(
            "intercepted",
            old.threats_intercepted.to_string(),
            new.threats_intercepted.to_string(),
        )?;
        line(
            "missed",
            old.threats_missed.to_string(),
            new.threats_missed.to_string(),
        )?;
        line(
            "interceptors launched",
            old.interceptors_launched.to_string(),
            new.interceptors_launched.to_string(),
        )?;
        line(
            "success rate (%)",
            format!("{:.1}", old.success_rate),
            format!("{:.1}", new.success_rate),
        )?;
        for phase in ThreatPhase::ALL {
            line(
                &format!("{} response (ms)", phase.label().to_lowercase()),
                format!("{:.1}", old.response_times_ms.get(phase)),
                format!("{:.1}", new.response_times_ms.get(phase)),
            )?;
        }
        line(
            "total response (ms)",
            format!("{:.1}", old.total_response_time_ms),
            format!("{:.1}", new.total_response_time_ms),
        )?;
        line(
            "avg interception (ms)",
            format!("{:.1}", old.avg_interception_time_ms),
            format!("{:.1}", new.avg_interception_time_ms),
        )?;
        line(
            "cpu usage (%)",
            format!("{:.1}", old.cpu_usage),
            format!("{:.1}", new.cpu_usage),
        )?;
        line(
            "scan time (ms)",
            format!("{:.1}", old.processing_time_per_scan_ms),
            format!("{:.1}", new.processing_time_per_scan_ms),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(duration_secs: f64) -> RunOptions {
        RunOptions {
            seed: Some(99),
            duration_secs,
            ..RunOptions::default()
        }
    }

    #[test]
    fn test_fixed_run_reaches_duration() {
        let mut comparison = Comparison::new(&Settings::default(), &options(5.0)).unwrap();
        comparison.run_fixed();
        let result = comparison.result();

        assert_eq!(result.seed, 99);
        assert!((result.conventional.elapsed_secs - 5.0).abs() < 1e-6);
        assert!((result.low_latency.elapsed_secs - 5.0).abs() < 1e-6);
        assert!(result.conventional.threats_spawned >= 5);
        assert!(result.low_latency.threats_spawned >= 5);
    }

    #[test]
    fn test_fixed_runs_are_reproducible() {
        let run = || {
            let mut comparison = Comparison::new(&Settings::default(), &options(8.0)).unwrap();
            comparison.run_fixed();
            let r = comparison.result();
            serde_json::to_string(&(r.conventional, r.low_latency)).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_random_seed_chosen_when_absent() {
        let opts = RunOptions {
            seed: None,
            ..options(1.0)
        };
        let comparison = Comparison::new(&Settings::default(), &opts).unwrap();
        let result = comparison.result();
        assert_eq!(result.seed, comparison.seed());
    }

    #[test]
    fn test_knobs_applied_to_both_engines() {
        let opts = RunOptions {
            max_concurrent_threats: Some(3),
            threats: Some(1),
            ..options(0.1)
        };
        let mut comparison = Comparison::new(&Settings::default(), &opts).unwrap();
        comparison.run_fixed();
        let result = comparison.result();
        assert_eq!(result.conventional.threats_spawned, 3);
        assert_eq!(result.low_latency.threats_spawned, 3);
    }

    #[test]
    fn test_realtime_run_stops_at_duration() {
        let mut comparison = Comparison::new(&Settings::default(), &options(0.2)).unwrap();
        let started = Instant::now();
        comparison.run_realtime().unwrap();

        assert!(comparison.result().conventional.elapsed_secs >= 0.2);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_realtime_run_rejects_frozen_speed() {
        for speed in [0.0, -2.0] {
            let opts = RunOptions {
                speed,
                ..options(0.2)
            };
            let mut comparison = Comparison::new(&Settings::default(), &opts).unwrap();
            let started = Instant::now();

            assert!(comparison.run_realtime().is_err());
            assert!(started.elapsed() < Duration::from_secs(1));
            assert_eq!(comparison.result().conventional.elapsed_secs, 0.0);
        }
    }

    #[test]
    fn test_summary_lists_both_algorithms() {
        let mut comparison = Comparison::new(&Settings::default(), &options(1.0)).unwrap();
        comparison.run_fixed();
        let summary = comparison.result().to_string();
        assert!(summary.contains("conventional"));
        assert!(summary.contains("low-latency"));
        assert!(summary.contains("success rate (%)"));
    }

    #[test]
    fn test_tick_duration_constant() {
        // 30Hz = 33.333ms per tick
        let expected_nanos = 1_000_000_000u64 / 30;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
