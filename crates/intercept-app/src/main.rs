use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use tracing::info;

use intercept_app::comparison::{Comparison, RunOptions};
use intercept_app::config_file::Settings;
use intercept_app::core::constants::DT;
use intercept_app::core::enums::{MotionPattern, Scenario, ThreatClass};
use intercept_app::{export, logging};

/// Compare the conventional and low-latency interception algorithms on the
/// same seeded threat stream.
#[derive(Parser, Debug)]
#[command(name = "intercept", version, about, long_about = None)]
struct Cli {
    /// JSON configuration file (simulation parameters and algorithm presets)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initial number of threats
    #[arg(short = 'n', long)]
    threats: Option<u32>,

    /// Random seed shared by both engines (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Simulated seconds to run
    #[arg(short, long, default_value_t = 60.0)]
    duration: f64,

    /// Fixed simulated step for headless runs (seconds)
    #[arg(long, default_value_t = DT)]
    dt: f64,

    /// Simulation speed multiplier; only applies with --realtime [default: 1]
    #[arg(long, requires = "realtime")]
    speed: Option<f64>,

    /// Attack scenario: single, wave, saturation, custom
    #[arg(long, default_value = "single")]
    scenario: Scenario,

    /// Threat class: missile, drone
    #[arg(long = "threat-type", default_value = "missile")]
    threat_type: ThreatClass,

    /// Motion pattern for the custom scenario: straight, curved, zigzag, spiral
    #[arg(long, default_value = "straight")]
    pattern: MotionPattern,

    /// Maximum number of concurrent threats
    #[arg(long)]
    max_concurrent: Option<u32>,

    /// Write final metrics as JSON
    #[arg(long, value_name = "FILE")]
    export_json: Option<PathBuf>,

    /// Write final metrics as CSV
    #[arg(long, value_name = "FILE")]
    export_csv: Option<PathBuf>,

    /// Run against the wall clock instead of as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Log level or filter directive (RUST_LOG takes precedence)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    ensure!(
        cli.duration.is_finite() && cli.duration > 0.0,
        "--duration must be positive"
    );
    ensure!(cli.dt.is_finite() && cli.dt > 0.0, "--dt must be positive");
    let speed = cli.speed.unwrap_or(1.0);
    ensure!(speed.is_finite() && speed > 0.0, "--speed must be positive");

    let settings = Settings::load(cli.config.as_deref())?;
    let options = RunOptions {
        threats: cli.threats,
        seed: cli.seed,
        duration_secs: cli.duration,
        dt: cli.dt,
        speed,
        scenario: cli.scenario,
        threat_class: cli.threat_type,
        custom_pattern: cli.pattern,
        max_concurrent_threats: cli.max_concurrent,
        ..RunOptions::default()
    };

    let mut comparison =
        Comparison::new(&settings, &options).context("failed to build simulation engines")?;
    if cli.realtime {
        comparison.run_realtime()?;
    } else {
        comparison.run_fixed();
    }

    let result = comparison.result();
    print!("{result}");

    if let Some(path) = &cli.export_json {
        export::write_json(&result, path)?;
        info!(path = %path.display(), "metrics exported as JSON");
    }
    if let Some(path) = &cli.export_csv {
        export::write_csv_file(&result, path)?;
        info!(path = %path.display(), "metrics exported as CSV");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_requires_realtime() {
        assert!(Cli::try_parse_from(["intercept", "--speed", "2"]).is_err());

        let cli = Cli::try_parse_from(["intercept", "--realtime", "--speed", "2"]).unwrap();
        assert_eq!(cli.speed, Some(2.0));
    }

    #[test]
    fn test_speed_defaults_to_none() {
        let cli = Cli::try_parse_from(["intercept"]).unwrap();
        assert_eq!(cli.speed, None);
        assert!(!cli.realtime);
    }
}
