//! Metrics export: the final statistics of both engines as JSON or CSV.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Local};
use serde::Serialize;

use intercept_sim::core::enums::ThreatPhase;
use intercept_sim::core::state::StatisticsSnapshot;

use crate::comparison::ComparisonResult;

#[derive(Serialize)]
struct MetricsPair<'a> {
    old: &'a StatisticsSnapshot,
    new: &'a StatisticsSnapshot,
}

#[derive(Serialize)]
struct MetricsExport<'a> {
    export_time: String,
    seed: u64,
    metrics: MetricsPair<'a>,
}

/// Pretty JSON document stamped with `export_time`.
pub fn to_json(
    result: &ComparisonResult,
    export_time: DateTime<Local>,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&MetricsExport {
        export_time: export_time.to_rfc3339(),
        seed: result.seed,
        metrics: MetricsPair {
            old: &result.conventional,
            new: &result.low_latency,
        },
    })
}

pub fn write_json(result: &ComparisonResult, path: &Path) -> anyhow::Result<()> {
    let json = to_json(result, Local::now()).context("failed to serialize metrics")?;
    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Side-by-side CSV: one row per metric, old algorithm then new.
pub fn write_csv<W: io::Write>(result: &ComparisonResult, writer: W) -> csv::Result<()> {
    let old = &result.conventional;
    let new = &result.low_latency;
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(["Metric", "Old Algorithm", "New Algorithm"])?;
    let mut row = |label: &str, a: String, b: String| {
        wtr.write_record([label, a.as_str(), b.as_str()])
    };

    row("CPU Usage (%)", fmt(old.cpu_usage), fmt(new.cpu_usage))?;
    row("Success Rate (%)", fmt(old.success_rate), fmt(new.success_rate))?;
    row(
        "Interceptors Launched",
        old.interceptors_launched.to_string(),
        new.interceptors_launched.to_string(),
    )?;
    row(
        "Total Response Time (ms)",
        fmt(old.total_response_time_ms),
        fmt(new.total_response_time_ms),
    )?;
    row(
        "Avg Interception Time (ms)",
        fmt(old.avg_interception_time_ms),
        fmt(new.avg_interception_time_ms),
    )?;

    for phase in ThreatPhase::ALL {
        row(
            &format!("{phase} Response Time (ms)"),
            fmt(*old.response_times_ms.get(phase)),
            fmt(*new.response_times_ms.get(phase)),
        )?;
    }
    for phase in ThreatPhase::ALL {
        row(
            &format!("{phase} Active"),
            old.phase_stats.get(phase).active.to_string(),
            new.phase_stats.get(phase).active.to_string(),
        )?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_csv_file(result: &ComparisonResult, path: &Path) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_csv(result, file).with_context(|| format!("failed to write {}", path.display()))
}

fn fmt(value: f64) -> String {
    format!("{value:.2}")
}
