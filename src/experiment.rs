//! Multi-run experiment aggregation.
//!
//! Runs of one estimator on one graph are summarized per stat as
//! min/max/avg/stddev (sample standard deviation), run times additionally
//! as p50/p95 percentiles, and the betweenness estimates per vertex as
//! min/max/avg. The summary renders as a single CSV header + row for easy
//! collection across graphs.

use anyhow::{bail, Context, Result};
use centra_engine::ComputationStats;
use hdrhistogram::Histogram;
use serde::Serialize;

/// One run's output, kept verbatim next to the aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub stats: ComputationStats,
    pub betweenness: Vec<f64>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatSummary {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub stddev: f64,
}

impl StatSummary {
    fn of(values: &[f64]) -> Self {
        let count = values.len() as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = values.iter().sum::<f64>() / count;
        let stddev = if values.len() > 1 {
            let variance =
                values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (count - 1.0);
            variance.sqrt()
        } else {
            0.0
        };
        Self {
            min,
            max,
            avg,
            stddev,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Aggregate {
    pub runs: usize,
    pub time: StatSummary,
    pub time_p50: f64,
    pub time_p95: f64,
    pub forward_touched_edges: StatSummary,
    pub backward_touched_edges: StatSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_size: Option<StatSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter: Option<StatSummary>,
    pub timed_out_runs: usize,
    pub betweenness_min: Vec<f64>,
    pub betweenness_max: Vec<f64>,
    pub betweenness_avg: Vec<f64>,
}

pub fn aggregate(records: &[RunRecord]) -> Result<Aggregate> {
    if records.is_empty() {
        bail!("cannot aggregate zero runs");
    }

    let times: Vec<f64> = records.iter().map(|r| r.stats.time).collect();
    let forward: Vec<f64> = records
        .iter()
        .map(|r| r.stats.forward_touched_edges as f64)
        .collect();
    let backward: Vec<f64> = records
        .iter()
        .map(|r| r.stats.backward_touched_edges as f64)
        .collect();

    let mut histogram: Histogram<u64> =
        Histogram::new(3).context("failed to allocate time histogram")?;
    for &time in &times {
        let micros = ((time * 1e6).max(0.0) as u64).max(1);
        histogram
            .record(micros)
            .context("failed to record run time")?;
    }

    let sample_sizes: Vec<f64> = records
        .iter()
        .filter_map(|r| r.stats.sample_size)
        .map(|k| k as f64)
        .collect();
    let diameters: Vec<f64> = records
        .iter()
        .filter_map(|r| r.stats.diameter)
        .map(|d| d as f64)
        .collect();

    let vertex_count = records[0].betweenness.len();
    let mut betweenness_min = vec![f64::INFINITY; vertex_count];
    let mut betweenness_max = vec![f64::NEG_INFINITY; vertex_count];
    let mut betweenness_avg = vec![0.0f64; vertex_count];
    for record in records {
        if record.betweenness.len() != vertex_count {
            bail!("runs disagree on vertex count");
        }
        for (v, &value) in record.betweenness.iter().enumerate() {
            betweenness_min[v] = betweenness_min[v].min(value);
            betweenness_max[v] = betweenness_max[v].max(value);
            betweenness_avg[v] += value / records.len() as f64;
        }
    }

    Ok(Aggregate {
        runs: records.len(),
        time: StatSummary::of(&times),
        time_p50: histogram.value_at_quantile(0.50) as f64 / 1e6,
        time_p95: histogram.value_at_quantile(0.95) as f64 / 1e6,
        forward_touched_edges: StatSummary::of(&forward),
        backward_touched_edges: StatSummary::of(&backward),
        sample_size: (!sample_sizes.is_empty()).then(|| StatSummary::of(&sample_sizes)),
        diameter: (!diameters.is_empty()).then(|| StatSummary::of(&diameters)),
        timed_out_runs: records.iter().filter(|r| r.stats.timed_out).count(),
        betweenness_min,
        betweenness_max,
        betweenness_avg,
    })
}

/// Render the aggregate as one CSV header + row.
pub fn csv(
    aggregate: &Aggregate,
    graph_name: &str,
    epsilon: Option<f64>,
    delta: Option<f64>,
) -> (String, String) {
    let mut header = vec![
        "graph".to_string(),
        "runs".to_string(),
        "epsilon".to_string(),
        "delta".to_string(),
        "timed_out_runs".to_string(),
    ];
    let mut row = vec![
        graph_name.to_string(),
        aggregate.runs.to_string(),
        epsilon.map_or_else(String::new, |e| e.to_string()),
        delta.map_or_else(String::new, |d| d.to_string()),
        aggregate.timed_out_runs.to_string(),
    ];

    let mut push_summary = |name: &str, summary: &StatSummary| {
        for (suffix, value) in [
            ("avg", summary.avg),
            ("min", summary.min),
            ("max", summary.max),
            ("stddev", summary.stddev),
        ] {
            header.push(format!("{name}_{suffix}"));
            row.push(value.to_string());
        }
    };

    push_summary("time", &aggregate.time);
    push_summary("forward_touched_edges", &aggregate.forward_touched_edges);
    push_summary("backward_touched_edges", &aggregate.backward_touched_edges);
    if let Some(sample_size) = &aggregate.sample_size {
        push_summary("sample_size", sample_size);
    }
    if let Some(diameter) = &aggregate.diameter {
        push_summary("diameter", diameter);
    }

    header.push("time_p50".to_string());
    row.push(aggregate.time_p50.to_string());
    header.push("time_p95".to_string());
    row.push(aggregate.time_p95.to_string());

    (header.join(","), row.join(","))
}
