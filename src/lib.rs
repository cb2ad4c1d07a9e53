//! runplot: interactive HTML reports for a finished load-test run.
//!
//! This crate composes the stages from `runplot-core` and `runplot-charts`
//! into the two report pipelines.
//!
//! # Architecture
//!
//! ```text
//! raw logs ──► normalize ──► prepared table ──► aggregate ──► 5 charts ──► log report
//! metrics csv ──► load + round ──────────────────────────────► 1 chart ──► metrics report
//! ```
//!
//! Each pipeline runs to completion or fails as a whole; nothing is retried.

use anyhow::Context;
use runplot_charts::{log_chart, metrics_chart, Report, Theme};
use runplot_core::config::Config;
use runplot_core::{aggregate, metrics, normalizer, table};

pub use runplot_core::config;

/// What one pipeline run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Rows fed into the charts.
    pub rows: usize,
    /// Charts written to the report.
    pub charts: usize,
}

/// Normalize the raw service logs into the prepared table.
pub fn run_normalizer(cfg: &Config) -> anyhow::Result<normalizer::NormalizeStats> {
    normalizer::normalize_file(
        &cfg.paths.raw_logs,
        &cfg.paths.prepared_logs,
        cfg.normalizer.mode,
    )
    .with_context(|| format!("normalizing {}", cfg.paths.raw_logs.display()))
}

/// Chart the prepared log table into the log report.
pub fn run_log_report(cfg: &Config, theme: &Theme) -> anyhow::Result<PipelineSummary> {
    let records = table::load_normalized(&cfg.paths.prepared_logs)
        .with_context(|| format!("loading {}", cfg.paths.prepared_logs.display()))?;
    let fields = aggregate::aggregate_all(&records, &cfg.aggregation)?;

    let mut report = Report::new(&cfg.report.log_title, &cfg.report.plotly_cdn);
    for fs in &fields {
        report.chart(&log_chart(fs, theme));
    }
    report.write_to(&cfg.paths.log_report)?;

    Ok(PipelineSummary {
        rows: records.len(),
        charts: report.len(),
    })
}

/// Normalizer followed by the log report.
pub fn run_log_pipeline(cfg: &Config, theme: &Theme) -> anyhow::Result<PipelineSummary> {
    run_normalizer(cfg)?;
    run_log_report(cfg, theme)
}

/// Chart the metrics CSV into the metrics report.
pub fn run_metrics_pipeline(cfg: &Config, theme: &Theme) -> anyhow::Result<PipelineSummary> {
    let samples = metrics::load_metrics(&cfg.paths.metrics)
        .with_context(|| format!("loading {}", cfg.paths.metrics.display()))?;

    let mut report = Report::new(&cfg.report.metrics_title, &cfg.report.plotly_cdn);
    report.chart(&metrics_chart(&samples, &cfg.report.metrics_title, theme));
    report.write_to(&cfg.paths.metrics_report)?;

    Ok(PipelineSummary {
        rows: samples.len(),
        charts: report.len(),
    })
}

/// Log pipeline, then metrics pipeline. The first failure stops the run.
pub fn run_all(cfg: &Config, theme: &Theme) -> anyhow::Result<()> {
    let logs = run_log_pipeline(cfg, theme)?;
    tracing::info!(rows = logs.rows, charts = logs.charts, "log report done");
    let metrics = run_metrics_pipeline(cfg, theme)?;
    tracing::info!(rows = metrics.rows, charts = metrics.charts, "metrics report done");
    Ok(())
}
