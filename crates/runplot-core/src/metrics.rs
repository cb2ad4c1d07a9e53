//! Loader for the load-test metrics CSV.

use crate::{Error, MetricSample, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// The only timestamp layout accepted in the metrics file.
pub const METRICS_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Deserialize)]
struct MetricRow {
    timestamp: String,
    rps: f64,
    cpu_usage: f64,
    latency_ms: f64,
    errors_per_minute: f64,
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn load_metrics(path: &Path) -> Result<Vec<MetricSample>> {
    let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
    let samples = read_metrics(file, path)?;
    tracing::info!(path = %path.display(), samples = samples.len(), "loaded metrics");
    Ok(samples)
}

/// Read metric samples from `reader`; `origin` only labels errors.
///
/// Columns are matched by header name and extra columns are ignored.
pub fn read_metrics<R: Read>(reader: R, origin: &Path) -> Result<Vec<MetricSample>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers().map_err(|e| Error::csv(origin, e))?.clone();

    let mut samples = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| Error::csv(origin, e))?;
        let row: MetricRow = record
            .deserialize(Some(&headers))
            .map_err(|e| Error::csv(origin, e))?;
        let timestamp = NaiveDateTime::parse_from_str(&row.timestamp, METRICS_TIMESTAMP_FORMAT)
            .map_err(|_| Error::Timestamp {
                path: origin.to_path_buf(),
                line: record.position().map_or(0, |p| p.line()),
                value: row.timestamp.clone(),
            })?;
        samples.push(MetricSample {
            timestamp,
            rps: round2(row.rps),
            cpu_usage: round2(row.cpu_usage),
            latency_ms: round2(row.latency_ms),
            errors_per_minute: round2(row.errors_per_minute),
        });
    }
    Ok(samples)
}
