//! Top-N filtering and time bucketing of loaded log records.
//!
//! Every field is aggregated from the full record slice: the retained value
//! set of one field never narrows the rows seen by another.

use crate::{config::AggregationConfig, Error, FieldSeries, LogField, LogRecord, Result, Series};
use chrono::{DurationRound, NaiveDateTime, TimeDelta};
use std::collections::{BTreeMap, HashMap};

/// The `n` most frequent distinct values of `field`, most frequent first.
///
/// Equal counts keep first-seen order.
pub fn top_values(records: &[LogRecord], field: LogField, n: usize) -> Vec<String> {
    // value -> (count, first index)
    let mut counts: HashMap<&str, (u64, usize)> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        counts.entry(record.get(field)).or_insert((0, idx)).0 += 1;
    }

    let mut ranked: Vec<(&str, u64, usize)> = counts
        .into_iter()
        .map(|(value, (count, first))| (value, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(n);
    ranked.into_iter().map(|(value, _, _)| value.to_string()).collect()
}

/// Bucket width from a number of seconds.
pub fn bucket_width(seconds: i64) -> Result<TimeDelta> {
    match TimeDelta::try_seconds(seconds) {
        Some(width) if seconds > 0 => Ok(width),
        _ => Err(Error::Aggregation(format!(
            "bucket width must be a positive number of seconds, got {seconds}"
        ))),
    }
}

/// Start of the left-closed bucket containing `ts`. Buckets are aligned to
/// multiples of `width` since the Unix epoch, so one-minute buckets start on
/// minute boundaries.
pub fn bucket_start(ts: NaiveDateTime, width: TimeDelta) -> Result<NaiveDateTime> {
    ts.duration_trunc(width)
        .map_err(|e| Error::Aggregation(format!("cannot bucket {ts}: {e}")))
}

/// Count events per bucket for each of the top values of `field`.
pub fn aggregate_field(
    records: &[LogRecord],
    field: LogField,
    cfg: &AggregationConfig,
) -> Result<FieldSeries> {
    let width = bucket_width(cfg.bucket_seconds)?;
    let retained = top_values(records, field, cfg.top_n);
    let rank: HashMap<&str, usize> = retained
        .iter()
        .enumerate()
        .map(|(i, v)| (v.as_str(), i))
        .collect();

    let mut buckets: Vec<BTreeMap<NaiveDateTime, u64>> = vec![BTreeMap::new(); retained.len()];
    let mut kept = 0usize;
    for record in records {
        let Some(&i) = rank.get(record.get(field)) else {
            continue;
        };
        *buckets[i].entry(bucket_start(record.timestamp, width)?).or_insert(0) += 1;
        kept += 1;
    }

    tracing::debug!(
        %field,
        values = retained.len(),
        rows = kept,
        dropped = records.len() - kept,
        "aggregated field"
    );

    let series = retained
        .into_iter()
        .zip(buckets)
        .map(|(value, points)| Series {
            value,
            points: points.into_iter().collect(),
        })
        .collect();
    Ok(FieldSeries { field, series })
}

/// [`aggregate_field`] for every field in [`LogField::ALL`] order.
pub fn aggregate_all(records: &[LogRecord], cfg: &AggregationConfig) -> Result<Vec<FieldSeries>> {
    LogField::ALL
        .iter()
        .map(|&field| aggregate_field(records, field, cfg))
        .collect()
}
