//! Core types for runplot-core.
//!
//! The normalizer and the aggregator agree on the column layout of the
//! prepared log table through [`NormalizedRecord`]; nothing downstream indexes
//! the table by bare position.

use chrono::NaiveDateTime;
use std::fmt;

/// Placeholder substituted for a missing or empty categorical value.
pub const NOT_AVAILABLE: &str = "N/A";

/// One line of the prepared, pipe-delimited log table.
///
/// Columns are positional on disk: `timestamp|level|source|ip|user_agent|method|url|code`,
/// optionally followed by the payload item count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedRecord {
    pub timestamp: String,
    pub level: String,
    pub source: String,
    pub ip: String,
    pub user_agent: String,
    pub method: String,
    pub url: String,
    pub code: String,
    /// Item count carried by `data.items` in the event payload, if any.
    pub items: Option<String>,
}

impl NormalizedRecord {
    /// Number of mandatory columns in a prepared line.
    pub const FIELD_COUNT: usize = 8;

    pub const TIMESTAMP: usize = 0;
    pub const LEVEL: usize = 1;
    pub const SOURCE: usize = 2;
    pub const IP: usize = 3;
    pub const USER_AGENT: usize = 4;
    pub const METHOD: usize = 5;
    pub const URL: usize = 6;
    pub const CODE: usize = 7;
    pub const ITEMS: usize = 8;

    /// Split a prepared line into its columns.
    ///
    /// Returns `None` when the line carries fewer than [`Self::FIELD_COUNT`]
    /// columns, which is what a partially rewritten (malformed) line looks
    /// like. Columns past the item count are ignored.
    pub fn from_line(line: &str) -> Option<Self> {
        let cols: Vec<&str> = line.split('|').collect();
        if cols.len() < Self::FIELD_COUNT {
            return None;
        }
        Some(Self {
            timestamp: cols[Self::TIMESTAMP].to_string(),
            level: cols[Self::LEVEL].to_string(),
            source: cols[Self::SOURCE].to_string(),
            ip: cols[Self::IP].to_string(),
            user_agent: cols[Self::USER_AGENT].to_string(),
            method: cols[Self::METHOD].to_string(),
            url: cols[Self::URL].to_string(),
            code: cols[Self::CODE].to_string(),
            items: cols.get(Self::ITEMS).map(|s| s.to_string()),
        })
    }

    /// Render the record in the prepared-table layout.
    pub fn to_line(&self) -> String {
        let mut line = [
            self.timestamp.as_str(),
            self.level.as_str(),
            self.source.as_str(),
            self.ip.as_str(),
            self.user_agent.as_str(),
            self.method.as_str(),
            self.url.as_str(),
            self.code.as_str(),
        ]
        .join("|");
        if let Some(items) = &self.items {
            line.push('|');
            line.push_str(items);
        }
        line
    }
}

/// A prepared-table row after loading: typed timestamp plus the categorical
/// fields that get charted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: NaiveDateTime,
    pub level: String,
    pub source: String,
    pub method: String,
    pub url: String,
    pub code: String,
}

impl LogRecord {
    /// Value of `field` on this record.
    pub fn get(&self, field: LogField) -> &str {
        match field {
            LogField::Level => &self.level,
            LogField::Source => &self.source,
            LogField::Method => &self.method,
            LogField::Url => &self.url,
            LogField::Code => &self.code,
        }
    }
}

/// Categorical log fields that each get their own chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogField {
    Level,
    Source,
    Method,
    Url,
    Code,
}

impl LogField {
    /// Chart order.
    pub const ALL: [LogField; 5] = [
        LogField::Level,
        LogField::Source,
        LogField::Method,
        LogField::Url,
        LogField::Code,
    ];

    /// Column position of the field in the prepared table.
    pub fn column(self) -> usize {
        match self {
            LogField::Level => NormalizedRecord::LEVEL,
            LogField::Source => NormalizedRecord::SOURCE,
            LogField::Method => NormalizedRecord::METHOD,
            LogField::Url => NormalizedRecord::URL,
            LogField::Code => NormalizedRecord::CODE,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LogField::Level => "level",
            LogField::Source => "source",
            LogField::Method => "method",
            LogField::Url => "url",
            LogField::Code => "code",
        }
    }
}

impl fmt::Display for LogField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-bucket event counts for one retained value of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub value: String,
    /// `(bucket start, count)`, ascending by bucket, only buckets where the
    /// value occurred.
    pub points: Vec<(NaiveDateTime, u64)>,
}

impl Series {
    pub fn total(&self) -> u64 {
        self.points.iter().map(|(_, n)| n).sum()
    }
}

/// Aggregation result for one field: one [`Series`] per retained value, in
/// rank order (most frequent first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSeries {
    pub field: LogField,
    pub series: Vec<Series>,
}

/// One row of the load-test metrics file, display-rounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample {
    pub timestamp: NaiveDateTime,
    pub rps: f64,
    pub cpu_usage: f64,
    pub latency_ms: f64,
    pub errors_per_minute: f64,
}

/// The four charted metric columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Rps,
    CpuUsage,
    LatencyMs,
    ErrorsPerMinute,
}

impl Metric {
    /// Panel order, top to bottom.
    pub const ALL: [Metric; 4] = [
        Metric::Rps,
        Metric::CpuUsage,
        Metric::LatencyMs,
        Metric::ErrorsPerMinute,
    ];

    /// CSV column name.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Rps => "rps",
            Metric::CpuUsage => "cpu_usage",
            Metric::LatencyMs => "latency_ms",
            Metric::ErrorsPerMinute => "errors_per_minute",
        }
    }

    pub fn value(self, sample: &MetricSample) -> f64 {
        match self {
            Metric::Rps => sample.rps,
            Metric::CpuUsage => sample.cpu_usage,
            Metric::LatencyMs => sample.latency_ms,
            Metric::ErrorsPerMinute => sample.errors_per_minute,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
