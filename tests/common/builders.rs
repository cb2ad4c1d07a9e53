//! Test builders: ergonomic constructors for raw log lines and loaded
//! records.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::{NaiveDate, NaiveDateTime};
use runplot_core::LogRecord;

// ---------------------------------------------------------------------------
// RawLineBuilder
// ---------------------------------------------------------------------------

/// How a raw line reports its status code.
#[derive(Debug, Clone)]
pub enum Tail {
    /// `... /url - 200`
    Dash(String),
    /// `... /url | Payload: {""status"": ""200""}`, optionally with items.
    Payload { code: String, items: Option<u32> },
}

/// Fluent builder for conforming raw service log lines.
///
/// # Example
///
/// ```rust
/// let line = RawLineBuilder::new("2024-01-15 10:00:00")
///     .level("ERROR")
///     .source("auth-service")
///     .event("POST", "api/login")
///     .payload("401", None)
///     .build();
/// ```
pub struct RawLineBuilder {
    timestamp: String,
    level: String,
    source: String,
    ip: String,
    user_agent: String,
    method: String,
    url: String,
    tail: Tail,
}

impl RawLineBuilder {
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            level: "INFO".to_string(),
            source: "api-gateway".to_string(),
            ip: "10.0.0.1".to_string(),
            user_agent: "k6/0.49.0".to_string(),
            method: "GET".to_string(),
            url: "api/v1/users".to_string(),
            tail: Tail::Dash("200".to_string()),
        }
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = ip.into();
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// `url` is written after a `/`, so pass it without the leading slash.
    pub fn event(mut self, method: impl Into<String>, url: impl Into<String>) -> Self {
        self.method = method.into();
        self.url = url.into();
        self
    }

    pub fn dash(mut self, code: impl Into<String>) -> Self {
        self.tail = Tail::Dash(code.into());
        self
    }

    pub fn payload(mut self, code: impl Into<String>, items: Option<u32>) -> Self {
        self.tail = Tail::Payload {
            code: code.into(),
            items,
        };
        self
    }

    pub fn build(self) -> String {
        let head = format!(
            "{} [{}] ({}) | IP: {} | UA: {} | Event: {} /{}",
            self.timestamp, self.level, self.source, self.ip, self.user_agent, self.method, self.url
        );
        match self.tail {
            Tail::Dash(code) => format!("{head} - {code}"),
            Tail::Payload { code, items: None } => {
                format!(r#""{head} | Payload: {{""status"": ""{code}""}}""#)
            }
            Tail::Payload {
                code,
                items: Some(n),
            } => format!(
                r#""{head} | Payload: {{""status"": ""{code}"", ""data"": {{""items"": {n}}}}}""#
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// `2024-01-15` at `h:m:s`.
pub fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

/// Fluent builder for [`LogRecord`] fixtures.
pub struct RecordBuilder {
    record: LogRecord,
}

impl RecordBuilder {
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self {
            record: LogRecord {
                timestamp,
                level: "INFO".to_string(),
                source: "api-gateway".to_string(),
                method: "GET".to_string(),
                url: "api/v1/users".to_string(),
                code: "200".to_string(),
            },
        }
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.record.level = level.into();
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.record.source = source.into();
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.record.url = url.into();
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.record.code = code.into();
        self
    }

    pub fn build(self) -> LogRecord {
        self.record
    }
}

/// Records whose `url` takes 20 distinct values: `api/hot-0` .. `api/hot-14`
/// occur `10 + i` times each, `api/cold-0` .. `api/cold-4` once each.
pub fn skewed_url_corpus() -> Vec<LogRecord> {
    let mut records = Vec::new();
    let mut second = 0u32;
    let mut next_ts = || {
        let ts = at(10, second / 60 % 60, second % 60);
        second += 7;
        ts
    };
    for i in 0..15 {
        for _ in 0..(10 + i) {
            records.push(RecordBuilder::new(next_ts()).url(format!("api/hot-{i}")).build());
        }
    }
    for i in 0..5 {
        records.push(RecordBuilder::new(next_ts()).url(format!("api/cold-{i}")).build());
    }
    records
}
