//! Loader for the prepared, pipe-delimited log table.

use crate::{Error, LogField, LogRecord, NormalizedRecord, Result, NOT_AVAILABLE};
use chrono::{DateTime, NaiveDateTime};
use std::io::Read;
use std::path::Path;

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a prepared-table timestamp.
///
/// Accepts `YYYY-MM-DD HH:MM:SS`, the `T`-separated form (both with optional
/// fractional seconds) and RFC 3339. Offsets are dropped after conversion to
/// UTC.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.naive_utc()))
}

/// Load every row of the prepared table at `path`.
///
/// Any unparseable timestamp fails the whole load.
pub fn load_normalized(path: &Path) -> Result<Vec<LogRecord>> {
    let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
    let records = read_normalized(file, path)?;
    tracing::info!(path = %path.display(), rows = records.len(), "loaded prepared log table");
    Ok(records)
}

/// Read prepared-table rows from `reader`; `origin` only labels errors.
pub fn read_normalized<R: Read>(reader: R, origin: &Path) -> Result<Vec<LogRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row.map_err(|e| Error::csv(origin, e))?;
        let line = row.position().map_or(0, |p| p.line());

        let raw_ts = row.get(NormalizedRecord::TIMESTAMP).unwrap_or_default();
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| Error::Timestamp {
            path: origin.to_path_buf(),
            line,
            value: raw_ts.to_string(),
        })?;

        let text = |field: LogField| match row.get(field.column()).map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => NOT_AVAILABLE.to_string(),
        };

        records.push(LogRecord {
            timestamp,
            level: text(LogField::Level),
            source: text(LogField::Source),
            method: text(LogField::Method),
            url: text(LogField::Url),
            code: text(LogField::Code),
        });
    }
    Ok(records)
}
