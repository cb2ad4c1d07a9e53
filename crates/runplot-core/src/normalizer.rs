//! Normalizer: rewrites raw service log lines into the prepared,
//! pipe-delimited table consumed by [`crate::table`].
//!
//! Two strategies share one output layout ([`NormalizedRecord`]):
//!
//! - [`rewrite_line`] applies a fixed, ordered table of literal substitutions.
//!   It never fails; a line of unexpected shape comes out partially rewritten
//!   with misaligned columns. This is the [`NormalizeMode::Lenient`] path.
//! - [`LineGrammar`] matches the line against named capture groups and builds
//!   the record field by field. A line outside the grammar is an error. This
//!   is the [`NormalizeMode::Strict`] path.
//!
//! For a conforming line whose URL starts with `a` both paths produce the
//! same output.

use crate::{config::NormalizeMode, Error, NormalizedRecord, Result};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;

/// Ordered `(pattern, replacement)` pairs. Later entries rely on earlier ones
/// having fired, so the order is part of the format.
pub const SUBSTITUTIONS: [(&str, &str); 12] = [
    (" [", "|"),
    ("] (", "|"),
    (") | IP: ", "|"),
    (" | UA: ", "|"),
    (" | Event: ", "|"),
    (" /a", "|a"),
    (" - ", "|"),
    (" | Payload: {\"\"status\"\": \"\"", "|"),
    ("\"\", \"\"", "|"),
    ("data\"\": {\"\"items\"\": ", ""),
    ("}", ""),
    ("\"", ""),
];

/// Apply [`SUBSTITUTIONS`] to one raw line, in order.
pub fn rewrite_line(line: &str) -> String {
    SUBSTITUTIONS
        .iter()
        .fold(line.to_string(), |acc, (from, to)| acc.replace(from, to))
}

// ---------------------------------------------------------------------------
// Grammar
// ---------------------------------------------------------------------------

const LINE_PATTERN: &str = concat!(
    r#"^"?(?P<timestamp>[^\[|]+?) \[(?P<level>[^\]|]*)\] \((?P<source>[^)|]*)\)"#,
    r#" \| IP: (?P<ip>[^|]*?) \| UA: (?P<user_agent>[^|]*?)"#,
    r#" \| Event: (?P<method>[^\s|]+) /(?P<url>[^\s|"]*)"#,
    r#"(?: - (?P<plain_code>[^\s|"]+)"#,
    r#"| \| Payload: \{""status"": ""(?P<code>[^"|]*)""(?:, ""data"": \{""items"": (?P<items>[^}|"]*)\})?\})"#,
    r#""?$"#,
);

/// Named-capture grammar of a raw service log line:
///
/// ```text
/// <timestamp> [<level>] (<source>) | IP: <ip> | UA: <ua> | Event: <method> /<url> - <code>
/// <timestamp> [<level>] (<source>) | IP: <ip> | UA: <ua> | Event: <method> /<url> | Payload: {""status"": ""<code>"", ""data"": {""items"": <n>}}
/// ```
///
/// The whole line may be wrapped in CSV quotes; the `data` part is optional.
#[derive(Debug, Clone)]
pub struct LineGrammar {
    re: Regex,
}

impl LineGrammar {
    /// Shared, lazily compiled instance.
    pub fn get() -> &'static LineGrammar {
        static GRAMMAR: OnceLock<LineGrammar> = OnceLock::new();
        GRAMMAR.get_or_init(|| LineGrammar {
            re: Regex::new(LINE_PATTERN).expect("log line grammar must compile"),
        })
    }

    /// Extract a record from `line`, or `None` if the line is outside the
    /// grammar.
    pub fn parse(&self, line: &str) -> Option<NormalizedRecord> {
        let caps = self.re.captures(line)?;
        let text = |name: &str| caps.name(name).map_or("", |m| m.as_str()).to_string();
        let code = caps
            .name("code")
            .or_else(|| caps.name("plain_code"))
            .map_or("", |m| m.as_str())
            .to_string();
        Some(NormalizedRecord {
            timestamp: text("timestamp"),
            level: text("level"),
            source: text("source"),
            ip: text("ip"),
            user_agent: text("user_agent"),
            method: text("method"),
            url: text("url"),
            code,
            items: caps.name("items").map(|m| m.as_str().to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Streaming driver
// ---------------------------------------------------------------------------

/// Line counts from one normalizer run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Data lines read, header excluded.
    pub lines_read: u64,
    pub lines_written: u64,
    /// Lenient mode only: lines that came out with fewer than
    /// [`NormalizedRecord::FIELD_COUNT`] columns.
    pub misaligned: u64,
}

/// Normalize `input` into `output` one line at a time.
///
/// The first input line is a header and is dropped. Every other line yields
/// exactly one output line.
pub fn normalize<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    mode: NormalizeMode,
) -> Result<NormalizeStats> {
    let grammar = LineGrammar::get();
    let mut stats = NormalizeStats::default();

    for (idx, line) in input.lines().enumerate().skip(1) {
        let line = line?;
        stats.lines_read += 1;

        let prepared = match mode {
            NormalizeMode::Lenient => {
                let rewritten = rewrite_line(&line);
                if NormalizedRecord::from_line(&rewritten).is_none() {
                    stats.misaligned += 1;
                    tracing::debug!(line = idx + 1, "misaligned record: {rewritten:?}");
                }
                rewritten
            }
            NormalizeMode::Strict => match grammar.parse(&line) {
                Some(record) => record.to_line(),
                None => {
                    return Err(Error::MalformedLine {
                        line: idx as u64 + 1,
                        content: line,
                    })
                }
            },
        };

        output.write_all(prepared.as_bytes())?;
        output.write_all(b"\n")?;
        stats.lines_written += 1;
    }

    output.flush()?;
    Ok(stats)
}

/// Normalize the file at `input` into a freshly created (or truncated) file at
/// `output`.
pub fn normalize_file(input: &Path, output: &Path, mode: NormalizeMode) -> Result<NormalizeStats> {
    let reader = BufReader::new(File::open(input).map_err(|e| Error::io(input, e))?);
    let writer = BufWriter::new(File::create(output).map_err(|e| Error::io(output, e))?);

    tracing::info!(input = %input.display(), output = %output.display(), ?mode, "normalizing service logs");
    let stats = normalize(reader, writer, mode)?;
    tracing::info!(
        lines = stats.lines_written,
        misaligned = stats.misaligned,
        "normalized service logs"
    );
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
