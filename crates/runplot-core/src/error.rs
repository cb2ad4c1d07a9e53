//! Error type shared by every runplot pipeline stage.
//!
//! All failures are fatal for the run that raised them; nothing here is
//! retried or downgraded to a warning. Callers at the process boundary add
//! context with `anyhow` and exit non-zero.

use std::path::PathBuf;

/// Result alias used throughout `runplot-core`.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Opening, reading or writing a file failed.
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to a caller-supplied stream failed.
    #[error("stream I/O error")]
    Stream(#[from] std::io::Error),

    /// A CSV or pipe-delimited table could not be decoded.
    #[error("failed to decode {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A timestamp column value could not be parsed.
    #[error("{}:{line}: unparseable timestamp {value:?}", path.display())]
    Timestamp {
        path: PathBuf,
        line: u64,
        value: String,
    },

    /// Strict normalizer mode met a line outside the log line grammar.
    #[error("line {line} does not match the service log grammar: {content:?}")]
    MalformedLine { line: u64, content: String },

    /// Bucketing or another aggregation step could not be carried out.
    #[error("aggregation failed: {0}")]
    Aggregation(String),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Error::Csv {
            path: path.into(),
            source,
        }
    }
}
