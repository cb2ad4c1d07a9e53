//! runplot-core: data side of the runplot reporting pipeline.
//!
//! # Architecture
//!
//! ```text
//! raw logs ──► normalizer ──► prepared table ──► table ──► aggregate ──► (charts)
//! metrics csv ──────────────────────────────────► metrics ────────────► (charts)
//! ```
//!
//! Every stage is a synchronous batch transform. The log side hands off
//! through a file on disk; the two sides share no state.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod metrics;
pub mod normalizer;
pub mod table;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    FieldSeries, LogField, LogRecord, Metric, MetricSample, NormalizedRecord, Series,
    NOT_AVAILABLE,
};
