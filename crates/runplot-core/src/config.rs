//! Configuration types for runplot.
//!
//! [`Config::load`] layers an optional user TOML file on top of the embedded
//! defaults. [`Config::defaults`] returns the same defaults without touching
//! the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[paths]
raw_logs       = "enriched_service_logs.csv"
prepared_logs  = "enriched_service_logs_prepared.csv"
metrics        = "load_test_metrics.csv"
log_report     = "log_graphics.html"
metrics_report = "metrics_graphics.html"

[normalizer]
mode = "lenient"

[aggregation]
top_n          = 15
bucket_seconds = 60

[report]
plotly_cdn    = "https://cdn.plot.ly/plotly-2.12.1.min.js"
log_title     = "Logs"
metrics_title = "Performance metrics"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub aggregation: AggregationConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// `[paths]` section. Relative paths resolve against the working directory.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_raw_logs")]
    pub raw_logs: PathBuf,
    #[serde(default = "default_prepared_logs")]
    pub prepared_logs: PathBuf,
    #[serde(default = "default_metrics")]
    pub metrics: PathBuf,
    #[serde(default = "default_log_report")]
    pub log_report: PathBuf,
    #[serde(default = "default_metrics_report")]
    pub metrics_report: PathBuf,
}

fn default_raw_logs() -> PathBuf { PathBuf::from("enriched_service_logs.csv") }
fn default_prepared_logs() -> PathBuf { PathBuf::from("enriched_service_logs_prepared.csv") }
fn default_metrics() -> PathBuf { PathBuf::from("load_test_metrics.csv") }
fn default_log_report() -> PathBuf { PathBuf::from("log_graphics.html") }
fn default_metrics_report() -> PathBuf { PathBuf::from("metrics_graphics.html") }

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_logs: default_raw_logs(),
            prepared_logs: default_prepared_logs(),
            metrics: default_metrics(),
            log_report: default_log_report(),
            metrics_report: default_metrics_report(),
        }
    }
}

/// How the normalizer treats lines that do not have the expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizeMode {
    /// Rewrite every line and pass partial rewrites through.
    #[default]
    Lenient,
    /// Reject the first line outside the log line grammar.
    Strict,
}

/// `[normalizer]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NormalizerConfig {
    #[serde(default)]
    pub mode: NormalizeMode,
}

/// `[aggregation]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AggregationConfig {
    /// How many of the most frequent values of a field are charted.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Bucket width in seconds.
    #[serde(default = "default_bucket_seconds")]
    pub bucket_seconds: i64,
}

fn default_top_n() -> usize { 15 }
fn default_bucket_seconds() -> i64 { 60 }

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            bucket_seconds: default_bucket_seconds(),
        }
    }
}

/// `[report]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Script URL of the Plotly.js runtime referenced by every report.
    #[serde(default = "default_plotly_cdn")]
    pub plotly_cdn: String,
    #[serde(default = "default_log_title")]
    pub log_title: String,
    #[serde(default = "default_metrics_title")]
    pub metrics_title: String,
}

fn default_plotly_cdn() -> String { "https://cdn.plot.ly/plotly-2.12.1.min.js".to_string() }
fn default_log_title() -> String { "Logs".to_string() }
fn default_metrics_title() -> String { "Performance metrics".to_string() }

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            plotly_cdn: default_plotly_cdn(),
            log_title: default_log_title(),
            metrics_title: default_metrics_title(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the built-in defaults, overlaid with `path` when given.
    ///
    /// A path that is given but does not exist is an error.
    pub fn load(path: Option<&Path>) -> crate::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder.build()?.try_deserialize().map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
