//! Chart theme for runplot reports.
//!
//! Themes are TOML documents. The default theme is embedded in the binary via
//! [`include_str!`] so reports render without any files on disk. Call
//! [`Theme::load_default`] once and pass the result to the chart builders.

use anyhow::{anyhow, bail};
use config::{Config, File, FileFormat};
use runplot_core::Metric;
use serde::Deserialize;
use std::collections::HashMap;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawZoom {
    count: Option<usize>,
    label: String,
    step: ZoomStep,
}

#[derive(Debug, Deserialize)]
struct RawLogChart {
    width: usize,
    height: usize,
    x_title: String,
    y_title: String,
    tick_format: String,
    hover_template: String,
    #[serde(default)]
    zoom: Vec<RawZoom>,
}

#[derive(Debug, Deserialize)]
struct RawPanel {
    title: String,
    color: String,
}

#[derive(Debug, Deserialize)]
struct RawMetricsChart {
    height: usize,
    vertical_spacing: f64,
    line_width: f64,
    tick_format: String,
    panels: HashMap<String, RawPanel>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    log_chart: RawLogChart,
    metrics_chart: RawMetricsChart,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Unit of a range-selector zoom preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomStep {
    Minute,
    Hour,
    Day,
    Month,
    All,
}

/// A range-selector button on the log charts' time axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoomPreset {
    /// Number of `step` units to show, counting back from the last point.
    /// `None` for [`ZoomStep::All`].
    pub count: Option<usize>,
    pub label: String,
    pub step: ZoomStep,
}

/// Layout of one per-field log chart.
#[derive(Debug, Clone)]
pub struct LogChartStyle {
    pub width: usize,
    pub height: usize,
    pub x_title: String,
    pub y_title: String,
    pub tick_format: String,
    pub hover_template: String,
    pub zoom: Vec<ZoomPreset>,
}

/// One panel of the metrics chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelStyle {
    pub metric: Metric,
    pub title: String,
    /// CSS colour understood by Plotly.js.
    pub color: String,
}

/// Layout of the stacked metrics chart.
#[derive(Debug, Clone)]
pub struct MetricsChartStyle {
    pub height: usize,
    /// Gap between panels as a fraction of the plot height.
    pub vertical_spacing: f64,
    pub line_width: f64,
    pub tick_format: String,
    /// In [`Metric::ALL`] order.
    pub panels: Vec<PanelStyle>,
}

/// Report chart theme.
#[derive(Debug, Clone)]
pub struct Theme {
    pub log_chart: LogChartStyle,
    pub metrics_chart: MetricsChartStyle,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Parse a theme from a TOML string.
    ///
    /// Every metric panel must be present and carry a valid colour. Unknown
    /// keys are ignored.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        let RawTheme {
            log_chart,
            metrics_chart,
        } = raw;
        let RawMetricsChart {
            height,
            vertical_spacing,
            line_width,
            tick_format,
            panels: mut raw_panels,
        } = metrics_chart;

        if !(0.0..1.0).contains(&vertical_spacing) {
            bail!("vertical_spacing must be in [0, 1), got {vertical_spacing}");
        }

        let panels = Metric::ALL
            .iter()
            .map(|&metric| {
                let panel = raw_panels
                    .remove(metric.column())
                    .ok_or_else(|| anyhow!("theme has no panel for metric {metric}"))?;
                let color = parse_color(&panel.color).ok_or_else(|| {
                    anyhow!("panel {metric}: unsupported colour {:?}", panel.color)
                })?;
                Ok(PanelStyle {
                    metric,
                    title: panel.title,
                    color,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let zoom = log_chart
            .zoom
            .into_iter()
            .map(|z| ZoomPreset {
                count: z.count,
                label: z.label,
                step: z.step,
            })
            .collect();

        Ok(Self {
            log_chart: LogChartStyle {
                width: log_chart.width,
                height: log_chart.height,
                x_title: log_chart.x_title,
                y_title: log_chart.y_title,
                tick_format: log_chart.tick_format,
                hover_template: log_chart.hover_template,
                zoom,
            },
            metrics_chart: MetricsChartStyle {
                height,
                vertical_spacing,
                line_width,
                tick_format,
                panels,
            },
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load_default()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Normalise a colour for Plotly.js.
///
/// Accepts a small set of CSS colour names (case-insensitive) and hex RGB
/// `#rrggbb`.
fn parse_color(s: &str) -> Option<String> {
    const NAMED: &[&str] = &[
        "black", "blue", "red", "green", "orange", "purple", "gray", "grey", "brown", "teal",
        "navy", "crimson", "darkgreen", "goldenrod", "steelblue",
    ];
    let s = s.trim().to_ascii_lowercase();
    let is_hex = s.len() == 7 && s.starts_with('#') && s[1..].chars().all(|c| c.is_ascii_hexdigit());
    (is_hex || NAMED.contains(&s.as_str())).then_some(s)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
