//! runplot-charts: Plotly figures and the HTML report shell.
//!
//! Figures are described with the `plotly` crate and embedded inline; the
//! browser renders them with the Plotly.js runtime referenced by [`Report`].

pub mod log_chart;
pub mod metrics_chart;
pub mod report;
pub mod theme;

pub use log_chart::log_chart;
pub use metrics_chart::metrics_chart;
pub use report::Report;
pub use theme::Theme;
