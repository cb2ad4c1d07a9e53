//! Stacked load-test metrics chart: one panel per metric, one shared time axis.

use crate::log_chart::X_FORMAT;
use crate::theme::Theme;
use plotly::common::{Line, Mode, Title};
use plotly::layout::{Axis, HoverMode};
use plotly::{Layout, Plot, Scatter};
use runplot_core::MetricSample;

/// `[bottom, top]` fractions of the plot height for `n` stacked panels,
/// top panel first.
pub fn panel_domains(n: usize, spacing: f64) -> Vec<[f64; 2]> {
    if n == 0 {
        return Vec::new();
    }
    let height = (1.0 - spacing * (n - 1) as f64) / n as f64;
    (0..n)
        .map(|i| {
            let top = 1.0 - i as f64 * (height + spacing);
            [(top - height).max(0.0), top]
        })
        .collect()
}

fn y_axis_ref(panel: usize) -> String {
    match panel {
        0 => "y".to_string(),
        n => format!("y{}", n + 1),
    }
}

/// Build the metrics chart titled `title`.
///
/// Values are plotted as stored in `samples`, which the loader has already
/// rounded for display.
pub fn metrics_chart(samples: &[MetricSample], title: &str, theme: &Theme) -> Plot {
    let style = &theme.metrics_chart;
    let x: Vec<String> = samples
        .iter()
        .map(|s| s.timestamp.format(X_FORMAT).to_string())
        .collect();

    let mut plot = Plot::new();
    for (i, panel) in style.panels.iter().enumerate() {
        let y: Vec<f64> = samples.iter().map(|s| panel.metric.value(s)).collect();
        let trace = Scatter::new(x.clone(), y)
            .mode(Mode::Lines)
            .name(panel.metric.column())
            .line(Line::new().color(panel.color.clone()).width(style.line_width))
            .y_axis(&y_axis_ref(i));
        plot.add_trace(trace);
    }

    let domains = panel_domains(style.panels.len(), style.vertical_spacing);
    let mut layout = Layout::new()
        .title(Title::new(title))
        .height(style.height)
        .show_legend(false)
        .hover_mode(HoverMode::XUnified)
        // Time ticks go under the bottom panel.
        .x_axis(
            Axis::new()
                .anchor(&y_axis_ref(style.panels.len().saturating_sub(1)))
                .tick_format(&style.tick_format),
        );

    for (i, (panel, domain)) in style.panels.iter().zip(&domains).enumerate() {
        let axis = Axis::new()
            .anchor("x")
            .domain(domain)
            .title(Title::new(&panel.title));
        layout = match i {
            0 => layout.y_axis(axis),
            1 => layout.y_axis2(axis),
            2 => layout.y_axis3(axis),
            _ => layout.y_axis4(axis),
        };
    }

    plot.set_layout(layout);
    plot
}
