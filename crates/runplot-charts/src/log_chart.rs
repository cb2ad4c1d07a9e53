//! Per-field event-count line charts.

use crate::theme::{LogChartStyle, Theme, ZoomPreset, ZoomStep};
use plotly::common::{Mode, Title};
use plotly::layout::{
    Axis, HoverMode, Legend, Margin, RangeSelector, RangeSlider, SelectorButton, SelectorStep,
    StepMode,
};
use plotly::{Layout, Plot, Scatter};
use runplot_core::FieldSeries;

/// Timestamp layout of x values handed to Plotly.js.
pub const X_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Build the chart for one aggregated field: one line per retained value.
pub fn log_chart(fs: &FieldSeries, theme: &Theme) -> Plot {
    let style = &theme.log_chart;
    let mut plot = Plot::new();

    for series in &fs.series {
        let (x, y): (Vec<String>, Vec<u64>) = series
            .points
            .iter()
            .map(|(bucket, count)| (bucket.format(X_FORMAT).to_string(), *count))
            .unzip();
        let trace = Scatter::new(x, y)
            .mode(Mode::Lines)
            .name(&series.value)
            .hover_template(&style.hover_template);
        plot.add_trace(trace);
    }

    plot.set_layout(layout(fs.field.name(), style));
    plot
}

fn layout(field: &str, style: &LogChartStyle) -> Layout {
    Layout::new()
        .hover_mode(HoverMode::XUnified)
        .legend(Legend::new().title(Title::new(field)))
        .width(style.width)
        .height(style.height)
        .margin(Margin::new().top(40).bottom(20).left(20).right(20))
        .x_axis(
            Axis::new()
                .title(Title::new(&style.x_title))
                .tick_format(&style.tick_format)
                .range_slider(RangeSlider::new().visible(true))
                .range_selector(RangeSelector::new().buttons(zoom_buttons(&style.zoom))),
        )
        .y_axis(Axis::new().title(Title::new(&style.y_title)))
}

fn zoom_buttons(presets: &[ZoomPreset]) -> Vec<SelectorButton> {
    presets
        .iter()
        .map(|preset| {
            let mut button = SelectorButton::new()
                .label(&preset.label)
                .step(selector_step(preset.step));
            if let Some(count) = preset.count {
                button = button.count(count).step_mode(StepMode::Backward);
            }
            button
        })
        .collect()
}

fn selector_step(step: ZoomStep) -> SelectorStep {
    match step {
        ZoomStep::Minute => SelectorStep::Minute,
        ZoomStep::Hour => SelectorStep::Hour,
        ZoomStep::Day => SelectorStep::Day,
        ZoomStep::Month => SelectorStep::Month,
        ZoomStep::All => SelectorStep::All,
    }
}
