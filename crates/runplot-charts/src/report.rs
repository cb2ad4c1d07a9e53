//! Static HTML report shell around one or more Plotly charts.
//!
//! The Plotly.js runtime is referenced from a CDN exactly once, ahead of the
//! first chart; the charts themselves are inline `<div>` + `<script>` blocks.

use anyhow::Context;
use plotly::Plot;
use std::path::Path;

/// An HTML report under construction.
#[derive(Debug, Clone)]
pub struct Report {
    title: String,
    runtime_src: String,
    charts: Vec<String>,
}

impl Report {
    /// Start an empty report. `runtime_src` is the Plotly.js script URL.
    pub fn new(title: impl Into<String>, runtime_src: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            runtime_src: runtime_src.into(),
            charts: Vec::new(),
        }
    }

    /// Append a chart below the ones already added.
    pub fn chart(&mut self, plot: &Plot) -> &mut Self {
        let div_id = format!("runplot-chart-{}", self.charts.len());
        self.charts.push(plot.to_inline_html(Some(div_id.as_str())));
        self
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    /// Render the complete document.
    pub fn render(&self) -> String {
        let title = escape_html(&self.title);
        let mut html = String::with_capacity(1024 + self.charts.iter().map(String::len).sum::<usize>());

        html.push_str(&format!(
            "<html><head><meta charset=\"utf-8\"><title>{title}</title></head><body>"
        ));
        html.push_str(&format!(
            "<h1 style=\"text-align: center; font-family: Arial;\">{title}</h1>"
        ));
        for (i, chart) in self.charts.iter().enumerate() {
            if i == 0 {
                html.push_str(&format!(
                    "<script src=\"{}\"></script>",
                    escape_html(&self.runtime_src)
                ));
            }
            html.push_str(chart);
            html.push_str("<hr style=\"margin: 40px 0;\">");
        }
        html.push_str("</body></html>");
        html
    }

    /// Render and write the document to `path`, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.render())
            .with_context(|| format!("failed to write report {}", path.display()))?;
        tracing::info!(path = %path.display(), charts = self.charts.len(), "wrote report");
        Ok(())
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
