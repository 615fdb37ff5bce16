/// Visualization module: HTML output for a `Chart`.
///
/// The document comes from `plotly::Plot::to_html` with plotly.js embedded,
/// so it opens offline. It is written with `fs::write` so I/O failures
/// surface as `ReportError::Io` instead of panicking.
use std::fs;
use std::path::Path;

use log::info;

use crate::chart::Chart;
use crate::error::ReportError;

/// Render the chart as a complete, self-contained HTML document.
pub fn generate_chart_html(chart: &Chart) -> String {
    chart.plot().to_html()
}

impl Chart {
    /// Write the chart as HTML to `path`, replacing any existing file.
    pub fn write_html(&self, path: &Path) -> Result<(), ReportError> {
        let html = generate_chart_html(self);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, html)?;
        info!("Chart written to {}", path.display());
        Ok(())
    }

    pub fn to_html(&self) -> String {
        generate_chart_html(self)
    }
}
