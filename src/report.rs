use log::info;

use crate::chart::Chart;
use crate::config::ReportConfig;
use crate::cumulative::CumulativeSeries;
use crate::error::ReportError;
use crate::model::Dataset;
use crate::schema::defaults;

pub const DEFAULT_METRIC: &str = defaults::METRIC;

/// Load → cumulate → chart → write, for one input and one output file.
#[derive(Debug, Clone, Default)]
pub struct EngagementReporter {
    config: ReportConfig,
}

impl EngagementReporter {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Build the chart without touching the output file.
    pub fn build_chart(&self, selected_metric: &str) -> Result<Chart, ReportError> {
        let dataset = Dataset::load_csv(&self.config.input_path)?;
        let cumulative = CumulativeSeries::from_dataset(&dataset)?;
        let mut chart = Chart::from_cumulative(&cumulative, &self.config.title);
        chart.select_default(selected_metric);
        Ok(chart)
    }

    /// Build the chart, write it to the configured output path and return it.
    ///
    /// An unknown `selected_metric` is not an error; the chart then has no
    /// series visible by default.
    pub fn generate(&self, selected_metric: &str) -> Result<Chart, ReportError> {
        let chart = self.build_chart(selected_metric)?;
        chart.write_html(&self.config.output_path)?;
        info!(
            "Report for {selected_metric:?} written to {}",
            self.config.output_path.display()
        );
        Ok(chart)
    }
}

/// Generate the report with the default input and output paths.
pub fn generate_report(selected_metric: &str) -> Result<Chart, ReportError> {
    EngagementReporter::default().generate(selected_metric)
}

/// Generate the report with explicit paths.
pub fn generate_report_with(
    config: ReportConfig,
    selected_metric: &str,
) -> Result<Chart, ReportError> {
    EngagementReporter::new(config).generate(selected_metric)
}
