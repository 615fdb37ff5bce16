use std::path::PathBuf;

use pyo3::prelude::*;

use crate::chart::Chart;
use crate::config::ReportConfig;
use crate::report::{EngagementReporter, DEFAULT_METRIC};

/// Python view of a generated chart.
#[pyclass(name = "Chart", unsendable)]
pub struct PyChart {
    inner: Chart,
}

#[pymethods]
impl PyChart {
    #[getter]
    fn title(&self) -> String {
        self.inner.title().to_string()
    }

    /// Labels of the series drawn on first render.
    fn visible_series(&self) -> Vec<String> {
        self.inner
            .visible_series()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Plotly figure JSON (`data` + `layout`).
    fn to_json(&self) -> String {
        self.inner.to_json()
    }

    fn to_html(&self) -> String {
        self.inner.to_html()
    }

    fn __repr__(&self) -> String {
        format!(
            "Chart(title={:?}, series={}, visible={:?})",
            self.inner.title(),
            self.inner.series().len(),
            self.inner.visible_series()
        )
    }
}

/// Load the export, write the HTML chart and return it.
///
/// Paths default to the fixed locations used by the original report script.
#[pyfunction]
#[pyo3(signature = (selected_metric=DEFAULT_METRIC, input_path=None, output_path=None))]
fn generate_report(
    selected_metric: &str,
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
) -> PyResult<PyChart> {
    let mut config = ReportConfig::default();
    if let Some(p) = input_path {
        config.input_path = p;
    }
    if let Some(p) = output_path {
        config.output_path = p;
    }
    let chart = EngagementReporter::new(config).generate(selected_metric)?;
    Ok(PyChart { inner: chart })
}

#[pymodule]
fn engagement_report(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyChart>()?;
    m.add_function(wrap_pyfunction!(generate_report, m)?)?;
    m.add("DEFAULT_METRIC", DEFAULT_METRIC)?;
    Ok(())
}
