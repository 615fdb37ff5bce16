use thiserror::Error;

use crate::schema::post;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(
        "CSV file must contain {} columns (missing: {})",
        quoted(.required),
        .missing.join(", ")
    )]
    MissingColumns {
        required: Vec<String>,
        missing: Vec<String>,
    },

    #[error("Invalid timestamp {value:?} at row {row}: {source}")]
    Timestamp {
        row: usize,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("InvalidData: {0}")]
    InvalidData(String),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl ReportError {
    /// The full required column set, as reported by `MissingColumns`.
    pub fn required_columns() -> &'static [&'static str] {
        &post::REQUIRED
    }
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(feature = "python")]
mod python {
    use pyo3::exceptions::{PyRuntimeError, PyValueError};
    use pyo3::PyErr;

    use super::ReportError;

    impl From<ReportError> for PyErr {
        fn from(err: ReportError) -> PyErr {
            match err {
                ReportError::MissingColumns { .. } => PyValueError::new_err(err.to_string()),
                _ => PyRuntimeError::new_err(err.to_string()),
            }
        }
    }
}
