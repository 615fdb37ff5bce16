//! Cumulative engagement growth reports for social-media post exports.
//!
//! Reads a post-level CSV export, stable-sorts it by creation time, computes
//! running totals for likes, comments, saves, plays and shares (plus their
//! sum, "Total Insights") and writes a self-contained interactive HTML chart.

pub mod chart;
pub mod config;
pub mod cumulative;
pub mod error;
pub mod model;
pub mod report;
pub mod schema;
pub mod visualization;

#[cfg(feature = "python")]
mod python;

pub use chart::{Chart, ChartSeries, Visibility};
pub use config::ReportConfig;
pub use cumulative::CumulativeSeries;
pub use error::ReportError;
pub use model::{Dataset, Metric, PostRecord};
pub use report::{generate_report, generate_report_with, EngagementReporter, DEFAULT_METRIC};
