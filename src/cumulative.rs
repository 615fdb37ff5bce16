use chrono::{DateTime, Utc};

use crate::error::ReportError;
use crate::model::{Dataset, Metric};

/// Running totals per metric, aligned by record index.
///
/// `totals[m][i]` is the sum of metric `m` over records `0..=i`, and
/// `total_insights[i]` is the sum of the five totals at `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CumulativeSeries {
    timestamps: Vec<DateTime<Utc>>,
    totals: [Vec<i64>; 5],
    total_insights: Vec<i64>,
}

impl CumulativeSeries {
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, ReportError> {
        let n = dataset.len();
        let mut timestamps = Vec::with_capacity(n);
        let mut totals: [Vec<i64>; 5] = Default::default();
        let mut running = [0i64; 5];

        for record in dataset.records() {
            timestamps.push(record.created_at);
            for (j, metric) in Metric::ALL.into_iter().enumerate() {
                running[j] = running[j]
                    .checked_add(record.count(metric))
                    .ok_or_else(|| overflow(metric.column()))?;
                totals[j].push(running[j]);
            }
        }

        let total_insights = (0..n)
            .map(|i| {
                totals
                    .iter()
                    .try_fold(0i64, |acc, series| acc.checked_add(series[i]))
                    .ok_or_else(|| overflow("total_insights"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            timestamps,
            totals,
            total_insights,
        })
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn metric(&self, metric: Metric) -> &[i64] {
        &self.totals[index_of(metric)]
    }

    pub fn total_insights(&self) -> &[i64] {
        &self.total_insights
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

fn index_of(metric: Metric) -> usize {
    match metric {
        Metric::Likes => 0,
        Metric::Comments => 1,
        Metric::Saves => 2,
        Metric::Plays => 3,
        Metric::Shares => 4,
    }
}

fn overflow(what: &str) -> ReportError {
    ReportError::InvalidData(format!("Running total of {what} overflows i64"))
}
