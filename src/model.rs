use std::fmt;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::{debug, info};
use polars::prelude::*;

use crate::error::ReportError;
use crate::schema::{cumulative, post};

const STRIP: &str = " \t\r\n";

/// One of the five per-post engagement counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Likes,
    Comments,
    Saves,
    Plays,
    Shares,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Likes,
        Metric::Comments,
        Metric::Saves,
        Metric::Plays,
        Metric::Shares,
    ];

    /// Source column in the export.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Likes => post::DIGG_COUNT,
            Metric::Comments => post::COMMENT_COUNT,
            Metric::Saves => post::COLLECT_COUNT,
            Metric::Plays => post::PLAY_COUNT,
            Metric::Shares => post::SHARE_COUNT,
        }
    }

    /// Key of the running-sum series, e.g. `cumulative_playCount`.
    pub fn key(self) -> String {
        format!("{}{}", cumulative::PREFIX, self.column())
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Likes => "Total Likes",
            Metric::Comments => "Total Commentsa",
            Metric::Saves => "Total Saves",
            Metric::Plays => "Total Plays",
            Metric::Shares => "Total Shares",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Metric::Likes => "blue",
            Metric::Comments => "green",
            Metric::Saves => "red",
            Metric::Plays => "orange",
            Metric::Shares => "purple",
        }
    }

    /// Map a counter column name to its metric. Anything else yields `None`.
    pub fn from_column(name: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.column() == name)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// One row of the export, with typed fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub created_at: DateTime<Utc>,
    pub likes: i64,
    pub comments: i64,
    pub saves: i64,
    pub plays: i64,
    pub shares: i64,
}

impl PostRecord {
    pub fn count(&self, metric: Metric) -> i64 {
        match metric {
            Metric::Likes => self.likes,
            Metric::Comments => self.comments,
            Metric::Saves => self.saves,
            Metric::Plays => self.plays,
            Metric::Shares => self.shares,
        }
    }

    fn from_counts(created_at: DateTime<Utc>, counts: [i64; 5]) -> Self {
        let [likes, comments, saves, plays, shares] = counts;
        Self {
            created_at,
            likes,
            comments,
            saves,
            plays,
            shares,
        }
    }
}

/// Post records ordered by creation time.
///
/// Records sharing a timestamp keep their order from the source.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<PostRecord>,
}

impl Dataset {
    /// Stable-sort the records by creation time.
    pub fn from_records(mut records: Vec<PostRecord>) -> Self {
        records.sort_by_key(|r| r.created_at);
        Self { records }
    }

    /// Load an export CSV.
    ///
    /// Required columns: createTimeISO, diggCount, commentCount,
    /// collectCount, playCount, shareCount. Other columns are ignored.
    pub fn load_csv(path: &Path) -> Result<Self, ReportError> {
        let raw = read_csv_as_strings(path)?;
        require_columns(&raw)?;
        let typed = parse_counters(raw)?;
        let records = extract_records(&typed)?;
        info!(
            "Loaded {} post records from {}",
            records.len(),
            path.display()
        );
        Ok(Self::from_records(records))
    }

    pub fn records(&self) -> &[PostRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Loading ─────────────────────────────────────────────────────────────────

/// Read a UTF-8 CSV with every column as String and trimmed header names.
fn read_csv_as_strings(path: &Path) -> Result<DataFrame, ReportError> {
    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_encoding(CsvEncoding::Utf8))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    let trimmed: Vec<String> = df
        .get_column_names_str()
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    df.set_column_names(trimmed.as_slice())?;

    drop_blank_rows(df)
}

/// Drop rows where every field is null, i.e. blank lines in the file.
fn drop_blank_rows(df: DataFrame) -> Result<DataFrame, ReportError> {
    let before = df.height();
    let df = df
        .lazy()
        .filter(any_horizontal([all().as_expr().is_not_null()])?)
        .collect()?;
    if df.height() < before {
        debug!("Skipped {} blank rows", before - df.height());
    }
    Ok(df)
}

fn require_columns(df: &DataFrame) -> Result<(), ReportError> {
    let missing: Vec<String> = post::REQUIRED
        .iter()
        .filter(|name| df.column(name).is_err())
        .map(|name| name.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ReportError::MissingColumns {
            required: post::REQUIRED.iter().map(|c| c.to_string()).collect(),
            missing,
        })
    }
}

/// Cast the counter columns to Float64. Non-numeric values raise.
///
/// Exports write counts either as `5` or `5.0`; `counter_value` narrows
/// them to whole numbers afterwards.
fn parse_counters(df: DataFrame) -> Result<DataFrame, ReportError> {
    let casts: Vec<Expr> = post::COUNTERS
        .iter()
        .map(|name| {
            col(*name)
                .str()
                .strip_chars(lit(STRIP))
                .strict_cast(DataType::Float64)
        })
        .collect();
    Ok(df.lazy().with_columns(casts).collect()?)
}

/// Largest magnitude an f64 holds without losing integer precision.
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

fn counter_value(row: usize, column: &str, value: Option<f64>) -> Result<i64, ReportError> {
    let v = value
        .ok_or_else(|| ReportError::InvalidData(format!("Null {column} at row {row}")))?;
    if !v.is_finite() || v.fract() != 0.0 || v.abs() > MAX_EXACT_F64 {
        return Err(ReportError::InvalidData(format!(
            "{column} at row {row} is not a whole number: {v}"
        )));
    }
    Ok(v as i64)
}

fn extract_records(df: &DataFrame) -> Result<Vec<PostRecord>, ReportError> {
    let times = df.column(post::CREATE_TIME_ISO)?.str()?;
    let counters: Vec<&Float64Chunked> = post::COUNTERS
        .iter()
        .map(|name| df.column(name).and_then(|c| c.f64()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        // 1-based data row, header excluded
        let row = i + 1;
        let raw_time = times.get(i).ok_or_else(|| {
            ReportError::InvalidData(format!(
                "Null {} at row {row}",
                post::CREATE_TIME_ISO
            ))
        })?;
        let created_at = parse_timestamp(row, raw_time)?;

        let mut counts = [0i64; 5];
        for (j, series) in counters.iter().enumerate() {
            counts[j] = counter_value(row, post::COUNTERS[j], series.get(i))?;
        }
        records.push(PostRecord::from_counts(created_at, counts));
    }
    Ok(records)
}

/// Parse an ISO 8601 timestamp.
///
/// Offsets are honoured and normalised to UTC; naive values are taken as UTC.
pub fn parse_timestamp(row: usize, value: &str) -> Result<DateTime<Utc>, ReportError> {
    let value = value.trim_matches(|c: char| STRIP.contains(c));

    let err = match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => return Ok(dt.with_timezone(&Utc)),
        Err(e) => e,
    };
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }

    Err(ReportError::Timestamp {
        row,
        value: value.to_string(),
        source: err,
    })
}
