use std::fs;
use std::path::{Path, PathBuf};

use engagement_report::{EngagementReporter, Metric, ReportConfig, ReportError, Visibility};
use tempfile::TempDir;

const HEADER: &str = "createTimeISO,diggCount,commentCount,collectCount,playCount,shareCount";

fn write_csv(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, body).unwrap();
    path
}

fn reporter(input: &Path, dir: &TempDir) -> EngagementReporter {
    EngagementReporter::new(ReportConfig::new(input, dir.path().join("out/report.html")))
}

#[test]
fn out_of_order_rows_accumulate_in_time_order() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "posts.csv",
        &format!(
            "{HEADER}\n2024-01-02T00:00:00Z,3,1,0,10,0\n2024-01-01T00:00:00Z,5,2,1,20,1\n"
        ),
    );

    let chart = reporter(&csv, &dir).generate("diggCount").unwrap();

    let likes = chart.series_by_key(&Metric::Likes.key()).unwrap();
    assert_eq!(likes.y, vec![5, 8]);
    assert_eq!(
        likes.x,
        vec!["2024-01-01T00:00:00.000Z", "2024-01-02T00:00:00.000Z"]
    );
    let insights = chart.series_by_key("total_insights").unwrap();
    assert_eq!(insights.y, vec![29, 43]);
    assert_eq!(chart.visible_series(), vec!["Total Likes"]);
}

#[test]
fn writes_html_and_creates_parent_directory() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "posts.csv",
        &format!("{HEADER}\n2024-05-01T10:00:00.000Z,1,1,1,1,1\n"),
    );
    let reporter = reporter(&csv, &dir);

    reporter.generate("playCount").unwrap();

    let html = fs::read_to_string(&reporter.config().output_path).unwrap();
    assert!(html.contains("Cumulative TikTok Engagement Growth Over Time"));
    assert!(html.contains("Plotly.newPlot"));
    assert!(html.contains("Total Plays"));
}

#[test]
fn output_is_overwritten_on_each_call() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "posts.csv",
        &format!("{HEADER}\n2024-05-01T10:00:00Z,1,1,1,1,1\n"),
    );
    let reporter = reporter(&csv, &dir);
    fs::create_dir_all(dir.path().join("out")).unwrap();
    fs::write(&reporter.config().output_path, "stale").unwrap();

    reporter.generate("diggCount").unwrap();

    let html = fs::read_to_string(&reporter.config().output_path).unwrap();
    assert_ne!(html, "stale");
    assert!(html.contains("Plotly.newPlot"));
}

#[test]
fn play_count_selection_shows_only_total_plays() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "posts.csv",
        &format!("{HEADER}\n2024-01-01T00:00:00Z,1,2,3,4,5\n"),
    );

    let chart = reporter(&csv, &dir).generate("playCount").unwrap();

    for series in chart.series() {
        let expected = if series.name == "Total Plays" {
            Visibility::Visible
        } else {
            Visibility::LegendOnly
        };
        assert_eq!(series.visible, expected, "{}", series.name);
    }
}

#[test]
fn unknown_metric_leaves_every_series_hidden() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "posts.csv",
        &format!("{HEADER}\n2024-01-01T00:00:00Z,1,2,3,4,5\n"),
    );
    let reporter = reporter(&csv, &dir);

    let chart = reporter.generate("bogus").unwrap();

    assert!(chart.visible_series().is_empty());
    assert_eq!(chart.series().len(), 6);
    assert!(reporter.config().output_path.exists());
}

#[test]
fn extra_columns_are_ignored() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "posts.csv",
        "id,text,createTimeISO,diggCount,commentCount,collectCount,playCount,shareCount,author\n\
         a,\"hello, world\",2024-02-01T00:00:00Z,2,0,0,0,0,x\n\
         b,bye,2024-02-03T00:00:00Z,4,0,0,0,0,y\n",
    );

    let chart = reporter(&csv, &dir).generate("diggCount").unwrap();

    assert_eq!(chart.series_by_key("cumulative_diggCount").unwrap().y, vec![2, 6]);
}

#[test]
fn each_missing_column_fails_without_touching_output() {
    let row = ["2024-01-01T00:00:00Z", "1", "2", "3", "4", "5"];
    let header: Vec<&str> = HEADER.split(',').collect();

    for dropped in ReportError::required_columns() {
        let dir = TempDir::new().unwrap();
        let keep: Vec<usize> = (0..header.len()).filter(|&i| header[i] != *dropped).collect();
        let pick = |cells: &[&str]| keep.iter().map(|&i| cells[i]).collect::<Vec<_>>().join(",");
        let csv = write_csv(
            &dir,
            "posts.csv",
            &format!("{}\n{}\n", pick(header.as_slice()), pick(&row[..])),
        );
        let reporter = reporter(&csv, &dir);
        fs::create_dir_all(dir.path().join("out")).unwrap();
        fs::write(&reporter.config().output_path, "previous").unwrap();

        let err = reporter.generate("diggCount").unwrap_err();

        match &err {
            ReportError::MissingColumns { required, missing } => {
                assert_eq!(missing, &vec![dropped.to_string()]);
                assert_eq!(required.len(), 6);
            }
            other => panic!("dropping {dropped}: expected MissingColumns, got {other:?}"),
        }
        assert!(err.to_string().contains("'createTimeISO'"));
        assert_eq!(
            fs::read_to_string(&reporter.config().output_path).unwrap(),
            "previous",
            "dropping {dropped}"
        );
    }
}

#[test]
fn blank_lines_are_skipped() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "posts.csv",
        &format!(
            "{HEADER}\n2024-01-01T00:00:00Z,1,0,0,0,0\n\n2024-01-02T00:00:00Z,2,0,0,0,0\n\n"
        ),
    );

    let chart = reporter(&csv, &dir).generate("diggCount").unwrap();

    assert_eq!(chart.series_by_key("cumulative_diggCount").unwrap().y, vec![1, 3]);
}

#[test]
fn trailing_blank_line_is_skipped() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "posts.csv",
        &format!("{HEADER}\n2024-01-01T00:00:00Z,4,0,0,0,0\n\n"),
    );

    let chart = reporter(&csv, &dir).generate("diggCount").unwrap();

    assert_eq!(chart.series_by_key("cumulative_diggCount").unwrap().y, vec![4]);
}

#[test]
fn header_whitespace_is_trimmed() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "posts.csv",
        " createTimeISO , diggCount,commentCount ,collectCount,playCount,shareCount\n\
         2024-01-01T00:00:00Z, 7 ,0,0,0,0\n",
    );

    let chart = reporter(&csv, &dir).generate("diggCount").unwrap();

    assert_eq!(chart.series_by_key("cumulative_diggCount").unwrap().y, vec![7]);
}

#[test]
fn malformed_timestamp_propagates() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "posts.csv",
        &format!("{HEADER}\n2024-01-01T00:00:00Z,1,1,1,1,1\nnot-a-date,1,1,1,1,1\n"),
    );
    let reporter = reporter(&csv, &dir);

    let err = reporter.generate("diggCount").unwrap_err();

    assert!(matches!(err, ReportError::Timestamp { row: 2, .. }), "{err:?}");
    assert!(!reporter.config().output_path.exists());
}

#[test]
fn malformed_counter_propagates() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "posts.csv",
        &format!("{HEADER}\n2024-01-01T00:00:00Z,many,1,1,1,1\n"),
    );

    let err = reporter(&csv, &dir).generate("diggCount").unwrap_err();

    assert!(matches!(err, ReportError::Polars(_)), "{err:?}");
}

#[test]
fn float_formatted_counters_are_accepted() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "posts.csv",
        &format!("{HEADER}\n2024-01-01T00:00:00Z,5.0,1,1,1,1\n2024-01-02T00:00:00Z,2,1,1,1,1.0\n"),
    );

    let chart = reporter(&csv, &dir).generate("diggCount").unwrap();

    assert_eq!(chart.series_by_key("cumulative_diggCount").unwrap().y, vec![5, 7]);
    assert_eq!(chart.series_by_key("cumulative_shareCount").unwrap().y, vec![1, 2]);
}

#[test]
fn fractional_counter_is_invalid_data() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "posts.csv",
        &format!("{HEADER}\n2024-01-01T00:00:00Z,1,1,1.5,1,1\n"),
    );

    let err = reporter(&csv, &dir).generate("diggCount").unwrap_err();

    match err {
        ReportError::InvalidData(msg) => assert!(msg.contains("collectCount"), "{msg}"),
        other => panic!("expected InvalidData, got {other:?}"),
    }
}

#[test]
fn empty_counter_is_invalid_data() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "posts.csv",
        &format!("{HEADER}\n2024-01-01T00:00:00Z,1,,1,1,1\n"),
    );

    let err = reporter(&csv, &dir).generate("diggCount").unwrap_err();

    match err {
        ReportError::InvalidData(msg) => assert!(msg.contains("commentCount"), "{msg}"),
        other => panic!("expected InvalidData, got {other:?}"),
    }
}

#[test]
fn missing_input_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.csv");

    let result = reporter(&missing, &dir).generate("diggCount");

    assert!(result.is_err());
}

#[test]
fn header_only_file_yields_empty_chart() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(&dir, "posts.csv", &format!("{HEADER}\n"));
    let reporter = reporter(&csv, &dir);

    let chart = reporter.generate("shareCount").unwrap();

    assert!(chart.series().iter().all(|s| s.y.is_empty()));
    assert_eq!(chart.visible_series(), vec!["Total Shares"]);
    assert!(reporter.config().output_path.exists());
}

#[test]
fn equal_timestamps_keep_file_order() {
    let dir = TempDir::new().unwrap();
    let csv = write_csv(
        &dir,
        "posts.csv",
        &format!(
            "{HEADER}\n2024-01-02T00:00:00Z,100,0,0,0,0\n2024-01-01T00:00:00Z,1,0,0,0,0\n\
             2024-01-01T00:00:00Z,10,0,0,0,0\n"
        ),
    );

    let chart = reporter(&csv, &dir).generate("diggCount").unwrap();

    assert_eq!(
        chart.series_by_key("cumulative_diggCount").unwrap().y,
        vec![1, 11, 111]
    );
}
