/// Chart model: six cumulative series rendered as a plotly figure.
///
/// The per-series visibility is kept alongside the `plotly::Plot` because
/// plotly traces are write-only once boxed into the plot.
use std::fmt;

use chrono::SecondsFormat;
use log::{debug, warn};
use plotly::common::{Anchor, Line, Mode, Title, Visible};
use plotly::layout::themes::PLOTLY_DARK;
use plotly::layout::{
    Axis, Layout, RangeMode, RangeSelector, RangeSlider, SelectorButton, SelectorStep, StepMode,
};
use plotly::{Plot, Scatter};

use crate::cumulative::CumulativeSeries;
use crate::model::Metric;
use crate::schema::cumulative;

pub const TOTAL_INSIGHTS_LABEL: &str = "Total Insights";
pub const TOTAL_INSIGHTS_COLOR: &str = "red";

/// Whether a series is drawn on first render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    /// Listed in the legend, drawn only once toggled on.
    LegendOnly,
}

impl Visibility {
    fn to_plotly(self) -> Visible {
        match self {
            Visibility::Visible => Visible::True,
            Visibility::LegendOnly => Visible::LegendOnly,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub key: String,
    pub name: &'static str,
    pub color: &'static str,
    pub x: Vec<String>,
    pub y: Vec<i64>,
    pub visible: Visibility,
}

impl ChartSeries {
    fn new(key: String, name: &'static str, color: &'static str, x: &[String], y: &[i64]) -> Self {
        Self {
            key,
            name,
            color,
            x: x.to_vec(),
            y: y.to_vec(),
            visible: Visibility::Visible,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible == Visibility::Visible
    }

    fn trace(&self) -> Box<Scatter<String, i64>> {
        Scatter::new(self.x.clone(), self.y.clone())
            .name(self.name)
            .mode(Mode::LinesMarkers)
            .line(Line::new().color(self.color))
            .visible(self.visible.to_plotly())
    }
}

fn layout(title: &str) -> Layout {
    let buttons = vec![
        SelectorButton::new()
            .count(1)
            .label("1m")
            .step(SelectorStep::Month)
            .step_mode(StepMode::Backward),
        SelectorButton::new()
            .count(6)
            .label("6m")
            .step(SelectorStep::Month)
            .step_mode(StepMode::Backward),
        SelectorButton::new()
            .count(1)
            .label("YTD")
            .step(SelectorStep::Year)
            .step_mode(StepMode::ToDate),
        SelectorButton::new().label("All").step(SelectorStep::All),
    ];

    Layout::new()
        .title(Title::with_text(title).x(0.5).x_anchor(Anchor::Center))
        .x_axis(
            Axis::new()
                .title(Title::with_text("Date"))
                .tick_format("%b %d, %Y")
                .range_selector(RangeSelector::new().buttons(buttons))
                .range_slider(RangeSlider::new().visible(true)),
        )
        .y_axis(
            Axis::new()
                .title(Title::with_text("Cumulative Counts"))
                .range_mode(RangeMode::ToZero),
        )
        .template(&*PLOTLY_DARK)
}

// ── Chart ───────────────────────────────────────────────────────────────────

pub struct Chart {
    title: String,
    series: Vec<ChartSeries>,
    plot: Plot,
}

impl Chart {
    /// Build the five metric series plus Total Insights, all visible.
    pub fn from_cumulative(cum: &CumulativeSeries, title: &str) -> Self {
        let x: Vec<String> = cum
            .timestamps()
            .iter()
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
            .collect();

        let mut series: Vec<ChartSeries> = Metric::ALL
            .into_iter()
            .map(|m| ChartSeries::new(m.key(), m.label(), m.color(), &x, cum.metric(m)))
            .collect();
        series.push(ChartSeries::new(
            cumulative::TOTAL_INSIGHTS.to_string(),
            TOTAL_INSIGHTS_LABEL,
            TOTAL_INSIGHTS_COLOR,
            &x,
            cum.total_insights(),
        ));

        let mut chart = Self {
            title: title.to_string(),
            series,
            plot: Plot::new(),
        };
        chart.rebuild_plot();
        chart
    }

    /// Hide every series, then show the one for `selected_metric` if it is
    /// a known counter column. Returns the metric that was shown.
    pub fn select_default(&mut self, selected_metric: &str) -> Option<Metric> {
        for s in &mut self.series {
            s.visible = Visibility::LegendOnly;
        }

        let selected = Metric::from_column(selected_metric);
        match selected {
            Some(metric) => {
                let key = metric.key();
                for s in self.series.iter_mut().filter(|s| s.key == key) {
                    s.visible = Visibility::Visible;
                }
                debug!("Default series: {}", metric.label());
            }
            None => warn!("Unknown metric {selected_metric:?}; no series visible by default"),
        }
        self.rebuild_plot();
        selected
    }

    fn rebuild_plot(&mut self) {
        let mut plot = Plot::new();
        for s in &self.series {
            plot.add_trace(s.trace());
        }
        plot.set_layout(layout(&self.title));
        // plotly.js is embedded locally by default with the `plotly_embed_js` feature.
        self.plot = plot;
    }

    pub fn series(&self) -> &[ChartSeries] {
        &self.series
    }

    pub fn series_by_key(&self, key: &str) -> Option<&ChartSeries> {
        self.series.iter().find(|s| s.key == key)
    }

    pub fn plot(&self) -> &Plot {
        &self.plot
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Names of the series drawn on first render.
    pub fn visible_series(&self) -> Vec<&str> {
        self.series
            .iter()
            .filter(|s| s.is_visible())
            .map(|s| s.name)
            .collect()
    }

    /// Plotly figure JSON (`data` + `layout`).
    pub fn to_json(&self) -> String {
        self.plot.to_json()
    }
}

impl fmt::Debug for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chart")
            .field("title", &self.title)
            .field("series", &self.series)
            .finish_non_exhaustive()
    }
}
