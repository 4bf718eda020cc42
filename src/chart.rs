//! Chart dataset construction for the non-map visualization modes.
//!
//! The output mirrors a Chart.js config (`labels`, `datasets`, `options`).
//! `histogram` is an alias for `bar`: no binning is performed.

use serde::Serialize;
use serde_json::{json, Value};

use crate::color::{color_for, HueSource, Hsl, PIE_SWATCH};
use crate::record::{Record, VisualizationMode};
use crate::render::{Canvas, SurfaceKind, SurfaceSpec};

pub const VALUE_AXIS_TITLE: &str = "Persentase (%)";
pub const CATEGORY_AXIS_TITLE: &str = "Kabupaten / Kota";
pub const PIE_SERIES_LABEL: &str = "Persentase";
pub const SERIES_BORDER: &str = "blue";
pub const SERIES_FILL: &str = "rgba(255,99,132,0.4)";
pub const SCATTER_MARKER: &str = "rgba(255,99,132,0.6)";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: usize,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    Values(Vec<f64>),
    Points(Vec<Point>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Background {
    Single(String),
    PerItem(Vec<Hsl>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub label: String,
    pub data: SeriesData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    pub background_color: Background,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    pub datasets: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataset {
    pub mode: VisualizationMode,
    pub kind: SurfaceKind,
    pub data: ChartData,
    /// Pie and scatter charts carry no axes.
    pub show_axes: bool,
}

impl ChartDataset {
    pub fn series(&self) -> &Series {
        &self.data.datasets[0]
    }

    pub fn options(&self) -> Value {
        let scales = if self.show_axes {
            json!({
                "y": { "beginAtZero": true, "title": { "display": true, "text": VALUE_AXIS_TITLE } },
                "x": { "title": { "display": true, "text": CATEGORY_AXIS_TITLE } }
            })
        } else {
            json!({})
        };
        json!({
            "responsive": true,
            "plugins": { "legend": { "display": true } },
            "scales": scales,
        })
    }

    pub fn to_spec(&self) -> SurfaceSpec {
        SurfaceSpec {
            kind: self.kind,
            canvas: Canvas::Chart,
            data: serde_json::to_value(&self.data).unwrap_or(Value::Null),
            options: self.options(),
        }
    }
}

/// Surface kind used to draw a chart mode; `None` for the map mode.
pub fn chart_kind(mode: VisualizationMode) -> Option<SurfaceKind> {
    match mode {
        VisualizationMode::Bar | VisualizationMode::Histogram => Some(SurfaceKind::Bar),
        VisualizationMode::Line => Some(SurfaceKind::Line),
        VisualizationMode::Pie => Some(SurfaceKind::Pie),
        VisualizationMode::Scatter => Some(SurfaceKind::Scatter),
        VisualizationMode::Map => None,
    }
}

/// Build the dataset for `mode` from already-filtered records.
///
/// Pie slice colours are drawn from `hues` on every call, so they are not
/// stable across re-renders. `Map` is drawn as a bar chart here; the
/// dashboard routes map mode to the map builder instead.
pub fn build_chart_dataset(
    records: &[Record],
    mode: VisualizationMode,
    title: &str,
    hues: &mut dyn HueSource,
) -> ChartDataset {
    let kind = chart_kind(mode).unwrap_or(SurfaceKind::Bar);
    let labels: Vec<String> = records.iter().map(|r| r.region.clone()).collect();
    let values: Vec<f64> = records.iter().map(Record::numeric_value).collect();

    let (labels, series, show_axes) = match mode {
        VisualizationMode::Scatter => {
            let points = values
                .iter()
                .enumerate()
                .map(|(x, &y)| Point { x, y })
                .collect();
            let series = Series {
                label: title.to_string(),
                data: SeriesData::Points(points),
                border_color: None,
                background_color: Background::Single(SCATTER_MARKER.to_string()),
                fill: None,
            };
            (None, series, false)
        }
        VisualizationMode::Pie => {
            let colors = labels
                .iter()
                .map(|_| color_for(hues.next_unit(), PIE_SWATCH))
                .collect();
            let series = Series {
                label: PIE_SERIES_LABEL.to_string(),
                data: SeriesData::Values(values),
                border_color: None,
                background_color: Background::PerItem(colors),
                fill: None,
            };
            (Some(labels), series, false)
        }
        _ => {
            let series = Series {
                label: title.to_string(),
                data: SeriesData::Values(values),
                border_color: Some(SERIES_BORDER.to_string()),
                background_color: Background::Single(SERIES_FILL.to_string()),
                fill: Some(mode != VisualizationMode::Line),
            };
            (Some(labels), series, true)
        }
    };

    ChartDataset {
        mode,
        kind,
        data: ChartData {
            labels,
            datasets: vec![series],
        },
        show_axes,
    }
}
