//! Choropleth dataset: filtered records joined onto region features.
//!
//! Geography drives the iteration. Every feature yields exactly one datum,
//! valued 0 when no record matches; records without a feature are dropped.

use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::color::{whole_degree_color_for, HueSource, Hsl, MAP_SWATCH};
use crate::geo::Geography;
use crate::record::Record;
use crate::render::{Canvas, SurfaceKind, SurfaceSpec};

pub const MAP_TITLE: &str = "Peta Sebaran Persentase PBI di Jawa Barat";
pub const MAP_SERIES_LABEL: &str = "Persentase";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDatum {
    pub feature: Value,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapDataset {
    pub labels: Vec<String>,
    pub data: Vec<MapDatum>,
    pub colors: Vec<Hsl>,
    pub tooltips: Vec<String>,
    pub outline: Value,
}

impl MapDataset {
    pub fn value_of(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.data[i].value)
    }

    pub fn options() -> Value {
        json!({
            "responsive": true,
            "plugins": {
                "legend": { "display": false },
                "title": { "display": true, "text": MAP_TITLE, "font": { "size": 16 } }
            },
            "scales": {
                "projection": { "axis": "x", "projection": "mercator" }
            }
        })
    }

    pub fn to_spec(&self) -> SurfaceSpec {
        let data = json!({
            "labels": self.labels,
            "datasets": [{
                "label": MAP_SERIES_LABEL,
                "outline": self.outline,
                "showOutline": true,
                "backgroundColor": self.colors,
                "tooltips": self.tooltips,
                "data": self.data,
            }]
        });
        SurfaceSpec {
            kind: SurfaceKind::Choropleth,
            canvas: Canvas::Map,
            data,
            options: Self::options(),
        }
    }
}

/// Value shown for a region: the record's number, with absent, zero and
/// non-numeric values all collapsing to 0.
fn display_value(v: Option<f64>) -> f64 {
    match v {
        Some(x) if !x.is_nan() && x != 0.0 => x,
        _ => 0.0,
    }
}

/// `"{REGION}: {value}%"`
pub fn tooltip_text(label: &str, value: f64) -> String {
    format!("{}: {}%", label, value)
}

pub fn build_map_dataset(
    records: &[Record],
    geography: &Geography,
    hues: &mut dyn HueSource,
) -> MapDataset {
    // later duplicates overwrite earlier ones
    let lookup: HashMap<String, f64> = records
        .iter()
        .map(|r| (r.region.to_uppercase(), r.numeric_value()))
        .collect();

    let mut palette: HashMap<String, Hsl> = HashMap::new();
    let n = geography.features.len();
    let mut labels = Vec::with_capacity(n);
    let mut data = Vec::with_capacity(n);
    let mut colors = Vec::with_capacity(n);
    let mut tooltips = Vec::with_capacity(n);

    for feature in &geography.features {
        let label = feature.label();
        let value = display_value(lookup.get(&label).copied());
        let color = *palette
            .entry(label.clone())
            .or_insert_with(|| whole_degree_color_for(hues.next_unit(), MAP_SWATCH));

        tooltips.push(tooltip_text(&label, value));
        colors.push(color);
        data.push(MapDatum {
            feature: feature.raw.clone(),
            value,
        });
        labels.push(label);
    }

    MapDataset {
        labels,
        data,
        colors,
        tooltips,
        outline: geography.outline.clone(),
    }
}
