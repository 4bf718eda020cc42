//! Dataset records and the user's current selection.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::category::normalize;

/// A raw JSON scalar as it appears in the data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
}

impl Scalar {
    /// String coercion: `2023` becomes `"2023"`, `12.5` becomes `"12.5"`.
    pub fn as_text(&self) -> String {
        match self {
            Scalar::Null => "null".to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Text(s) => s.clone(),
            Scalar::Number(n) => match n.as_f64() {
                // integral floats print without a trailing ".0"
                Some(f) if n.is_f64() && f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
                    format!("{}", f as i64)
                }
                _ => n.to_string(),
            },
        }
    }

    /// Numeric interpretation; NaN when the scalar holds no leading number.
    pub fn as_number(&self) -> f64 {
        match self {
            Scalar::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Scalar::Text(s) => parse_float(s),
            Scalar::Null | Scalar::Bool(_) => f64::NAN,
        }
    }
}

/// Lenient float parsing: skip leading whitespace and read the longest
/// numeric prefix (`"12.5%"` -> 12.5, `"abc"` -> NaN).
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        let inf = if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY };
        return inf;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let mantissa = &s[..end];
    mantissa
        .parse::<f64>()
        .or_else(|_| format!("{}0", mantissa).parse::<f64>())
        .unwrap_or(f64::NAN)
}

/// One observation: a region's percentage for a year and category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "kabupaten_kota", default)]
    pub region: String,
    #[serde(rename = "tahun", default)]
    pub year: Scalar,
    #[serde(rename = "jenisPBI", default)]
    pub category: Option<Scalar>,
    #[serde(rename = "persentase", default)]
    pub value: Scalar,
}

impl Record {
    pub fn new(region: &str, year: Scalar, category: &str, value: Scalar) -> Self {
        Self {
            region: region.to_string(),
            year,
            category: Some(Scalar::Text(category.to_string())),
            value,
        }
    }

    pub fn year_text(&self) -> String {
        self.year.as_text()
    }

    /// Category text, if the record carries a string category.
    pub fn category_text(&self) -> Option<&str> {
        match &self.category {
            Some(Scalar::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn numeric_value(&self) -> f64 {
        self.value.as_number()
    }

    /// The value as shown in summary text, e.g. `"12.5"`.
    pub fn value_text(&self) -> String {
        self.value.as_text()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualizationMode {
    Bar,
    Line,
    Pie,
    Scatter,
    Histogram,
    Map,
}

impl VisualizationMode {
    pub const ALL: [VisualizationMode; 6] = [
        VisualizationMode::Bar,
        VisualizationMode::Line,
        VisualizationMode::Pie,
        VisualizationMode::Scatter,
        VisualizationMode::Histogram,
        VisualizationMode::Map,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        let wanted = raw.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|m| m.as_str() == wanted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VisualizationMode::Bar => "bar",
            VisualizationMode::Line => "line",
            VisualizationMode::Pie => "pie",
            VisualizationMode::Scatter => "scatter",
            VisualizationMode::Histogram => "histogram",
            VisualizationMode::Map => "map",
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, VisualizationMode::Map)
    }
}

/// The current filter-control values, rebuilt on every interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    pub year: String,
    pub category_code: String,
    pub mode: VisualizationMode,
}

impl FilterSelection {
    pub fn new(year: &str, category_code: &str, mode: VisualizationMode) -> Self {
        Self {
            year: year.to_string(),
            category_code: category_code.to_string(),
            mode,
        }
    }

    pub fn category_label(&self) -> String {
        normalize(&self.category_code)
    }

    /// Series title, e.g. `"BUKAN PEKERJA (BP) - 2023"`.
    pub fn title(&self) -> String {
        format!("{} - {}", self.category_label(), self.year)
    }
}
