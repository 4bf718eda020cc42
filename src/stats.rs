//! Min/max summary over the filtered records.

use serde::Serialize;

use crate::record::Record;

/// Text shown in every summary field when there is nothing to summarize.
pub const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub max_value: String,
    pub max_region: String,
    pub min_value: String,
    pub min_region: String,
}

impl SummaryStats {
    pub fn placeholder() -> Self {
        Self {
            max_value: PLACEHOLDER.to_string(),
            max_region: PLACEHOLDER.to_string(),
            min_value: PLACEHOLDER.to_string(),
            min_region: PLACEHOLDER.to_string(),
        }
    }
}

/// Running extremum pair, borrowed from the input.
#[derive(Debug, Clone, Copy)]
pub struct Extremes<'a> {
    pub max: &'a Record,
    pub min: &'a Record,
}

impl<'a> Extremes<'a> {
    /// Summary text: values are suffixed with `%` as shown in the dashboard.
    pub fn to_summary(&self) -> SummaryStats {
        SummaryStats {
            max_value: format!("{}%", self.max.value_text()),
            max_region: self.max.region.clone(),
            min_value: format!("{}%", self.min.value_text()),
            min_region: self.min.region.clone(),
        }
    }
}

/// Single pass over `records`; `None` when empty.
///
/// Only a strictly greater (or smaller) value replaces the running extremum,
/// so the first occurrence wins ties. NaN never compares true, which means a
/// NaN record can only be the extremum if it comes first and nothing
/// comparable to it follows.
pub fn reduce(records: &[Record]) -> Option<Extremes<'_>> {
    let (first, rest) = records.split_first()?;
    let mut max = first;
    let mut min = first;
    for rec in rest {
        if rec.numeric_value() > max.numeric_value() {
            max = rec;
        }
        if rec.numeric_value() < min.numeric_value() {
            min = rec;
        }
    }
    Some(Extremes { max, min })
}

/// Summary fields for `records`, or dashes when empty.
pub fn summarize(records: &[Record]) -> SummaryStats {
    reduce(records)
        .map(|e| e.to_summary())
        .unwrap_or_else(SummaryStats::placeholder)
}
