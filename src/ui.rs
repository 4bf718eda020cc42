//! The UI boundary: filter controls in, summary text out.

use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::stats::SummaryStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    Year,
    CategoryCode,
    Mode,
}

impl ControlId {
    pub const ALL: [ControlId; 3] = [ControlId::Year, ControlId::CategoryCode, ControlId::Mode];

    pub fn id(&self) -> &'static str {
        match self {
            ControlId::Year => "tahun",
            ControlId::CategoryCode => "jenisPBI",
            ControlId::Mode => "chartType",
        }
    }

    pub fn from_id(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.iter().copied().find(|c| {
            c.id() == raw
                || matches!(
                    (c, raw),
                    (ControlId::Year, "year") | (ControlId::CategoryCode, "category") | (ControlId::Mode, "mode")
                )
        })
    }
}

pub trait Controls {
    /// Current value of a control, `None` if the control does not exist.
    fn value(&self, id: ControlId) -> Option<String>;
}

/// Control values held in memory.
#[derive(Debug, Clone, Default)]
pub struct ControlPanel {
    values: HashMap<ControlId, String>,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &Config) -> Self {
        let mut panel = Self::new();
        panel.set(ControlId::Year, &cfg.default_year);
        panel.set(ControlId::CategoryCode, &cfg.default_category);
        panel.set(ControlId::Mode, &cfg.default_mode);
        panel
    }

    pub fn set(&mut self, id: ControlId, value: &str) {
        self.values.insert(id, value.to_string());
    }

    pub fn remove(&mut self, id: ControlId) {
        self.values.remove(&id);
    }
}

impl Controls for ControlPanel {
    fn value(&self, id: ControlId) -> Option<String> {
        self.values.get(&id).cloned()
    }
}

/// One or more controls could not be located.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingControls {
    pub missing: Vec<ControlId>,
}

impl fmt::Display for MissingControls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<_> = self.missing.iter().map(|c| c.id()).collect();
        write!(f, "filter controls not found: {}", ids.join(", "))
    }
}

impl std::error::Error for MissingControls {}

/// Text fields fed by the stats reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryField {
    HighestValue,
    HighestRegion,
    LowestValue,
    LowestRegion,
}

impl SummaryField {
    pub fn id(&self) -> &'static str {
        match self {
            SummaryField::HighestValue => "highestValue",
            SummaryField::HighestRegion => "highestRegion",
            SummaryField::LowestValue => "lowestValue",
            SummaryField::LowestRegion => "lowestRegion",
        }
    }
}

pub trait SummarySink {
    fn set_text(&mut self, field: SummaryField, text: &str);
}

/// Write all four fields from `stats`.
pub fn publish_summary(sink: &mut dyn SummarySink, stats: &SummaryStats) {
    sink.set_text(SummaryField::HighestValue, &stats.max_value);
    sink.set_text(SummaryField::HighestRegion, &stats.max_region);
    sink.set_text(SummaryField::LowestValue, &stats.min_value);
    sink.set_text(SummaryField::LowestRegion, &stats.min_region);
}

/// Prints `id: text` lines to stdout.
pub struct StdoutSummary;

impl SummarySink for StdoutSummary {
    fn set_text(&mut self, field: SummaryField, text: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{}: {}", field.id(), text);
    }
}

/// Keeps the latest text per field; clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemorySummary(pub Arc<Mutex<HashMap<SummaryField, String>>>);

impl MemorySummary {
    pub fn get(&self, field: SummaryField) -> Option<String> {
        self.0.lock().ok().and_then(|m| m.get(&field).cloned())
    }
}

impl SummarySink for MemorySummary {
    fn set_text(&mut self, field: SummaryField, text: &str) {
        if let Ok(mut m) = self.0.lock() {
            m.insert(field, text.to_string());
        }
    }
}

/// Parse a change event line: `tahun=2024`, `chartType pie`, `mode: map`.
pub fn parse_change_event(line: &str) -> Option<(ControlId, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let split = line.find(|c: char| c == '=' || c == ':' || c.is_whitespace())?;
    let (key, rest) = line.split_at(split);
    let value = rest.trim_start_matches(|c: char| c == '=' || c == ':' || c.is_whitespace());
    let control = ControlId::from_id(key)?;
    Some((control, value.trim().to_string()))
}
