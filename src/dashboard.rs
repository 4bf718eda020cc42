//! Update cycle: load, filter, then hand the subset to the chart or map builder.
//!
//! The dashboard owns both surface handles. Each cycle replaces the handle
//! for the canvas it draws on and leaves the other one alone (hidden).

use serde_json::json;

use crate::chart::build_chart_dataset;
use crate::color::HueSource;
use crate::config::Config;
use crate::filter::filter_records;
use crate::logging::{
    log, log_filter, log_missing_controls, obj, v_str, Domain, Level, ProfileScope,
};
use crate::map::build_map_dataset;
use crate::record::{FilterSelection, Record, VisualizationMode};
use crate::render::{replace_surface, Canvas, RenderSurface, SurfaceHandle, SurfaceVisibility};
use crate::source::{load_geography, load_records, DataSource};
use crate::stats::{summarize, SummaryStats};
use crate::ui::{publish_summary, ControlId, Controls, MissingControls, SummarySink};

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_file: String,
    pub geo_file: String,
    pub region_property: String,
}

impl From<&Config> for DashboardConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            data_file: cfg.data_file.clone(),
            geo_file: cfg.geo_file.clone(),
            region_property: cfg.region_property.clone(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_file: "data.json".to_string(),
            geo_file: "jawa_barat.geojson".to_string(),
            region_property: "VARNAME_2".to_string(),
        }
    }
}

/// What one update cycle did.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Chart { matched: usize, drawn: bool },
    Map { matched: usize, regions: usize },
    Aborted(MissingControls),
}

/// Read the three filter controls. An unknown mode falls back to `bar`.
pub fn read_selection(controls: &dyn Controls) -> Result<FilterSelection, MissingControls> {
    let year = controls.value(ControlId::Year);
    let category = controls.value(ControlId::CategoryCode);
    let mode = controls.value(ControlId::Mode);

    match (year, category, mode) {
        (Some(year), Some(category), Some(mode)) => {
            let parsed = VisualizationMode::parse(&mode).unwrap_or_else(|| {
                log(
                    Level::Warn,
                    Domain::Ui,
                    "unknown_mode",
                    obj(&[("mode", v_str(&mode)), ("fallback", v_str("bar"))]),
                );
                VisualizationMode::Bar
            });
            Ok(FilterSelection::new(&year, &category, parsed))
        }
        (year, category, mode) => {
            let missing = [
                (ControlId::Year, year.is_none()),
                (ControlId::CategoryCode, category.is_none()),
                (ControlId::Mode, mode.is_none()),
            ]
            .into_iter()
            .filter_map(|(id, absent)| absent.then_some(id))
            .collect();
            Err(MissingControls { missing })
        }
    }
}

pub struct Dashboard<S, R> {
    cfg: DashboardConfig,
    source: S,
    surface: R,
    hues: Box<dyn HueSource>,
    chart: Option<SurfaceHandle>,
    map_chart: Option<SurfaceHandle>,
}

impl<S: DataSource, R: RenderSurface> Dashboard<S, R> {
    pub fn new(cfg: DashboardConfig, source: S, surface: R, hues: Box<dyn HueSource>) -> Self {
        Self {
            cfg,
            source,
            surface,
            hues,
            chart: None,
            map_chart: None,
        }
    }

    pub fn chart_handle(&self) -> Option<&SurfaceHandle> {
        self.chart.as_ref()
    }

    pub fn map_handle(&self) -> Option<&SurfaceHandle> {
        self.map_chart.as_ref()
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    /// One full cycle. Records are reloaded every time.
    pub async fn update(
        &mut self,
        controls: &dyn Controls,
        sink: &mut dyn SummarySink,
    ) -> UpdateOutcome {
        let _scope = ProfileScope::new("update");
        let records = load_records(&self.source, &self.cfg.data_file).await;

        let selection = match read_selection(controls) {
            Ok(sel) => sel,
            Err(missing) => {
                let ids: Vec<&str> = missing.missing.iter().map(|c| c.id()).collect();
                log_missing_controls(&ids);
                return UpdateOutcome::Aborted(missing);
            }
        };

        let filtered = filter_records(&records, &selection);
        log_filter(
            &selection.year,
            &selection.category_label(),
            records.len(),
            filtered.len(),
        );

        if selection.mode.is_map() {
            self.render_map(&filtered, sink).await
        } else {
            self.render_chart(&filtered, &selection, sink)
        }
    }

    fn show(&mut self, canvas: Canvas) {
        if let Err(err) = self.surface.set_visibility(SurfaceVisibility::show(canvas)) {
            log(
                Level::Warn,
                Domain::Render,
                "visibility_failed",
                obj(&[("canvas", v_str(canvas.id())), ("error", v_str(&err.to_string()))]),
            );
        }
    }

    fn render_chart(
        &mut self,
        filtered: &[Record],
        selection: &FilterSelection,
        sink: &mut dyn SummarySink,
    ) -> UpdateOutcome {
        self.show(Canvas::Chart);

        if filtered.is_empty() {
            // blank canvas stands in for the chart
            replace_surface(&mut self.surface, &mut self.chart, None);
            publish_summary(sink, &SummaryStats::placeholder());
            return UpdateOutcome::Chart {
                matched: 0,
                drawn: false,
            };
        }

        let dataset = build_chart_dataset(
            filtered,
            selection.mode,
            &selection.title(),
            self.hues.as_mut(),
        );
        let spec = dataset.to_spec();
        replace_surface(&mut self.surface, &mut self.chart, Some(&spec));
        self.publish(filtered, sink);
        UpdateOutcome::Chart {
            matched: filtered.len(),
            drawn: self.chart.is_some(),
        }
    }

    async fn render_map(
        &mut self,
        filtered: &[Record],
        sink: &mut dyn SummarySink,
    ) -> UpdateOutcome {
        self.show(Canvas::Map);

        let geography =
            load_geography(&self.source, &self.cfg.geo_file, &self.cfg.region_property).await;
        let dataset = build_map_dataset(filtered, &geography, self.hues.as_mut());
        let spec = dataset.to_spec();
        replace_surface(&mut self.surface, &mut self.map_chart, Some(&spec));
        self.publish(filtered, sink);
        UpdateOutcome::Map {
            matched: filtered.len(),
            regions: dataset.labels.len(),
        }
    }

    fn publish(&self, filtered: &[Record], sink: &mut dyn SummarySink) {
        let stats = summarize(filtered);
        log(
            Level::Debug,
            Domain::Stats,
            "summary",
            obj(&[("stats", json!(stats))]),
        );
        publish_summary(sink, &stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::ControlPanel;

    #[test]
    fn selection_reads_all_controls() {
        let mut panel = ControlPanel::new();
        panel.set(ControlId::Year, "2023");
        panel.set(ControlId::CategoryCode, "PBPU");
        panel.set(ControlId::Mode, "Scatter");
        let sel = read_selection(&panel).unwrap();
        assert_eq!(sel.mode, VisualizationMode::Scatter);
        assert_eq!(sel.category_label(), "PEKERJA BUKAN PENERIMA UPAH (PBPU) / MANDIRI");
    }

    #[test]
    fn unknown_mode_falls_back_to_bar() {
        let mut panel = ControlPanel::new();
        panel.set(ControlId::Year, "2023");
        panel.set(ControlId::CategoryCode, "BP");
        panel.set(ControlId::Mode, "donut");
        assert_eq!(read_selection(&panel).unwrap().mode, VisualizationMode::Bar);
    }

    #[test]
    fn missing_controls_are_listed() {
        let mut panel = ControlPanel::new();
        panel.set(ControlId::CategoryCode, "BP");
        let err = read_selection(&panel).unwrap_err();
        assert_eq!(err.missing, vec![ControlId::Year, ControlId::Mode]);
    }
}
