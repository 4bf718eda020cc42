//! End-to-end update cycles against a directory source and in-memory surfaces.

use pbi_dashboard::color::FixedHues;
use pbi_dashboard::dashboard::{Dashboard, DashboardConfig, UpdateOutcome};
use pbi_dashboard::render::{Canvas, FileSurface, SharedMemorySurface, SurfaceKind};
use pbi_dashboard::source::DirSource;
use pbi_dashboard::ui::{ControlId, ControlPanel, MemorySummary, SummaryField};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

fn write_fixtures(dir: &TempDir) {
    let records = json!([
        {"kabupaten_kota": "Kota Bandung", "tahun": 2023, "jenisPBI": "BUKAN PEKERJA (BP)", "persentase": 12.5},
        {"kabupaten_kota": "Kab. Garut", "tahun": "2023", "jenisPBI": "bukan pekerja (bp) ", "persentase": "30.1"},
        {"kabupaten_kota": "Kota Depok", "tahun": 2023, "jenisPBI": "BUKAN PEKERJA (BP)", "persentase": 4},
        {"kabupaten_kota": "Kota Depok", "tahun": 2022, "jenisPBI": "BUKAN PEKERJA (BP)", "persentase": 99},
        {"kabupaten_kota": "Kota Bogor", "tahun": 2023, "jenisPBI": "PEKERJA PENERIMA UPAH (PPU)", "persentase": 50},
        {"kabupaten_kota": "Kota Cimahi", "tahun": 2023}
    ]);
    fs::write(dir.path().join("data.json"), records.to_string()).unwrap();

    let geo = json!({
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"VARNAME_2": "Kota Bandung"}, "geometry": null},
            {"type": "Feature", "properties": {"VARNAME_2": "Kab. Garut"}, "geometry": null},
            {"type": "Feature", "properties": {"VARNAME_2": "Kab. Ciamis"}, "geometry": null}
        ]
    });
    fs::write(dir.path().join("jawa_barat.geojson"), geo.to_string()).unwrap();
}

fn panel(year: &str, category: &str, mode: &str) -> ControlPanel {
    let mut p = ControlPanel::new();
    p.set(ControlId::Year, year);
    p.set(ControlId::CategoryCode, category);
    p.set(ControlId::Mode, mode);
    p
}

fn dashboard(dir: &TempDir) -> (Dashboard<DirSource, SharedMemorySurface>, SharedMemorySurface) {
    let surface = SharedMemorySurface::default();
    let dash = Dashboard::new(
        DashboardConfig::default(),
        DirSource::new(dir.path()),
        surface.clone(),
        Box::new(FixedHues::new(vec![0.1, 0.4, 0.7])),
    );
    (dash, surface)
}

#[tokio::test]
async fn bar_update_draws_chart_and_summary() {
    let dir = TempDir::new().unwrap();
    write_fixtures(&dir);
    let (mut dash, surface) = dashboard(&dir);
    let mut sink = MemorySummary::default();

    let outcome = dash.update(&panel("2023", "BP", "bar"), &mut sink).await;
    assert_eq!(outcome, UpdateOutcome::Chart { matched: 3, drawn: true });

    surface.with(|s| {
        assert_eq!(s.live().len(), 1);
        let (handle, spec) = &s.live()[0];
        assert_eq!(handle.kind, SurfaceKind::Bar);
        assert_eq!(
            spec.data["labels"],
            json!(["Kota Bandung", "Kab. Garut", "Kota Depok"])
        );
        assert_eq!(spec.data["datasets"][0]["data"], json!([12.5, 30.1, 4.0]));
        assert!(s.visibility().unwrap().is_visible(Canvas::Chart));
    });

    assert_eq!(sink.get(SummaryField::HighestValue).as_deref(), Some("30.1%"));
    assert_eq!(sink.get(SummaryField::HighestRegion).as_deref(), Some("Kab. Garut"));
    assert_eq!(sink.get(SummaryField::LowestValue).as_deref(), Some("4%"));
    assert_eq!(sink.get(SummaryField::LowestRegion).as_deref(), Some("Kota Depok"));
}

#[tokio::test]
async fn rerender_replaces_previous_surface() {
    let dir = TempDir::new().unwrap();
    write_fixtures(&dir);
    let (mut dash, surface) = dashboard(&dir);
    let mut sink = MemorySummary::default();

    dash.update(&panel("2023", "BP", "bar"), &mut sink).await;
    let first = dash.chart_handle().cloned().unwrap();
    dash.update(&panel("2023", "BP", "pie"), &mut sink).await;
    let second = dash.chart_handle().cloned().unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(second.kind, SurfaceKind::Pie);
    surface.with(|s| {
        assert_eq!(s.destroyed(), &[first.id]);
        assert_eq!(s.live().len(), 1);
    });
}

#[tokio::test]
async fn empty_selection_clears_chart_and_shows_dashes() {
    let dir = TempDir::new().unwrap();
    write_fixtures(&dir);
    let (mut dash, surface) = dashboard(&dir);
    let mut sink = MemorySummary::default();

    dash.update(&panel("2023", "BP", "line"), &mut sink).await;
    let outcome = dash.update(&panel("1999", "BP", "line"), &mut sink).await;
    assert_eq!(outcome, UpdateOutcome::Chart { matched: 0, drawn: false });
    assert!(dash.chart_handle().is_none());
    surface.with(|s| assert!(s.live().is_empty()));
    assert_eq!(sink.get(SummaryField::HighestValue).as_deref(), Some("-"));
    assert_eq!(sink.get(SummaryField::LowestRegion).as_deref(), Some("-"));
}

#[tokio::test]
async fn map_update_joins_geography() {
    let dir = TempDir::new().unwrap();
    write_fixtures(&dir);
    let (mut dash, surface) = dashboard(&dir);
    let mut sink = MemorySummary::default();

    dash.update(&panel("2023", "BP", "bar"), &mut sink).await;
    let outcome = dash.update(&panel("2023", "BP", "map"), &mut sink).await;
    assert_eq!(outcome, UpdateOutcome::Map { matched: 3, regions: 3 });

    // the chart handle survives, hidden, while the map is shown
    assert!(dash.chart_handle().is_some());
    let map = dash.map_handle().cloned().unwrap();
    assert_eq!(map.kind, SurfaceKind::Choropleth);

    surface.with(|s| {
        assert!(s.visibility().unwrap().is_visible(Canvas::Map));
        let (_, spec) = s.live().iter().find(|(h, _)| h.id == map.id).unwrap();
        assert_eq!(spec.data["labels"], json!(["KOTA BANDUNG", "KAB. GARUT", "KAB. CIAMIS"]));
        let values: Vec<f64> = spec.data["datasets"][0]["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["value"].as_f64().unwrap())
            .collect();
        assert_eq!(values, vec![12.5, 30.1, 0.0]);
        assert_eq!(spec.data["datasets"][0]["tooltips"][2], "KAB. CIAMIS: 0%");
    });
    assert_eq!(sink.get(SummaryField::HighestRegion).as_deref(), Some("Kab. Garut"));
}

#[tokio::test]
async fn missing_data_file_degrades_to_empty() {
    let dir = TempDir::new().unwrap();
    let (mut dash, _surface) = dashboard(&dir);
    let mut sink = MemorySummary::default();

    let outcome = dash.update(&panel("2023", "BP", "map"), &mut sink).await;
    assert_eq!(outcome, UpdateOutcome::Map { matched: 0, regions: 0 });
    assert_eq!(sink.get(SummaryField::HighestValue).as_deref(), Some("-"));
}

#[tokio::test]
async fn missing_controls_abort_without_rendering() {
    let dir = TempDir::new().unwrap();
    write_fixtures(&dir);
    let (mut dash, surface) = dashboard(&dir);
    let mut sink = MemorySummary::default();

    let mut p = panel("2023", "BP", "bar");
    p.remove(ControlId::Mode);
    match dash.update(&p, &mut sink).await {
        UpdateOutcome::Aborted(err) => assert_eq!(err.missing, vec![ControlId::Mode]),
        other => panic!("expected abort, got {:?}", other),
    }
    surface.with(|s| assert_eq!(s.created_count(), 0));
    assert_eq!(sink.get(SummaryField::HighestValue), None);
}

#[tokio::test]
async fn file_surface_keeps_one_document_per_canvas() {
    let dir = TempDir::new().unwrap();
    write_fixtures(&dir);
    let out = dir.path().join("surfaces");
    let mut dash = Dashboard::new(
        DashboardConfig::default(),
        DirSource::new(dir.path()),
        FileSurface::new(&out).unwrap(),
        Box::new(FixedHues::new(vec![0.5])),
    );
    let mut sink = MemorySummary::default();

    dash.update(&panel("2023", "PPU", "scatter"), &mut sink).await;
    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.join("pbiChart.json")).unwrap()).unwrap();
    assert_eq!(doc["config"]["type"], "scatter");
    assert_eq!(doc["config"]["data"]["datasets"][0]["data"], json!([{"x": 0, "y": 50.0}]));

    dash.update(&panel("2023", "PPU", "map"), &mut sink).await;
    assert!(out.join("mapChart.json").exists());
    assert!(out.join("pbiChart.json").exists());
}
