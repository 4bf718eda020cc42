use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use pbi_dashboard::color::RandomHue;
use pbi_dashboard::config::Config;
use pbi_dashboard::dashboard::{Dashboard, DashboardConfig, UpdateOutcome};
use pbi_dashboard::logging::{log, obj, v_str, Domain, Level};
use pbi_dashboard::render::FileSurface;
use pbi_dashboard::source::{DataSource, DirSource, HttpSource};
use pbi_dashboard::ui::{parse_change_event, ControlPanel, StdoutSummary};
use serde_json::json;

fn log_outcome(outcome: &UpdateOutcome) {
    let fields = match outcome {
        UpdateOutcome::Chart { matched, drawn } => {
            obj(&[("target", v_str("chart")), ("matched", json!(matched)), ("drawn", json!(drawn))])
        }
        UpdateOutcome::Map { matched, regions } => {
            obj(&[("target", v_str("map")), ("matched", json!(matched)), ("regions", json!(regions))])
        }
        UpdateOutcome::Aborted(err) => obj(&[("target", v_str("none")), ("error", v_str(&err.to_string()))]),
    };
    log(Level::Info, Domain::System, "update_done", fields);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("data_base", v_str(&cfg.data_base)),
            ("data_file", v_str(&cfg.data_file)),
            ("geo_file", v_str(&cfg.geo_file)),
            ("surface_dir", v_str(&cfg.surface_dir.to_string_lossy())),
        ]),
    );

    let source: Box<dyn DataSource> = if cfg.is_remote() {
        Box::new(HttpSource::new(&cfg.data_base, cfg.http_timeout_secs)?)
    } else {
        Box::new(DirSource::new(&cfg.data_base))
    };
    let surface = FileSurface::new(&cfg.surface_dir)?;
    let mut dashboard = Dashboard::new(
        DashboardConfig::from(&cfg),
        source,
        surface,
        Box::new(RandomHue::from_entropy()),
    );
    let mut panel = ControlPanel::from_config(&cfg);
    let mut sink = StdoutSummary;

    // first render with the default control values
    let outcome = dashboard.update(&panel, &mut sink).await;
    log_outcome(&outcome);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_change_event(&line) {
            Some((control, value)) => {
                panel.set(control, &value);
                let outcome = dashboard.update(&panel, &mut sink).await;
                log_outcome(&outcome);
            }
            None if line.trim().is_empty() || line.trim_start().starts_with('#') => {}
            None => log(
                Level::Warn,
                Domain::Ui,
                "unparsed_event",
                obj(&[("line", v_str(&line))]),
            ),
        }
    }

    log(Level::Info, Domain::System, "shutdown", obj(&[]));
    Ok(())
}
