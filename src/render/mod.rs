//! Rendering surfaces: where a built dataset ends up.
//!
//! The pipeline never mutates a live surface. Every render destroys the
//! previous handle and creates a fresh one through [`replace_surface`].

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logging::{log, log_render, obj, v_str, Domain, Level};

mod file;
mod memory;

pub use file::FileSurface;
pub use memory::{MemorySurface, SharedMemorySurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    Bar,
    Line,
    Pie,
    Scatter,
    Choropleth,
}

impl SurfaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceKind::Bar => "bar",
            SurfaceKind::Line => "line",
            SurfaceKind::Pie => "pie",
            SurfaceKind::Scatter => "scatter",
            SurfaceKind::Choropleth => "choropleth",
        }
    }
}

/// The two canvases of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Canvas {
    Chart,
    Map,
}

impl Canvas {
    pub fn id(&self) -> &'static str {
        match self {
            Canvas::Chart => "pbiChart",
            Canvas::Map => "mapChart",
        }
    }
}

/// Which canvas is currently shown; the other is hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceVisibility {
    pub shown: Canvas,
}

impl SurfaceVisibility {
    pub fn show(canvas: Canvas) -> Self {
        Self { shown: canvas }
    }

    pub fn is_visible(&self, canvas: Canvas) -> bool {
        self.shown == canvas
    }
}

/// Everything a surface needs to draw: kind, target canvas, data, options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceSpec {
    #[serde(rename = "type")]
    pub kind: SurfaceKind,
    #[serde(skip)]
    pub canvas: Canvas,
    pub data: Value,
    pub options: Value,
}

impl SurfaceSpec {
    /// Number of data points in the first series.
    pub fn point_count(&self) -> usize {
        self.data
            .get("datasets")
            .and_then(|d| d.get(0))
            .and_then(|s| s.get("data"))
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceHandle {
    pub id: u64,
    pub kind: SurfaceKind,
    pub canvas: Canvas,
}

pub trait RenderSurface {
    fn create(&mut self, spec: &SurfaceSpec) -> Result<SurfaceHandle>;
    fn destroy(&mut self, handle: SurfaceHandle) -> Result<()>;
    fn set_visibility(&mut self, visibility: SurfaceVisibility) -> Result<()>;
}

impl<T: RenderSurface + ?Sized> RenderSurface for Box<T> {
    fn create(&mut self, spec: &SurfaceSpec) -> Result<SurfaceHandle> {
        (**self).create(spec)
    }

    fn destroy(&mut self, handle: SurfaceHandle) -> Result<()> {
        (**self).destroy(handle)
    }

    fn set_visibility(&mut self, visibility: SurfaceVisibility) -> Result<()> {
        (**self).set_visibility(visibility)
    }
}

/// Destroy whatever `slot` holds, then create `next` (if any) and store it.
///
/// A failed destroy is logged and the stale handle is dropped; a failed
/// create leaves the slot empty. Either way the slot never holds a handle
/// that was already destroyed.
pub fn replace_surface<R: RenderSurface + ?Sized>(
    surface: &mut R,
    slot: &mut Option<SurfaceHandle>,
    next: Option<&SurfaceSpec>,
) {
    if let Some(old) = slot.take() {
        if let Err(err) = surface.destroy(old) {
            log(
                Level::Warn,
                Domain::Render,
                "destroy_failed",
                obj(&[("error", v_str(&err.to_string()))]),
            );
        }
    }

    let Some(spec) = next else {
        return;
    };
    match surface.create(spec) {
        Ok(handle) => {
            log_render(spec.canvas.id(), spec.kind.as_str(), spec.point_count());
            *slot = Some(handle);
        }
        Err(err) => log(
            Level::Error,
            Domain::Render,
            "create_failed",
            obj(&[
                ("canvas", v_str(spec.canvas.id())),
                ("kind", v_str(spec.kind.as_str())),
                ("error", v_str(&err.to_string())),
            ]),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(kind: SurfaceKind) -> SurfaceSpec {
        SurfaceSpec {
            kind,
            canvas: Canvas::Chart,
            data: json!({"labels": ["A"], "datasets": [{"data": [1.0, 2.0]}]}),
            options: json!({}),
        }
    }

    #[test]
    fn replace_destroys_then_assigns() {
        let mut surface = MemorySurface::default();
        let mut slot = None;

        replace_surface(&mut surface, &mut slot, Some(&spec(SurfaceKind::Bar)));
        let first = slot.clone().unwrap();
        assert_eq!(surface.live().len(), 1);

        replace_surface(&mut surface, &mut slot, Some(&spec(SurfaceKind::Line)));
        let second = slot.clone().unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(surface.destroyed(), &[first.id]);
        assert_eq!(surface.live().len(), 1);
        assert_eq!(surface.live()[0].0.kind, SurfaceKind::Line);
    }

    #[test]
    fn replace_with_nothing_clears_slot() {
        let mut surface = MemorySurface::default();
        let mut slot = None;
        replace_surface(&mut surface, &mut slot, Some(&spec(SurfaceKind::Pie)));
        replace_surface(&mut surface, &mut slot, None);
        assert!(slot.is_none());
        assert!(surface.live().is_empty());
    }

    #[test]
    fn point_count_reads_first_series() {
        assert_eq!(spec(SurfaceKind::Bar).point_count(), 2);
        let empty = SurfaceSpec {
            kind: SurfaceKind::Bar,
            canvas: Canvas::Chart,
            data: json!({}),
            options: json!({}),
        };
        assert_eq!(empty.point_count(), 0);
    }

    #[test]
    fn spec_serializes_chartjs_shape() {
        let v = serde_json::to_value(spec(SurfaceKind::Choropleth)).unwrap();
        assert_eq!(v["type"], "choropleth");
        assert!(v.get("canvas").is_none());
    }
}
