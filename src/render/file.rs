use anyhow::{Context, Result};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Canvas, RenderSurface, SurfaceHandle, SurfaceSpec, SurfaceVisibility};

/// Writes each live surface as a Chart.js config document, one file per canvas.
pub struct FileSurface {
    dir: PathBuf,
    next_id: u64,
}

impl FileSurface {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).with_context(|| format!("create {:?}", dir))?;
        Ok(Self { dir, next_id: 0 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn document_path(&self, canvas: Canvas) -> PathBuf {
        self.dir.join(format!("{}.json", canvas.id()))
    }
}

impl RenderSurface for FileSurface {
    fn create(&mut self, spec: &SurfaceSpec) -> Result<SurfaceHandle> {
        self.next_id += 1;
        let handle = SurfaceHandle {
            id: self.next_id,
            kind: spec.kind,
            canvas: spec.canvas,
        };
        let doc = json!({
            "surface_id": handle.id,
            "canvas": spec.canvas.id(),
            "config": spec,
        });
        let path = self.document_path(spec.canvas);
        fs::write(&path, serde_json::to_string_pretty(&doc)?)
            .with_context(|| format!("write {:?}", path))?;
        Ok(handle)
    }

    fn destroy(&mut self, handle: SurfaceHandle) -> Result<()> {
        let path = self.document_path(handle.canvas);
        if path.exists() {
            fs::remove_file(&path).with_context(|| format!("remove {:?}", path))?;
        }
        Ok(())
    }

    fn set_visibility(&mut self, visibility: SurfaceVisibility) -> Result<()> {
        let path = self.dir.join("visibility.json");
        let mut doc = serde_json::Map::new();
        for canvas in [Canvas::Chart, Canvas::Map] {
            doc.insert(canvas.id().to_string(), json!(visibility.is_visible(canvas)));
        }
        fs::write(&path, serde_json::Value::Object(doc).to_string()).with_context(|| format!("write {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SurfaceKind;
    use tempfile::TempDir;

    #[test]
    fn writes_and_removes_documents() {
        let dir = TempDir::new().unwrap();
        let mut surface = FileSurface::new(dir.path().join("surfaces")).unwrap();
        let spec = SurfaceSpec {
            kind: SurfaceKind::Pie,
            canvas: Canvas::Chart,
            data: json!({"labels": ["A"]}),
            options: json!({"responsive": true}),
        };
        let handle = surface.create(&spec).unwrap();
        let path = surface.document_path(Canvas::Chart);
        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(doc["config"]["type"], "pie");
        assert_eq!(doc["canvas"], "pbiChart");

        surface.destroy(handle).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn visibility_document() {
        let dir = TempDir::new().unwrap();
        let mut surface = FileSurface::new(dir.path()).unwrap();
        surface.set_visibility(SurfaceVisibility::show(Canvas::Map)).unwrap();
        let doc: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("visibility.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(doc["mapChart"], true);
        assert_eq!(doc["pbiChart"], false);
    }
}
