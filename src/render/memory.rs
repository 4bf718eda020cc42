use anyhow::{anyhow, Result};
use std::sync::{Arc, Mutex};

use super::{RenderSurface, SurfaceHandle, SurfaceSpec, SurfaceVisibility};

/// Keeps live surfaces in memory and remembers what was destroyed.
#[derive(Debug, Default)]
pub struct MemorySurface {
    next_id: u64,
    live: Vec<(SurfaceHandle, SurfaceSpec)>,
    destroyed: Vec<u64>,
    visibility: Option<SurfaceVisibility>,
}

impl MemorySurface {
    pub fn live(&self) -> &[(SurfaceHandle, SurfaceSpec)] {
        &self.live
    }

    pub fn destroyed(&self) -> &[u64] {
        &self.destroyed
    }

    pub fn visibility(&self) -> Option<SurfaceVisibility> {
        self.visibility
    }

    /// Total surfaces ever created.
    pub fn created_count(&self) -> u64 {
        self.next_id
    }
}

impl RenderSurface for MemorySurface {
    fn create(&mut self, spec: &SurfaceSpec) -> Result<SurfaceHandle> {
        self.next_id += 1;
        let handle = SurfaceHandle {
            id: self.next_id,
            kind: spec.kind,
            canvas: spec.canvas,
        };
        self.live.push((handle.clone(), spec.clone()));
        Ok(handle)
    }

    fn destroy(&mut self, handle: SurfaceHandle) -> Result<()> {
        let pos = self
            .live
            .iter()
            .position(|(h, _)| h.id == handle.id)
            .ok_or_else(|| anyhow!("surface {} is not live", handle.id))?;
        self.live.remove(pos);
        self.destroyed.push(handle.id);
        Ok(())
    }

    fn set_visibility(&mut self, visibility: SurfaceVisibility) -> Result<()> {
        self.visibility = Some(visibility);
        Ok(())
    }
}

/// Cloneable handle onto a [`MemorySurface`], so a test can keep a view
/// while the dashboard owns the surface.
#[derive(Debug, Clone, Default)]
pub struct SharedMemorySurface(pub Arc<Mutex<MemorySurface>>);

impl SharedMemorySurface {
    pub fn with<T>(&self, f: impl FnOnce(&MemorySurface) -> T) -> T {
        let guard = self.0.lock().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }
}

impl RenderSurface for SharedMemorySurface {
    fn create(&mut self, spec: &SurfaceSpec) -> Result<SurfaceHandle> {
        self.0.lock().map_err(|_| anyhow!("surface lock poisoned"))?.create(spec)
    }

    fn destroy(&mut self, handle: SurfaceHandle) -> Result<()> {
        self.0.lock().map_err(|_| anyhow!("surface lock poisoned"))?.destroy(handle)
    }

    fn set_visibility(&mut self, visibility: SurfaceVisibility) -> Result<()> {
        self.0
            .lock()
            .map_err(|_| anyhow!("surface lock poisoned"))?
            .set_visibility(visibility)
    }
}
