//! Window-level rendering session.
//!
//! The compositor is the single owner of everything that can leak between
//! rebuilds: mounted render surfaces, input/resize listeners and render loops.
//! Components mount what they need and must hand it back on teardown; the
//! counters make leaks observable from tests.

use std::collections::BTreeMap;

use crate::scheduler::FrameScheduler;

/// Identifier of a mounted render surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(u64);

/// Identifier of a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Full-window surface drawn behind every panel
    Overlay,
    /// Fixed-size surface embedded in the form layout
    Viewport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    /// Window resize notifications
    Resize,
    /// Pointer drag/scroll input for orbit controls
    Pointer,
}

/// A mounted render target
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub kind: SurfaceKind,
    /// Logical size in points
    pub size: [f32; 2],
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    surface: SurfaceId,
    kind: ListenerKind,
}

/// Lifetime totals, for leak checks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositorStats {
    pub mounted: u64,
    pub unmounted: u64,
}

pub struct Compositor {
    surfaces: BTreeMap<SurfaceId, Surface>,
    listeners: BTreeMap<ListenerId, Listener>,
    scheduler: FrameScheduler,
    window_size: [f32; 2],
    next_id: u64,
    stats: CompositorStats,
}

impl Compositor {
    pub fn new(window_size: [f32; 2]) -> Self {
        Self {
            surfaces: BTreeMap::new(),
            listeners: BTreeMap::new(),
            scheduler: FrameScheduler::new(),
            window_size,
            next_id: 0,
            stats: CompositorStats::default(),
        }
    }

    // ── Surfaces ────────────────────────────────────────────

    pub fn mount(&mut self, kind: SurfaceKind, size: [f32; 2]) -> SurfaceId {
        self.next_id += 1;
        let id = SurfaceId(self.next_id);
        self.surfaces.insert(id, Surface { kind, size });
        self.stats.mounted += 1;
        tracing::debug!("Mounted {kind:?} surface {id:?} ({}x{})", size[0], size[1]);
        id
    }

    /// Remove a surface. Listeners still attached to it are dropped too.
    pub fn unmount(&mut self, id: SurfaceId) -> bool {
        if self.surfaces.remove(&id).is_none() {
            return false;
        }
        self.stats.unmounted += 1;

        let before = self.listeners.len();
        self.listeners.retain(|_, l| l.surface != id);
        let orphaned = before - self.listeners.len();
        if orphaned > 0 {
            tracing::warn!("Surface {id:?} unmounted with {orphaned} listener(s) still attached");
        }
        tracing::debug!("Unmounted surface {id:?}");
        true
    }

    pub fn surface(&self, id: SurfaceId) -> Option<&Surface> {
        self.surfaces.get(&id)
    }

    pub fn is_mounted(&self, id: SurfaceId) -> bool {
        self.surfaces.contains_key(&id)
    }

    pub fn resize_surface(&mut self, id: SurfaceId, size: [f32; 2]) -> bool {
        match self.surfaces.get_mut(&id) {
            Some(surface) => {
                surface.size = size;
                true
            }
            None => false,
        }
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    pub fn surface_count_of(&self, kind: SurfaceKind) -> usize {
        self.surfaces.values().filter(|s| s.kind == kind).count()
    }

    // ── Listeners ───────────────────────────────────────────

    pub fn listen(&mut self, surface: SurfaceId, kind: ListenerKind) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.insert(id, Listener { surface, kind });
        id
    }

    pub fn unlisten(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(&id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listener_count_of(&self, kind: ListenerKind) -> usize {
        self.listeners.values().filter(|l| l.kind == kind).count()
    }

    // ── Window ──────────────────────────────────────────────

    pub fn window_size(&self) -> [f32; 2] {
        self.window_size
    }

    /// Record a new window size. Returns `true` when it actually changed, in
    /// which case resize listeners must be notified.
    pub fn set_window_size(&mut self, size: [f32; 2]) -> bool {
        if self.window_size == size {
            return false;
        }
        self.window_size = size;
        true
    }

    // ── Loops ───────────────────────────────────────────────

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut FrameScheduler {
        &mut self.scheduler
    }

    pub fn stats(&self) -> CompositorStats {
        self.stats
    }

    /// Drop everything still registered. Owners are expected to have
    /// released their resources first; anything left here is reported.
    pub fn shutdown(&mut self) {
        if !self.surfaces.is_empty() || !self.listeners.is_empty() {
            tracing::warn!(
                "Compositor shutdown with {} surface(s) and {} listener(s) still registered",
                self.surfaces.len(),
                self.listeners.len()
            );
        }
        self.stats.unmounted += self.surfaces.len() as u64;
        self.surfaces.clear();
        self.listeners.clear();
        self.scheduler.cancel_all();
    }
}
