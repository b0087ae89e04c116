//! Headless test harness for driving the configurator without a window.
//!
//! Mirrors what the app does each frame (form edits, resize, preview sync,
//! loop step) so lifecycle properties can be checked from integration tests.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::compositor::{CompositorStats, ListenerKind, SurfaceKind};
use crate::preview::{MountPoint, PreviewSession, Transition};
use crate::session::RenderSession;
use crate::state::form::{FormError, FormEvent, FormState};
use crate::state::settings::AppSettings;

/// Live resource counts at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceCounts {
    pub surfaces: usize,
    pub viewports: usize,
    pub overlays: usize,
    pub loops: usize,
    pub listeners: usize,
    pub pointer_listeners: usize,
    pub resize_listeners: usize,
}

/// Headless configurator: form state plus a render session
pub struct ConfiguratorHarness {
    pub form: FormState,
    pub settings: AppSettings,
    pub session: RenderSession,
    mount: Option<MountPoint>,
    transitions: Vec<Transition>,
}

impl ConfiguratorHarness {
    /// Window of the given size, background mounted, preview mount point present
    pub fn new(window: [f32; 2]) -> Self {
        Self::with_settings(window, AppSettings::default())
    }

    pub fn with_settings(window: [f32; 2], settings: AppSettings) -> Self {
        let session = RenderSession::start(window, &settings, &mut StdRng::seed_from_u64(7));
        let size = settings.preview.size;
        Self {
            form: FormState::default(),
            mount: MountPoint::new([size, size]),
            settings,
            session,
            transitions: Vec::new(),
        }
    }

    // ── Input ─────────────────────────────────────────────────

    pub fn edit(&mut self, event: FormEvent) -> Result<(), FormError> {
        self.form.apply(event).map(|_| ())
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        self.edit(FormEvent::input(name, value))
    }

    pub fn toggle(&mut self, name: &str) -> Result<(), FormError> {
        self.edit(FormEvent::toggle(name))
    }

    /// Remove or restore the preview's place in the layout
    pub fn set_mount(&mut self, mount: Option<MountPoint>) {
        self.mount = mount;
    }

    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        self.session.resize([width, height])
    }

    // ── Frames ────────────────────────────────────────────────

    /// One app frame: sync the preview with the form, then step loops
    pub fn frame(&mut self) -> Transition {
        let dims = self.form.dimensions().ok();
        let transition = self.session.sync_preview(dims, self.mount, &self.settings);
        if transition != Transition::Unchanged {
            self.transitions.push(transition);
        }
        self.session.frame();
        transition
    }

    pub fn run_frames(&mut self, n: usize) {
        for _ in 0..n {
            self.frame();
        }
    }

    pub fn shutdown(&mut self) {
        self.session.shutdown();
    }

    // ── Queries ───────────────────────────────────────────────

    /// Every non-`Unchanged` transition so far, in order
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn preview(&self) -> Option<&PreviewSession> {
        self.session.preview.session()
    }

    pub fn counts(&self) -> ResourceCounts {
        let c = &self.session.compositor;
        ResourceCounts {
            surfaces: c.surface_count(),
            viewports: c.surface_count_of(SurfaceKind::Viewport),
            overlays: c.surface_count_of(SurfaceKind::Overlay),
            loops: c.scheduler().active_count(),
            listeners: c.listener_count(),
            pointer_listeners: c.listener_count_of(ListenerKind::Pointer),
            resize_listeners: c.listener_count_of(ListenerKind::Resize),
        }
    }

    pub fn stats(&self) -> CompositorStats {
        self.session.compositor.stats()
    }
}
