//! Window-lifetime rendering session: compositor plus the two animated scenes.
//!
//! Created when the window opens, shut down when it closes. The app and the
//! headless harness drive it through the same three calls per frame:
//! `resize`, `sync_preview`, `frame`.

use rand::Rng;

use crate::background::BackgroundLayer;
use crate::compositor::Compositor;
use crate::preview::{MountPoint, PreviewViewport, Transition};
use crate::state::form::BlockDimensions;
use crate::state::settings::{AppSettings, BackgroundSettings};

pub struct RenderSession {
    pub compositor: Compositor,
    pub preview: PreviewViewport,
    pub background: Option<BackgroundLayer>,
}

impl RenderSession {
    /// Start the session and mount the background overlay (if enabled)
    pub fn start<R: Rng>(window: [f32; 2], settings: &AppSettings, rng: &mut R) -> Self {
        let mut compositor = Compositor::new(window);
        let background = settings
            .background
            .visible
            .then(|| BackgroundLayer::mount(&settings.background, &mut compositor, rng));
        Self {
            compositor,
            preview: PreviewViewport::default(),
            background,
        }
    }

    /// Forward a window size change to resize listeners. The preview viewport
    /// is fixed-size and is not touched.
    pub fn resize(&mut self, window: [f32; 2]) -> bool {
        if !self.compositor.set_window_size(window) {
            return false;
        }
        if let Some(bg) = &mut self.background {
            bg.on_resize(&mut self.compositor);
        }
        true
    }

    /// Mount or unmount the background overlay to match `settings.visible`.
    /// Returns `true` if the overlay changed.
    pub fn set_background<R: Rng>(&mut self, settings: &BackgroundSettings, rng: &mut R) -> bool {
        match (settings.visible, self.background.is_some()) {
            (true, false) => {
                self.background = Some(BackgroundLayer::mount(settings, &mut self.compositor, rng));
                true
            }
            (false, true) => {
                if let Some(bg) = self.background.take() {
                    bg.unmount(&mut self.compositor);
                }
                true
            }
            _ => false,
        }
    }

    pub fn sync_preview(
        &mut self,
        dims: Option<BlockDimensions>,
        mount: Option<MountPoint>,
        settings: &AppSettings,
    ) -> Transition {
        self.preview
            .sync(dims, mount, &settings.preview, &mut self.compositor)
    }

    /// Step every running loop once
    pub fn frame(&mut self) -> u64 {
        let frame = self.compositor.scheduler_mut().begin_frame();
        if let Some(bg) = &mut self.background {
            bg.step(&self.compositor);
        }
        self.preview.step(&self.compositor);
        frame
    }

    /// Whether anything still needs per-frame repaints
    pub fn is_animating(&self) -> bool {
        self.compositor.scheduler().active_count() > 0
    }

    /// Tear down both scenes, then the compositor
    pub fn shutdown(&mut self) {
        self.preview.dispose(&mut self.compositor);
        if let Some(bg) = self.background.take() {
            bg.unmount(&mut self.compositor);
        }
        self.compositor.shutdown();
        tracing::info!("Render session shut down");
    }
}
