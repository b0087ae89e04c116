//! Product preview viewport.
//!
//! A [`PreviewSession`] bundles everything one rendering of the block needs:
//! surface, pointer listener, orbit rig, render loop, scene and mesh. Sessions
//! are never patched in place. [`PreviewViewport::sync`] is the only
//! transition function and it always releases the old session before it
//! acquires a new one.

pub mod camera;
pub mod controls;
pub mod scene;

use crate::compositor::{Compositor, ListenerId, ListenerKind, SurfaceId, SurfaceKind};
use crate::scheduler::LoopHandle;
use crate::state::form::BlockDimensions;
use crate::state::settings::PreviewSettings;
use crate::viewport::mesh::MeshData;
use camera::OrbitCamera;
use controls::OrbitControls;
use scene::PreviewScene;

/// Where the viewport is placed in the layout. Only a finite, non-empty size
/// counts as a mount point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MountPoint {
    size: [f32; 2],
}

impl MountPoint {
    pub fn new(size: [f32; 2]) -> Option<Self> {
        let valid = size.iter().all(|s| s.is_finite() && *s > 0.0);
        valid.then_some(Self { size })
    }

    pub fn size(&self) -> [f32; 2] {
        self.size
    }
}

/// One live rendering of the block
pub struct PreviewSession {
    dims: BlockDimensions,
    mount: MountPoint,
    pub scene: PreviewScene,
    pub camera: OrbitCamera,
    pub controls: OrbitControls,
    mesh: MeshData,
    surface: SurfaceId,
    pointer: ListenerId,
    render_loop: LoopHandle,
    rotation_speed: f32,
    frames: u64,
}

impl PreviewSession {
    fn build(
        dims: BlockDimensions,
        mount: MountPoint,
        settings: &PreviewSettings,
        compositor: &mut Compositor,
    ) -> Self {
        let scene = PreviewScene::for_block(&dims, settings.background_color);
        let mesh = scene.mesh();
        let camera = OrbitCamera::framing(dims.max_dimension() as f32);
        let controls = OrbitControls::new(mount.size()[1], settings.damping_factor);

        let surface = compositor.mount(SurfaceKind::Viewport, mount.size());
        let pointer = compositor.listen(surface, ListenerKind::Pointer);
        let render_loop = compositor.scheduler_mut().schedule("preview");

        Self {
            dims,
            mount,
            scene,
            camera,
            controls,
            mesh,
            surface,
            pointer,
            render_loop,
            rotation_speed: settings.rotation_speed,
            frames: 0,
        }
    }

    /// Release everything acquired in `build`. Consumes the session.
    fn teardown(mut self, compositor: &mut Compositor) {
        compositor.scheduler_mut().cancel(&mut self.render_loop);
        compositor.unlisten(self.pointer);
        self.controls.dispose();
        compositor.unmount(self.surface);
    }

    /// One animation frame: damping, spin, render request
    pub fn step(&mut self, compositor: &Compositor) -> bool {
        if !compositor.scheduler().is_running(&self.render_loop) {
            return false;
        }
        self.controls.update(&mut self.camera);
        self.scene.rotation_y += self.rotation_speed;
        self.frames += 1;
        true
    }

    pub fn dimensions(&self) -> BlockDimensions {
        self.dims
    }

    pub fn mount(&self) -> MountPoint {
        self.mount
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    /// Frames rendered by this session
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Result of a [`PreviewViewport::sync`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed
    Unchanged,
    /// First session built
    Built,
    /// Old session torn down, new one built
    Rebuilt,
    /// Mount point went away; session torn down
    Released,
    /// Nothing to do (no mount point, no valid dimensions, or disposed)
    Skipped,
}

/// Viewport lifecycle: `Uninitialized -> Active -> Active' -> ... -> Disposed`
#[derive(Default)]
pub enum PreviewViewport {
    #[default]
    Uninitialized,
    Active(Box<PreviewSession>),
    Disposed,
}

impl PreviewViewport {
    /// Bring the viewport in line with the current dimensions and mount point.
    ///
    /// `dims` is `None` while the form holds unparseable text; the current
    /// session (if any) stays as it is until the input parses again.
    pub fn sync(
        &mut self,
        dims: Option<BlockDimensions>,
        mount: Option<MountPoint>,
        settings: &PreviewSettings,
        compositor: &mut Compositor,
    ) -> Transition {
        if matches!(self, PreviewViewport::Disposed) {
            return Transition::Skipped;
        }

        let Some(mount) = mount else {
            return match std::mem::take(self) {
                PreviewViewport::Active(session) => {
                    session.teardown(compositor);
                    tracing::info!("Preview mount point gone, viewport released");
                    Transition::Released
                }
                other => {
                    *self = other;
                    Transition::Skipped
                }
            };
        };

        if let PreviewViewport::Active(session) = self {
            let same_dims = dims.map_or(true, |d| d == session.dims);
            if same_dims && session.mount == mount {
                return Transition::Unchanged;
            }
        }

        let previous = std::mem::take(self);
        let (dims, transition) = match previous {
            PreviewViewport::Active(session) => {
                let dims = dims.unwrap_or(session.dims);
                session.teardown(compositor);
                (dims, Transition::Rebuilt)
            }
            _ => match dims {
                Some(d) => (d, Transition::Built),
                None => return Transition::Skipped,
            },
        };

        if dims.is_degenerate() {
            tracing::warn!(
                "Previewing degenerate block {}x{}x{}",
                dims.length,
                dims.width,
                dims.height
            );
        }
        let session = PreviewSession::build(dims, mount, settings, compositor);
        tracing::info!(
            "Preview {:?}: {}x{}x{} in",
            transition,
            dims.length,
            dims.width,
            dims.height
        );
        *self = PreviewViewport::Active(Box::new(session));
        transition
    }

    /// Final teardown. Later `sync` calls are no-ops.
    pub fn dispose(&mut self, compositor: &mut Compositor) {
        if let PreviewViewport::Active(session) = std::mem::replace(self, PreviewViewport::Disposed) {
            session.teardown(compositor);
            tracing::info!("Preview disposed");
        }
    }

    pub fn session(&self) -> Option<&PreviewSession> {
        match self {
            PreviewViewport::Active(session) => Some(&**session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut PreviewSession> {
        match self {
            PreviewViewport::Active(session) => Some(&mut **session),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, PreviewViewport::Active(_))
    }

    pub fn is_disposed(&self) -> bool {
        matches!(self, PreviewViewport::Disposed)
    }

    pub fn step(&mut self, compositor: &Compositor) -> bool {
        self.session_mut().is_some_and(|s| s.step(compositor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Compositor, PreviewSettings, MountPoint) {
        (
            Compositor::new([1280.0, 800.0]),
            PreviewSettings::default(),
            MountPoint::new([300.0, 300.0]).unwrap(),
        )
    }

    #[test]
    fn test_mount_point_validation() {
        assert!(MountPoint::new([300.0, 300.0]).is_some());
        assert!(MountPoint::new([0.0, 300.0]).is_none());
        assert!(MountPoint::new([300.0, f32::NAN]).is_none());
        assert!(MountPoint::new([-1.0, 300.0]).is_none());
    }

    #[test]
    fn test_first_sync_builds() {
        let (mut c, s, m) = setup();
        let mut v = PreviewViewport::default();
        let dims = BlockDimensions::new(10.0, 5.0, 2.0);
        assert_eq!(v.sync(Some(dims), Some(m), &s, &mut c), Transition::Built);
        assert!(v.is_active());
        assert_eq!(c.surface_count_of(SurfaceKind::Viewport), 1);
        assert_eq!(c.listener_count_of(ListenerKind::Pointer), 1);
        assert_eq!(c.scheduler().active_count(), 1);
        assert_eq!(v.sync(Some(dims), Some(m), &s, &mut c), Transition::Unchanged);
    }

    #[test]
    fn test_dimension_change_rebuilds_once() {
        let (mut c, s, m) = setup();
        let mut v = PreviewViewport::default();
        v.sync(Some(BlockDimensions::new(10.0, 5.0, 2.0)), Some(m), &s, &mut c);
        let old_surface = v.session().unwrap().surface();

        let t = v.sync(Some(BlockDimensions::new(10.0, 6.0, 2.0)), Some(m), &s, &mut c);
        assert_eq!(t, Transition::Rebuilt);
        assert!(!c.is_mounted(old_surface));
        assert_eq!(c.surface_count(), 1);
        assert_eq!(c.scheduler().active_count(), 1);
        assert_eq!(c.stats().mounted, 2);
        assert_eq!(c.stats().unmounted, 1);
    }

    #[test]
    fn test_unparseable_input_keeps_session() {
        let (mut c, s, m) = setup();
        let mut v = PreviewViewport::default();
        assert_eq!(v.sync(None, Some(m), &s, &mut c), Transition::Skipped);
        v.sync(Some(BlockDimensions::new(1.0, 1.0, 1.0)), Some(m), &s, &mut c);
        assert_eq!(v.sync(None, Some(m), &s, &mut c), Transition::Unchanged);
        assert_eq!(
            v.session().unwrap().dimensions(),
            BlockDimensions::new(1.0, 1.0, 1.0)
        );
    }

    #[test]
    fn test_missing_mount_point() {
        let (mut c, s, m) = setup();
        let mut v = PreviewViewport::default();
        let dims = BlockDimensions::new(1.0, 1.0, 1.0);
        assert_eq!(v.sync(Some(dims), None, &s, &mut c), Transition::Skipped);
        assert_eq!(c.surface_count(), 0);

        v.sync(Some(dims), Some(m), &s, &mut c);
        assert_eq!(v.sync(Some(dims), None, &s, &mut c), Transition::Released);
        assert!(!v.is_active());
        assert_eq!(c.surface_count(), 0);
        assert_eq!(c.listener_count(), 0);
    }

    #[test]
    fn test_dispose_is_terminal() {
        let (mut c, s, m) = setup();
        let mut v = PreviewViewport::default();
        let dims = BlockDimensions::new(1.0, 1.0, 1.0);
        v.sync(Some(dims), Some(m), &s, &mut c);
        v.dispose(&mut c);
        assert!(v.is_disposed());
        assert_eq!(c.surface_count(), 0);
        assert_eq!(c.scheduler().active_count(), 0);
        assert_eq!(v.sync(Some(dims), Some(m), &s, &mut c), Transition::Skipped);
        assert_eq!(c.surface_count(), 0);
        v.dispose(&mut c);
    }

    #[test]
    fn test_step_spins_block() {
        let (mut c, s, m) = setup();
        let mut v = PreviewViewport::default();
        v.sync(Some(BlockDimensions::new(1.0, 1.0, 1.0)), Some(m), &s, &mut c);
        for _ in 0..10 {
            assert!(v.step(&c));
        }
        let session = v.session().unwrap();
        assert_eq!(session.frames(), 10);
        assert!((session.scene.rotation_y - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_degenerate_dimensions_still_build() {
        let (mut c, s, m) = setup();
        let mut v = PreviewViewport::default();
        let t = v.sync(Some(BlockDimensions::new(0.0, -2.0, 3.0)), Some(m), &s, &mut c);
        assert_eq!(t, Transition::Built);
        assert_eq!(v.session().unwrap().scene.geometry.depth, -2.0);
    }
}
