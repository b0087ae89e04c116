//! Hyperspace background: line segments streaming towards the viewer.

use glam::{Mat4, Vec3};
use rand::Rng;

use crate::compositor::{Compositor, ListenerId, ListenerKind, SurfaceId, SurfaceKind};
use crate::scheduler::LoopHandle;
use crate::state::settings::BackgroundSettings;
use crate::viewport::mesh::{self, LineMeshData};

/// One streak; `far` always sits `segment_length` ahead of `near` on Z
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub near: [f32; 3],
    pub far: [f32; 3],
}

/// Shape and motion of the line field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFieldParams {
    pub count: usize,
    pub spread: f32,
    pub segment_length: f32,
    pub speed: f32,
    pub wrap_depth: f32,
}

impl From<&BackgroundSettings> for LineFieldParams {
    fn from(s: &BackgroundSettings) -> Self {
        Self {
            count: s.line_count,
            spread: s.spread,
            segment_length: s.segment_length,
            speed: s.speed,
            wrap_depth: s.wrap_depth,
        }
    }
}

impl Default for LineFieldParams {
    fn default() -> Self {
        Self::from(&BackgroundSettings::default())
    }
}

#[derive(Debug, Clone)]
pub struct LineField {
    params: LineFieldParams,
    segments: Vec<Segment>,
}

impl LineField {
    /// Scatter segments uniformly in a cube of side `spread` centered at the origin
    pub fn generate<R: Rng>(params: LineFieldParams, rng: &mut R) -> Self {
        let half = params.spread.max(0.0) * 0.5;
        let segments = (0..params.count)
            .map(|_| {
                let near = [
                    rng.random_range(-half..=half),
                    rng.random_range(-half..=half),
                    rng.random_range(-half..=half),
                ];
                let mut seg = Segment {
                    near,
                    far: [near[0], near[1], near[2] + params.segment_length],
                };
                wrap(&mut seg, &params);
                seg
            })
            .collect();
        Self { params, segments }
    }

    /// Advance every segment one frame along +Z, wrapping the ones that passed the viewer
    pub fn step(&mut self) {
        for seg in &mut self.segments {
            seg.near[2] += self.params.speed;
            seg.far[2] = seg.near[2] + self.params.segment_length;
            wrap(seg, &self.params);
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn line_mesh(&self, opacity: f32) -> LineMeshData {
        let endpoints: Vec<_> = self.segments.iter().map(|s| (s.near, s.far)).collect();
        mesh::segments(&endpoints, [1.0, 1.0, 1.0, opacity])
    }
}

/// Both endpoints move together; `far` is re-derived so the offset never drifts.
fn wrap(seg: &mut Segment, params: &LineFieldParams) {
    if seg.far[2] > params.wrap_depth {
        seg.near[2] -= params.spread;
        seg.far[2] = seg.near[2] + params.segment_length;
    }
}

/// Fixed perspective camera a hair in front of the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundCamera {
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl BackgroundCamera {
    pub fn new(window: [f32; 2]) -> Self {
        Self {
            fov: 75.0_f32.to_radians(),
            aspect: aspect(window),
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 0.0, 1.0),
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        let proj = Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far);
        let view = Mat4::look_at_rh(self.position, self.position - Vec3::Z, Vec3::Y);
        proj * view
    }
}

fn aspect(size: [f32; 2]) -> f32 {
    if size[1] > 0.0 {
        size[0] / size[1]
    } else {
        1.0
    }
}

/// Owner of the full-window overlay surface and everything attached to it
pub struct BackgroundLayer {
    field: LineField,
    pub camera: BackgroundCamera,
    pub clear_color: [f32; 3],
    pub opacity: f32,
    surface: SurfaceId,
    resize_listener: ListenerId,
    render_loop: LoopHandle,
    frames: u64,
}

impl BackgroundLayer {
    /// Mount the overlay at the current window size and start its loop
    pub fn mount<R: Rng>(
        settings: &BackgroundSettings,
        compositor: &mut Compositor,
        rng: &mut R,
    ) -> Self {
        let window = compositor.window_size();
        let field = LineField::generate(LineFieldParams::from(settings), rng);
        let surface = compositor.mount(SurfaceKind::Overlay, window);
        let resize_listener = compositor.listen(surface, ListenerKind::Resize);
        let render_loop = compositor.scheduler_mut().schedule("background");
        tracing::info!(
            "Background mounted ({} segments, {}x{})",
            field.segments().len(),
            window[0],
            window[1]
        );

        Self {
            field,
            camera: BackgroundCamera::new(window),
            clear_color: mesh::rgb(0x0a0a0a),
            opacity: settings.opacity,
            surface,
            resize_listener,
            render_loop,
            frames: 0,
        }
    }

    /// Release the overlay surface, its listener and its loop
    pub fn unmount(mut self, compositor: &mut Compositor) {
        compositor.scheduler_mut().cancel(&mut self.render_loop);
        compositor.unlisten(self.resize_listener);
        compositor.unmount(self.surface);
        tracing::info!("Background unmounted after {} frames", self.frames);
    }

    /// Refit to a new window size: camera aspect and surface size only
    pub fn on_resize(&mut self, compositor: &mut Compositor) {
        if !compositor.has_listener(self.resize_listener) {
            return;
        }
        let window = compositor.window_size();
        self.camera.aspect = aspect(window);
        compositor.resize_surface(self.surface, window);
        tracing::debug!("Background resized to {}x{}", window[0], window[1]);
    }

    pub fn step(&mut self, compositor: &Compositor) -> bool {
        if !compositor.scheduler().is_running(&self.render_loop) {
            return false;
        }
        self.field.step();
        self.frames += 1;
        true
    }

    pub fn field(&self) -> &LineField {
        &self.field
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn line_mesh(&self) -> LineMeshData {
        self.field.line_mesh(self.opacity)
    }
}
