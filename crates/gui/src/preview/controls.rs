use glam::Vec2;

use super::camera::OrbitCamera;

/// Rotate/zoom/pan rig with damping.
///
/// Input only queues deltas. Each [`update`](OrbitControls::update) applies
/// `damping_factor` of what is pending and keeps the rest, so motion eases
/// out over a few frames after the pointer is released.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub enabled: bool,
    pub damping_factor: f32,
    /// Viewport height in points, used to convert pointer deltas
    viewport_height: f32,
    /// Pending (yaw, pitch) in radians
    rotate_delta: Vec2,
    /// Pending pan in world units along the camera's (right, up)
    pan_delta: Vec2,
    /// Pending log-scale dolly; positive moves closer
    zoom_delta: f32,
    disposed: bool,
}

impl OrbitControls {
    const ZOOM_SPEED: f32 = 0.002;
    const MIN_DISTANCE: f32 = 1e-3;
    const EPSILON: f32 = 1e-6;

    pub fn new(viewport_height: f32, damping_factor: f32) -> Self {
        Self {
            enabled: true,
            damping_factor: damping_factor.clamp(0.01, 1.0),
            viewport_height: viewport_height.max(1.0),
            rotate_delta: Vec2::ZERO,
            pan_delta: Vec2::ZERO,
            zoom_delta: 0.0,
            disposed: false,
        }
    }

    /// Pointer drag in points; a drag across the full viewport height is one turn
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        if !self.enabled {
            return;
        }
        let scale = std::f32::consts::TAU / self.viewport_height;
        self.rotate_delta += Vec2::new(-dx * scale, dy * scale);
    }

    /// Scroll delta in points; positive zooms in
    pub fn zoom(&mut self, scroll: f32) {
        if !self.enabled {
            return;
        }
        self.zoom_delta += scroll * Self::ZOOM_SPEED;
    }

    /// Pointer drag in points, converted to world units at the target
    pub fn pan(&mut self, dx: f32, dy: f32, camera: &OrbitCamera) {
        if !self.enabled {
            return;
        }
        let world_per_point =
            2.0 * camera.distance * (camera.fov * 0.5).tan() / self.viewport_height;
        self.pan_delta += Vec2::new(-dx * world_per_point, dy * world_per_point);
    }

    pub fn is_settled(&self) -> bool {
        self.rotate_delta.length() < Self::EPSILON
            && self.pan_delta.length() < Self::EPSILON
            && self.zoom_delta.abs() < Self::EPSILON
    }

    /// Advance damping by one frame. Returns `true` if the camera moved.
    pub fn update(&mut self, camera: &mut OrbitCamera) -> bool {
        if self.disposed || self.is_settled() {
            return false;
        }
        let k = self.damping_factor;

        let rot = self.rotate_delta * k;
        camera.yaw += rot.x;
        camera.pitch = (camera.pitch + rot.y).clamp(-OrbitCamera::MAX_PITCH, OrbitCamera::MAX_PITCH);

        let pan = self.pan_delta * k;
        camera.target += camera.right_vector() * pan.x + camera.up_vector() * pan.y;

        let zoom = self.zoom_delta * k;
        camera.distance = (camera.distance * (-zoom).exp()).max(Self::MIN_DISTANCE);

        self.rotate_delta -= rot;
        self.pan_delta -= pan;
        self.zoom_delta -= zoom;
        if self.is_settled() {
            self.rotate_delta = Vec2::ZERO;
            self.pan_delta = Vec2::ZERO;
            self.zoom_delta = 0.0;
        }
        true
    }

    /// Stop reacting to input and drop pending motion
    pub fn dispose(&mut self) {
        self.enabled = false;
        self.disposed = true;
        self.rotate_delta = Vec2::ZERO;
        self.pan_delta = Vec2::ZERO;
        self.zoom_delta = 0.0;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damping_applies_fraction_per_frame() {
        let mut cam = OrbitCamera::framing(2.0);
        let yaw0 = cam.yaw;
        let mut c = OrbitControls::new(300.0, 0.25);
        c.rotate(-30.0, 0.0);
        let total = 30.0 * std::f32::consts::TAU / 300.0;

        assert!(c.update(&mut cam));
        assert!((cam.yaw - yaw0 - total * 0.25).abs() < 1e-5);

        for _ in 0..200 {
            c.update(&mut cam);
        }
        assert!((cam.yaw - yaw0 - total).abs() < 1e-3);
        assert!(c.is_settled());
        assert!(!c.update(&mut cam));
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut cam = OrbitCamera::framing(2.0);
        let mut c = OrbitControls::new(300.0, 1.0);
        c.rotate(0.0, 10_000.0);
        c.update(&mut cam);
        assert_eq!(cam.pitch, OrbitCamera::MAX_PITCH);
    }

    #[test]
    fn test_zoom_in_reduces_distance() {
        let mut cam = OrbitCamera::framing(2.0);
        let d0 = cam.distance;
        let mut c = OrbitControls::new(300.0, 1.0);
        c.zoom(100.0);
        c.update(&mut cam);
        assert!(cam.distance < d0);
        assert!(cam.distance > 0.0);
    }

    #[test]
    fn test_pan_moves_target() {
        let mut cam = OrbitCamera::framing(2.0);
        let mut c = OrbitControls::new(300.0, 1.0);
        c.pan(50.0, 0.0, &cam.clone());
        c.update(&mut cam);
        assert!(cam.target.length() > 0.0);
    }

    #[test]
    fn test_disposed_controls_ignore_input() {
        let mut cam = OrbitCamera::framing(2.0);
        let before = cam.clone();
        let mut c = OrbitControls::new(300.0, 0.25);
        c.rotate(10.0, 10.0);
        c.dispose();
        c.rotate(10.0, 10.0);
        c.zoom(5.0);
        assert!(!c.update(&mut cam));
        assert_eq!(cam, before);
        assert!(c.is_disposed());
    }
}
