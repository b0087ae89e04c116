use glam::{Mat4, Vec3};

/// Orbit camera for the product preview, stored in spherical form around `target`
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Horizontal rotation angle (radians)
    pub yaw: f32,
    /// Vertical rotation angle (radians)
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
    /// Camera target point
    pub target: Vec3,
    /// Vertical field of view (radians)
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl OrbitCamera {
    pub const MAX_PITCH: f32 = 1.5;

    /// Camera at `position` looking at `target`
    pub fn looking_at(position: Vec3, target: Vec3, fov_degrees: f32) -> Self {
        let offset = position - target;
        let distance = offset.length();
        let (yaw, pitch) = if distance > f32::EPSILON {
            (offset.x.atan2(offset.z), (offset.y / distance).clamp(-1.0, 1.0).asin())
        } else {
            (0.0, 0.0)
        };
        Self {
            yaw,
            pitch,
            distance,
            target,
            fov: fov_degrees.to_radians(),
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Frame a block whose largest side is `max_dimension`: the eye sits at
    /// `max_dimension * 1.5` on all three axes, looking at the origin.
    pub fn framing(max_dimension: f32) -> Self {
        let d = max_dimension * 1.5;
        Self::looking_at(Vec3::splat(d), Vec3::ZERO, 50.0)
    }

    /// Camera position in world space
    pub fn eye_position(&self) -> Vec3 {
        let cy = self.yaw.cos();
        let sy = self.yaw.sin();
        let cp = self.pitch.cos();
        let sp = self.pitch.sin();

        self.target
            + Vec3::new(
                self.distance * cp * sy,
                self.distance * sp,
                self.distance * cp * cy,
            )
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye_position(), self.target, Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, aspect, self.near, self.far)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    pub fn right_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        fwd.cross(Vec3::Y).normalize_or_zero()
    }

    pub fn up_vector(&self) -> Vec3 {
        let fwd = (self.target - self.eye_position()).normalize_or_zero();
        self.right_vector().cross(fwd).normalize_or_zero()
    }
}
