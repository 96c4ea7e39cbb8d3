use super::{frame_bounds, CameraPose, OrbitLimits};
use crate::scene::Aabb;
use glamx::{Mat4, Vec2, Vec3, Vec4Swizzles};

/// The perspective camera of one viewer.
///
/// It keeps the frustum in sync with the viewport size and remembers the pose
/// last sent to the renderer, so that framing a model only needs its bounds.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewCamera {
    pose: CameraPose,
    limits: OrbitLimits,
    fov: f32,
    znear: f32,
    zfar: f32,
    proj: Mat4,
    inv_proj: Mat4,
    last_framebuffer_size: Vec2,
}

impl Default for ViewCamera {
    fn default() -> Self {
        Self::new(75.0_f32.to_radians(), 400, 300)
    }
}

impl ViewCamera {
    /// Creates a camera at [`CameraPose::INITIAL`] with a vertical field of view
    /// `fov` (radians) and a viewport of `width` x `height` pixels.
    ///
    /// The frustum spans from 0.1 to 1000 units.
    pub fn new(fov: f32, width: u32, height: u32) -> ViewCamera {
        ViewCamera::new_with_frustum(fov, 0.1, 1000.0, width, height)
    }

    /// Creates a camera with explicit clipping planes.
    pub fn new_with_frustum(fov: f32, znear: f32, zfar: f32, width: u32, height: u32) -> ViewCamera {
        let mut res = ViewCamera {
            pose: CameraPose::INITIAL,
            limits: OrbitLimits::default(),
            fov,
            znear,
            zfar,
            proj: Mat4::IDENTITY,
            inv_proj: Mat4::IDENTITY,
            last_framebuffer_size: Vec2::new(width.max(1) as f32, height.max(1) as f32),
        };
        res.update_projviews();
        res
    }

    /// Sets the orbit distance range used when framing.
    pub fn with_limits(mut self, limits: OrbitLimits) -> Self {
        self.limits = limits;
        self
    }

    fn update_projviews(&mut self) {
        let aspect = self.last_framebuffer_size.x / self.last_framebuffer_size.y;
        self.proj = Mat4::perspective_rh_gl(self.fov, aspect, self.znear, self.zfar);
        self.inv_proj = self.proj.inverse();
    }

    /// Updates the aspect ratio after the viewport was resized.
    ///
    /// Zero sizes are ignored: a hidden container keeps its last known size.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.last_framebuffer_size = Vec2::new(width as f32, height as f32);
        self.update_projviews();
    }

    /// The viewport size, in pixels.
    pub fn viewport(&self) -> Vec2 {
        self.last_framebuffer_size
    }

    /// Width divided by height of the viewport.
    pub fn aspect(&self) -> f32 {
        self.last_framebuffer_size.x / self.last_framebuffer_size.y
    }

    /// The vertical field of view, in radians.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    /// The near and far clipping plane distances.
    pub fn clip_planes(&self) -> (f32, f32) {
        (self.znear, self.zfar)
    }

    /// The orbit distance range.
    pub fn limits(&self) -> &OrbitLimits {
        &self.limits
    }

    /// The current pose.
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Replaces the current pose.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
    }

    /// Moves the camera so that `bounds` is fully visible.
    ///
    /// Returns the new pose, or `None` (leaving the camera untouched) for empty bounds.
    pub fn frame(&mut self, bounds: &Aabb) -> Option<CameraPose> {
        let pose = frame_bounds(bounds, self.fov, &self.limits)?;
        self.pose = pose;
        Some(pose)
    }

    /// The projection matrix.
    pub fn projection(&self) -> Mat4 {
        self.proj
    }

    /// The combined projection and view matrix.
    pub fn transformation(&self) -> Mat4 {
        self.proj * self.pose.view_matrix()
    }

    /// The inverse of [`transformation`](Self::transformation).
    pub fn inverse_transformation(&self) -> Mat4 {
        self.pose.view_matrix().inverse() * self.inv_proj
    }

    /// Projects a world-space point to viewport coordinates (pixels).
    pub fn project(&self, world_coord: Vec3) -> Vec2 {
        let size = self.last_framebuffer_size;
        let h_normalized_coord = self.transformation() * world_coord.extend(1.0);
        let normalized_coord = h_normalized_coord.xyz() / h_normalized_coord.w;

        Vec2::new(
            (1.0 + normalized_coord.x) * size.x / 2.0,
            (1.0 + normalized_coord.y) * size.y / 2.0,
        )
    }
}
