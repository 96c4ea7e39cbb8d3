use crate::scene::Aabb;
use glamx::{Mat4, Vec3};

/// Direction, from the target, along which a freshly framed model is seen.
///
/// Looks at the model from +X, +Y and -Z, slightly from above.
pub const FRAMING_DIRECTION: Vec3 = Vec3::new(1.0, 0.6, -1.0);

/// Multiplier applied to the distance at which the model exactly fills the view.
pub const FRAMING_MARGIN: f32 = 2.0;

/// Where the camera stands and what it looks at.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraPose {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Orbit center, the point the camera looks at.
    pub target: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl CameraPose {
    /// Pose of a viewer before anything is loaded.
    pub const INITIAL: CameraPose = CameraPose {
        eye: Vec3::new(5.0, 3.0, -5.0),
        target: Vec3::ZERO,
    };

    /// Creates a pose.
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        CameraPose { eye, target }
    }

    /// Distance between the eye and the target.
    #[inline]
    pub fn distance(&self) -> f32 {
        (self.eye - self.target).length()
    }

    /// The view matrix (world to camera space), Y up.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }
}

/// Orbit distance range enforced by the controls.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrbitLimits {
    /// Closest distance to the target.
    pub min_distance: f32,
    /// Farthest distance from the target.
    pub max_distance: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        OrbitLimits {
            min_distance: 2.0,
            max_distance: 50.0,
        }
    }
}

impl OrbitLimits {
    /// Clamps a distance into the allowed range.
    #[inline]
    pub fn clamp(&self, distance: f32) -> f32 {
        distance.max(self.min_distance).min(self.max_distance)
    }
}

/// Computes a pose showing the whole of `bounds`.
///
/// The camera keeps looking along [`FRAMING_DIRECTION`] so that every freshly
/// loaded model is seen from the same side. The distance is the one at which
/// the largest dimension of the box fills the vertical field of view `fov`
/// (in radians), times [`FRAMING_MARGIN`], then clamped to `limits`.
///
/// Returns `None` for an empty box: there is nothing to look at.
pub fn frame_bounds(bounds: &Aabb, fov: f32, limits: &OrbitLimits) -> Option<CameraPose> {
    if bounds.is_empty() {
        return None;
    }

    let center = bounds.center();
    let max_dim = bounds.size().max_element();
    let distance = (max_dim / 2.0 / (fov / 2.0).tan()).abs() * FRAMING_MARGIN;
    let distance = limits.clamp(distance);

    Some(CameraPose {
        eye: center + FRAMING_DIRECTION.normalize() * distance,
        target: center,
    })
}
