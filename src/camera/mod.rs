//! Viewer camera: perspective frustum and model framing.

pub use self::framing::{frame_bounds, CameraPose, OrbitLimits, FRAMING_DIRECTION, FRAMING_MARGIN};
pub use self::view_camera::ViewCamera;

mod framing;
mod view_camera;
