use crate::camera::{CameraPose, OrbitLimits};
use crate::color::Color;
use crate::config::ViewerConfig;
use crate::light::LightRig;

/// Everything a renderer needs to prepare an empty scene.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneSetup {
    /// Clear color, also used for distance fog.
    pub background: Color,
    /// Lights to create.
    pub lights: LightRig,
    /// Whether shadow mapping is enabled.
    pub shadows: bool,
    /// Show a 20x20 ground grid.
    pub grid: bool,
    /// Show the world axes.
    pub axes: bool,
    /// Whether the user may orbit, pan and zoom.
    pub controls: bool,
    /// Orbit distance range of the controls.
    pub limits: OrbitLimits,
    /// Slowly orbit around the target.
    pub auto_rotate: bool,
    /// Auto-rotation speed, in radians per frame.
    pub rotation_speed: f32,
    /// Vertical field of view, in radians.
    pub fov: f32,
    /// Initial camera pose.
    pub camera: CameraPose,
    /// Initial viewport size, in pixels.
    pub size: (u32, u32),
}

impl From<&ViewerConfig> for SceneSetup {
    fn from(config: &ViewerConfig) -> Self {
        SceneSetup {
            background: config.background,
            lights: LightRig::bright(config.enable_shadows),
            shadows: config.enable_shadows,
            grid: config.enable_grid,
            axes: config.enable_axes,
            controls: config.enable_controls,
            limits: OrbitLimits {
                min_distance: config.min_distance,
                max_distance: config.max_distance,
            },
            auto_rotate: config.auto_rotate,
            rotation_speed: config.rotation_speed,
            fov: config.fov_degrees.to_radians(),
            camera: CameraPose::INITIAL,
            size: (config.width, config.height),
        }
    }
}
