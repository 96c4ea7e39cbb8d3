//! Viewer configuration with documented defaults.

use crate::color::{self, Color};
use crate::error::ConfigError;
use crate::source::ModelSource;
use glamx::{Quat, Vec3};
use std::time::Duration;

/// Where a decoded model is placed in the scene.
///
/// The rotation is given as XYZ Euler angles in radians, applied in that
/// order, matching what web pages usually provide.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Translation of the model root. Default: origin.
    pub position: Vec3,
    /// XYZ Euler angles in radians. Default: no rotation.
    pub rotation: Vec3,
    /// Per-axis scale. Default: unit scale.
    pub scale: Vec3,
}

impl Default for Placement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Placement {
    /// Origin, no rotation, unit scale.
    pub const IDENTITY: Placement = Placement {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Sets the translation.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the XYZ Euler rotation, in radians.
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the same scale factor on every axis.
    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vec3::splat(scale))
    }

    /// The rotation as a quaternion (X applied first, then Y, then Z in the parent frame).
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_rotation_x(self.rotation.x)
            * Quat::from_rotation_y(self.rotation.y)
            * Quat::from_rotation_z(self.rotation.z)
    }

    /// Maps a point from model space into the scene.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation_quat() * (point * self.scale)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.position.is_finite() {
            return Err(ConfigError::NonFinite("position"));
        }
        if !self.rotation.is_finite() {
            return Err(ConfigError::NonFinite("rotation"));
        }
        if !self.scale.is_finite() {
            return Err(ConfigError::NonFinite("scale"));
        }
        if self.scale.x == 0.0 || self.scale.y == 0.0 || self.scale.z == 0.0 {
            return Err(ConfigError::ZeroScale);
        }
        Ok(())
    }
}

/// Configuration of one viewer instance.
///
/// Every field has a default; build on top of [`ViewerConfig::default`] or one
/// of the presets with the `with_*` methods, then let [`Viewer::new`](crate::viewer::Viewer::new)
/// validate it.
///
/// # Example
/// ```
/// # use glb_viewer::ViewerConfig;
/// # use std::time::Duration;
/// let config = ViewerConfig::multiblock()
///     .with_model_sources(["a.glb", "b.glb"])
///     .with_cycle_interval(Duration::from_millis(1500))
///     .with_auto_load(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewerConfig {
    /// Placement applied to every loaded model.
    pub placement: Placement,
    /// Load as soon as the viewer is created instead of waiting for the play button. Default: `false`.
    pub auto_load: bool,
    /// Reframe the camera on a freshly loaded model. Default: `true`.
    pub refit_camera: bool,
    /// Models to display. More than one source enables cycling. Default: empty.
    pub model_sources: Vec<ModelSource>,
    /// Delay between two models while cycling. Default: 1 second.
    pub cycle_interval: Duration,
    /// Background color. Default: `0xe6f3ff`.
    pub background: Color,
    /// Let the user orbit, pan and zoom. Default: `true`.
    pub enable_controls: bool,
    /// Cast and receive shadows. Default: `true`.
    pub enable_shadows: bool,
    /// Show a ground grid. Default: `false`.
    pub enable_grid: bool,
    /// Show the world axes. Default: `false`.
    pub enable_axes: bool,
    /// Slowly orbit around the model. Default: `false`.
    pub auto_rotate: bool,
    /// Auto-rotation speed, in radians per frame. Default: `0.01`.
    pub rotation_speed: f32,
    /// Closest orbit distance. Default: `2.0`.
    pub min_distance: f32,
    /// Farthest orbit distance. Default: `50.0`.
    pub max_distance: f32,
    /// Vertical field of view in degrees. Default: `75.0`.
    pub fov_degrees: f32,
    /// Viewport width used until the container reports its size. Default: `400`.
    pub width: u32,
    /// Viewport height used until the container reports its size. Default: `300`.
    pub height: u32,
    /// How long an error banner stays visible. Default: 8 seconds.
    pub error_display: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            placement: Placement::IDENTITY,
            auto_load: false,
            refit_camera: true,
            model_sources: Vec::new(),
            cycle_interval: Duration::from_millis(1000),
            background: color::SKY_BACKGROUND,
            enable_controls: true,
            enable_shadows: true,
            enable_grid: false,
            enable_axes: false,
            auto_rotate: false,
            rotation_speed: 0.01,
            min_distance: 2.0,
            max_distance: 50.0,
            fov_degrees: 75.0,
            width: 400,
            height: 300,
            error_display: Duration::from_secs(8),
        }
    }
}

impl ViewerConfig {
    /// A viewer embedded in a page: neutral background, no helpers.
    pub fn embedded() -> Self {
        Self {
            background: color::NEUTRAL_BACKGROUND,
            ..Self::default()
        }
    }

    /// A viewer for multiblock structures: helpers on, slow auto-rotation,
    /// orbit kept farther from the model.
    pub fn multiblock() -> Self {
        Self {
            background: color::NEUTRAL_BACKGROUND,
            enable_grid: true,
            enable_axes: true,
            auto_rotate: true,
            rotation_speed: 0.005,
            min_distance: 5.0,
            width: 800,
            height: 600,
            ..Self::default()
        }
    }

    /// A viewer for a single block, shown at half scale on white.
    pub fn block() -> Self {
        Self {
            background: color::WHITE,
            placement: Placement::IDENTITY.with_uniform_scale(0.5),
            ..Self::default()
        }
    }

    /// Sets the placement of loaded models.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Sets whether the model loads without user interaction.
    pub fn with_auto_load(mut self, auto_load: bool) -> Self {
        self.auto_load = auto_load;
        self
    }

    /// Sets whether the camera is reframed on a freshly loaded model.
    pub fn with_refit_camera(mut self, refit_camera: bool) -> Self {
        self.refit_camera = refit_camera;
        self
    }

    /// Replaces the model sources with a single one.
    pub fn with_model_source(mut self, source: impl Into<ModelSource>) -> Self {
        self.model_sources = vec![source.into()];
        self
    }

    /// Replaces the model sources.
    pub fn with_model_sources<S: Into<ModelSource>>(
        mut self,
        sources: impl IntoIterator<Item = S>,
    ) -> Self {
        self.model_sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the delay between two models while cycling.
    pub fn with_cycle_interval(mut self, interval: Duration) -> Self {
        self.cycle_interval = interval;
        self
    }

    /// Sets the background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Sets the auto-rotation flag.
    pub fn with_auto_rotate(mut self, auto_rotate: bool) -> Self {
        self.auto_rotate = auto_rotate;
        self
    }

    /// Sets the orbit distance range.
    pub fn with_distance_range(mut self, min_distance: f32, max_distance: f32) -> Self {
        self.min_distance = min_distance;
        self.max_distance = max_distance;
        self
    }

    /// Sets the fallback viewport size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Checks every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.placement.validate()?;

        if !(self.min_distance.is_finite()
            && self.max_distance.is_finite()
            && self.min_distance >= 0.0
            && self.min_distance <= self.max_distance)
        {
            return Err(ConfigError::DistanceRange {
                min: self.min_distance,
                max: self.max_distance,
            });
        }

        if self.cycle_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }

        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroSize {
                width: self.width,
                height: self.height,
            });
        }

        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::FieldOfView(self.fov_degrees));
        }

        Ok(())
    }
}
