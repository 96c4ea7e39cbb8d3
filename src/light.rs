//! Lighting description handed to the renderer when a viewer is attached.
//!
//! The viewer does not shade anything itself. It only tells the renderer which
//! lights to create; how they look is up to the wrapped engine.

use crate::color::{self, Color};
use glamx::Vec3;

/// Maximum number of lights in a rig.
pub const MAX_LIGHTS: usize = 8;

/// The type of light source.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LightType {
    /// Uniform light reaching every surface.
    Ambient,

    /// A directional light with parallel rays (like the sun), shining from
    /// `position` towards the origin.
    Directional {
        /// Where the light shines from.
        position: Vec3,
    },
}

/// A light source of the rig.
///
/// # Examples
/// ```
/// # use glb_viewer::prelude::*;
/// let sun = Light::directional(Vec3::new(5.0, 10.0, 3.0))
///     .with_intensity(1.5)
///     .with_shadows(true);
/// assert!(sun.cast_shadow);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Light {
    /// The type of light.
    pub light_type: LightType,
    /// The color of the light (RGBA, each component 0.0-1.0).
    pub color: Color,
    /// The intensity multiplier for the light.
    pub intensity: f32,
    /// Whether the light casts shadows. Only meaningful for directional lights.
    pub cast_shadow: bool,
}

impl Light {
    /// Creates a white ambient light.
    pub fn ambient(intensity: f32) -> Self {
        Self {
            light_type: LightType::Ambient,
            color: color::WHITE,
            intensity,
            cast_shadow: false,
        }
    }

    /// Creates a white directional light shining from `position`.
    pub fn directional(position: Vec3) -> Self {
        Self {
            light_type: LightType::Directional { position },
            color: color::WHITE,
            intensity: 1.0,
            cast_shadow: false,
        }
    }

    /// Sets the light color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Sets the light intensity.
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Sets whether the light casts shadows.
    pub fn with_shadows(mut self, cast_shadow: bool) -> Self {
        self.cast_shadow = cast_shadow;
        self
    }
}

/// The lights of one viewer.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightRig {
    /// The lights, at most [`MAX_LIGHTS`].
    pub lights: Vec<Light>,
}

impl LightRig {
    /// Creates an empty rig.
    pub fn new() -> Self {
        Self::default()
    }

    /// A very bright rig that leaves almost no face in the dark, suited to
    /// blocky, flat-textured models.
    ///
    /// Only the main light casts shadows, and only if `shadows` is `true`.
    pub fn bright(shadows: bool) -> Self {
        let mut rig = LightRig::new();
        let _ = rig.add(Light::ambient(1.2));
        let _ = rig.add(
            Light::directional(Vec3::new(5.0, 10.0, 3.0))
                .with_intensity(1.5)
                .with_shadows(shadows),
        );
        let _ = rig.add(Light::directional(Vec3::new(0.0, 10.0, 0.0)).with_intensity(0.8));
        let _ = rig.add(Light::directional(Vec3::new(-5.0, 5.0, -5.0)).with_intensity(0.6));
        let _ = rig.add(Light::directional(Vec3::new(5.0, 5.0, 5.0)).with_intensity(0.6));
        let _ = rig.add(Light::directional(Vec3::new(0.0, -5.0, 0.0)).with_intensity(0.4));
        rig
    }

    /// Adds a light to the rig if there's room.
    ///
    /// Returns `true` if the light was added, `false` if the rig is full.
    pub fn add(&mut self, light: Light) -> bool {
        if self.lights.len() < MAX_LIGHTS {
            self.lights.push(light);
            true
        } else {
            false
        }
    }

    /// Returns the number of lights in the rig.
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Returns `true` if the rig has no light.
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Whether any light of the rig casts shadows.
    pub fn casts_shadows(&self) -> bool {
        self.lights.iter().any(|l| l.cast_shadow)
    }
}
