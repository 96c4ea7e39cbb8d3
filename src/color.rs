//! Colors used to describe a viewer's background and lights.
//!
//! Colors are RGBA with `f32` components in the range [0.0, 1.0]. Web-style
//! `0xRRGGBB` values, as found in page configurations, are converted with
//! [`from_hex`].
//!
//! # Example
//! ```
//! # use glb_viewer::color;
//! let sky = color::from_hex(0xe6f3ff);
//! assert_eq!(sky, color::SKY_BACKGROUND);
//! ```

pub use rgb::Rgba;

/// The color type used throughout the viewer. RGBA with f32 components in [0.0, 1.0].
pub type Color = Rgba<f32>;

/// <div style="margin:2px 0"><span style="background-color:rgb(255, 255, 255);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>White (255, 255, 255)</div>
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(0, 0, 0);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Black (0, 0, 0)</div>
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(230, 243, 255);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Sky background (230, 243, 255) - default viewer background</div>
pub const SKY_BACKGROUND: Color = Color::new(0.9019608, 0.9529412, 1.0, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(240, 240, 240);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Neutral background (240, 240, 240) - embedded and multiblock viewers</div>
pub const NEUTRAL_BACKGROUND: Color = Color::new(0.9411765, 0.9411765, 0.9411765, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(136, 136, 136);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Grid center line (136, 136, 136)</div>
pub const GRID_CENTER: Color = Color::new(0.53333336, 0.53333336, 0.53333336, 1.0);

/// <div style="margin:2px 0"><span style="background-color:rgb(204, 204, 204);padding:0 0.7em;margin-right:0.5em;border:1px solid"></span>Grid line (204, 204, 204)</div>
pub const GRID_LINE: Color = Color::new(0.8, 0.8, 0.8, 1.0);

/// Converts a `0xRRGGBB` value into an opaque [`Color`].
///
/// Bits above the lowest 24 are ignored.
pub fn from_hex(rgb: u32) -> Color {
    let channel = |shift: u32| ((rgb >> shift) & 0xff) as f32 / 255.0;
    Color::new(channel(16), channel(8), channel(0), 1.0)
}

/// Converts a [`Color`] back to its `0xRRGGBB` value, rounding each channel.
pub fn to_hex(color: Color) -> u32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    (channel(color.r) << 16) | (channel(color.g) << 8) | channel(color.b)
}
