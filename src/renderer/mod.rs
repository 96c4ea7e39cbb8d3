//! The seam between a viewer and the 3D engine that actually draws.

pub use self::headless::{HeadlessFragment, HeadlessRenderer};
pub use self::renderer::{FragmentId, SceneRenderer};
pub use self::setup::SceneSetup;

mod headless;
mod renderer;
mod setup;
