/*!
# glb-viewer

Keep It Simple, Stupid GLB/GLTF model viewer.

This library drives an embeddable 3D model viewer: given a container and one or
more model resources, it decides *when* a model is fetched and decoded, *what*
is currently displayed, and *where* the camera looks. Drawing pixels is left to
whichever 3D engine the host wraps behind the [`SceneRenderer`](renderer::SceneRenderer)
trait.

## Features
Most features are one-liners.

* load a single `.glb`/`.gltf` model, immediately or behind a play button.
* drag-and-drop a model file onto a viewer.
* preload several models and cycle through them on a timer, keeping the camera still.
* retry a failed load.
* frame the camera on the loaded model.
* export the current frame as a PNG data URL.

Loading a single model with the bundled glTF decoder:

```no_run
use glb_viewer::prelude::*;

# fn demo<R: SceneRenderer + 'static>(renderer: R) -> Result<(), ViewerError> {
let config = ViewerConfig::default().with_model_source("models/anvil.glb");
let viewer = Viewer::new("anvil", renderer, GltfDecoder::default(), config)?;

// The host drives the returned future with its executor of choice.
let task = viewer.play();
# let _ = task;
# Ok(())
# }
```

Everything runs on a single thread. Futures returned by the viewer and the
controller own their state handles, so a viewer may be disposed while a decode
is still pending: the decode then resolves to [`ViewerError::Disposed`](error::ViewerError)
and nothing is displayed.
*/
#![allow(clippy::module_inception)]
#![allow(clippy::type_complexity)]

pub use glamx;

pub mod camera;
pub mod color;
pub mod controller;
pub mod error;
pub mod event;
pub mod light;
pub mod loader;
pub mod overlay;
pub mod registry;
pub mod renderer;
pub mod scene;
pub mod source;
pub mod timer;
pub mod viewer;

mod config;

pub use crate::config::{Placement, ViewerConfig};

pub mod prelude {
    pub use crate::camera::*;
    pub use crate::color::*;
    pub use crate::config::{Placement, ViewerConfig};
    pub use crate::controller::*;
    pub use crate::error::*;
    pub use crate::event::*;
    pub use crate::light::*;
    pub use crate::loader::*;
    pub use crate::overlay::*;
    pub use crate::registry::*;
    pub use crate::renderer::*;
    pub use crate::scene::*;
    pub use crate::source::*;
    pub use crate::timer::*;
    pub use crate::viewer::*;
    pub use glamx::{Mat4, Quat, Vec3};
}
