use super::SceneSetup;
use crate::camera::CameraPose;
use crate::config::Placement;
use crate::scene::SceneFragment;
use image::RgbImage;

/// Identifier of a fragment added to a [`SceneRenderer`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FragmentId(pub u64);

/// The 3D engine wrapped by a viewer.
///
/// A viewer only ever talks to its engine through this trait: it adds and
/// removes decoded fragments, moves the camera, and asks for snapshots.
/// Scene graph, shading, shadows and orbit controls are the engine's business.
///
/// All calls happen on the viewer's thread, never concurrently.
pub trait SceneRenderer {
    /// Prepares the scene (background, lights, helpers, controls).
    ///
    /// Called once, before anything else.
    fn attach(&mut self, setup: &SceneSetup);

    /// Adds a decoded fragment to the scene at the given placement.
    ///
    /// The renderer uploads whatever it needs; `fragment` may be dropped
    /// afterwards.
    fn add_fragment(&mut self, fragment: &SceneFragment, placement: &Placement) -> FragmentId;

    /// Removes a fragment from the scene and releases its resources.
    ///
    /// Removing an unknown identifier is a no-op.
    fn remove_fragment(&mut self, id: FragmentId);

    /// Moves the camera and the orbit center.
    fn set_camera(&mut self, pose: CameraPose);

    /// The current camera pose, including user orbit changes.
    fn camera(&self) -> CameraPose;

    /// Plays the animation clip `clip` of a fragment, stopping the others.
    #[inline]
    fn play_animation(&mut self, _id: FragmentId, _clip: usize) {}

    /// Stops every animation of a fragment.
    #[inline]
    fn stop_animation(&mut self, _id: FragmentId) {}

    /// Called when the container was resized.
    #[inline]
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Renders one frame at `width` x `height` into an image.
    ///
    /// Returns `None` if the renderer cannot read back frames.
    #[inline]
    fn snapshot(&mut self, _width: u32, _height: u32) -> Option<RgbImage> {
        None
    }

    /// Tears the scene down. No other method is called afterwards.
    fn detach(&mut self);
}

impl<R: SceneRenderer + ?Sized> SceneRenderer for Box<R> {
    fn attach(&mut self, setup: &SceneSetup) {
        (**self).attach(setup)
    }

    fn add_fragment(&mut self, fragment: &SceneFragment, placement: &Placement) -> FragmentId {
        (**self).add_fragment(fragment, placement)
    }

    fn remove_fragment(&mut self, id: FragmentId) {
        (**self).remove_fragment(id)
    }

    fn set_camera(&mut self, pose: CameraPose) {
        (**self).set_camera(pose)
    }

    fn camera(&self) -> CameraPose {
        (**self).camera()
    }

    fn play_animation(&mut self, id: FragmentId, clip: usize) {
        (**self).play_animation(id, clip)
    }

    fn stop_animation(&mut self, id: FragmentId) {
        (**self).stop_animation(id)
    }

    fn resize(&mut self, width: u32, height: u32) {
        (**self).resize(width, height)
    }

    fn snapshot(&mut self, width: u32, height: u32) -> Option<RgbImage> {
        (**self).snapshot(width, height)
    }

    fn detach(&mut self) {
        (**self).detach()
    }
}
