use super::{FragmentId, SceneRenderer, SceneSetup};
use crate::camera::CameraPose;
use crate::color;
use crate::config::Placement;
use crate::scene::SceneFragment;
use image::{Rgb, RgbImage};
use std::collections::BTreeMap;

/// What a [`HeadlessRenderer`] keeps of a fragment.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessFragment {
    /// Name of the fragment.
    pub name: String,
    /// Where it was placed.
    pub placement: Placement,
    /// Its triangle count.
    pub triangles: usize,
    /// The animation clip playing, if any.
    pub animation: Option<usize>,
}

/// A renderer that draws nothing.
///
/// It keeps track of the scene content and the camera, which is enough to run
/// viewers on a server (e.g. to validate models) or in tests. Snapshots are
/// filled with the background color.
#[derive(Clone, Debug, Default)]
pub struct HeadlessRenderer {
    setup: Option<SceneSetup>,
    fragments: BTreeMap<FragmentId, HeadlessFragment>,
    camera: CameraPose,
    size: (u32, u32),
    next_id: u64,
    added: usize,
    removed: usize,
    attached: bool,
}

impl HeadlessRenderer {
    /// Creates a detached renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The setup received on attach.
    pub fn setup(&self) -> Option<&SceneSetup> {
        self.setup.as_ref()
    }

    /// Whether the renderer is between `attach` and `detach`.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Fragments currently in the scene.
    pub fn fragments(&self) -> impl Iterator<Item = (FragmentId, &HeadlessFragment)> {
        self.fragments.iter().map(|(id, f)| (*id, f))
    }

    /// A fragment currently in the scene.
    pub fn fragment(&self, id: FragmentId) -> Option<&HeadlessFragment> {
        self.fragments.get(&id)
    }

    /// Number of fragments currently in the scene.
    pub fn live_fragments(&self) -> usize {
        self.fragments.len()
    }

    /// Names of the fragments currently in the scene, in insertion order.
    pub fn live_names(&self) -> Vec<&str> {
        self.fragments.values().map(|f| f.name.as_str()).collect()
    }

    /// How many fragments were ever added.
    pub fn added_count(&self) -> usize {
        self.added
    }

    /// How many fragments were removed.
    pub fn removed_count(&self) -> usize {
        self.removed
    }

    /// The last size given to `resize`, or the setup size.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl SceneRenderer for HeadlessRenderer {
    fn attach(&mut self, setup: &SceneSetup) {
        self.camera = setup.camera;
        self.size = setup.size;
        self.setup = Some(setup.clone());
        self.attached = true;
    }

    fn add_fragment(&mut self, fragment: &SceneFragment, placement: &Placement) -> FragmentId {
        let id = FragmentId(self.next_id);
        self.next_id += 1;
        self.added += 1;
        let _ = self.fragments.insert(
            id,
            HeadlessFragment {
                name: fragment.name.clone(),
                placement: *placement,
                triangles: fragment.num_triangles(),
                animation: None,
            },
        );
        id
    }

    fn remove_fragment(&mut self, id: FragmentId) {
        if self.fragments.remove(&id).is_some() {
            self.removed += 1;
        }
    }

    fn set_camera(&mut self, pose: CameraPose) {
        self.camera = pose;
    }

    fn camera(&self) -> CameraPose {
        self.camera
    }

    fn play_animation(&mut self, id: FragmentId, clip: usize) {
        if let Some(fragment) = self.fragments.get_mut(&id) {
            fragment.animation = Some(clip);
        }
    }

    fn stop_animation(&mut self, id: FragmentId) {
        if let Some(fragment) = self.fragments.get_mut(&id) {
            fragment.animation = None;
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn snapshot(&mut self, width: u32, height: u32) -> Option<RgbImage> {
        let background = self
            .setup
            .as_ref()
            .map_or(color::BLACK, |setup| setup.background);
        let hex = color::to_hex(background);
        let pixel = Rgb([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]);
        Some(RgbImage::from_pixel(width, height, pixel))
    }

    fn detach(&mut self) {
        let removed = self.fragments.len();
        self.fragments.clear();
        self.removed += removed;
        self.attached = false;
    }
}
