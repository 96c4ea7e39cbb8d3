use super::Aabb;
use crate::config::Placement;
use glamx::Vec3;

/// Geometry of one mesh primitive, already expressed in the model's root frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    /// Name of the mesh the primitive belongs to, if any.
    pub name: Option<String>,
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals. Same length as `positions`.
    pub normals: Vec<Vec3>,
    /// Triangle list indices into `positions`.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of triangles described by the indices.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bounding box of the vertex positions.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter().copied())
    }
}

/// A named animation clip carried by a model.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClip {
    /// Clip name, or `animation_<index>` when the file gives none.
    pub name: String,
    /// Length of the clip in seconds.
    pub duration: f32,
}

/// The in-memory renderable representation of one decoded model.
///
/// Fragments are plain data: a [`SceneRenderer`](crate::renderer::SceneRenderer)
/// uploads what it needs when a fragment is added and frees it when the
/// fragment is removed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneFragment {
    /// Display name, usually the file name of the source.
    pub name: String,
    /// Mesh primitives of the default scene.
    pub meshes: Vec<MeshData>,
    /// Bounds of every mesh, in the model's root frame.
    pub bounds: Aabb,
    /// Animation clips, in file order.
    pub animations: Vec<AnimationClip>,
}

impl SceneFragment {
    /// Creates an empty fragment with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        SceneFragment {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the bounds.
    pub fn with_bounds(mut self, bounds: Aabb) -> Self {
        self.bounds = bounds;
        self
    }

    /// Appends an animation clip.
    pub fn with_animation(mut self, name: impl Into<String>, duration: f32) -> Self {
        self.animations.push(AnimationClip {
            name: name.into(),
            duration,
        });
        self
    }

    /// Adds a mesh and grows the bounds accordingly.
    pub fn push_mesh(&mut self, mesh: MeshData) {
        self.bounds = self.bounds.merged(&mesh.bounds());
        self.meshes.push(mesh);
    }

    /// Total number of triangles over all meshes.
    pub fn num_triangles(&self) -> usize {
        self.meshes.iter().map(MeshData::num_triangles).sum()
    }

    /// Bounds of the fragment once placed in the scene.
    pub fn placed_bounds(&self, placement: &Placement) -> Aabb {
        self.bounds.mapped(|pt| placement.transform_point(pt))
    }
}
