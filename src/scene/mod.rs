//! Decoded models and their spatial extent.

pub use self::bounds::Aabb;
pub use self::fragment::{AnimationClip, MeshData, SceneFragment};

mod bounds;
mod fragment;
