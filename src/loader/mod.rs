//! Turning model sources into scene fragments.

pub use self::gltf_decoder::GltfDecoder;
pub use self::resolver::{FsResolver, Resource, ResourceResolver};

use crate::error::DecodeError;
use crate::scene::SceneFragment;
use crate::source::ModelSource;
use std::future::Future;

mod gltf_decoder;
mod resolver;

/// Asynchronously decodes a model source into a [`SceneFragment`].
///
/// Decoders are called from a single thread and may keep the returned future
/// pending for as long as fetching and parsing take. A viewer never has two
/// decodes of its own in flight at the same time.
pub trait ModelDecoder {
    /// Fetches and decodes `source`.
    fn decode(&self, source: ModelSource) -> impl Future<Output = Result<SceneFragment, DecodeError>>;
}
