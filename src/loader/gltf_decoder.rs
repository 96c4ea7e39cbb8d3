use super::{FsResolver, ModelDecoder, Resource, ResourceResolver};
use crate::error::DecodeError;
use crate::scene::{AnimationClip, MeshData, SceneFragment};
use crate::source::ModelSource;
use glamx::{Mat4, Vec3};
use std::future::{self, Future};
use std::path::Path;

/// Decodes `.glb` and `.gltf` models with the `gltf` crate.
///
/// In-memory sources are parsed directly; URLs are fetched through the
/// resolver first. Decoding happens synchronously inside
/// [`decode`](ModelDecoder::decode); the returned future is always ready.
///
/// Only triangle primitives of the default scene (or the first scene) are
/// kept. Node transforms are baked into the vertex positions and normals.
///
/// The default decoder reads URLs from the local filesystem through
/// [`FsResolver`] and fails on `http://` or `https://` sources. Hosts serving
/// models over the network must pass their own [`ResourceResolver`] to
/// [`GltfDecoder::new`].
#[derive(Clone, Debug)]
pub struct GltfDecoder<R = FsResolver> {
    resolver: R,
}

impl Default for GltfDecoder<FsResolver> {
    fn default() -> Self {
        GltfDecoder::new(FsResolver::default())
    }
}

impl GltfDecoder<FsResolver> {
    /// Creates a decoder reading files relative to `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<std::path::PathBuf>) -> Self {
        GltfDecoder::new(FsResolver::new(base_dir))
    }
}

impl<R: ResourceResolver> GltfDecoder<R> {
    /// Creates a decoder fetching URLs through `resolver`.
    pub fn new(resolver: R) -> Self {
        GltfDecoder { resolver }
    }

    /// The resolver used for URL sources.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Decodes `source` right away.
    pub fn decode_now(&self, source: &ModelSource) -> Result<SceneFragment, DecodeError> {
        let resource = match source {
            ModelSource::Url(url) => self.resolver.resolve(url)?,
            ModelSource::Bytes { data, .. } => Resource {
                data: data.to_vec(),
                base: None,
            },
        };

        let fragment = decode_gltf(source.file_name(), &resource.data, resource.base.as_deref())?;
        log::debug!(
            "Decoded {}: {} meshes, {} triangles, {} animations.",
            source,
            fragment.meshes.len(),
            fragment.num_triangles(),
            fragment.animations.len()
        );
        Ok(fragment)
    }
}

impl<R: ResourceResolver> ModelDecoder for GltfDecoder<R> {
    fn decode(&self, source: ModelSource) -> impl Future<Output = Result<SceneFragment, DecodeError>> {
        future::ready(self.decode_now(&source))
    }
}

/// Decodes a glTF document (JSON or binary) into a fragment named `name`.
///
/// `base` is the directory external buffers are read from; without it only
/// embedded and `data:` buffers are supported.
pub fn decode_gltf(name: &str, data: &[u8], base: Option<&Path>) -> Result<SceneFragment, DecodeError> {
    let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(data)?;
    let buffers = gltf::import_buffers(&document, base, blob)?;
    let buffers: Vec<&[u8]> = buffers.iter().map(|b| b.0.as_slice()).collect();

    let mut fragment = SceneFragment::new(name);

    if let Some(scene) = document.default_scene().or_else(|| document.scenes().next()) {
        for node in scene.nodes() {
            load_node(&node, Mat4::IDENTITY, &buffers, &mut fragment);
        }
    }

    for (index, animation) in document.animations().enumerate() {
        fragment.animations.push(convert_animation(index, &animation, &buffers));
    }

    Ok(fragment)
}

fn load_node(node: &gltf::Node, parent: Mat4, buffers: &[&[u8]], fragment: &mut SceneFragment) {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        let normal_transform = transform.inverse().transpose();

        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::debug!(
                    "Skipping {:?} primitive of mesh {:?}.",
                    primitive.mode(),
                    mesh.name()
                );
                continue;
            }

            if let Some(data) = convert_primitive(&primitive, buffers, &transform, &normal_transform) {
                fragment.push_mesh(MeshData {
                    name: mesh.name().map(str::to_string),
                    ..data
                });
            }
        }
    }

    for child in node.children() {
        load_node(&child, transform, buffers, fragment);
    }
}

fn convert_primitive(
    primitive: &gltf::Primitive,
    buffers: &[&[u8]],
    transform: &Mat4,
    normal_transform: &Mat4,
) -> Option<MeshData> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).copied());

    let positions: Vec<Vec3> = reader
        .read_positions()?
        .map(|p| transform.transform_point3(Vec3::from(p)))
        .collect();

    let normals: Vec<Vec3> = match reader.read_normals() {
        Some(normals) => normals
            .map(|n| normal_transform.transform_vector3(Vec3::from(n)).normalize_or_zero())
            .collect(),
        None => vec![Vec3::Y; positions.len()],
    };

    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    Some(MeshData {
        name: None,
        positions,
        normals,
        indices,
    })
}

fn convert_animation(index: usize, animation: &gltf::Animation, buffers: &[&[u8]]) -> AnimationClip {
    let mut duration = 0.0f32;

    for channel in animation.channels() {
        let reader = channel.reader(|buffer| buffers.get(buffer.index()).copied());
        if let Some(inputs) = reader.read_inputs() {
            duration = inputs.fold(duration, f32::max);
        }
    }

    AnimationClip {
        name: animation
            .name()
            .map(str::to_string)
            .unwrap_or_else(|| format!("animation_{}", index)),
        duration,
    }
}
