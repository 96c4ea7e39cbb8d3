use crate::error::DecodeError;
use std::path::{Path, PathBuf};

/// Bytes of a resolved resource.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resource {
    /// Content of the resource.
    pub data: Vec<u8>,
    /// Directory against which relative references inside the resource
    /// (e.g. external `.bin` buffers of a `.gltf`) are resolved.
    pub base: Option<PathBuf>,
}

/// Maps a resource identifier to its bytes.
pub trait ResourceResolver {
    /// Fetches the resource identified by `url`.
    fn resolve(&self, url: &str) -> Result<Resource, DecodeError>;
}

/// Resolves identifiers as paths on the local filesystem.
///
/// `file://` prefixes are stripped; relative paths are taken from the base
/// directory. Any other URL scheme, `http://` and `https://` included, is
/// rejected: remote models need a resolver of their own.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FsResolver {
    base_dir: PathBuf,
}

impl FsResolver {
    /// Creates a resolver for paths relative to `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        FsResolver {
            base_dir: base_dir.into(),
        }
    }

    /// The directory relative paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The filesystem path an identifier designates.
    pub fn path_of(&self, url: &str) -> Result<PathBuf, DecodeError> {
        let url = url.strip_prefix("file://").unwrap_or(url);
        if let Some((scheme, _)) = url.split_once("://") {
            return Err(DecodeError::new(format!(
                "unsupported URL scheme '{}' in '{}'",
                scheme, url
            )));
        }

        let path = Path::new(url);
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            Ok(self.base_dir.join(path))
        }
    }
}

impl ResourceResolver for FsResolver {
    fn resolve(&self, url: &str) -> Result<Resource, DecodeError> {
        let path = self.path_of(url)?;
        let data = std::fs::read(&path)
            .map_err(|e| DecodeError::new(format!("failed to read {}: {}", path.display(), e)))?;
        Ok(Resource {
            data,
            base: path.parent().map(Path::to_path_buf),
        })
    }
}
