//! Model sources: where the bytes of a model come from.

use crate::error::ViewerError;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// File extensions accepted by drag-and-drop, compared case-insensitively.
pub const MODEL_EXTENSIONS: [&str; 2] = ["glb", "gltf"];

/// A model resource handed to a [`ModelDecoder`](crate::loader::ModelDecoder).
///
/// URLs are opaque to the viewer: only the decoder gives them a meaning.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelSource {
    /// A resource identifier, usually a URL or a path.
    Url(String),
    /// Bytes already in memory, e.g. a file dropped by the user.
    #[cfg_attr(feature = "serde", serde(skip))]
    Bytes {
        /// Original file name, used for logging and extension checks.
        name: String,
        /// File content.
        data: Arc<[u8]>,
    },
}

impl ModelSource {
    /// Creates a source from an in-memory file.
    pub fn from_bytes(name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        ModelSource::Bytes {
            name: name.into(),
            data: data.into(),
        }
    }

    /// Creates a source for a file dropped onto a viewer.
    ///
    /// Fails with [`ViewerError::UnsupportedFile`] unless the name ends with
    /// `.glb` or `.gltf`.
    pub fn dropped(name: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Result<Self, ViewerError> {
        let source = Self::from_bytes(name, data);
        source.ensure_model_file()?;
        Ok(source)
    }

    /// The last path segment of the URL, or the file name of in-memory bytes.
    pub fn file_name(&self) -> &str {
        match self {
            ModelSource::Url(url) => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                path.rsplit(['/', '\\']).next().unwrap_or(path)
            }
            ModelSource::Bytes { name, .. } => name,
        }
    }

    /// Whether the file name carries a `.glb` or `.gltf` extension.
    pub fn is_model_file(&self) -> bool {
        is_model_file_name(self.file_name())
    }

    /// Returns [`ViewerError::UnsupportedFile`] when [`is_model_file`](Self::is_model_file) is `false`.
    pub fn ensure_model_file(&self) -> Result<(), ViewerError> {
        if self.is_model_file() {
            Ok(())
        } else {
            Err(ViewerError::UnsupportedFile(self.file_name().to_string()))
        }
    }
}

/// Whether `name` ends with one of the [`MODEL_EXTENSIONS`].
pub fn is_model_file_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| {
            MODEL_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
}

impl fmt::Debug for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::Url(url) => f.debug_tuple("Url").field(url).finish(),
            ModelSource::Bytes { name, data } => f
                .debug_struct("Bytes")
                .field("name", name)
                .field("len", &data.len())
                .finish(),
        }
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::Url(url) => f.write_str(url),
            ModelSource::Bytes { name, data } => write!(f, "{} ({} bytes)", name, data.len()),
        }
    }
}

impl From<&str> for ModelSource {
    fn from(url: &str) -> Self {
        ModelSource::Url(url.to_string())
    }
}

impl From<String> for ModelSource {
    fn from(url: String) -> Self {
        ModelSource::Url(url)
    }
}

impl From<&Path> for ModelSource {
    fn from(path: &Path) -> Self {
        ModelSource::Url(path.to_string_lossy().into_owned())
    }
}
