//! Error types reported by viewers, decoders and configuration checks.

use thiserror::Error;

/// Errors surfaced by a viewer or its model display controller.
///
/// Setup errors ([`ContainerNotFound`](ViewerError::ContainerNotFound),
/// [`InvalidConfig`](ViewerError::InvalidConfig)) prevent a viewer from being
/// created. Every other variant is recoverable and is returned as a value from
/// the operation that failed.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ViewerError {
    /// The host has no container with this identifier.
    #[error("container '{0}' not found")]
    ContainerNotFound(String),
    /// A load is already in flight for this viewer.
    #[error("a model is already loading")]
    AlreadyLoading,
    /// A model cycle is already preloading or running.
    #[error("a model cycle is already running")]
    CycleActive,
    /// The decoder failed to produce a scene fragment.
    #[error("failed to load model: {reason}")]
    DecodeFailure {
        /// Human-readable cause reported by the decoder.
        reason: String,
    },
    /// No model source was configured or given.
    #[error("no model source specified")]
    NoSourceSpecified,
    /// The viewer was disposed before the operation could complete.
    #[error("viewer has been disposed")]
    Disposed,
    /// The configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// A dropped file is not a `.glb` or `.gltf` file.
    #[error("unsupported file '{0}', expected a .glb or .gltf file")]
    UnsupportedFile(String),
    /// The renderer cannot capture frames.
    #[error("the renderer cannot capture snapshots")]
    SnapshotUnavailable,
    /// Encoding a snapshot failed.
    #[error("failed to encode snapshot: {0}")]
    Image(String),
}

impl ViewerError {
    /// Whether retrying the same operation later may succeed.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            ViewerError::ContainerNotFound(_)
                | ViewerError::InvalidConfig(_)
                | ViewerError::Disposed
        )
    }
}

impl From<DecodeError> for ViewerError {
    fn from(err: DecodeError) -> Self {
        ViewerError::DecodeFailure { reason: err.reason }
    }
}

impl From<image::ImageError> for ViewerError {
    fn from(err: image::ImageError) -> Self {
        ViewerError::Image(err.to_string())
    }
}

/// Failure reported by a [`ModelDecoder`](crate::loader::ModelDecoder).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct DecodeError {
    /// Human-readable cause.
    pub reason: String,
}

impl DecodeError {
    /// Creates a decode error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<gltf::Error> for DecodeError {
    fn from(err: gltf::Error) -> Self {
        DecodeError::new(err.to_string())
    }
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        DecodeError::new(err.to_string())
    }
}

/// Rejected [`ViewerConfig`](crate::ViewerConfig) values.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// A placement vector contains NaN or infinite components.
    #[error("{0} must only contain finite components")]
    NonFinite(&'static str),
    /// A scale component is zero, which would collapse the model.
    #[error("scale components must be non-zero")]
    ZeroScale,
    /// The orbit distance range is empty or negative.
    #[error("invalid orbit distance range [{min}, {max}]")]
    DistanceRange {
        /// Minimum orbit distance.
        min: f32,
        /// Maximum orbit distance.
        max: f32,
    },
    /// The cycle interval is zero.
    #[error("cycle interval must be positive")]
    ZeroInterval,
    /// The fallback viewport size is zero.
    #[error("viewport size must be positive, got {width}x{height}")]
    ZeroSize {
        /// Fallback width in pixels.
        width: u32,
        /// Fallback height in pixels.
        height: u32,
    },
    /// The field of view is outside `(0, 180)` degrees.
    #[error("field of view must be in (0, 180) degrees, got {0}")]
    FieldOfView(f32),
}
