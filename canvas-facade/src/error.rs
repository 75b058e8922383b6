//! Error types for canvas-facade.

use thiserror::Error;

/// Result type alias using CanvasError.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in canvas operations.
///
/// Out-of-range coordinates in pixel transfers are not errors; those writes
/// are skipped.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Color keyword not present in the CSS color table.
    #[error("Unknown color name: '{0}'")]
    UnknownColorName(String),

    /// Malformed hex or `rgba(...)` color text.
    #[error("Failed to parse color: {0}")]
    InvalidColor(String),

    /// Curve operation issued without an established current point.
    #[error("Curve requires a current point: {0}")]
    InvalidCurvePrecondition(&'static str),

    /// Invalid canvas dimensions (must be positive and within limits).
    #[error("Invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Argument outside its accepted domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Image decoding error.
    #[error("Image decoding error: {0}")]
    ImageDecode(String),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    Png(String),

    /// File system error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Payload-free classification of [`CanvasError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnknownColorName,
    InvalidColor,
    InvalidCurvePrecondition,
    InvalidDimensions,
    InvalidArgument,
    ImageDecode,
    Png,
    Io,
}

impl CanvasError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CanvasError::UnknownColorName(_) => ErrorKind::UnknownColorName,
            CanvasError::InvalidColor(_) => ErrorKind::InvalidColor,
            CanvasError::InvalidCurvePrecondition(_) => ErrorKind::InvalidCurvePrecondition,
            CanvasError::InvalidDimensions { .. } => ErrorKind::InvalidDimensions,
            CanvasError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            CanvasError::ImageDecode(_) => ErrorKind::ImageDecode,
            CanvasError::Png(_) => ErrorKind::Png,
            CanvasError::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<png::EncodingError> for CanvasError {
    fn from(err: png::EncodingError) -> Self {
        CanvasError::Png(err.to_string())
    }
}

impl From<image::ImageError> for CanvasError {
    fn from(err: image::ImageError) -> Self {
        CanvasError::ImageDecode(err.to_string())
    }
}
