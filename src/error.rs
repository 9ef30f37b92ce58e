//! Error types for rendering

use crate::mesh::MeshError;

/// Error type for render operations
#[derive(Debug)]
pub enum RenderError {
    /// Framebuffer dimensions must both be non-zero
    InvalidDimensions { width: usize, height: usize },
    /// A face references a vertex or texture coordinate that does not exist
    IndexOutOfRange { face: usize, kind: &'static str, index: usize, len: usize },
    /// Image does not fit the 32-bit BMP header fields
    ImageTooLarge { width: usize, height: usize },
    IoError(std::io::Error),
    ImageError(image::ImageError),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    MeshError(MeshError),
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::IoError(e)
    }
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        RenderError::ImageError(e)
    }
}

impl From<ron::error::SpannedError> for RenderError {
    fn from(e: ron::error::SpannedError) -> Self {
        RenderError::ParseError(e)
    }
}

impl From<ron::Error> for RenderError {
    fn from(e: ron::Error) -> Self {
        RenderError::SerializeError(e)
    }
}

impl From<MeshError> for RenderError {
    fn from(e: MeshError) -> Self {
        RenderError::MeshError(e)
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::InvalidDimensions { width, height } => {
                write!(f, "Invalid framebuffer size {}x{}", width, height)
            }
            RenderError::IndexOutOfRange { face, kind, index, len } => write!(
                f,
                "Face {} references {} {} but only {} exist",
                face, kind, index, len
            ),
            RenderError::ImageTooLarge { width, height } => {
                write!(f, "Image {}x{} is too large for BMP", width, height)
            }
            RenderError::IoError(e) => write!(f, "IO error: {}", e),
            RenderError::ImageError(e) => write!(f, "Image error: {}", e),
            RenderError::ParseError(e) => write!(f, "Config parse error: {}", e),
            RenderError::SerializeError(e) => write!(f, "Config serialize error: {}", e),
            RenderError::MeshError(e) => write!(f, "Mesh error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}
