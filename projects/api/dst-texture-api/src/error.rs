//! Error types for texture operations.

use crate::container::ContainerError;
use crate::file_io::FileIoError;
use dst_texture_common::error::BlockCodecError;
use dst_texture_common::pixel_format::PixelFormat;
use thiserror::Error;

/// Result type for texture operations
pub type TextureResult<T> = Result<T, TextureError>;

/// Coarse classification of a [`TextureError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Opening, reading or writing a file failed.
    Io,
    /// The input bytes are not a valid container or image.
    Format,
    /// There is no conversion path between the two formats.
    UnsupportedConversion,
    /// A caller supplied argument was rejected.
    Validation,
    /// The operation needs at least one mip level.
    EmptyAsset,
}

/// Arguments rejected before any work was done.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Requested mip level does not exist
    #[error("Mip level {level} is out of range (asset has {count} levels)")]
    MipOutOfRange { level: usize, count: usize },

    /// Pixel buffer length does not match the level's dimensions and format
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual} bytes")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Width or height is zero, or the level size does not fit in memory
    #[error("Invalid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Input buffer is shorter than the operation needs
    #[error("Buffer too small: required {required} bytes, got {actual} bytes")]
    BufferTooSmall { required: usize, actual: usize },

    /// [`PixelFormat::Unknown`] cannot hold pixel data
    #[error("Pixel format is unknown")]
    UnknownFormat,
}

/// Errors that can occur during texture operations
#[derive(Debug, Error)]
pub enum TextureError {
    /// I/O operation failed
    #[error("I/O operation failed: {0}")]
    Io(#[from] FileIoError),

    /// The DST container is malformed
    #[error("Invalid DST container: {0}")]
    Format(#[from] ContainerError),

    /// The generic image decoder rejected the input
    #[error("Image decoding failed: {0}")]
    Decode(#[from] image::ImageError),

    /// No conversion between the two formats
    #[error("Unsupported conversion from {from} to {to}")]
    UnsupportedConversion { from: PixelFormat, to: PixelFormat },

    /// Argument validation failed
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The asset holds no mip levels
    #[error("Texture asset has no mip levels")]
    EmptyAsset,
}

impl TextureError {
    /// Maps the error onto its [`ErrorKind`].
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::Format(_) | Self::Decode(_) => ErrorKind::Format,
            Self::UnsupportedConversion { .. } => ErrorKind::UnsupportedConversion,
            Self::Validation(_) => ErrorKind::Validation,
            Self::EmptyAsset => ErrorKind::EmptyAsset,
        }
    }
}

impl From<BlockCodecError> for ValidationError {
    fn from(e: BlockCodecError) -> Self {
        match e {
            BlockCodecError::InputTooShort { needed, actual }
            | BlockCodecError::OutputTooShort { needed, actual } => Self::BufferTooSmall {
                required: needed,
                actual,
            },
        }
    }
}

impl From<BlockCodecError> for TextureError {
    fn from(e: BlockCodecError) -> Self {
        Self::Validation(e.into())
    }
}
