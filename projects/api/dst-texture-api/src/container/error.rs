//! Errors raised while reading or writing a DST container.

use thiserror::Error;

/// A DST container is malformed, or a texture cannot be expressed as one.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ContainerError {
    #[error("Input is empty")]
    Empty,

    #[error("Missing DST magic")]
    BadMagic,

    #[error("Header is truncated: need {required} bytes, got {actual}")]
    TruncatedHeader { required: usize, actual: usize },

    #[error("Unsupported container version {0}")]
    UnsupportedVersion(u16),

    #[error("Unknown pixel format tag {0}")]
    UnknownFormat(u16),

    #[error("Container declares no mip levels")]
    NoMipLevels,

    #[error("Base level has zero width or height ({width}x{height})")]
    ZeroDimensions { width: u32, height: u32 },

    #[error("Container declares {declared} mip levels, a {width}x{height} chain has at most {max}")]
    TooManyMipLevels {
        declared: u32,
        max: u32,
        width: u32,
        height: u32,
    },

    #[error("Mip table is truncated: need {required} bytes, got {actual}")]
    TruncatedMipTable { required: usize, actual: usize },

    #[error("Mip level {level} lies outside of the pixel data (offset {offset}, size {size}, region {region})")]
    LevelOutOfBounds {
        level: u32,
        offset: u32,
        size: u32,
        region: usize,
    },

    #[error("Mip level {level} holds {actual} bytes, expected {expected}")]
    LevelSizeMismatch {
        level: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Mip level {level} is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    LevelDimensionMismatch {
        level: u32,
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("Mip level {level} is too large to be stored")]
    LevelTooLarge { level: u32 },

    #[error("Output buffer too small: need {required} bytes, got {actual}")]
    OutputTooSmall { required: usize, actual: usize },
}
