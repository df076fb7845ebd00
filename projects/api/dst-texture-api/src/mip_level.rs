//! A single image of a mip chain.

use crate::error::{TextureResult, ValidationError};
use dst_texture_common::pixel_format::PixelFormat;

/// One level of a mip chain: dimensions plus the raw (possibly block compressed) pixel bytes.
///
/// The buffer length always matches [`PixelFormat::level_size`] for the format of the asset
/// owning the level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipLevel {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl MipLevel {
    /// Creates a level after checking `pixels` against the size rule of `format`.
    ///
    /// ```
    /// use dst_texture_api::{MipLevel, PixelFormat};
    ///
    /// let level = MipLevel::new(2, 2, PixelFormat::RGB8, vec![0; 12]).unwrap();
    /// assert_eq!(level.data_size(), 12);
    /// assert!(MipLevel::new(2, 2, PixelFormat::RGB8, vec![0; 11]).is_err());
    /// ```
    pub fn new(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> TextureResult<Self> {
        let expected = expected_size(width, height, format)?;
        if pixels.len() != expected {
            return Err(ValidationError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            }
            .into());
        }
        Ok(Self::from_parts(width, height, pixels))
    }

    /// Creates a zero filled level.
    pub fn zeroed(width: u32, height: u32, format: PixelFormat) -> TextureResult<Self> {
        let size = expected_size(width, height, format)?;
        Ok(Self::from_parts(width, height, vec![0; size]))
    }

    /// Wraps a buffer whose size the caller already validated.
    #[inline]
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Read-only view of the pixel bytes.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Size of the pixel data in bytes.
    #[inline]
    pub fn data_size(&self) -> usize {
        self.pixels.len()
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}

/// Byte size of a `width` x `height` level in `format`, rejecting zero sizes, the
/// [`PixelFormat::Unknown`] tag and sizes that overflow.
pub(crate) fn expected_size(width: u32, height: u32, format: PixelFormat) -> TextureResult<usize> {
    if format == PixelFormat::Unknown {
        return Err(ValidationError::UnknownFormat.into());
    }
    if width == 0 || height == 0 {
        return Err(ValidationError::InvalidDimensions { width, height }.into());
    }
    format
        .level_size(width, height)
        .ok_or_else(|| ValidationError::InvalidDimensions { width, height }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case(PixelFormat::R8, 5, 3, 15)]
    #[case(PixelFormat::RGBA8, 5, 3, 60)]
    #[case(PixelFormat::BC1, 5, 3, 16)]
    #[case(PixelFormat::BC3, 1, 1, 16)]
    fn zeroed_level_has_format_size(
        #[case] format: PixelFormat,
        #[case] width: u32,
        #[case] height: u32,
        #[case] size: usize,
    ) {
        let level = MipLevel::zeroed(width, height, format).unwrap();
        assert_eq!(level.data_size(), size);
        assert!(level.pixels().iter().all(|&b| b == 0));
    }

    #[rstest]
    #[case(0, 4, PixelFormat::RGBA8)]
    #[case(4, 0, PixelFormat::RGBA8)]
    #[case(4, 4, PixelFormat::Unknown)]
    fn rejects_invalid_levels(#[case] width: u32, #[case] height: u32, #[case] format: PixelFormat) {
        let error = MipLevel::zeroed(width, height, format).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);
    }
}
