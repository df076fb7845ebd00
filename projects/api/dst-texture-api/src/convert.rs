//! Pixel-for-pixel conversion between uncompressed layouts.
//!
//! Conversions that involve a block compressed format are orchestrated by
//! [`TextureAsset::convert_format`](crate::TextureAsset::convert_format), which routes them
//! through [`crate::codec`].

use crate::error::{TextureError, TextureResult};
use dst_texture_common::pixel_format::PixelFormat;

/// Converts the pixels of one uncompressed level from `from` to `to`.
///
/// - `RGB8 -> RGBA8`: copies R, G, B and sets alpha to 255.
/// - `RGBA8 -> RGB8`: copies R, G, B and drops alpha.
/// - Same format: returns a copy.
///
/// Every other pair fails with [`TextureError::UnsupportedConversion`]. `pixels` must hold a
/// whole number of `from` pixels.
///
/// ```
/// use dst_texture_api::{convert::convert_pixels, PixelFormat};
///
/// let rgba = convert_pixels(&[10, 20, 30], PixelFormat::RGB8, PixelFormat::RGBA8).unwrap();
/// assert_eq!(rgba, [10, 20, 30, 255]);
/// ```
pub fn convert_pixels(pixels: &[u8], from: PixelFormat, to: PixelFormat) -> TextureResult<Vec<u8>> {
    use PixelFormat::*;

    match (from, to) {
        (RGB8, RGBA8) => Ok(rgb_to_rgba(pixels)),
        (RGBA8, RGB8) => Ok(rgba_to_rgb(pixels)),
        (from, to) if from == to && !from.is_compressed() && from != Unknown => {
            Ok(pixels.to_vec())
        }
        (from, to) => Err(TextureError::UnsupportedConversion { from, to }),
    }
}

fn rgb_to_rgba(pixels: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len() / 3 * 4);
    for rgb in pixels.chunks_exact(3) {
        out.extend_from_slice(rgb);
        out.push(255);
    }
    out
}

fn rgba_to_rgb(pixels: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels.len() / 4 * 3);
    for rgba in pixels.chunks_exact(4) {
        out.extend_from_slice(&rgba[..3]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::rstest;

    #[test]
    fn rgb_to_rgba_synthesizes_opaque_alpha() {
        let rgba = convert_pixels(&[10, 20, 30, 40, 50, 60], PixelFormat::RGB8, PixelFormat::RGBA8)
            .unwrap();
        assert_eq!(rgba, [10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn rgba_to_rgb_drops_alpha() {
        let rgb = convert_pixels(&[10, 20, 30, 0, 1, 2, 3, 4], PixelFormat::RGBA8, PixelFormat::RGB8)
            .unwrap();
        assert_eq!(rgb, [10, 20, 30, 1, 2, 3]);
    }

    #[test]
    fn round_trip_restores_rgb() {
        let rgb = [10u8, 20, 30];
        let rgba = convert_pixels(&rgb, PixelFormat::RGB8, PixelFormat::RGBA8).unwrap();
        assert_eq!(
            convert_pixels(&rgba, PixelFormat::RGBA8, PixelFormat::RGB8).unwrap(),
            rgb
        );
    }

    #[rstest]
    #[case(PixelFormat::R8, PixelFormat::RGBA8)]
    #[case(PixelFormat::RG8, PixelFormat::RGB8)]
    #[case(PixelFormat::RGBA8, PixelFormat::R8)]
    #[case(PixelFormat::BC1, PixelFormat::RGB8)]
    #[case(PixelFormat::RGBA8, PixelFormat::BC3)]
    #[case(PixelFormat::BC1, PixelFormat::BC1)]
    #[case(PixelFormat::Unknown, PixelFormat::Unknown)]
    fn other_pairs_are_unsupported(#[case] from: PixelFormat, #[case] to: PixelFormat) {
        let error = convert_pixels(&[0; 16], from, to).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnsupportedConversion);
    }

    #[test]
    fn same_uncompressed_format_is_a_copy() {
        let pixels = [1u8, 2, 3, 4];
        assert_eq!(
            convert_pixels(&pixels, PixelFormat::RG8, PixelFormat::RG8).unwrap(),
            pixels
        );
    }
}
