//! Whole-surface BC1/BC3 compression and decompression.
//!
//! A surface is processed one row of blocks at a time. With the `multithreaded` feature the
//! rows are spread over the rayon thread pool; each row writes only its own slice of the
//! output, so the bytes produced are identical to the sequential path.

use crate::error::{TextureError, TextureResult, ValidationError};
use dst_texture_bc1::{decode_bc1_block_from_slice, encode_bc1_block_into};
use dst_texture_bc3::{decode_bc3_block_from_slice, encode_bc3_block_into};
use dst_texture_common::{
    decoded_4x4_block::Decoded4x4Block,
    pixel_format::{PixelFormat, BLOCK_DIMENSION},
    quality::CompressionQuality,
};

#[cfg(feature = "multithreaded")]
use rayon::prelude::*;

/// Compresses an RGBA8 surface of `width` x `height` pixels into `format` (BC1 or BC3).
///
/// Partial blocks on the right and bottom edges are padded by replicating the nearest edge
/// pixel. The result holds `ceil(width / 4) * ceil(height / 4)` blocks in row-major order.
///
/// # Errors
///
/// - [`TextureError::UnsupportedConversion`] if `format` is not block compressed.
/// - [`ValidationError::InvalidDimensions`] for a zero sized surface.
/// - [`ValidationError::BufferSizeMismatch`] if `rgba` is not `width * height * 4` bytes.
///
/// ```
/// use dst_texture_api::{codec::compress_surface, CompressionQuality, PixelFormat};
///
/// let rgba = [255u8, 0, 0, 255].repeat(6 * 5);
/// let blocks = compress_surface(&rgba, 6, 5, PixelFormat::BC1, CompressionQuality::Fast).unwrap();
/// assert_eq!(blocks.len(), 2 * 2 * 8);
/// ```
pub fn compress_surface(
    rgba: &[u8],
    width: u32,
    height: u32,
    format: PixelFormat,
    quality: CompressionQuality,
) -> TextureResult<Vec<u8>> {
    let block_size = match format {
        PixelFormat::BC1 | PixelFormat::BC3 => format.block_size().unwrap_or_default(),
        _ => {
            return Err(TextureError::UnsupportedConversion {
                from: PixelFormat::RGBA8,
                to: format,
            })
        }
    };
    check_surface(rgba.len(), width, height, PixelFormat::RGBA8)?;
    let out_size = surface_size(width, height, format)?;

    let row_bytes = width.div_ceil(BLOCK_DIMENSION) as usize * block_size;
    let mut out = vec![0u8; out_size];
    let encode_row = |(block_y, row): (usize, &mut [u8])| {
        encode_block_row(rgba, width, height, format, quality, block_y as u32, row)
    };

    #[cfg(feature = "multithreaded")]
    out.par_chunks_mut(row_bytes).enumerate().try_for_each(encode_row)?;

    #[cfg(not(feature = "multithreaded"))]
    out.chunks_mut(row_bytes).enumerate().try_for_each(encode_row)?;

    Ok(out)
}

/// Decompresses a BC1 or BC3 surface into its natural uncompressed format, as given by
/// [`PixelFormat::decompressed_format`] (RGB8 for BC1, RGBA8 for BC3).
pub fn decompress_surface(
    blocks: &[u8],
    width: u32,
    height: u32,
    format: PixelFormat,
) -> TextureResult<Vec<u8>> {
    decompress_surface_to(blocks, width, height, format, format.decompressed_format())
}

/// Decompresses a BC1 or BC3 surface into `target`, which must be RGB8 or RGBA8.
///
/// Decoded padding pixels outside of `width` x `height` are discarded. With an RGB8 target
/// the decoded alpha is dropped.
///
/// # Errors
///
/// - [`TextureError::UnsupportedConversion`] if `format` is not block compressed or `target`
///   is not RGB8/RGBA8.
/// - [`ValidationError::InvalidDimensions`] for a zero sized surface.
/// - [`ValidationError::BufferSizeMismatch`] if `blocks` does not hold exactly the blocks the
///   surface needs.
pub fn decompress_surface_to(
    blocks: &[u8],
    width: u32,
    height: u32,
    format: PixelFormat,
    target: PixelFormat,
) -> TextureResult<Vec<u8>> {
    let channels = match (format, target) {
        (PixelFormat::BC1 | PixelFormat::BC3, PixelFormat::RGB8) => 3,
        (PixelFormat::BC1 | PixelFormat::BC3, PixelFormat::RGBA8) => 4,
        (from, to) => return Err(TextureError::UnsupportedConversion { from, to }),
    };
    check_surface(blocks.len(), width, height, format)?;
    let out_size = surface_size(width, height, target)?;

    // One band is four rows of output pixels; the last band may be shorter.
    let band_bytes = width as usize * channels * BLOCK_DIMENSION as usize;
    let mut out = vec![0u8; out_size];
    let decode_row = |(block_y, band): (usize, &mut [u8])| {
        decode_block_row(blocks, width, format, channels, block_y, band)
    };

    #[cfg(feature = "multithreaded")]
    out.par_chunks_mut(band_bytes).enumerate().try_for_each(decode_row)?;

    #[cfg(not(feature = "multithreaded"))]
    out.chunks_mut(band_bytes).enumerate().try_for_each(decode_row)?;

    Ok(out)
}

fn encode_block_row(
    rgba: &[u8],
    width: u32,
    height: u32,
    format: PixelFormat,
    quality: CompressionQuality,
    block_y: u32,
    row: &mut [u8],
) -> Result<(), ValidationError> {
    let block_size = row.len() / width.div_ceil(BLOCK_DIMENSION) as usize;
    for (block_x, dst) in row.chunks_exact_mut(block_size).enumerate() {
        let block = Decoded4x4Block::from_surface_clamped(
            rgba,
            width,
            height,
            4,
            block_x as u32,
            block_y,
        )
        .ok_or(ValidationError::InvalidDimensions { width, height })?;

        match format {
            PixelFormat::BC1 => encode_bc1_block_into(&block, quality, dst)?,
            _ => encode_bc3_block_into(&block, quality, dst)?,
        }
    }
    Ok(())
}

fn decode_block_row(
    blocks: &[u8],
    width: u32,
    format: PixelFormat,
    channels: usize,
    block_y: usize,
    band: &mut [u8],
) -> Result<(), ValidationError> {
    let block_size = format.block_size().unwrap_or_default();
    let blocks_wide = width.div_ceil(BLOCK_DIMENSION) as usize;
    let band_height = (band.len() / (width as usize * channels)) as u32;
    let row = &blocks[block_y * blocks_wide * block_size..][..blocks_wide * block_size];

    for (block_x, src) in row.chunks_exact(block_size).enumerate() {
        let block = match format {
            PixelFormat::BC1 => decode_bc1_block_from_slice(src)?,
            _ => decode_bc3_block_from_slice(src)?,
        };
        // The band is its own surface, `band_height` rows tall.
        block
            .write_to_surface_clipped(band, width, band_height, channels, block_x as u32, 0)
            .ok_or(ValidationError::BufferTooSmall {
                required: width as usize * band_height as usize * channels,
                actual: band.len(),
            })?;
    }
    Ok(())
}

fn check_surface(len: usize, width: u32, height: u32, format: PixelFormat) -> TextureResult<()> {
    let expected = surface_size(width, height, format)?;
    if len != expected {
        return Err(ValidationError::BufferSizeMismatch {
            expected,
            actual: len,
        }
        .into());
    }
    Ok(())
}

#[inline]
fn surface_size(width: u32, height: u32, format: PixelFormat) -> TextureResult<usize> {
    crate::mip_level::expected_size(width, height, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::rstest;

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        let mut rgba = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                rgba.extend_from_slice(&[(x * 16) as u8, (y * 16) as u8, 96, 255]);
            }
        }
        rgba
    }

    #[rstest]
    #[case(PixelFormat::BC1, 4, 4, 8)]
    #[case(PixelFormat::BC1, 5, 9, 48)]
    #[case(PixelFormat::BC3, 1, 1, 16)]
    #[case(PixelFormat::BC3, 8, 3, 32)]
    fn compressed_size_counts_partial_blocks(
        #[case] format: PixelFormat,
        #[case] width: u32,
        #[case] height: u32,
        #[case] size: usize,
    ) {
        let blocks =
            compress_surface(&gradient(width, height), width, height, format, CompressionQuality::Fast)
                .unwrap();
        assert_eq!(blocks.len(), size);
    }

    #[rstest]
    #[case(PixelFormat::BC1, PixelFormat::RGB8)]
    #[case(PixelFormat::BC3, PixelFormat::RGBA8)]
    fn solid_surface_round_trips(#[case] format: PixelFormat, #[case] natural: PixelFormat) {
        // Exactly representable in R5G6B5.
        let rgba = [255u8, 0, 255, 255].repeat(7 * 6);
        let blocks = compress_surface(&rgba, 7, 6, format, CompressionQuality::Normal).unwrap();
        let decoded = decompress_surface(&blocks, 7, 6, format).unwrap();
        assert_eq!(format.decompressed_format(), natural);
        let channels = natural.channel_count().unwrap() as usize;
        assert_eq!(decoded.len(), 7 * 6 * channels);
        assert!(decoded.chunks_exact(channels).all(|p| p[..3] == [255, 0, 255]));
    }

    #[test]
    fn bc3_preserves_alpha_ramp_closely() {
        let mut rgba = gradient(8, 8);
        for (index, pixel) in rgba.chunks_exact_mut(4).enumerate() {
            pixel[3] = (index * 4) as u8;
        }
        let blocks = compress_surface(&rgba, 8, 8, PixelFormat::BC3, CompressionQuality::Normal)
            .unwrap();
        let decoded = decompress_surface(&blocks, 8, 8, PixelFormat::BC3).unwrap();
        for (original, decoded) in rgba.chunks_exact(4).zip(decoded.chunks_exact(4)) {
            assert!((original[3] as i32 - decoded[3] as i32).abs() <= 19);
        }
    }

    #[test]
    fn bc3_to_rgb_drops_alpha() {
        let rgba = [0u8, 255, 0, 10].repeat(16);
        let blocks = compress_surface(&rgba, 4, 4, PixelFormat::BC3, CompressionQuality::Fast)
            .unwrap();
        let rgb =
            decompress_surface_to(&blocks, 4, 4, PixelFormat::BC3, PixelFormat::RGB8).unwrap();
        assert_eq!(rgb, [0u8, 255, 0].repeat(16));
    }

    #[test]
    fn output_is_deterministic() {
        let rgba = gradient(13, 11);
        let first =
            compress_surface(&rgba, 13, 11, PixelFormat::BC1, CompressionQuality::Normal).unwrap();
        let second =
            compress_surface(&rgba, 13, 11, PixelFormat::BC1, CompressionQuality::Normal).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_wrong_sizes_and_formats() {
        let error =
            compress_surface(&[0; 15], 2, 2, PixelFormat::BC1, CompressionQuality::Fast).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);

        let error =
            compress_surface(&[0; 16], 2, 2, PixelFormat::RGB8, CompressionQuality::Fast).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnsupportedConversion);

        let error = decompress_surface(&[0; 7], 4, 4, PixelFormat::BC1).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);

        let error = decompress_surface_to(&[0; 8], 4, 4, PixelFormat::BC1, PixelFormat::R8)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnsupportedConversion);
    }
}
