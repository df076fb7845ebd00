//! # Decoded 4x4 Block
//!
//! This module provides the [`Decoded4x4Block`] structure for representing uncompressed
//! 4x4 pixel blocks used by the BC1/BC3 codecs.
//!
//! ## Overview
//!
//! Block compression formats divide a texture into 4x4 pixel blocks. The encoders consume
//! one [`Decoded4x4Block`] per output block and the decoders produce one per input block.
//! This module also moves blocks between a block and an uncompressed RGB8/RGBA8 surface:
//!
//! - [`Decoded4x4Block::from_surface_clamped`] gathers a block from a surface. Blocks that
//!   hang over the right or bottom edge replicate the nearest in-bounds pixel.
//! - [`Decoded4x4Block::write_to_surface_clipped`] scatters a block into a surface,
//!   skipping pixels that fall outside of it.
//!
//! ## Usage
//!
//! ```
//! use dst_texture_common::color_8888::Color8888;
//! use dst_texture_common::decoded_4x4_block::Decoded4x4Block;
//!
//! // Create a block filled with red pixels
//! let red_pixel = Color8888::new(255, 0, 0, 255);
//! let block = Decoded4x4Block::new(red_pixel);
//!
//! // Solid blocks are detected without looking at alpha
//! assert!(block.has_identical_pixels_ignore_alpha());
//! ```
//!
//! ## Memory Layout
//!
//! The pixels are stored in row-major order:
//! ```text
//! [ 0] [ 1] [ 2] [ 3]
//! [ 4] [ 5] [ 6] [ 7]
//! [ 8] [ 9] [10] [11]
//! [12] [13] [14] [15]
//! ```

use crate::color_8888::Color8888;
use crate::pixel_format::BLOCK_DIMENSION;

/// Represents a decoded 4x4 block of BC pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded4x4Block {
    /// The 16 pixels in the block (row-major order)
    /// (i.e. `pixels[0]` is top-left, `pixels[3]` is top-right, etc.)
    pub pixels: [Color8888; 16],
}

impl Decoded4x4Block {
    /// Constructs a new decoded block initialised with 16 copies of the provided pixel.
    ///
    /// # Examples
    ///
    /// ```
    /// use dst_texture_common::color_8888::Color8888;
    /// use dst_texture_common::decoded_4x4_block::Decoded4x4Block;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// let block = Decoded4x4Block::new(pixel);
    /// assert!(block.pixels.iter().all(|&p| p == pixel));
    /// ```
    pub fn new(pixel: Color8888) -> Self {
        Self {
            pixels: [pixel; 16],
        }
    }

    /// Gets a pixel at the specified coordinates (0-3, 0-3).
    ///
    /// # Panics
    ///
    /// If `x` or `y` is 4 or greater.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Color8888 {
        assert!(x < 4 && y < 4, "pixel ({x}, {y}) is outside of a 4x4 block");
        self.pixels[y * 4 + x]
    }

    /// Sets a pixel at the specified coordinates (0-3, 0-3).
    ///
    /// # Panics
    ///
    /// If `x` or `y` is 4 or greater.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Color8888) {
        assert!(x < 4 && y < 4, "pixel ({x}, {y}) is outside of a 4x4 block");
        self.pixels[y * 4 + x] = pixel;
    }

    /// Checks if all pixels in the block have the same color values
    /// Ignoring the alpha values.
    #[inline]
    pub fn has_identical_pixels_ignore_alpha(&self) -> bool {
        let first_pixel_no_alpha = self.pixels[0].without_alpha();
        self.pixels
            .iter()
            .all(|pixel| pixel.without_alpha() == first_pixel_no_alpha)
    }

    /// Gathers the block at block coordinates (`block_x`, `block_y`) from an uncompressed
    /// surface of `width` x `height` pixels with `channels` bytes per pixel.
    ///
    /// Pixels beyond the right/bottom edge are filled by clamping the coordinate to the
    /// last valid column/row. Surfaces with 3 channels produce fully opaque pixels.
    ///
    /// Returns [`None`] if `channels` is not 3 or 4, the surface is empty, the block lies
    /// entirely outside of the surface or `src` is shorter than `width * height * channels`.
    ///
    /// ```
    /// use dst_texture_common::decoded_4x4_block::Decoded4x4Block;
    ///
    /// // 1x1 RGB surface: the single pixel is replicated into all 16 positions.
    /// let block = Decoded4x4Block::from_surface_clamped(&[10, 20, 30], 1, 1, 3, 0, 0).unwrap();
    /// assert!(block.pixels.iter().all(|pixel| pixel == &block.pixels[0]));
    /// assert_eq!(block.pixels[15].a, 255);
    /// ```
    pub fn from_surface_clamped(
        src: &[u8],
        width: u32,
        height: u32,
        channels: usize,
        block_x: u32,
        block_y: u32,
    ) -> Option<Self> {
        if !(channels == 3 || channels == 4) || width == 0 || height == 0 {
            return None;
        }
        let origin_x = block_x.checked_mul(BLOCK_DIMENSION)?;
        let origin_y = block_y.checked_mul(BLOCK_DIMENSION)?;
        if origin_x >= width || origin_y >= height {
            return None;
        }
        if src.len() < width as usize * height as usize * channels {
            return None;
        }

        let mut block = Self::new(Color8888::default());
        for y in 0..4u32 {
            let sy = (origin_y + y).min(height - 1) as usize;
            for x in 0..4u32 {
                let sx = (origin_x + x).min(width - 1) as usize;
                let ofs = (sy * width as usize + sx) * channels;
                let alpha = if channels == 4 { src[ofs + 3] } else { 255 };
                block.pixels[(y * 4 + x) as usize] =
                    Color8888::new(src[ofs], src[ofs + 1], src[ofs + 2], alpha);
            }
        }
        Some(block)
    }

    /// Writes this block at block coordinates (`block_x`, `block_y`) into an uncompressed
    /// surface of `width` x `height` pixels with `channels` (3 or 4) bytes per pixel.
    ///
    /// Pixels that fall outside of the surface are skipped. With 3 channels the alpha
    /// component is dropped.
    ///
    /// Returns [`None`] (and writes nothing) under the same conditions as
    /// [`Self::from_surface_clamped`].
    pub fn write_to_surface_clipped(
        &self,
        dst: &mut [u8],
        width: u32,
        height: u32,
        channels: usize,
        block_x: u32,
        block_y: u32,
    ) -> Option<()> {
        if !(channels == 3 || channels == 4) || width == 0 || height == 0 {
            return None;
        }
        let origin_x = block_x.checked_mul(BLOCK_DIMENSION)?;
        let origin_y = block_y.checked_mul(BLOCK_DIMENSION)?;
        if origin_x >= width || origin_y >= height {
            return None;
        }
        if dst.len() < width as usize * height as usize * channels {
            return None;
        }

        let visible_w = (width - origin_x).min(BLOCK_DIMENSION);
        let visible_h = (height - origin_y).min(BLOCK_DIMENSION);
        for y in 0..visible_h {
            let row_start = ((origin_y + y) as usize * width as usize + origin_x as usize) * channels;
            for x in 0..visible_w {
                let pixel = self.pixels[(y * 4 + x) as usize];
                let ofs = row_start + x as usize * channels;
                dst[ofs] = pixel.r;
                dst[ofs + 1] = pixel.g;
                dst[ofs + 2] = pixel.b;
                if channels == 4 {
                    dst[ofs + 3] = pixel.a;
                }
            }
        }
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_ramp(width: u32, height: u32) -> Vec<u8> {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[x as u8, y as u8, (x + y) as u8, 200]);
            }
        }
        data
    }

    #[test]
    fn gathers_interior_block_without_clamping() {
        let surface = rgba_ramp(8, 8);
        let block = Decoded4x4Block::from_surface_clamped(&surface, 8, 8, 4, 1, 1).unwrap();
        assert_eq!(block.get_pixel(0, 0), Color8888::new(4, 4, 8, 200));
        assert_eq!(block.get_pixel(3, 3), Color8888::new(7, 7, 14, 200));
    }

    #[test]
    fn gathers_partial_block_by_replicating_edges() {
        // 6x5 surface: block (1, 1) covers x=4..7, y=4..7 but only x=4..5, y=4 exist.
        let surface = rgba_ramp(6, 5);
        let block = Decoded4x4Block::from_surface_clamped(&surface, 6, 5, 4, 1, 1).unwrap();
        assert_eq!(block.get_pixel(0, 0), Color8888::new(4, 4, 8, 200));
        assert_eq!(block.get_pixel(1, 0), Color8888::new(5, 4, 9, 200));
        assert_eq!(block.get_pixel(3, 0), Color8888::new(5, 4, 9, 200));
        assert_eq!(block.get_pixel(3, 3), Color8888::new(5, 4, 9, 200));
        assert_eq!(block.get_pixel(0, 2), Color8888::new(4, 4, 8, 200));
    }

    #[test]
    fn rejects_out_of_range_blocks_and_bad_channels() {
        let surface = rgba_ramp(4, 4);
        assert!(Decoded4x4Block::from_surface_clamped(&surface, 4, 4, 4, 1, 0).is_none());
        assert!(Decoded4x4Block::from_surface_clamped(&surface, 4, 4, 2, 0, 0).is_none());
        assert!(Decoded4x4Block::from_surface_clamped(&surface[..10], 4, 4, 4, 0, 0).is_none());
    }

    #[test]
    fn scatter_skips_pixels_outside_surface() {
        let mut block = Decoded4x4Block::new(Color8888::new(1, 2, 3, 4));
        block.set_pixel(1, 1, Color8888::new(9, 9, 9, 9));

        // 2x2 RGB surface only receives the top-left quarter of the block.
        let mut surface = vec![0u8; 2 * 2 * 3];
        block
            .write_to_surface_clipped(&mut surface, 2, 2, 3, 0, 0)
            .unwrap();
        assert_eq!(surface, vec![1, 2, 3, 1, 2, 3, 1, 2, 3, 9, 9, 9]);
    }

    #[test]
    fn identical_pixel_checks() {
        let mut block = Decoded4x4Block::new(Color8888::new(10, 10, 10, 255));
        assert!(block.has_identical_pixels_ignore_alpha());
        block.set_pixel(2, 2, Color8888::new(10, 10, 10, 0));
        assert!(block.has_identical_pixels_ignore_alpha());
        block.set_pixel(3, 3, Color8888::new(11, 10, 10, 255));
        assert!(!block.has_identical_pixels_ignore_alpha());
    }
}
