//! BC3 (DXT4/DXT5) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d10/d3d10-graphics-programming-guide-resources-block-compression#bc3>
//!
//! Uses the 'ideal' rounding/computing method described in the DX9 docs, as opposed to DX10, AMD or Nvidia
//! method. The colour half is decoded exactly like a BC1 block, including the three colour
//! branch when `color0 <= color1`.

use crate::{
    alpha::{unpack_alpha_indices, AlphaPalette},
    BC3_BLOCK_SIZE,
};
use dst_texture_bc1::decode_bc1_block;
use dst_texture_common::{decoded_4x4_block::Decoded4x4Block, error::BlockCodecError};

/// Decodes a BC3 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: Pointer to the source BC3 block (must point to at least 16 bytes of valid memory)
///
/// # Returns
///
/// A [`Decoded4x4Block`] containing all 16 decoded pixels: RGB from the colour half and alpha
/// from the alpha table.
///
/// # Safety
///
/// The caller must ensure that `src` points to at least 16 bytes of valid memory.
///
/// # Example
///
/// ```
/// use dst_texture_bc3::util::decode_bc3_block;
///
/// let bc3_block = [0u8; 16]; // Compressed BC3 block
///
/// // Decode the BC3 block into a structured representation
/// let decoded = unsafe { decode_bc3_block(bc3_block.as_ptr()) };
/// assert_eq!(decoded.get_pixel(0, 0).a, 0);
/// ```
#[inline(always)]
pub unsafe fn decode_bc3_block(src: *const u8) -> Decoded4x4Block {
    // Last 8 bytes contain the color data (same format as BC1)
    let mut result = decode_bc1_block(src.add(8));

    // First 8 bytes contain the BC4 compressed alpha data
    let palette = AlphaPalette::from_endpoints(*src, *src.add(1));
    let alpha_indices = unpack_alpha_indices(&[
        *src.add(2),
        *src.add(3),
        *src.add(4),
        *src.add(5),
        *src.add(6),
        *src.add(7),
    ]);

    for (pixel, index) in result.pixels.iter_mut().zip(alpha_indices) {
        pixel.a = palette.value(index);
    }

    result
}

/// Safely wraps the unsafe [`decode_bc3_block`] function for use with slices
///
/// # Returns
///
/// A decoded block, else [`BlockCodecError::InputTooShort`] if the slice holds fewer
/// than 16 bytes.
#[inline(always)]
pub fn decode_bc3_block_from_slice(src: &[u8]) -> Result<Decoded4x4Block, BlockCodecError> {
    if src.len() < BC3_BLOCK_SIZE {
        return Err(BlockCodecError::InputTooShort {
            needed: BC3_BLOCK_SIZE,
            actual: src.len(),
        });
    }
    unsafe { Ok(decode_bc3_block(src.as_ptr())) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dst_texture_common::color_8888::Color8888;

    // There is also a fuzz test against a good known implementation in rgbcx-sys, so this is minimal/very basic.

    #[test]
    fn can_decode_bc3_block() {
        // Test case from fuzz test: white color with alpha
        let bc3_block = [
            // Alpha data (BC4 compression)
            0, 0, 0, 255, 255, 255, 255, 255, // Color data (BC1-style format)
            255, 255, // c0 = R:31 G:63 B:31 (white)
            0, 0, // c1 = R:0 G:0 B:0 (black)
            0, 0, 0, 0, // All pixels use color index 0
        ];

        let decoded = decode_bc3_block_from_slice(&bc3_block).unwrap();

        // Alpha endpoints are equal (six step mode): the first three pixels resolve to 0,
        // the rest pick up the fixed opaque entry.
        assert_eq!(decoded.get_pixel(0, 0), Color8888::new(255, 255, 255, 0));
        for pixel in &decoded.pixels[3..] {
            assert_eq!(*pixel, Color8888::new(255, 255, 255, 255));
        }
    }

    #[test]
    fn eight_step_alpha_branch() {
        // alpha0 = 200 > alpha1 = 50, pixel 0 uses index 7.
        let bc3_block = [
            200, 50, 0b0000_0111, 0, 0, 0, 0, 0, // alpha
            0xFF, 0xFF, 0x00, 0x00, 0, 0, 0, 0, // colour: white, index 0
        ];
        let decoded = decode_bc3_block_from_slice(&bc3_block).unwrap();
        assert_eq!(decoded.get_pixel(0, 0).a, ((200 + 6 * 50) / 7) as u8);
        assert_eq!(decoded.get_pixel(1, 0).a, 200);
    }

    #[test]
    fn six_step_alpha_branch() {
        // alpha0 = 50 <= alpha1 = 200, pixel 0 uses index 6, pixel 1 index 7.
        let bc3_block = [
            50, 200, 0b0011_1110, 0, 0, 0, 0, 0, // alpha
            0xFF, 0xFF, 0x00, 0x00, 0, 0, 0, 0, // colour
        ];
        let decoded = decode_bc3_block_from_slice(&bc3_block).unwrap();
        assert_eq!(decoded.get_pixel(0, 0).a, 0x00);
        assert_eq!(decoded.get_pixel(1, 0).a, 0xFF);
    }

    #[test]
    fn colour_half_follows_three_color_branch() {
        // color0 = 0 <= color1 = white: index 3 is black, alpha still comes from the table.
        let bc3_block = [
            255, 255, 0, 0, 0, 0, 0, 0, // alpha: uniform 255
            0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // colour: every pixel index 3
        ];
        let decoded = decode_bc3_block_from_slice(&bc3_block).unwrap();
        assert!(decoded
            .pixels
            .iter()
            .all(|pixel| *pixel == Color8888::new(0, 0, 0, 255)));
    }

    #[test]
    fn rejects_short_input() {
        assert_eq!(
            decode_bc3_block_from_slice(&[0u8; 15]),
            Err(BlockCodecError::InputTooShort {
                needed: 16,
                actual: 15
            })
        );
    }
}
