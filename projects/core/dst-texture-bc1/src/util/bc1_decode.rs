//! BC1 (DXT1) decoding implementation; based on etcpak
//! <https://github.com/wolfpld/etcpak> and MSDN
//! <https://learn.microsoft.com/en-us/windows/win32/direct3d9/opaque-and-1-bit-alpha-textures>
//!
//! Uses the 'ideal' rounding/computing method described in the DX9 docs, as opposed to DX10, AMD or Nvidia
//! method.

use crate::{palette::Bc1Palette, BC1_BLOCK_SIZE};
use dst_texture_common::{
    color_565::Color565, color_8888::Color8888, decoded_4x4_block::Decoded4x4Block,
    error::BlockCodecError,
};

/// Decodes a BC1 block into a structured representation of pixels
///
/// # Parameters
///
/// - `src`: Pointer to the source BC1 block (must point to at least 8 bytes of valid memory)
///
/// # Returns
///
/// A [`Decoded4x4Block`] containing all 16 decoded pixels. Pixels using index 3 of a
/// three colour block come out as transparent black, every other pixel is opaque.
///
/// # Safety
///
/// The caller must ensure that `src` points to at least 8 bytes of valid memory.
///
/// # Example
///
/// ```
/// use dst_texture_bc1::util::decode_bc1_block;
///
/// let bc1_block = [0u8; 8]; // Compressed BC1 block
///
/// // Decode the BC1 block into a structured representation
/// let decoded = unsafe { decode_bc1_block(bc1_block.as_ptr()) };
/// let pixel_at_0_0 = decoded.get_pixel(0, 0);
/// assert_eq!(pixel_at_0_0.a, 255);
/// ```
#[inline(always)]
pub unsafe fn decode_bc1_block(src: *const u8) -> Decoded4x4Block {
    // Extract color endpoints and index data
    let c0_raw: u16 = u16::from_le_bytes([*src, *src.add(1)]);
    let c1_raw: u16 = u16::from_le_bytes([*src.add(2), *src.add(3)]);
    let idx: u32 = u32::from_le_bytes([*src.add(4), *src.add(5), *src.add(6), *src.add(7)]);

    let palette = Bc1Palette::from_endpoints(Color565::from_raw(c0_raw), Color565::from_raw(c1_raw));
    let mut result = Decoded4x4Block::new(Color8888::new(0, 0, 0, 0));

    // Decode indices and set pixels
    let mut index_pos = 0;
    for pixel in result.pixels.iter_mut() {
        *pixel = palette.color(idx >> index_pos);
        index_pos += 2;
    }

    result
}

/// Safely wraps the unsafe [`decode_bc1_block`] function for use with slices
///
/// # Returns
///
/// A decoded block, else [`BlockCodecError::InputTooShort`] if the slice holds fewer
/// than 8 bytes.
#[inline(always)]
pub fn decode_bc1_block_from_slice(src: &[u8]) -> Result<Decoded4x4Block, BlockCodecError> {
    if src.len() < BC1_BLOCK_SIZE {
        return Err(BlockCodecError::InputTooShort {
            needed: BC1_BLOCK_SIZE,
            actual: src.len(),
        });
    }
    unsafe { Ok(decode_bc1_block(src.as_ptr())) }
}
