//! BC3 block encoder: alpha block followed by a four colour BC1 block.

use crate::{alpha::encode_alpha_block, BC3_BLOCK_SIZE};
use dst_texture_bc1::encode_color_block;
use dst_texture_common::{
    decoded_4x4_block::Decoded4x4Block, error::BlockCodecError, quality::CompressionQuality,
};

/// Encodes a 4x4 block of RGBA pixels into a 16 byte BC3 block.
///
/// The colour half never uses the three colour mode, so it decodes the same on hardware that
/// always treats BC3 colour as four colour.
///
/// ```
/// use dst_texture_bc3::{decode_bc3_block_from_slice, encode_bc3_block};
/// use dst_texture_common::{
///     color_8888::Color8888, decoded_4x4_block::Decoded4x4Block, quality::CompressionQuality,
/// };
///
/// let block = Decoded4x4Block::new(Color8888::new(0, 255, 0, 128));
/// let encoded = encode_bc3_block(&block, CompressionQuality::Fast);
/// assert_eq!(decode_bc3_block_from_slice(&encoded).unwrap(), block);
/// ```
pub fn encode_bc3_block(block: &Decoded4x4Block, quality: CompressionQuality) -> [u8; 16] {
    let alphas = block.pixels.map(|pixel| pixel.a);

    let mut out = [0u8; BC3_BLOCK_SIZE];
    out[..8].copy_from_slice(&encode_alpha_block(&alphas, quality));
    out[8..].copy_from_slice(&encode_color_block(block, quality, false));
    out
}

/// Slice variant of [`encode_bc3_block`], writing the block into the first 16 bytes of `dst`.
pub fn encode_bc3_block_into(
    block: &Decoded4x4Block,
    quality: CompressionQuality,
    dst: &mut [u8],
) -> Result<(), BlockCodecError> {
    let Some(dst) = dst.get_mut(..BC3_BLOCK_SIZE) else {
        return Err(BlockCodecError::OutputTooShort {
            needed: BC3_BLOCK_SIZE,
            actual: dst.len(),
        });
    };
    dst.copy_from_slice(&encode_bc3_block(block, quality));
    Ok(())
}
