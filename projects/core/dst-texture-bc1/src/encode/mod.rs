//! BC1 block encoder.
//!
//! Every candidate endpoint pair is scored against the exact [`Bc1Palette`] a decoder will
//! build, so the chosen block is the best of the candidates as it will actually decode.
//!
//! - [`CompressionQuality::Fast`]: inset bounding box only, always four colour mode.
//! - [`CompressionQuality::Normal`]: also tries the principal axis endpoints, one least
//!   squares refinement of the best four colour fit and (for BC1) the three colour mode.

mod endpoints;

use crate::{palette::Bc1Palette, BC1_BLOCK_SIZE};
use dst_texture_common::{
    color_565::Color565, decoded_4x4_block::Decoded4x4Block, error::BlockCodecError,
    quality::CompressionQuality,
};
use endpoints::{bounding_box_endpoints, principal_axis_endpoints, refine_endpoints};

/// Encodes a 4x4 block of pixels into an 8 byte BC1 block. Alpha is ignored.
///
/// With [`CompressionQuality::Normal`] the three colour mode may be picked when it gives a
/// lower error; its index 3 then decodes as black.
///
/// ```
/// use dst_texture_bc1::{decode_bc1_block_from_slice, encode_bc1_block};
/// use dst_texture_common::{
///     color_8888::Color8888, decoded_4x4_block::Decoded4x4Block, quality::CompressionQuality,
/// };
///
/// let block = Decoded4x4Block::new(Color8888::new(255, 0, 0, 255));
/// let encoded = encode_bc1_block(&block, CompressionQuality::Normal);
/// let decoded = decode_bc1_block_from_slice(&encoded).unwrap();
/// assert_eq!(decoded, block);
/// ```
pub fn encode_bc1_block(block: &Decoded4x4Block, quality: CompressionQuality) -> [u8; 8] {
    encode_color_block(block, quality, quality == CompressionQuality::Normal)
}

/// Slice variant of [`encode_bc1_block`], writing the block into the first 8 bytes of `dst`.
pub fn encode_bc1_block_into(
    block: &Decoded4x4Block,
    quality: CompressionQuality,
    dst: &mut [u8],
) -> Result<(), BlockCodecError> {
    let Some(dst) = dst.get_mut(..BC1_BLOCK_SIZE) else {
        return Err(BlockCodecError::OutputTooShort {
            needed: BC1_BLOCK_SIZE,
            actual: dst.len(),
        });
    };
    dst.copy_from_slice(&encode_bc1_block(block, quality));
    Ok(())
}

/// Encodes the RGB part of a block as a BC1 colour block.
///
/// When `allow_three_color` is `false` the result is always decodable in four colour mode
/// (`color0 > color1`, or a solid block using only index 0), which is what the colour half of
/// a BC3 block needs.
pub fn encode_color_block(
    block: &Decoded4x4Block,
    quality: CompressionQuality,
    allow_three_color: bool,
) -> [u8; 8] {
    if block.has_identical_pixels_ignore_alpha() {
        let pixel = block.pixels[0];
        let color = Color565::from_rgb_rounded(pixel.r, pixel.g, pixel.b);
        return pack_block(color, color, 0);
    }

    let (high, low) = bounding_box_endpoints(block);
    let mut best = Candidate::four_color(block, high, low);
    if quality == CompressionQuality::Fast {
        return best.pack();
    }

    let mut pairs = [(high, low); 3];
    let mut pair_count = 1;

    if let Some((axis_high, axis_low)) = principal_axis_endpoints(block) {
        best = best.better_of(Candidate::four_color(block, axis_high, axis_low));
        pairs[pair_count] = (axis_high, axis_low);
        pair_count += 1;
    }

    if best.four_color {
        if let Some((c0, c1)) = refine_endpoints(block, &best.indices) {
            best = best.better_of(Candidate::four_color(block, c0, c1));
            pairs[pair_count] = (c0, c1);
            pair_count += 1;
        }
    }

    if allow_three_color {
        for &(a, b) in &pairs[..pair_count] {
            best = best.better_of(Candidate::three_color(block, a, b));
        }
    }

    best.pack()
}

/// A fully resolved block: ordered endpoints, per pixel indices and total RGB error.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    c0: Color565,
    c1: Color565,
    indices: [u8; 16],
    error: u32,
    four_color: bool,
}

impl Candidate {
    /// Orders the endpoints so that `c0 > c1`. Equal endpoints fall back to a solid block
    /// that only uses index 0, which decodes identically in either mode.
    fn four_color(block: &Decoded4x4Block, a: Color565, b: Color565) -> Self {
        if a == b {
            let color = a.to_color_8888();
            let error = block
                .pixels
                .iter()
                .map(|pixel| color.rgb_distance_sq(pixel))
                .sum();
            return Self {
                c0: a,
                c1: b,
                indices: [0; 16],
                error,
                four_color: false,
            };
        }

        let (c0, c1) = if a.greater_than(&b) { (a, b) } else { (b, a) };
        Self::fit(block, c0, c1)
    }

    /// Orders the endpoints so that `c0 <= c1`, selecting three colour mode.
    fn three_color(block: &Decoded4x4Block, a: Color565, b: Color565) -> Self {
        let (c0, c1) = if a.greater_than(&b) { (b, a) } else { (a, b) };
        Self::fit(block, c0, c1)
    }

    fn fit(block: &Decoded4x4Block, c0: Color565, c1: Color565) -> Self {
        let palette = Bc1Palette::from_endpoints(c0, c1);
        let mut indices = [0u8; 16];
        let mut error = 0u32;
        for (slot, pixel) in indices.iter_mut().zip(block.pixels.iter()) {
            let (index, pixel_error) = palette.nearest_index(pixel);
            *slot = index as u8;
            error += pixel_error;
        }

        Self {
            c0,
            c1,
            indices,
            error,
            four_color: palette.is_four_color(),
        }
    }

    /// Keeps `self` on ties, so earlier (cheaper) candidates win.
    #[inline]
    fn better_of(self, other: Self) -> Self {
        if other.error < self.error {
            other
        } else {
            self
        }
    }

    fn pack(&self) -> [u8; 8] {
        let bits = self
            .indices
            .iter()
            .enumerate()
            .fold(0u32, |acc, (pixel, &index)| acc | ((index as u32) << (pixel * 2)));
        pack_block(self.c0, self.c1, bits)
    }
}

#[inline]
fn pack_block(c0: Color565, c1: Color565, indices: u32) -> [u8; 8] {
    let mut out = [0u8; 8];
    out[0..2].copy_from_slice(&c0.raw_value().to_le_bytes());
    out[2..4].copy_from_slice(&c1.raw_value().to_le_bytes());
    out[4..8].copy_from_slice(&indices.to_le_bytes());
    out
}
