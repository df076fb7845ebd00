//! The 8 byte interpolated alpha block stored in the first half of a BC3 block.

use dst_texture_common::quality::CompressionQuality;

/// Size of the alpha half of a BC3 block in bytes.
pub const ALPHA_BLOCK_SIZE: usize = 8;

/// The 8-entry alpha lookup table selected by a pair of alpha endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlphaPalette {
    values: [u8; 8],
}

impl AlphaPalette {
    /// Builds the table for `alpha0`/`alpha1`.
    ///
    /// If `alpha0 > alpha1`, indices 2..=7 interpolate in sevenths; otherwise indices 2..=5
    /// interpolate in fifths and indices 6/7 are fixed at `0x00`/`0xFF`.
    ///
    /// ```
    /// use dst_texture_bc3::alpha::AlphaPalette;
    ///
    /// assert_eq!(AlphaPalette::from_endpoints(200, 50).value(7), ((200u32 + 6 * 50) / 7) as u8);
    /// let six_step = AlphaPalette::from_endpoints(50, 200);
    /// assert_eq!(six_step.value(6), 0x00);
    /// assert_eq!(six_step.value(7), 0xFF);
    /// ```
    #[allow(clippy::identity_op)]
    pub fn from_endpoints(alpha0: u8, alpha1: u8) -> Self {
        let a0 = alpha0 as u16;
        let a1 = alpha1 as u16;

        let mut values = [0u8; 8];
        values[0] = alpha0; // bit code 000
        values[1] = alpha1; // bit code 001

        if alpha0 > alpha1 {
            // 8 interpolated alpha values
            values[2] = ((6 * a0 + 1 * a1) / 7) as u8; // bit code 010
            values[3] = ((5 * a0 + 2 * a1) / 7) as u8; // bit code 011
            values[4] = ((4 * a0 + 3 * a1) / 7) as u8; // bit code 100
            values[5] = ((3 * a0 + 4 * a1) / 7) as u8; // bit code 101
            values[6] = ((2 * a0 + 5 * a1) / 7) as u8; // bit code 110
            values[7] = ((1 * a0 + 6 * a1) / 7) as u8; // bit code 111
        } else {
            // 6 interpolated alpha values + transparent and opaque
            values[2] = ((4 * a0 + 1 * a1) / 5) as u8; // bit code 010
            values[3] = ((3 * a0 + 2 * a1) / 5) as u8; // bit code 011
            values[4] = ((2 * a0 + 3 * a1) / 5) as u8; // bit code 100
            values[5] = ((1 * a0 + 4 * a1) / 5) as u8; // bit code 101
            values[6] = 0; // Transparent (bit code 110)
            values[7] = 255; // Opaque (bit code 111)
        }

        Self { values }
    }

    /// Alpha for a 3-bit index. Only the low three bits of `index` are used.
    #[inline]
    pub fn value(&self, index: u8) -> u8 {
        self.values[(index & 0b111) as usize]
    }

    /// Index of the closest table entry and its squared error. Ties go to the lower index.
    #[inline]
    pub fn nearest_index(&self, alpha: u8) -> (u8, u32) {
        let mut best_index = 0u8;
        let mut best_error = u32::MAX;
        for (index, &value) in self.values.iter().enumerate() {
            let diff = value as i32 - alpha as i32;
            let error = (diff * diff) as u32;
            if error < best_error {
                best_error = error;
                best_index = index as u8;
            }
        }
        (best_index, best_error)
    }
}

/// Splits the 48 index bits (bytes 2..8 of an alpha block) into 16 3-bit indices.
#[inline]
pub fn unpack_alpha_indices(bytes: &[u8; 6]) -> [u8; 16] {
    let mut wide = [0u8; 8];
    wide[..6].copy_from_slice(bytes);
    let bits = u64::from_le_bytes(wide);

    let mut indices = [0u8; 16];
    for (pixel, index) in indices.iter_mut().enumerate() {
        *index = ((bits >> (pixel * 3)) & 0b111) as u8;
    }
    indices
}

/// Packs 16 3-bit indices into the 6 byte little endian layout of an alpha block.
#[inline]
pub fn pack_alpha_indices(indices: &[u8; 16]) -> [u8; 6] {
    let bits = indices
        .iter()
        .enumerate()
        .fold(0u64, |acc, (pixel, &index)| {
            acc | (((index & 0b111) as u64) << (pixel * 3))
        });
    let mut out = [0u8; 6];
    out.copy_from_slice(&bits.to_le_bytes()[..6]);
    out
}

/// Decodes an alpha block into 16 alpha values, row-major.
pub fn decode_alpha_block(block: &[u8; ALPHA_BLOCK_SIZE]) -> [u8; 16] {
    let palette = AlphaPalette::from_endpoints(block[0], block[1]);
    let mut index_bytes = [0u8; 6];
    index_bytes.copy_from_slice(&block[2..8]);
    unpack_alpha_indices(&index_bytes).map(|index| palette.value(index))
}

/// Encodes 16 alpha values (row-major) into an alpha block.
///
/// Uniform alpha is stored exactly with `alpha0 == alpha1` and all indices 0. Otherwise the
/// eight step table spanning `[min, max]` is used; [`CompressionQuality::Normal`] also tries
/// the six step table, which reproduces `0x00` and `0xFF` exactly, and keeps whichever has
/// the lower squared error.
pub fn encode_alpha_block(alphas: &[u8; 16], quality: CompressionQuality) -> [u8; ALPHA_BLOCK_SIZE] {
    let min = alphas.iter().copied().fold(u8::MAX, u8::min);
    let max = alphas.iter().copied().fold(u8::MIN, u8::max);
    if min == max {
        return pack_alpha_block(min, min, &[0; 16]);
    }

    let (mut best_indices, best_error) = fit_alpha(alphas, max, min);
    let mut best_endpoints = (max, min);

    if quality == CompressionQuality::Normal {
        // Six step endpoints ignore the values the fixed entries already cover.
        let interior = alphas.iter().copied().filter(|&a| a != 0 && a != 255);
        let (low, high) = interior.fold((u8::MAX, u8::MIN), |(lo, hi), a| (lo.min(a), hi.max(a)));
        let (low, high) = if low > high { (0, 0) } else { (low, high) };

        let (indices, error) = fit_alpha(alphas, low, high);
        if error < best_error {
            best_indices = indices;
            best_endpoints = (low, high);
        }
    }

    pack_alpha_block(best_endpoints.0, best_endpoints.1, &best_indices)
}

fn fit_alpha(alphas: &[u8; 16], alpha0: u8, alpha1: u8) -> ([u8; 16], u32) {
    let palette = AlphaPalette::from_endpoints(alpha0, alpha1);
    let mut indices = [0u8; 16];
    let mut error = 0u32;
    for (slot, &alpha) in indices.iter_mut().zip(alphas.iter()) {
        let (index, alpha_error) = palette.nearest_index(alpha);
        *slot = index;
        error += alpha_error;
    }
    (indices, error)
}

#[inline]
fn pack_alpha_block(alpha0: u8, alpha1: u8, indices: &[u8; 16]) -> [u8; ALPHA_BLOCK_SIZE] {
    let mut out = [0u8; ALPHA_BLOCK_SIZE];
    out[0] = alpha0;
    out[1] = alpha1;
    out[2..8].copy_from_slice(&pack_alpha_indices(indices));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn eight_step_boundary() {
        let palette = AlphaPalette::from_endpoints(200, 50);
        assert_eq!(palette.value(7), ((200 + 6 * 50) / 7) as u8);
        assert_eq!(palette.value(2), ((6 * 200 + 50) / 7) as u8);
    }

    #[rstest]
    #[case(50, 200)]
    #[case(128, 128)]
    fn six_step_has_fixed_extremes(#[case] alpha0: u8, #[case] alpha1: u8) {
        let palette = AlphaPalette::from_endpoints(alpha0, alpha1);
        assert_eq!(palette.value(6), 0x00);
        assert_eq!(palette.value(7), 0xFF);
    }

    #[test]
    fn indices_are_three_bits_low_first() {
        let mut indices = [0u8; 16];
        indices[0] = 0b111;
        indices[3] = 0b101; // bits 9..11, inside the second byte
        indices[15] = 0b110;
        let packed = pack_alpha_indices(&indices);
        assert_eq!(packed[0], 0b0000_0111);
        assert_eq!(packed[1], 0b0000_1010);
        assert_eq!(packed[5], 0b1100_0000);
        assert_eq!(unpack_alpha_indices(&packed), indices);
    }

    #[test]
    fn uniform_alpha_is_exact() {
        let encoded = encode_alpha_block(&[77; 16], CompressionQuality::Normal);
        assert_eq!(encoded, [77, 77, 0, 0, 0, 0, 0, 0]);
        assert_eq!(decode_alpha_block(&encoded), [77; 16]);
    }

    #[test]
    fn endpoints_are_reproduced_exactly() {
        let mut alphas = [100u8; 16];
        alphas[0] = 10;
        alphas[15] = 250;
        for quality in [CompressionQuality::Fast, CompressionQuality::Normal] {
            let decoded = decode_alpha_block(&encode_alpha_block(&alphas, quality));
            assert_eq!(decoded[0], 10);
            assert_eq!(decoded[15], 250);
        }
    }

    #[test]
    fn normal_prefers_six_step_for_cutout_alpha() {
        // Binary transparency plus a narrow band: the fixed 0/255 entries win.
        let mut alphas = [0u8; 16];
        for (index, alpha) in alphas.iter_mut().enumerate() {
            *alpha = match index % 4 {
                0 => 0,
                1 => 255,
                2 => 120,
                _ => 130,
            };
        }
        let encoded = encode_alpha_block(&alphas, CompressionQuality::Normal);
        assert!(encoded[0] <= encoded[1]);
        assert_eq!(decode_alpha_block(&encoded), alphas);

        let fast = encode_alpha_block(&alphas, CompressionQuality::Fast);
        assert!(fast[0] > fast[1]);
    }
}
