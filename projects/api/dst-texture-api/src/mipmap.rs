//! Box filter mip chain generation.
//!
//! Each level is resampled from the level directly above it, never from the base, so the
//! chain matches what repeated 2x2 averaging produces.

use crate::mip_level::MipLevel;

/// Number of levels in a full chain for a `width` x `height` base, down to and including 1x1.
///
/// Dimensions halve with `max(1, dim / 2)`, which gives `floor(log2(max(width, height))) + 1`.
/// A zero sized base has no chain.
///
/// ```
/// use dst_texture_api::mipmap::mip_chain_len;
///
/// assert_eq!(mip_chain_len(256, 256), 9);
/// assert_eq!(mip_chain_len(256, 1), 9);
/// assert_eq!(mip_chain_len(1, 1), 1);
/// assert_eq!(mip_chain_len(5, 3), 3); // 5x3, 2x1, 1x1
/// ```
#[inline]
pub fn mip_chain_len(width: u32, height: u32) -> u32 {
    let max = width.max(height);
    if max == 0 {
        return 0;
    }
    u32::BITS - max.leading_zeros()
}

/// Dimensions of the level after `width` x `height`.
#[inline]
pub fn next_level_size(width: u32, height: u32) -> (u32, u32) {
    ((width / 2).max(1), (height / 2).max(1))
}

/// Resizes an interleaved 8-bit image with a box filter.
///
/// Every destination pixel is the rounded mean of the source rectangle it covers. When
/// shrinking by an odd factor the last destination pixel of a row or column absorbs the
/// remainder, so every source pixel contributes. Returns an empty buffer if any dimension or
/// `channels` is zero, or if `src` is shorter than `src_width * src_height * channels`.
///
/// ```
/// use dst_texture_api::mipmap::box_resize;
///
/// // 2x2 grey values averaged into one pixel.
/// assert_eq!(box_resize(&[0, 10, 20, 34], 2, 2, 1, 1, 1), [16]);
/// ```
pub fn box_resize(
    src: &[u8],
    src_width: u32,
    src_height: u32,
    dst_width: u32,
    dst_height: u32,
    channels: usize,
) -> Vec<u8> {
    let (sw, sh, dw, dh) = (
        src_width as u64,
        src_height as u64,
        dst_width as u64,
        dst_height as u64,
    );
    let required = (sw * sh).saturating_mul(channels as u64);
    if sw == 0 || sh == 0 || dw == 0 || dh == 0 || channels == 0 || (src.len() as u64) < required
    {
        return Vec::new();
    }

    let span = |dst: u64, dst_len: u64, src_len: u64| -> (u64, u64) {
        let start = dst * src_len / dst_len;
        let end = ((dst + 1) * src_len / dst_len).max(start + 1);
        (start, end.min(src_len))
    };

    let row_stride = sw as usize * channels;
    let mut out = Vec::with_capacity(dw as usize * dh as usize * channels);
    let mut sums = vec![0u64; channels];

    for dy in 0..dh {
        let (y0, y1) = span(dy, dh, sh);
        for dx in 0..dw {
            let (x0, x1) = span(dx, dw, sw);
            sums.iter_mut().for_each(|sum| *sum = 0);

            for y in y0..y1 {
                let row = &src[y as usize * row_stride..][..row_stride];
                for x in x0..x1 {
                    let pixel = &row[x as usize * channels..][..channels];
                    for (sum, &value) in sums.iter_mut().zip(pixel) {
                        *sum += value as u64;
                    }
                }
            }

            let count = (y1 - y0) * (x1 - x0);
            out.extend(sums.iter().map(|&sum| ((sum + count / 2) / count) as u8));
        }
    }

    out
}

/// Builds the full chain below `base`. The result starts with a copy of `base` and ends with
/// the 1x1 level.
///
/// `base` must hold uncompressed pixels with `channels` interleaved bytes per pixel.
pub(crate) fn generate_chain(base: &MipLevel, channels: usize) -> Vec<MipLevel> {
    let count = mip_chain_len(base.width(), base.height()) as usize;
    let mut chain = Vec::with_capacity(count);
    chain.push(base.clone());

    let (mut width, mut height) = (base.width(), base.height());
    while width > 1 || height > 1 {
        let (next_width, next_height) = next_level_size(width, height);
        // Always Some: the chain starts with `base`.
        let Some(previous) = chain.last() else { break };
        let pixels = box_resize(
            previous.pixels(),
            width,
            height,
            next_width,
            next_height,
            channels,
        );
        chain.push(MipLevel::from_parts(next_width, next_height, pixels));
        width = next_width;
        height = next_height;
    }

    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use dst_texture_common::pixel_format::PixelFormat;
    use rstest::rstest;

    #[rstest]
    #[case(1, 1, 1)]
    #[case(2, 2, 2)]
    #[case(4, 4, 3)]
    #[case(8, 2, 4)]
    #[case(1, 1024, 11)]
    #[case(4096, 4096, 13)]
    fn power_of_two_chain_is_log2_plus_one(
        #[case] width: u32,
        #[case] height: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(mip_chain_len(width, height), expected);
        // ceil and floor of log2 agree for powers of two
        let max = width.max(height);
        assert_eq!(expected, max.next_power_of_two().trailing_zeros() + 1);
    }

    #[test]
    fn zero_size_has_no_chain() {
        assert_eq!(mip_chain_len(0, 0), 0);
    }

    #[test]
    fn halving_averages_quads() {
        // 4x2 RGBA: left quad all 0, right quad 100/200 alternating
        let mut src = Vec::new();
        for _row in 0..2 {
            src.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 0]);
            src.extend_from_slice(&[100, 100, 100, 255, 200, 200, 200, 255]);
        }
        let out = box_resize(&src, 4, 2, 2, 1, 4);
        assert_eq!(out, [0, 0, 0, 0, 150, 150, 150, 255]);
    }

    #[test]
    fn odd_width_folds_remainder_into_last_pixel() {
        let out = box_resize(&[3, 6, 9], 3, 1, 1, 1, 1);
        assert_eq!(out, [6]);
    }

    #[test]
    fn short_source_yields_nothing() {
        assert!(box_resize(&[0; 3], 2, 2, 1, 1, 1).is_empty());
    }

    #[test]
    fn chain_ends_at_one_by_one() {
        let base = MipLevel::zeroed(16, 4, PixelFormat::RGB8).unwrap();
        let chain = generate_chain(&base, 3);
        let sizes: Vec<_> = chain.iter().map(|m| (m.width(), m.height())).collect();
        assert_eq!(sizes, [(16, 4), (8, 2), (4, 1), (2, 1), (1, 1)]);
        for level in &chain {
            assert_eq!(
                level.data_size(),
                PixelFormat::RGB8
                    .level_size(level.width(), level.height())
                    .unwrap()
            );
        }
    }

    #[test]
    fn solid_base_stays_solid() {
        let base = MipLevel::new(5, 7, PixelFormat::RG8, [42u8, 7].repeat(35)).unwrap();
        for level in generate_chain(&base, 2) {
            assert!(level.pixels().chunks_exact(2).all(|p| p == [42, 7]));
        }
    }
}
