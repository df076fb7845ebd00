//! Endpoint selection strategies for the BC1 colour encoder.

use dst_texture_common::{
    color_565::Color565, color_8888::Color8888, decoded_4x4_block::Decoded4x4Block,
};

/// Power iterations used to find the principal axis of the block's colours.
const POWER_ITERATIONS: usize = 8;

/// Weight of `color0` for each four colour index (index 2 is 2/3 c0, index 3 is 1/3 c0).
const FOUR_COLOR_WEIGHTS: [f32; 4] = [1.0, 0.0, 2.0 / 3.0, 1.0 / 3.0];

#[inline]
fn to_565(rgb: [f32; 3]) -> Color565 {
    // Clamped to 0..=255 first, so adding 0.5 and truncating rounds half up.
    let channel = |v: f32| (v.clamp(0.0, 255.0) + 0.5) as u8;
    Color565::from_rgb_rounded(channel(rgb[0]), channel(rgb[1]), channel(rgb[2]))
}

#[inline]
fn rgb(pixel: &Color8888) -> [f32; 3] {
    [pixel.r as f32, pixel.g as f32, pixel.b as f32]
}

/// Per channel bounding box of the block, shrunk by 1/16 of its extent on both sides to
/// pull the endpoints away from outliers. Returns `(max, min)`.
pub(crate) fn bounding_box_endpoints(block: &Decoded4x4Block) -> (Color565, Color565) {
    let mut min = [255u8; 3];
    let mut max = [0u8; 3];
    for pixel in &block.pixels {
        for (channel, value) in [pixel.r, pixel.g, pixel.b].into_iter().enumerate() {
            min[channel] = min[channel].min(value);
            max[channel] = max[channel].max(value);
        }
    }

    let mut high = [0u8; 3];
    let mut low = [0u8; 3];
    for channel in 0..3 {
        let inset = (max[channel] - min[channel]) >> 4;
        high[channel] = max[channel] - inset;
        low[channel] = min[channel] + inset;
    }

    (
        Color565::from_rgb_rounded(high[0], high[1], high[2]),
        Color565::from_rgb_rounded(low[0], low[1], low[2]),
    )
}

/// Picks the two pixels lying furthest apart along the principal axis of the block's
/// colour distribution.
///
/// Returns [`None`] if the colours have no spread (all pixels share one RGB value).
pub(crate) fn principal_axis_endpoints(block: &Decoded4x4Block) -> Option<(Color565, Color565)> {
    let mut mean = [0f32; 3];
    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    for pixel in &block.pixels {
        let color = rgb(pixel);
        for channel in 0..3 {
            mean[channel] += color[channel];
            min[channel] = min[channel].min(color[channel]);
            max[channel] = max[channel].max(color[channel]);
        }
    }
    for value in &mut mean {
        *value /= 16.0;
    }

    // Covariance, upper triangle: rr, rg, rb, gg, gb, bb
    let mut cov = [0f32; 6];
    for pixel in &block.pixels {
        let color = rgb(pixel);
        let d = [
            color[0] - mean[0],
            color[1] - mean[1],
            color[2] - mean[2],
        ];
        cov[0] += d[0] * d[0];
        cov[1] += d[0] * d[1];
        cov[2] += d[0] * d[2];
        cov[3] += d[1] * d[1];
        cov[4] += d[1] * d[2];
        cov[5] += d[2] * d[2];
    }

    let mut axis = [max[0] - min[0], max[1] - min[1], max[2] - min[2]];
    if axis.iter().all(|&v| v == 0.0) {
        return None;
    }

    for _ in 0..POWER_ITERATIONS {
        let next = [
            cov[0] * axis[0] + cov[1] * axis[1] + cov[2] * axis[2],
            cov[1] * axis[0] + cov[3] * axis[1] + cov[4] * axis[2],
            cov[2] * axis[0] + cov[4] * axis[1] + cov[5] * axis[2],
        ];
        let norm = next.iter().fold(0f32, |acc, v| acc.max(v.abs()));
        if norm < f32::EPSILON {
            break;
        }
        axis = [next[0] / norm, next[1] / norm, next[2] / norm];
    }

    let mut min_dot = f32::MAX;
    let mut max_dot = f32::MIN;
    let mut min_pixel = block.pixels[0];
    let mut max_pixel = block.pixels[0];
    for pixel in &block.pixels {
        let color = rgb(pixel);
        let dot = color[0] * axis[0] + color[1] * axis[1] + color[2] * axis[2];
        if dot < min_dot {
            min_dot = dot;
            min_pixel = *pixel;
        }
        if dot > max_dot {
            max_dot = dot;
            max_pixel = *pixel;
        }
    }

    Some((to_565(rgb(&max_pixel)), to_565(rgb(&min_pixel))))
}

/// One least squares step: given four colour indices already chosen against some palette,
/// solves for the `color0`/`color1` pair that minimises the squared error of the
/// interpolated colours.
///
/// Returns [`None`] when the system is singular (every pixel uses the same weight).
pub(crate) fn refine_endpoints(
    block: &Decoded4x4Block,
    indices: &[u8; 16],
) -> Option<(Color565, Color565)> {
    let mut aa = 0f32;
    let mut bb = 0f32;
    let mut ab = 0f32;
    let mut ax = [0f32; 3];
    let mut bx = [0f32; 3];

    for (pixel, &index) in block.pixels.iter().zip(indices.iter()) {
        let alpha = FOUR_COLOR_WEIGHTS[(index & 0b11) as usize];
        let beta = 1.0 - alpha;
        let color = rgb(pixel);

        aa += alpha * alpha;
        bb += beta * beta;
        ab += alpha * beta;
        for channel in 0..3 {
            ax[channel] += alpha * color[channel];
            bx[channel] += beta * color[channel];
        }
    }

    let det = aa * bb - ab * ab;
    if det.abs() < 1e-4 {
        return None;
    }

    let mut c0 = [0f32; 3];
    let mut c1 = [0f32; 3];
    for channel in 0..3 {
        c0[channel] = (ax[channel] * bb - bx[channel] * ab) / det;
        c1[channel] = (bx[channel] * aa - ax[channel] * ab) / det;
    }

    Some((to_565(c0), to_565(c1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_block() -> Decoded4x4Block {
        let mut block = Decoded4x4Block::new(Color8888::default());
        for (index, pixel) in block.pixels.iter_mut().enumerate() {
            let v = (index * 16) as u8;
            *pixel = Color8888::new(v, v, v, 255);
        }
        block
    }

    #[test]
    fn float_endpoints_round_and_clamp() {
        assert_eq!(
            to_565([127.5, -3.0, 300.0]),
            Color565::from_rgb_rounded(128, 0, 255)
        );
        assert_eq!(
            to_565([127.49, 254.6, 0.4]),
            Color565::from_rgb_rounded(127, 255, 0)
        );
    }

    #[test]
    fn bounding_box_is_inset() {
        let (high, low) = bounding_box_endpoints(&gradient_block());
        // extent 240, inset 15 -> 225 and 15
        assert_eq!(high, Color565::from_rgb_rounded(225, 225, 225));
        assert_eq!(low, Color565::from_rgb_rounded(15, 15, 15));
    }

    #[test]
    fn principal_axis_picks_extreme_pixels() {
        let (high, low) = principal_axis_endpoints(&gradient_block()).unwrap();
        assert_eq!(high, Color565::from_rgb_rounded(240, 240, 240));
        assert_eq!(low, Color565::from_rgb_rounded(0, 0, 0));
    }

    #[test]
    fn principal_axis_rejects_solid_blocks() {
        let block = Decoded4x4Block::new(Color8888::new(1, 2, 3, 4));
        assert!(principal_axis_endpoints(&block).is_none());
    }

    #[test]
    fn refine_recovers_exact_two_color_block() {
        // Half the pixels are c0, half are c1: least squares must land on them.
        let mut block = Decoded4x4Block::new(Color8888::new(255, 0, 0, 255));
        let mut indices = [0u8; 16];
        for index in 8..16 {
            block.pixels[index] = Color8888::new(0, 0, 255, 255);
            indices[index] = 1;
        }
        let (c0, c1) = refine_endpoints(&block, &indices).unwrap();
        assert_eq!(c0, Color565::from_rgb_rounded(255, 0, 0));
        assert_eq!(c1, Color565::from_rgb_rounded(0, 0, 255));
    }

    #[test]
    fn refine_rejects_single_weight() {
        let block = gradient_block();
        assert!(refine_endpoints(&block, &[2u8; 16]).is_none());
    }
}
