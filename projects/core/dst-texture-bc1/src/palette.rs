//! The four colour lookup table of a BC1 block.
//!
//! Built from the two R5G6B5 endpoints exactly the way a decoder does it, so the encoder can
//! measure error against the colours that will actually be reproduced.

use dst_texture_common::{color_565::Color565, color_8888::Color8888};

/// Colours addressable by the 2-bit indices of a BC1 block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bc1Palette {
    colors: [Color8888; 4],
    four_color: bool,
}

impl Bc1Palette {
    /// Builds the palette for the given endpoints.
    ///
    /// If `c0 > c1` (raw 16-bit comparison) the block is in four colour mode:
    /// `color2 = (2*c0 + c1) / 3`, `color3 = (c0 + 2*c1) / 3`.
    /// Otherwise `color2 = (c0 + c1) / 2` and `color3` is transparent black.
    ///
    /// ```
    /// use dst_texture_bc1::palette::Bc1Palette;
    /// use dst_texture_common::color_565::Color565;
    ///
    /// let white = Color565::from_raw(0xFFFF);
    /// let black = Color565::from_raw(0x0000);
    /// let palette = Bc1Palette::from_endpoints(white, black);
    /// assert!(palette.is_four_color());
    /// assert_eq!(palette.color(2).r, 170);
    /// assert_eq!(palette.color(3).r, 85);
    /// ```
    pub fn from_endpoints(c0: Color565, c1: Color565) -> Self {
        let r0 = c0.red() as u32;
        let g0 = c0.green() as u32;
        let b0 = c0.blue() as u32;

        let r1 = c1.red() as u32;
        let g1 = c1.green() as u32;
        let b1 = c1.blue() as u32;

        let mut colors = [Color8888::new(0, 0, 0, 0); 4];
        colors[0] = c0.to_color_8888();
        colors[1] = c1.to_color_8888();

        let four_color = c0.greater_than(&c1);
        if four_color {
            colors[2] = Color8888::new(
                ((2 * r0 + r1) / 3) as u8,
                ((2 * g0 + g1) / 3) as u8,
                ((2 * b0 + b1) / 3) as u8,
                255,
            );
            colors[3] = Color8888::new(
                ((r0 + 2 * r1) / 3) as u8,
                ((g0 + 2 * g1) / 3) as u8,
                ((b0 + 2 * b1) / 3) as u8,
                255,
            );
        } else {
            colors[2] = Color8888::new(
                ((r0 + r1) / 2) as u8,
                ((g0 + g1) / 2) as u8,
                ((b0 + b1) / 2) as u8,
                255,
            );
            // Transparent black
            colors[3] = Color8888::new(0, 0, 0, 0);
        }

        Self { colors, four_color }
    }

    /// Colour for a 2-bit index. Only the low two bits of `index` are used.
    #[inline]
    pub fn color(&self, index: u32) -> Color8888 {
        self.colors[(index & 0b11) as usize]
    }

    /// `true` if the endpoints select four colour mode.
    #[inline]
    pub fn is_four_color(&self) -> bool {
        self.four_color
    }

    /// Returns the index whose colour is closest (RGB squared distance) to `pixel` and that
    /// distance. Ties go to the lower index.
    #[inline]
    pub fn nearest_index(&self, pixel: &Color8888) -> (u32, u32) {
        let mut best_index = 0;
        let mut best_error = u32::MAX;
        for (index, color) in self.colors.iter().enumerate() {
            let error = color.rgb_distance_sq(pixel);
            if error < best_error {
                best_error = error;
                best_index = index as u32;
            }
        }
        (best_index, best_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn four_color_mode_uses_thirds() {
        // c0 = (31, 0, 0) -> 255, c1 = (0, 0, 31) -> 255 blue
        let palette = Bc1Palette::from_endpoints(Color565::from_raw(0xF800), Color565::from_raw(0x001F));
        assert!(palette.is_four_color());
        assert_eq!(palette.color(2), Color8888::new(170, 0, 85, 255));
        assert_eq!(palette.color(3), Color8888::new(85, 0, 170, 255));
    }

    #[rstest]
    #[case(0x001F, 0xF800)] // c0 < c1
    #[case(0x1234, 0x1234)] // c0 == c1
    fn three_color_mode_when_c0_not_greater(#[case] c0: u16, #[case] c1: u16) {
        let palette = Bc1Palette::from_endpoints(Color565::from_raw(c0), Color565::from_raw(c1));
        assert!(!palette.is_four_color());
        assert_eq!(palette.color(3), Color8888::new(0, 0, 0, 0));
    }

    #[test]
    fn three_color_mode_midpoint_truncates() {
        // red 255 and red 0 -> midpoint 127
        let palette = Bc1Palette::from_endpoints(Color565::from_raw(0x0000), Color565::from_raw(0xF800));
        assert_eq!(palette.color(2), Color8888::new(127, 0, 0, 255));
    }

    #[test]
    fn nearest_index_prefers_lowest_on_tie() {
        let same = Color565::from_raw(0x0000);
        let palette = Bc1Palette::from_endpoints(same, same);
        // Entries 0, 1, 2 and 3 all decode to black RGB.
        assert_eq!(palette.nearest_index(&Color8888::new(0, 0, 0, 255)), (0, 0));
    }
}
