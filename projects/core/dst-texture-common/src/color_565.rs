//! 16-bit R5G6B5 colour, the endpoint format of BC1 blocks.

use crate::color_8888::Color8888;

/// Represents a 16-bit RGB565 color (5 bits red, 6 bits green, 5 bits blue)
/// As encountered in the endpoints of BC1 and the colour half of BC3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Color565 {
    /// The underlying 16-bit RGB565 value
    value: u16,
}

impl Color565 {
    /// Creates a new [`Color565`] from the raw 16-bit value
    #[inline]
    pub fn from_raw(value: u16) -> Self {
        Self { value }
    }

    /// Creates a new [`Color565`] from RGB components, rounding each channel to the
    /// nearest representable 5/6-bit value.
    ///
    /// ```
    /// use dst_texture_common::color_565::Color565;
    ///
    /// // 255 * 31 / 255 rounds to 31, 130 * 63 / 255 = 32.1 rounds to 32.
    /// let color = Color565::from_rgb_rounded(255, 130, 0);
    /// assert_eq!(color.raw_value(), (31 << 11) | (32 << 5));
    /// ```
    #[inline]
    pub fn from_rgb_rounded(r: u8, g: u8, b: u8) -> Self {
        let r = (r as u16 * 31 + 127) / 255;
        let g = (g as u16 * 63 + 127) / 255;
        let b = (b as u16 * 31 + 127) / 255;
        Self {
            value: (r << 11) | (g << 5) | b,
        }
    }

    /// Returns the raw 16-bit value
    #[inline]
    pub fn raw_value(&self) -> u16 {
        self.value
    }

    // NOTE: https://fgiesen.wordpress.com/2021/10/04/gpu-bcn-decoding/
    // BC1 as written in the D3D11 functional spec first expands the endpoint values from 5 or 6 bits
    // to 8 bits by replicating the top bits; all three vendors appear to do this or something equivalent.

    /// Extracts the expanded 8-bit red component
    #[inline]
    pub fn red(&self) -> u8 {
        let r = (self.value & 0b11111000_00000000) >> 11;
        ((r << 3) | (r >> 2)) as u8
    }

    /// Extracts the expanded 8-bit green component
    #[inline]
    pub fn green(&self) -> u8 {
        let g = (self.value & 0b00000111_11100000) >> 5;
        ((g << 2) | (g >> 4)) as u8
    }

    /// Extracts the expanded 8-bit blue component
    #[inline]
    pub fn blue(&self) -> u8 {
        let b = self.value & 0b00000000_00011111;
        ((b << 3) | (b >> 2)) as u8
    }

    /// Compares two [`Color565`] values as raw 16-bit integers.
    ///
    /// This is the comparison that selects between the four-colour and the
    /// three-colour-plus-transparent modes of a BC1 block.
    #[inline]
    pub fn greater_than(&self, other: &Self) -> bool {
        self.value > other.value
    }

    /// Converts this [`Color565`] to a [`Color8888`] with full opacity (alpha=255)
    ///
    /// # Examples
    ///
    /// ```
    /// use dst_texture_common::color_565::Color565;
    ///
    /// let rgb565 = Color565::from_rgb_rounded(255, 0, 0);
    /// let rgba8888 = rgb565.to_color_8888();
    /// assert_eq!(rgba8888.r, 255);
    /// assert_eq!(rgba8888.g, 0);
    /// assert_eq!(rgba8888.b, 0);
    /// assert_eq!(rgba8888.a, 255);
    /// ```
    pub fn to_color_8888(&self) -> Color8888 {
        Color8888::new(self.red(), self.green(), self.blue(), 255)
    }
}
