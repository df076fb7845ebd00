//! 32-bit RGBA pixel colour.

/// Represents a single RGBA8888 pixel color, as consumed by the encoders and produced
/// by the decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Color8888 {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255)
    pub a: u8,
}

impl Color8888 {
    /// Constructs a new [`Color8888`] from the specified red, green, blue, and alpha components.
    ///
    /// Each parameter represents the intensity of its corresponding colour channel (0–255).
    ///
    /// # Examples
    ///
    /// ```
    /// use dst_texture_common::color_8888::Color8888;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// assert_eq!(pixel.r, 255);
    /// assert_eq!(pixel.g, 0);
    /// assert_eq!(pixel.b, 0);
    /// assert_eq!(pixel.a, 255);
    /// ```
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the pixel with the alpha channel zeroed, for colour-only comparisons.
    #[inline]
    pub fn without_alpha(&self) -> Self {
        Self::new(self.r, self.g, self.b, 0)
    }

    /// Squared euclidean distance between the RGB parts of two pixels.
    #[inline]
    pub fn rgb_distance_sq(&self, other: &Self) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}
