//! The `flags` word of a DST header.

use bitfield::bitfield;
use dst_texture_common::pixel_format::PixelFormat;

bitfield! {
    /// Bit flags stored in the header of a DST container.
    ///
    /// Bit layout:
    /// - Bit 0: Block compressed; always equals [`PixelFormat::is_compressed`] of the asset
    /// - Bit 1: Pixel data is sRGB encoded (informational, set by the caller)
    /// - Bits 2-31: Reserved; preserved as read
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextureFlags(u32);
    impl Debug;
    u32;

    /// Whether the pixel data is block compressed (1 bit)
    pub block_compressed, set_block_compressed: 0;
    /// Whether the pixel data is sRGB encoded (1 bit)
    pub srgb, set_srgb: 1;
    /// Reserved for future use (30 bits)
    pub reserved, set_reserved: 31, 2;
}

impl TextureFlags {
    /// Wraps a raw flags word as stored in a container header.
    #[inline]
    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw flags word.
    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Copy of these flags with the block compressed bit matching `format`.
    #[inline]
    pub fn synced_with(mut self, format: PixelFormat) -> Self {
        self.set_block_compressed(format.is_compressed());
        self
    }
}
