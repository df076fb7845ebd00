//! # Pixel Format Catalog
//!
//! The closed set of pixel layouts a texture asset can be stored in, together with the
//! per-format sizing rules used by every other part of the pipeline.
//!
//! | Format  | Tag | Channels | Bytes per pixel | Bytes per 4x4 block |
//! |---------|-----|----------|-----------------|---------------------|
//! | Unknown | 0   | -        | -               | -                   |
//! | R8      | 1   | 1        | 1               | -                   |
//! | RG8     | 2   | 2        | 2               | -                   |
//! | RGB8    | 3   | 3        | 3               | -                   |
//! | RGBA8   | 4   | 4        | 4               | -                   |
//! | BC1     | 5   | -        | -               | 8                   |
//! | BC3     | 6   | -        | -               | 16                  |
//!
//! The tag is the value stored in the `format` field of the DST container header.

use derive_enum_all_values::AllValues;

/// Width and height of a compressed block, in pixels.
pub const BLOCK_DIMENSION: u32 = 4;

/// Describes the memory layout of the pixels of a single mip level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AllValues)]
#[repr(u16)]
pub enum PixelFormat {
    /// Format could not be determined. Never valid for a texture asset.
    #[default]
    Unknown = 0,
    /// Single 8-bit channel.
    R8 = 1,
    /// Two 8-bit channels.
    RG8 = 2,
    /// Three 8-bit channels, no alpha.
    RGB8 = 3,
    /// Four 8-bit channels, alpha last.
    RGBA8 = 4,
    /// a.k.a. DXT1
    BC1 = 5,
    /// a.k.a. DXT5
    BC3 = 6,
}

impl PixelFormat {
    /// Converts a raw container tag into a [`PixelFormat`].
    ///
    /// Returns [`None`] for values outside the catalog.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(Self::Unknown),
            1 => Some(Self::R8),
            2 => Some(Self::RG8),
            3 => Some(Self::RGB8),
            4 => Some(Self::RGBA8),
            5 => Some(Self::BC1),
            6 => Some(Self::BC3),
            _ => None,
        }
    }

    /// Returns the raw container tag for this format.
    #[inline]
    pub fn to_u16(self) -> u16 {
        self as u16
    }

    /// Maps a channel count (as reported by a generic image decoder) to the matching
    /// uncompressed format.
    ///
    /// ```
    /// use dst_texture_common::pixel_format::PixelFormat;
    ///
    /// assert_eq!(PixelFormat::from_channel_count(3), Some(PixelFormat::RGB8));
    /// assert_eq!(PixelFormat::from_channel_count(5), None);
    /// ```
    pub fn from_channel_count(channels: u32) -> Option<Self> {
        match channels {
            1 => Some(Self::R8),
            2 => Some(Self::RG8),
            3 => Some(Self::RGB8),
            4 => Some(Self::RGBA8),
            _ => None,
        }
    }

    /// Whether the format stores 4x4 compressed blocks rather than individual pixels.
    #[inline]
    pub fn is_compressed(self) -> bool {
        matches!(self, Self::BC1 | Self::BC3)
    }

    /// Number of channels of an uncompressed format.
    ///
    /// [`None`] for compressed formats and [`PixelFormat::Unknown`].
    pub fn channel_count(self) -> Option<u32> {
        match self {
            Self::R8 => Some(1),
            Self::RG8 => Some(2),
            Self::RGB8 => Some(3),
            Self::RGBA8 => Some(4),
            Self::Unknown | Self::BC1 | Self::BC3 => None,
        }
    }

    /// Bytes per pixel of an uncompressed format.
    #[inline]
    pub fn bytes_per_pixel(self) -> Option<usize> {
        // All uncompressed formats are 8 bits per channel.
        self.channel_count().map(|channels| channels as usize)
    }

    /// Bytes per 4x4 block of a compressed format.
    pub fn block_size(self) -> Option<usize> {
        match self {
            Self::BC1 => Some(8),
            Self::BC3 => Some(16),
            Self::Unknown | Self::R8 | Self::RG8 | Self::RGB8 | Self::RGBA8 => None,
        }
    }

    /// The uncompressed format a compressed format decodes into.
    ///
    /// BC1 carries no usable alpha and decodes to [`PixelFormat::RGB8`]; BC3 decodes to
    /// [`PixelFormat::RGBA8`]. Uncompressed formats return themselves.
    pub fn decompressed_format(self) -> Self {
        match self {
            Self::BC1 => Self::RGB8,
            Self::BC3 => Self::RGBA8,
            other => other,
        }
    }

    /// Size in bytes of a single level of `width` x `height` pixels.
    ///
    /// - Uncompressed: `width * height * bytes_per_pixel`
    /// - Compressed: `ceil(width / 4) * ceil(height / 4) * block_size`
    ///
    /// Returns [`None`] for [`PixelFormat::Unknown`] or if the size overflows `usize`.
    ///
    /// ```
    /// use dst_texture_common::pixel_format::PixelFormat;
    ///
    /// assert_eq!(PixelFormat::RGB8.level_size(2, 2), Some(12));
    /// assert_eq!(PixelFormat::BC1.level_size(5, 5), Some(32));
    /// assert_eq!(PixelFormat::Unknown.level_size(4, 4), None);
    /// ```
    pub fn level_size(self, width: u32, height: u32) -> Option<usize> {
        if let Some(block_size) = self.block_size() {
            let blocks_wide = width.div_ceil(BLOCK_DIMENSION) as usize;
            let blocks_high = height.div_ceil(BLOCK_DIMENSION) as usize;
            return blocks_wide
                .checked_mul(blocks_high)?
                .checked_mul(block_size);
        }

        let bytes_per_pixel = self.bytes_per_pixel()?;
        (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(bytes_per_pixel)
    }

    /// Short lowercase name, as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::R8 => "r8",
            Self::RG8 => "rg8",
            Self::RGB8 => "rgb8",
            Self::RGBA8 => "rgba8",
            Self::BC1 => "bc1",
            Self::BC3 => "bc3",
        }
    }
}

impl core::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for PixelFormat {
    type Err = UnknownPixelFormatName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all_values()
            .iter()
            .copied()
            .filter(|format| *format != Self::Unknown)
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or(UnknownPixelFormatName)
    }
}

/// Returned by [`PixelFormat`]'s [`FromStr`](core::str::FromStr) impl for unrecognised names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownPixelFormatName;

impl core::fmt::Display for UnknownPixelFormatName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("unknown pixel format; expected one of r8, rg8, rgb8, rgba8, bc1, bc3")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn tags_round_trip_for_every_format() {
        for format in PixelFormat::all_values() {
            assert_eq!(PixelFormat::from_u16(format.to_u16()), Some(*format));
        }
        assert_eq!(PixelFormat::from_u16(7), None);
    }

    #[rstest]
    #[case(PixelFormat::R8, Some(1), None)]
    #[case(PixelFormat::RG8, Some(2), None)]
    #[case(PixelFormat::RGB8, Some(3), None)]
    #[case(PixelFormat::RGBA8, Some(4), None)]
    #[case(PixelFormat::BC1, None, Some(8))]
    #[case(PixelFormat::BC3, None, Some(16))]
    #[case(PixelFormat::Unknown, None, None)]
    fn catalog_sizes(
        #[case] format: PixelFormat,
        #[case] bytes_per_pixel: Option<usize>,
        #[case] block_size: Option<usize>,
    ) {
        assert_eq!(format.bytes_per_pixel(), bytes_per_pixel);
        assert_eq!(format.block_size(), block_size);
        assert_eq!(format.is_compressed(), block_size.is_some());
    }

    #[rstest]
    #[case(PixelFormat::BC1, 1, 1, 8)]
    #[case(PixelFormat::BC1, 4, 4, 8)]
    #[case(PixelFormat::BC1, 5, 4, 16)]
    #[case(PixelFormat::BC3, 8, 8, 64)]
    #[case(PixelFormat::BC3, 2, 9, 48)]
    #[case(PixelFormat::RGBA8, 3, 3, 36)]
    #[case(PixelFormat::R8, 7, 1, 7)]
    fn level_size_rules(
        #[case] format: PixelFormat,
        #[case] width: u32,
        #[case] height: u32,
        #[case] expected: usize,
    ) {
        assert_eq!(format.level_size(width, height), Some(expected));
    }

    #[test]
    fn decompressed_format_mapping() {
        assert_eq!(PixelFormat::BC1.decompressed_format(), PixelFormat::RGB8);
        assert_eq!(PixelFormat::BC3.decompressed_format(), PixelFormat::RGBA8);
        assert_eq!(PixelFormat::RG8.decompressed_format(), PixelFormat::RG8);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("BC3".parse::<PixelFormat>(), Ok(PixelFormat::BC3));
        assert_eq!("rgba8".parse::<PixelFormat>(), Ok(PixelFormat::RGBA8));
        assert!("unknown".parse::<PixelFormat>().is_err());
        assert!("bc7".parse::<PixelFormat>().is_err());
    }
}
