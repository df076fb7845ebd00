//! The texture asset: a pixel format tag plus an ordered mip chain.

use crate::{
    codec::{compress_surface, decompress_surface, decompress_surface_to},
    container::{has_dst_magic, parse_container, write_container, ContainerError},
    convert::convert_pixels,
    error::{TextureError, TextureResult, ValidationError},
    fallback::decode_image,
    flags::TextureFlags,
    mip_level::MipLevel,
    mipmap::{generate_chain, mip_chain_len},
};
use dst_texture_common::{pixel_format::PixelFormat, quality::CompressionQuality};
use log::{debug, info};

#[cfg(feature = "file-io")]
use std::path::Path;

/// Options applied when loading an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Reverse the row order of images decoded through the generic image fallback.
    /// Native DST data is never flipped.
    pub flip_vertically: bool,
}

/// A raster image stored as an ordered mip chain sharing one [`PixelFormat`].
///
/// Invariants upheld by every constructor and mutator:
///
/// - There is at least one level; level 0 is the base.
/// - Level `i > 0` is `max(1, w / 2)` x `max(1, h / 2)` of level `i - 1`.
/// - Every level's buffer matches the size rule of [`Self::format`].
/// - The block compressed bit of [`Self::flags`] matches [`Self::format`].
///
/// Mutators build the complete replacement chain first and only then swap it in, so a
/// failed call leaves the asset exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureAsset {
    format: PixelFormat,
    flags: TextureFlags,
    mips: Vec<MipLevel>,
}

impl TextureAsset {
    /// Creates a single level asset from raw pixels, validating their size against `format`.
    pub fn from_memory(
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: Vec<u8>,
    ) -> TextureResult<Self> {
        let base = MipLevel::new(width, height, format, pixels)?;
        Ok(Self::from_chain(format, TextureFlags::default(), vec![base]))
    }

    /// Creates a single level asset with zero filled pixels.
    pub fn empty(width: u32, height: u32, format: PixelFormat) -> TextureResult<Self> {
        let base = MipLevel::zeroed(width, height, format)?;
        Ok(Self::from_chain(format, TextureFlags::default(), vec![base]))
    }

    /// Loads an asset from memory.
    ///
    /// Input starting with the `DST\0` magic is parsed as a native container. Anything else
    /// is handed to the generic image decoder and becomes a single level asset.
    ///
    /// # Errors
    ///
    /// A [`TextureError::Format`] for empty input or a malformed container, a
    /// [`TextureError::Decode`] if the image decoder rejects the input.
    pub fn from_bytes(data: &[u8], options: &LoadOptions) -> TextureResult<Self> {
        if data.is_empty() {
            return Err(ContainerError::Empty.into());
        }

        if !has_dst_magic(data) {
            let (format, base) = decode_image(data, options.flip_vertically)?;
            return Ok(Self::from_chain(format, TextureFlags::default(), vec![base]));
        }

        let parsed = parse_container(data)?;
        debug!(
            "Parsed DST container: {}x{} {} with {} mip levels, flags {:#x}",
            parsed.header.width,
            parsed.header.height,
            parsed.header.format,
            parsed.header.mip_levels,
            parsed.header.flags.bits()
        );
        Ok(Self::from_chain(
            parsed.header.format,
            parsed.header.flags,
            parsed.levels,
        ))
    }

    /// Serializes the asset as a DST container.
    pub fn to_bytes(&self) -> TextureResult<Vec<u8>> {
        Ok(write_container(self.format, self.flags, &self.mips)?)
    }

    /// Loads an asset from the file at `path`. See [`Self::from_bytes`].
    #[cfg(feature = "file-io")]
    pub fn load(path: &Path, options: &LoadOptions) -> TextureResult<Self> {
        let asset =
            crate::file_io::read_file_mapped(path, |data| Self::from_bytes(data, options))?;
        info!(
            "Loaded {}: {} {}, {} mip levels",
            path.display(),
            asset.dimensions_label(),
            asset.format,
            asset.mips.len()
        );
        Ok(asset)
    }

    /// Writes the asset to `path` as a DST container, replacing any existing file.
    #[cfg(feature = "file-io")]
    pub fn save(&self, path: &Path) -> TextureResult<()> {
        use crate::container::{serialized_size, write_container_into};

        let size = serialized_size(&self.mips);
        crate::file_io::write_file_mapped(path, size, |out| {
            Ok(write_container_into(self.format, self.flags, &self.mips, out)?)
        })?;
        info!(
            "Saved {}: {} {}, {} mip levels, {} bytes",
            path.display(),
            self.format,
            self.dimensions_label(),
            self.mips.len(),
            size
        );
        Ok(())
    }

    /// The pixel format shared by every level.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// The header flags written on save.
    #[inline]
    pub fn flags(&self) -> TextureFlags {
        self.flags
    }

    /// Marks the pixel data as sRGB encoded (or not). Only the flag changes.
    #[inline]
    pub fn set_srgb(&mut self, srgb: bool) {
        self.flags.set_srgb(srgb);
    }

    /// Number of levels in the chain.
    #[inline]
    pub fn mip_levels(&self) -> usize {
        self.mips.len()
    }

    /// All levels, base first.
    #[inline]
    pub fn mips(&self) -> &[MipLevel] {
        &self.mips
    }

    /// The level at index `level`.
    pub fn mip(&self, level: usize) -> TextureResult<&MipLevel> {
        self.mips.get(level).ok_or_else(|| {
            ValidationError::MipOutOfRange {
                level,
                count: self.mips.len(),
            }
            .into()
        })
    }

    /// Width of `level` in pixels.
    pub fn width(&self, level: usize) -> TextureResult<u32> {
        self.mip(level).map(MipLevel::width)
    }

    /// Height of `level` in pixels.
    pub fn height(&self, level: usize) -> TextureResult<u32> {
        self.mip(level).map(MipLevel::height)
    }

    /// Read-only view of the bytes of `level`, ready for upload.
    pub fn pixels(&self, level: usize) -> TextureResult<&[u8]> {
        self.mip(level).map(MipLevel::pixels)
    }

    /// Size in bytes of the pixel data of `level`.
    pub fn pixel_data_size(&self, level: usize) -> TextureResult<usize> {
        self.mip(level).map(MipLevel::data_size)
    }

    /// Overwrites the bytes of one level in place.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MipOutOfRange`] for a missing level and
    /// [`ValidationError::BufferSizeMismatch`] if `pixels` is not exactly the level's size.
    pub fn set_mip_level(&mut self, level: usize, pixels: &[u8]) -> TextureResult<()> {
        let count = self.mips.len();
        let target = self
            .mips
            .get_mut(level)
            .ok_or(ValidationError::MipOutOfRange { level, count })?;

        if pixels.len() != target.data_size() {
            return Err(ValidationError::BufferSizeMismatch {
                expected: target.data_size(),
                actual: pixels.len(),
            }
            .into());
        }
        target.pixels_mut().copy_from_slice(pixels);
        Ok(())
    }

    /// Replaces everything below the base with a freshly box filtered chain down to 1x1.
    ///
    /// Block compressed assets keep their base level untouched; the new levels are generated
    /// from its decoded RGBA pixels and compressed back with [`CompressionQuality::Normal`].
    pub fn generate_mipmaps(&mut self) -> TextureResult<()> {
        let base = self.base()?;

        let chain = if self.format.is_compressed() {
            let rgba = decompress_surface_to(
                base.pixels(),
                base.width(),
                base.height(),
                self.format,
                PixelFormat::RGBA8,
            )?;
            let decoded = MipLevel::from_parts(base.width(), base.height(), rgba);

            let mut chain =
                Vec::with_capacity(mip_chain_len(base.width(), base.height()) as usize);
            chain.push(base.clone());
            for level in generate_chain(&decoded, 4).iter().skip(1) {
                let blocks = encode_level(
                    level,
                    PixelFormat::RGBA8,
                    self.format,
                    CompressionQuality::Normal,
                )?;
                chain.push(MipLevel::from_parts(level.width(), level.height(), blocks));
            }
            chain
        } else {
            let channels = self
                .format
                .channel_count()
                .ok_or(ValidationError::UnknownFormat)? as usize;
            generate_chain(base, channels)
        };

        debug!(
            "Generated {} mip levels for {} {}",
            chain.len(),
            self.dimensions_label(),
            self.format
        );
        self.mips = chain;
        Ok(())
    }

    /// Converts every level to `target`.
    ///
    /// - Same format: nothing happens.
    /// - RGB8 and RGBA8 convert both ways (alpha synthesized as 255 or dropped).
    /// - A block compressed `target` is the same as [`Self::compress`] with
    ///   [`CompressionQuality::Normal`].
    /// - A block compressed source decodes straight into RGB8 or RGBA8.
    ///
    /// Any other pair fails with [`TextureError::UnsupportedConversion`].
    pub fn convert_format(&mut self, target: PixelFormat) -> TextureResult<()> {
        self.base()?;
        if target == self.format {
            return Ok(());
        }
        if target.is_compressed() {
            return self.compress(target, CompressionQuality::Normal);
        }

        let source = self.format;
        let mips = if source.is_compressed() {
            self.map_levels(|level| {
                decompress_surface_to(level.pixels(), level.width(), level.height(), source, target)
            })?
        } else {
            self.map_levels(|level| convert_pixels(level.pixels(), source, target))?
        };

        debug!("Converted {} mip levels from {source} to {target}", mips.len());
        self.commit(target, mips);
        Ok(())
    }

    /// Block compresses every level to `target` (BC1 or BC3).
    ///
    /// RGBA8 is encoded directly, RGB8 is encoded as opaque RGBA8 and a different block
    /// compressed format is decoded first. Compressing to the current format is a no-op that
    /// keeps the existing buffers.
    pub fn compress(&mut self, target: PixelFormat, quality: CompressionQuality) -> TextureResult<()> {
        self.base()?;
        if !target.is_compressed() {
            return Err(TextureError::UnsupportedConversion {
                from: self.format,
                to: target,
            });
        }
        if target == self.format {
            return Ok(());
        }

        let source = self.format;
        let mips = self.map_levels(|level| encode_level(level, source, target, quality))?;

        debug!(
            "Compressed {} mip levels from {} to {target} ({} quality)",
            mips.len(),
            self.format,
            quality.name()
        );
        self.commit(target, mips);
        Ok(())
    }

    /// Decodes every level of a block compressed asset: BC1 to RGB8, BC3 to RGBA8.
    /// Uncompressed assets are left as they are.
    pub fn decompress(&mut self) -> TextureResult<()> {
        self.base()?;
        let source = self.format;
        if !source.is_compressed() {
            return Ok(());
        }

        let mips = self.map_levels(|level| {
            decompress_surface(level.pixels(), level.width(), level.height(), source)
        })?;

        let target = source.decompressed_format();
        debug!("Decompressed {} mip levels from {source} to {target}", mips.len());
        self.commit(target, mips);
        Ok(())
    }

    fn from_chain(format: PixelFormat, flags: TextureFlags, mips: Vec<MipLevel>) -> Self {
        Self {
            format,
            flags: flags.synced_with(format),
            mips,
        }
    }

    fn base(&self) -> TextureResult<&MipLevel> {
        self.mips.first().ok_or(TextureError::EmptyAsset)
    }

    /// Builds a replacement chain from per-level pixel buffers, stopping at the first error.
    fn map_levels(
        &self,
        mut convert: impl FnMut(&MipLevel) -> TextureResult<Vec<u8>>,
    ) -> TextureResult<Vec<MipLevel>> {
        self.mips
            .iter()
            .map(|level| {
                let pixels = convert(level)?;
                Ok(MipLevel::from_parts(level.width(), level.height(), pixels))
            })
            .collect()
    }

    fn commit(&mut self, format: PixelFormat, mips: Vec<MipLevel>) {
        self.format = format;
        self.flags = self.flags.synced_with(format);
        self.mips = mips;
    }

    fn dimensions_label(&self) -> String {
        match self.mips.first() {
            Some(base) => format!("{}x{}", base.width(), base.height()),
            None => String::from("empty"),
        }
    }
}

/// Block compresses one level holding `source` pixels into `target`.
///
/// RGB8 gains opaque alpha and block compressed input is decoded to RGBA8 first; R8 and RG8
/// have no defined path.
fn encode_level(
    level: &MipLevel,
    source: PixelFormat,
    target: PixelFormat,
    quality: CompressionQuality,
) -> TextureResult<Vec<u8>> {
    let (width, height) = (level.width(), level.height());
    let converted;
    let rgba: &[u8] = match source {
        PixelFormat::RGBA8 => level.pixels(),
        PixelFormat::RGB8 => {
            converted = convert_pixels(level.pixels(), source, PixelFormat::RGBA8)?;
            &converted
        }
        PixelFormat::BC1 | PixelFormat::BC3 => {
            converted =
                decompress_surface_to(level.pixels(), width, height, source, PixelFormat::RGBA8)?;
            &converted
        }
        _ => {
            return Err(TextureError::UnsupportedConversion {
                from: source,
                to: target,
            })
        }
    };
    compress_surface(rgba, width, height, target, quality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use rstest::rstest;

    #[test]
    fn set_mip_level_replaces_bytes() {
        let mut asset = TextureAsset::empty(2, 1, PixelFormat::RG8).unwrap();
        asset.set_mip_level(0, &[1, 2, 3, 4]).unwrap();
        assert_eq!(asset.pixels(0).unwrap(), [1, 2, 3, 4]);
    }

    #[rstest]
    #[case(1, 4)]
    #[case(0, 3)]
    #[case(0, 5)]
    fn set_mip_level_validates(#[case] level: usize, #[case] len: usize) {
        let mut asset = TextureAsset::empty(2, 1, PixelFormat::RG8).unwrap();
        let error = asset.set_mip_level(level, &vec![9; len]).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(asset.pixels(0).unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn accessors_reject_missing_levels() {
        let asset = TextureAsset::empty(4, 4, PixelFormat::R8).unwrap();
        assert_eq!(asset.width(0).unwrap(), 4);
        assert_eq!(asset.pixel_data_size(0).unwrap(), 16);
        for error in [
            asset.width(1).unwrap_err(),
            asset.height(1).unwrap_err(),
            asset.pixels(1).unwrap_err(),
            asset.pixel_data_size(1).unwrap_err(),
        ] {
            assert_eq!(error.kind(), ErrorKind::Validation);
        }
    }

    #[test]
    fn flags_follow_format() {
        let mut asset = TextureAsset::empty(4, 4, PixelFormat::RGBA8).unwrap();
        asset.set_srgb(true);
        assert!(!asset.flags().block_compressed());

        asset.compress(PixelFormat::BC3, CompressionQuality::Fast).unwrap();
        assert!(asset.flags().block_compressed());
        assert!(asset.flags().srgb());

        asset.decompress().unwrap();
        assert_eq!(asset.format(), PixelFormat::RGBA8);
        assert!(!asset.flags().block_compressed());
        assert!(asset.flags().srgb());
    }

    #[rstest]
    #[case(PixelFormat::R8)]
    #[case(PixelFormat::RG8)]
    fn compress_without_alpha_path_fails(#[case] format: PixelFormat) {
        let mut asset = TextureAsset::empty(4, 4, format).unwrap();
        let error = asset
            .compress(PixelFormat::BC1, CompressionQuality::Fast)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnsupportedConversion);
        assert_eq!(asset.format(), format);
    }

    #[test]
    fn compress_to_uncompressed_target_fails() {
        let mut asset = TextureAsset::empty(4, 4, PixelFormat::RGBA8).unwrap();
        let error = asset
            .compress(PixelFormat::RGB8, CompressionQuality::Fast)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnsupportedConversion);
    }

    #[test]
    fn bc1_converts_to_bc3_through_rgba() {
        let mut asset =
            TextureAsset::from_memory(4, 4, PixelFormat::RGB8, [0, 255, 0].repeat(16)).unwrap();
        asset.compress(PixelFormat::BC1, CompressionQuality::Normal).unwrap();
        asset.compress(PixelFormat::BC3, CompressionQuality::Normal).unwrap();
        asset.convert_format(PixelFormat::RGBA8).unwrap();
        assert_eq!(asset.pixels(0).unwrap(), [0, 255, 0, 255].repeat(16));
    }
}
