//! Native container writing.

use super::{
    constants::*,
    error::ContainerError,
    header::{write_header, write_mip_entry, DstHeader, MipEntry},
};
use crate::{flags::TextureFlags, mip_level::MipLevel};
use dst_texture_common::pixel_format::PixelFormat;

/// Total size of the container holding `levels`: header, mip table and pixel data.
pub fn serialized_size(levels: &[MipLevel]) -> usize {
    data_region_offset(levels.len()) + levels.iter().map(MipLevel::data_size).sum::<usize>()
}

/// Serializes `levels` into a new buffer. See [`write_container_into`].
pub fn write_container(
    format: PixelFormat,
    flags: TextureFlags,
    levels: &[MipLevel],
) -> Result<Vec<u8>, ContainerError> {
    let mut out = vec![0u8; serialized_size(levels)];
    write_container_into(format, flags, levels, &mut out)?;
    Ok(out)
}

/// Serializes `levels` into `dst`, which must be at least [`serialized_size`] bytes.
///
/// The header takes its base size from `levels[0]`. Level data is laid out back to back in
/// table order, so each `data_offset` is the sum of the sizes before it.
///
/// # Errors
///
/// - [`ContainerError::NoMipLevels`] if `levels` is empty.
/// - [`ContainerError::LevelTooLarge`] if a size or offset does not fit in a u32.
/// - [`ContainerError::OutputTooSmall`] if `dst` is too short.
pub fn write_container_into(
    format: PixelFormat,
    flags: TextureFlags,
    levels: &[MipLevel],
    dst: &mut [u8],
) -> Result<(), ContainerError> {
    let base = levels.first().ok_or(ContainerError::NoMipLevels)?;
    let required = serialized_size(levels);
    if dst.len() < required {
        return Err(ContainerError::OutputTooSmall {
            required,
            actual: dst.len(),
        });
    }

    let header = DstHeader {
        version: DST_VERSION,
        format,
        width: base.width(),
        height: base.height(),
        mip_levels: levels.len() as u32,
        flags,
    };
    write_header(dst, &header)?;

    let region_start = data_region_offset(levels.len());
    let mut offset = 0usize;
    for (index, level) in levels.iter().enumerate() {
        let too_large = ContainerError::LevelTooLarge {
            level: index as u32,
        };
        let entry = MipEntry {
            width: level.width(),
            height: level.height(),
            data_size: u32::try_from(level.data_size()).map_err(|_| too_large)?,
            data_offset: u32::try_from(offset).map_err(|_| too_large)?,
        };
        write_mip_entry(dst, index, &entry)?;

        let start = region_start + offset;
        dst[start..start + level.data_size()].copy_from_slice(level.pixels());
        offset += level.data_size();
    }

    Ok(())
}
