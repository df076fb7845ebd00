//! Native container parsing.

use super::{
    constants::*,
    error::ContainerError,
    header::{parse_header, read_mip_entry, DstHeader},
};
use crate::{
    mip_level::MipLevel,
    mipmap::{mip_chain_len, next_level_size},
};
use dst_texture_common::pixel_format::PixelFormat;

/// A fully validated container: its header and the pixel bytes of every level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedContainer {
    pub header: DstHeader,
    pub levels: Vec<MipLevel>,
}

/// Byte size a level of `width` x `height` must have in `format`.
///
/// [`None`] for [`PixelFormat::Unknown`] or if the size overflows.
#[inline]
pub fn expected_level_size(format: PixelFormat, width: u32, height: u32) -> Option<usize> {
    format.level_size(width, height)
}

/// Parses a complete DST container, copying every level out of `data`.
///
/// Beyond the header checks of [`parse_header`] this rejects an empty or overlong mip chain,
/// a mip table running past the end of the input, levels whose dimensions do not follow the
/// halving rule from the header's base size, levels whose `data_size` disagrees with their
/// dimensions and format, and levels whose bytes lie outside of the pixel data region.
/// Nothing outside of `data` is ever read.
pub fn parse_container(data: &[u8]) -> Result<ParsedContainer, ContainerError> {
    let header = parse_header(data)?;

    if header.mip_levels == 0 {
        return Err(ContainerError::NoMipLevels);
    }
    if header.width == 0 || header.height == 0 {
        return Err(ContainerError::ZeroDimensions {
            width: header.width,
            height: header.height,
        });
    }
    let max = mip_chain_len(header.width, header.height);
    if header.mip_levels > max {
        return Err(ContainerError::TooManyMipLevels {
            declared: header.mip_levels,
            max,
            width: header.width,
            height: header.height,
        });
    }

    // At most 32 levels, so this cannot overflow.
    let region_start = data_region_offset(header.mip_levels as usize);
    if data.len() < region_start {
        return Err(ContainerError::TruncatedMipTable {
            required: region_start,
            actual: data.len(),
        });
    }
    let region = &data[region_start..];

    let mut levels = Vec::with_capacity(header.mip_levels as usize);
    let (mut width, mut height) = (header.width, header.height);
    for level in 0..header.mip_levels {
        let entry = read_mip_entry(data, level as usize).ok_or(ContainerError::TruncatedMipTable {
            required: region_start,
            actual: data.len(),
        })?;

        if entry.width != width || entry.height != height {
            return Err(ContainerError::LevelDimensionMismatch {
                level,
                expected_width: width,
                expected_height: height,
                actual_width: entry.width,
                actual_height: entry.height,
            });
        }

        let expected = expected_level_size(header.format, width, height)
            .ok_or(ContainerError::LevelTooLarge { level })?;
        if entry.data_size as usize != expected {
            return Err(ContainerError::LevelSizeMismatch {
                level,
                expected,
                actual: entry.data_size as usize,
            });
        }

        let pixels = (entry.data_offset as usize)
            .checked_add(entry.data_size as usize)
            .and_then(|end| region.get(entry.data_offset as usize..end))
            .ok_or(ContainerError::LevelOutOfBounds {
                level,
                offset: entry.data_offset,
                size: entry.data_size,
                region: region.len(),
            })?;

        levels.push(MipLevel::from_parts(width, height, pixels.to_vec()));
        (width, height) = next_level_size(width, height);
    }

    Ok(ParsedContainer { header, levels })
}
