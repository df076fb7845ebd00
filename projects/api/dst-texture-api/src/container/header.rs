//! The fixed 24 byte header and the per-level mip table entries.

use super::{constants::*, error::ContainerError};
use crate::flags::TextureFlags;
use dst_texture_common::pixel_format::PixelFormat;
use endian_writer::{EndianReader, EndianWriter, LittleEndianReader, LittleEndianWriter};

/// Decoded DST header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstHeader {
    pub version: u16,
    pub format: PixelFormat,
    /// Width of the base level.
    pub width: u32,
    /// Height of the base level.
    pub height: u32,
    pub mip_levels: u32,
    pub flags: TextureFlags,
}

/// One row of the mip table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipEntry {
    pub width: u32,
    pub height: u32,
    pub data_size: u32,
    /// Offset from the start of the pixel data region, not from the start of the file.
    pub data_offset: u32,
}

/// `true` if `data` starts with the `DST\0` magic.
#[inline(always)]
pub fn has_dst_magic(data: &[u8]) -> bool {
    data.len() >= 4 && u32::from_le_bytes([data[0], data[1], data[2], data[3]]) == DST_MAGIC
}

/// Determines if the given data likely is a DST container: the magic is present and the
/// input is long enough to hold the header. Use [`parse_header`] for full validation.
#[inline(always)]
pub fn is_dst(data: &[u8]) -> bool {
    data.len() >= HEADER_SIZE && has_dst_magic(data)
}

/// Reads and validates the fixed header.
///
/// The mip table is not inspected; see [`parse_container`](super::parse_container).
///
/// # Errors
///
/// [`ContainerError::Empty`], [`ContainerError::BadMagic`],
/// [`ContainerError::TruncatedHeader`], [`ContainerError::UnsupportedVersion`] or
/// [`ContainerError::UnknownFormat`] (also for the `Unknown` tag, which cannot hold pixels).
pub fn parse_header(data: &[u8]) -> Result<DstHeader, ContainerError> {
    if data.is_empty() {
        return Err(ContainerError::Empty);
    }
    if !has_dst_magic(data) {
        return Err(ContainerError::BadMagic);
    }
    if data.len() < HEADER_SIZE {
        return Err(ContainerError::TruncatedHeader {
            required: HEADER_SIZE,
            actual: data.len(),
        });
    }

    // SAFETY: data.len() >= HEADER_SIZE (24), so every u32 field up to FLAGS_OFFSET (20) + 4
    // is in bounds.
    let mut reader = unsafe { LittleEndianReader::new(data.as_ptr()) };
    let (version_format, width, height, mip_levels, flags) = unsafe {
        (
            reader.read_u32_at(VERSION_FORMAT_OFFSET as isize),
            reader.read_u32_at(WIDTH_OFFSET as isize),
            reader.read_u32_at(HEIGHT_OFFSET as isize),
            reader.read_u32_at(MIP_LEVELS_OFFSET as isize),
            reader.read_u32_at(FLAGS_OFFSET as isize),
        )
    };

    let version = version_format as u16;
    if version != DST_VERSION {
        return Err(ContainerError::UnsupportedVersion(version));
    }

    let format_tag = (version_format >> 16) as u16;
    let format = match PixelFormat::from_u16(format_tag) {
        Some(PixelFormat::Unknown) | None => {
            return Err(ContainerError::UnknownFormat(format_tag))
        }
        Some(format) => format,
    };

    Ok(DstHeader {
        version,
        format,
        width,
        height,
        mip_levels,
        flags: TextureFlags::from_bits(flags),
    })
}

/// Reads mip table entry `level`.
///
/// Returns [`None`] if the entry does not fit in `data`.
pub fn read_mip_entry(data: &[u8], level: usize) -> Option<MipEntry> {
    let start = HEADER_SIZE.checked_add(level.checked_mul(MIP_ENTRY_SIZE)?)?;
    let entry = data.get(start..start.checked_add(MIP_ENTRY_SIZE)?)?;

    // SAFETY: `entry` is exactly MIP_ENTRY_SIZE (16) bytes long.
    let mut reader = unsafe { LittleEndianReader::new(entry.as_ptr()) };
    unsafe {
        Some(MipEntry {
            width: reader.read_u32_at(ENTRY_WIDTH_OFFSET as isize),
            height: reader.read_u32_at(ENTRY_HEIGHT_OFFSET as isize),
            data_size: reader.read_u32_at(ENTRY_DATA_SIZE_OFFSET as isize),
            data_offset: reader.read_u32_at(ENTRY_DATA_OFFSET_OFFSET as isize),
        })
    }
}

/// Writes `header` into the first [`HEADER_SIZE`] bytes of `dst`.
pub(crate) fn write_header(dst: &mut [u8], header: &DstHeader) -> Result<(), ContainerError> {
    let actual = dst.len();
    let dst = dst
        .get_mut(..HEADER_SIZE)
        .ok_or(ContainerError::OutputTooSmall {
            required: HEADER_SIZE,
            actual,
        })?;

    let version_format = header.version as u32 | ((header.format.to_u16() as u32) << 16);

    // SAFETY: `dst` is exactly HEADER_SIZE (24) bytes long.
    let mut writer = unsafe { LittleEndianWriter::new(dst.as_mut_ptr()) };
    unsafe {
        writer.write_u32_at(DST_MAGIC, MAGIC_OFFSET as isize);
        writer.write_u32_at(version_format, VERSION_FORMAT_OFFSET as isize);
        writer.write_u32_at(header.width, WIDTH_OFFSET as isize);
        writer.write_u32_at(header.height, HEIGHT_OFFSET as isize);
        writer.write_u32_at(header.mip_levels, MIP_LEVELS_OFFSET as isize);
        writer.write_u32_at(header.flags.bits(), FLAGS_OFFSET as isize);
    }
    Ok(())
}

/// Writes mip table entry `level` into `dst`, which holds the whole container.
pub(crate) fn write_mip_entry(
    dst: &mut [u8],
    level: usize,
    entry: &MipEntry,
) -> Result<(), ContainerError> {
    let start = HEADER_SIZE + level * MIP_ENTRY_SIZE;
    let actual = dst.len();
    let dst = dst
        .get_mut(start..start + MIP_ENTRY_SIZE)
        .ok_or(ContainerError::OutputTooSmall {
            required: start + MIP_ENTRY_SIZE,
            actual,
        })?;

    // SAFETY: `dst` is exactly MIP_ENTRY_SIZE (16) bytes long.
    let mut writer = unsafe { LittleEndianWriter::new(dst.as_mut_ptr()) };
    unsafe {
        writer.write_u32_at(entry.width, ENTRY_WIDTH_OFFSET as isize);
        writer.write_u32_at(entry.height, ENTRY_HEIGHT_OFFSET as isize);
        writer.write_u32_at(entry.data_size, ENTRY_DATA_SIZE_OFFSET as isize);
        writer.write_u32_at(entry.data_offset, ENTRY_DATA_OFFSET_OFFSET as isize);
    }
    Ok(())
}
