//! Layout constants of the DST container.

/// `DST\0` read as a little endian u32.
pub const DST_MAGIC: u32 = u32::from_le_bytes(*b"DST\0");

/// The only container version this crate reads and writes.
pub const DST_VERSION: u16 = 1;

/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 24;

/// Size of one mip table entry in bytes.
pub const MIP_ENTRY_SIZE: usize = 16;

// Header field offsets
pub(crate) const MAGIC_OFFSET: usize = 0;
/// `version` (low half) and `format` (high half) share one little endian u32.
pub(crate) const VERSION_FORMAT_OFFSET: usize = 4;
pub(crate) const WIDTH_OFFSET: usize = 8;
pub(crate) const HEIGHT_OFFSET: usize = 12;
pub(crate) const MIP_LEVELS_OFFSET: usize = 16;
pub(crate) const FLAGS_OFFSET: usize = 20;

// Mip entry field offsets, relative to the entry
pub(crate) const ENTRY_WIDTH_OFFSET: usize = 0;
pub(crate) const ENTRY_HEIGHT_OFFSET: usize = 4;
pub(crate) const ENTRY_DATA_SIZE_OFFSET: usize = 8;
pub(crate) const ENTRY_DATA_OFFSET_OFFSET: usize = 12;

/// Offset of the pixel data region for a container with `mip_levels` levels.
#[inline]
pub const fn data_region_offset(mip_levels: usize) -> usize {
    HEADER_SIZE + MIP_ENTRY_SIZE * mip_levels
}
