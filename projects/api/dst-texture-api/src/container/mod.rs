//! The DST binary container.
//!
//! ```text
//! +---------------------+  0
//! | header (24 bytes)   |
//! +---------------------+  24
//! | mip table           |  16 bytes per level
//! +---------------------+  24 + 16 * mip_levels
//! | level 0 pixels      |  data_offset 0
//! | level 1 pixels      |
//! | ...                 |
//! +---------------------+
//! ```
//!
//! All integers are little endian.

/// Layout constants.
pub mod constants;

mod error;
pub use error::ContainerError;

/// Header and mip table entries.
pub mod header;
pub use header::{has_dst_magic, is_dst, parse_header, DstHeader, MipEntry};

mod read;
pub use read::{expected_level_size, parse_container, ParsedContainer};

mod write;
pub use write::{serialized_size, write_container, write_container_into};

pub use crate::mipmap::mip_chain_len;
