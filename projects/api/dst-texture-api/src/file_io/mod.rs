//! Path based loading and saving.
//!
//! Files are memory mapped with `lightweight-mmap`: loads parse straight out of the mapping
//! and saves serialize straight into a preallocated one.

mod error;
pub use error::*;

#[cfg(feature = "file-io")]
mod lightweight_mmap_impl;

#[cfg(feature = "file-io")]
pub use lightweight_mmap_impl::*;
