#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

pub mod alpha;
pub mod encode;
pub mod util;

pub use encode::{encode_bc3_block, encode_bc3_block_into};
pub use util::{decode_bc3_block, decode_bc3_block_from_slice};

/// Size of a single BC3 block in bytes.
pub const BC3_BLOCK_SIZE: usize = 16;
