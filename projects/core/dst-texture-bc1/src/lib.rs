#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

pub mod encode;
pub mod palette;
pub mod util;

pub use encode::{encode_bc1_block, encode_bc1_block_into, encode_color_block};
pub use util::{decode_bc1_block, decode_bc1_block_from_slice};

/// Size of a single BC1 block in bytes.
pub const BC1_BLOCK_SIZE: usize = 8;
