#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]

pub mod asset;
pub mod codec;
pub mod container;
pub mod convert;
pub mod error;
pub mod file_io;
pub mod flags;
pub mod mip_level;
pub mod mipmap;

mod fallback;

// Re-export key types
pub use asset::{LoadOptions, TextureAsset};
pub use error::{ErrorKind, TextureError, TextureResult, ValidationError};
pub use flags::TextureFlags;
pub use mip_level::MipLevel;

pub use dst_texture_common::pixel_format::PixelFormat;
pub use dst_texture_common::quality::CompressionQuality;
