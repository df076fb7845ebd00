//! Block level helpers for reading BC3 data.

mod bc3_decode;

pub use bc3_decode::*;
