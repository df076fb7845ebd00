//! Block level helpers for reading BC1 data.

mod bc1_decode;

pub use bc1_decode::*;
