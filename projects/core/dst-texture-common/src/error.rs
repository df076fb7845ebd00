//! Errors reported by the slice based block encode/decode functions.

use thiserror::Error;

/// Returned when a buffer handed to a block codec is too small for the requested operation.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum BlockCodecError {
    /// The input holds fewer bytes than one block (or the requested number of blocks) needs.
    #[error("input is too short: needed {needed} bytes, got {actual}")]
    InputTooShort {
        /// Bytes required.
        needed: usize,
        /// Bytes available.
        actual: usize,
    },

    /// The output buffer cannot hold the encoded or decoded data.
    #[error("output is too short: needed {needed} bytes, got {actual}")]
    OutputTooShort {
        /// Bytes required.
        needed: usize,
        /// Bytes available.
        actual: usize,
    },
}
