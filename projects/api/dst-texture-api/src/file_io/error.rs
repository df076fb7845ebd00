//! Error types for file I/O operations.

use thiserror::Error;

/// Specific backend-related errors that can occur during file I/O operations.
#[cfg(feature = "file-io")]
#[derive(Debug, Error)]
pub enum LightweightMmapError {
    /// Error opening file handle
    #[error("Failed to open file handle: {0}")]
    FileHandle(#[from] lightweight_mmap::handles::HandleOpenError),

    /// Error creating memory mapping
    #[error("Failed to create memory mapping: {0}")]
    MemoryMapping(#[from] lightweight_mmap::mmap::MmapError),
}

/// File I/O errors that can occur with different backends
#[derive(Debug, Error)]
pub enum FileIoError {
    /// Error from lightweight-mmap backend
    #[cfg(feature = "file-io")]
    #[error("lightweight-mmap error: {0}")]
    LightweightMmap(#[from] LightweightMmapError),
}

// Direct From implementations for the error types hit by `?` in file operations
#[cfg(feature = "file-io")]
impl From<lightweight_mmap::handles::HandleOpenError> for FileIoError {
    fn from(e: lightweight_mmap::handles::HandleOpenError) -> Self {
        Self::LightweightMmap(LightweightMmapError::FileHandle(e))
    }
}

#[cfg(feature = "file-io")]
impl From<lightweight_mmap::mmap::MmapError> for FileIoError {
    fn from(e: lightweight_mmap::mmap::MmapError) -> Self {
        Self::LightweightMmap(LightweightMmapError::MemoryMapping(e))
    }
}

#[cfg(feature = "file-io")]
impl From<lightweight_mmap::handles::HandleOpenError> for crate::TextureError {
    fn from(e: lightweight_mmap::handles::HandleOpenError) -> Self {
        Self::Io(e.into())
    }
}

#[cfg(feature = "file-io")]
impl From<lightweight_mmap::mmap::MmapError> for crate::TextureError {
    fn from(e: lightweight_mmap::mmap::MmapError) -> Self {
        Self::Io(e.into())
    }
}
