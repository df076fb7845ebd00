//! File I/O implementation using lightweight-mmap.

use crate::container::ContainerError;
use crate::error::TextureResult;
use lightweight_mmap::handles::*;
use lightweight_mmap::mmap::*;
use std::path::Path;

/// Maps the file at `path` read-only and hands its bytes to `parse`.
///
/// An empty file fails with [`ContainerError::Empty`] without being mapped.
pub fn read_file_mapped<T>(
    path: &Path,
    parse: impl FnOnce(&[u8]) -> TextureResult<T>,
) -> TextureResult<T> {
    let input_handle = ReadOnlyFileHandle::open(path)?;
    let input_size = input_handle.size()? as usize;
    if input_size == 0 {
        return Err(ContainerError::Empty.into());
    }
    let input_mapping = ReadOnlyMmap::new(&input_handle, 0, input_size)?;
    parse(input_mapping.as_slice())
}

/// Creates (or truncates) the file at `path` with exactly `size` bytes, maps it and lets
/// `write` fill it in. The parent directory must exist.
pub fn write_file_mapped(
    path: &Path,
    size: usize,
    write: impl FnOnce(&mut [u8]) -> TextureResult<()>,
) -> TextureResult<()> {
    let output_handle = ReadWriteFileHandle::create_preallocated(path, size as i64)?;
    let mut output_mapping = ReadWriteMmap::new(&output_handle, 0, size)?;
    write(output_mapping.as_mut_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::NamedTempFile;

    #[test]
    fn written_bytes_read_back() {
        let file = NamedTempFile::new().unwrap();
        write_file_mapped(file.path(), 5, |out| {
            out.copy_from_slice(b"hello");
            Ok(())
        })
        .unwrap();

        let read = read_file_mapped(file.path(), |data| Ok(data.to_vec())).unwrap();
        assert_eq!(read, b"hello");
    }

    #[test]
    fn empty_file_is_a_format_error() {
        let file = NamedTempFile::new().unwrap();
        let error = read_file_mapped(file.path(), |_| Ok(())).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Format);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = read_file_mapped(&dir.path().join("missing.dst"), |_| Ok(())).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Io);
    }
}
