//! Streaming byte-for-byte file comparison.
//!
//! Two inputs are read in lock-step, one fixed-size chunk at a time, so
//! memory stays at two chunk buffers regardless of file size. Each chunk is
//! filled until it is full or the input is exhausted before it is compared;
//! short reads from pipes or network filesystems therefore never produce a
//! spurious mismatch.

use std::fs::{self, File};
use std::io::{self, ErrorKind, Read};
use std::path::Path;

use precopy_core::{CheckError, DEFAULT_CHUNK_SIZE};
use tracing::trace;

/// Outcome of comparing two files by content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentComparison {
    /// Whether both inputs hold the same bytes.
    pub equal: bool,
    /// Bytes read from both inputs combined.
    pub bytes_read: u64,
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

#[derive(Debug)]
struct SideError {
    side: Side,
    source: io::Error,
}

/// Compares files chunk by chunk, reusing its buffers across calls.
#[derive(Debug)]
pub struct FileComparator {
    left_buf: Vec<u8>,
    right_buf: Vec<u8>,
}

impl FileComparator {
    /// Create a comparator with the default chunk size.
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Create a comparator with a custom chunk size (at least one byte).
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            left_buf: vec![0u8; chunk_size],
            right_buf: vec![0u8; chunk_size],
        }
    }

    /// Chunk size in bytes.
    pub fn chunk_size(&self) -> usize {
        self.left_buf.len()
    }

    /// Check whether two files hold identical bytes.
    ///
    /// Sizes need not have been checked first; files of different lengths
    /// compare unequal.
    pub fn files_equal(&mut self, left: &Path, right: &Path) -> Result<bool, CheckError> {
        self.compare_files(left, right).map(|c| c.equal)
    }

    /// Compare two files and report how much was read.
    pub fn compare_files(
        &mut self,
        left: &Path,
        right: &Path,
    ) -> Result<ContentComparison, CheckError> {
        trace!(left = %left.display(), right = %right.display(), "comparing file content");

        let mut left_file = open_regular(left)?;
        let mut right_file = open_regular(right)?;

        self.compare_readers(&mut left_file, &mut right_file)
            .map_err(|err| match err.side {
                Side::Left => CheckError::file_io(left, err.source),
                Side::Right => CheckError::file_io(right, err.source),
            })
    }

    /// Check whether two readers yield identical byte streams.
    pub fn streams_equal<L: Read, R: Read>(&mut self, mut left: L, mut right: R) -> io::Result<bool> {
        self.compare_readers(&mut left, &mut right)
            .map(|c| c.equal)
            .map_err(|err| err.source)
    }

    fn compare_readers<L: Read, R: Read>(
        &mut self,
        left: &mut L,
        right: &mut R,
    ) -> Result<ContentComparison, SideError> {
        let mut bytes_read = 0u64;

        loop {
            let left_len = read_chunk(left, &mut self.left_buf).map_err(|source| SideError {
                side: Side::Left,
                source,
            })?;
            let right_len = read_chunk(right, &mut self.right_buf).map_err(|source| SideError {
                side: Side::Right,
                source,
            })?;
            bytes_read += (left_len + right_len) as u64;

            // A chunk is only short at end-of-data, so unequal fills mean
            // one input ended before the other.
            if left_len != right_len {
                return Ok(ContentComparison {
                    equal: false,
                    bytes_read,
                });
            }
            if left_len == 0 {
                return Ok(ContentComparison {
                    equal: true,
                    bytes_read,
                });
            }
            if self.left_buf[..left_len] != self.right_buf[..right_len] {
                return Ok(ContentComparison {
                    equal: false,
                    bytes_read,
                });
            }
        }
    }
}

impl Default for FileComparator {
    fn default() -> Self {
        Self::new()
    }
}

/// Open a path for comparison, following symlinks.
///
/// Anything that does not resolve to a regular file is refused before
/// opening: a FIFO would block `open` until a writer appears, and a
/// directory cannot be read as a byte stream.
fn open_regular(path: &Path) -> Result<File, CheckError> {
    let metadata = fs::metadata(path).map_err(|e| CheckError::file_io(path, e))?;
    if !metadata.is_file() {
        return Err(CheckError::file_io(
            path,
            io::Error::new(ErrorKind::InvalidInput, "not a regular file"),
        ));
    }
    File::open(path).map_err(|e| CheckError::file_io(path, e))
}

/// Fill `buf` from `reader` until it is full or the reader is exhausted.
///
/// Returns the number of bytes placed in `buf`; anything less than
/// `buf.len()` means end-of-data was reached.
pub fn read_chunk<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Check whether two files hold identical bytes, using the default chunk size.
pub fn files_equal(left: &Path, right: &Path) -> Result<bool, CheckError> {
    FileComparator::new().files_equal(left, right)
}
