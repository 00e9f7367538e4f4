// File Operations for Keys and Signatures
// Whole-file reads and writes with typed failures

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;
use zeroize::Zeroizing;

use crate::rsa::RsaError;

/// Errors that can occur during file operations
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("short read from {}: expected {expected} bytes, got {actual}", .path.display())]
    ShortRead {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Crypto(#[from] RsaError),
}

impl FileError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            FileError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            FileError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

/// Read entire file into memory
pub fn read_file(path: &Path) -> FileResult<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| FileError::io(path, e))?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|e| FileError::io(path, e))?;
    Ok(data)
}

/// Read the first `expected` bytes of a file.
///
/// Shorter files fail with [`FileError::ShortRead`]; trailing bytes are
/// dropped with a warning. The buffer is wiped when released.
pub fn read_exact_len(path: &Path, expected: usize) -> FileResult<Zeroizing<Vec<u8>>> {
    let mut data = Zeroizing::new(read_file(path)?);

    if data.len() < expected {
        return Err(FileError::ShortRead {
            path: path.to_path_buf(),
            expected,
            actual: data.len(),
        });
    }

    if data.len() > expected {
        warn!(
            path = %path.display(),
            expected,
            actual = data.len(),
            "ignoring trailing bytes"
        );
        data.truncate(expected);
    }

    Ok(data)
}

/// Write data to file
pub fn write_file(path: &Path, data: &[u8]) -> FileResult<()> {
    let mut file = File::create(path).map_err(|e| FileError::io(path, e))?;
    file.write_all(data).map_err(|e| FileError::io(path, e))?;
    file.sync_all().map_err(|e| FileError::io(path, e))?;
    Ok(())
}
