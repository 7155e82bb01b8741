//! File contents for frame loading.
//!
//! Large frame files are memory-mapped; smaller ones (or any file when
//! mmap fails) are read into a buffer.

use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;
use tracing::warn;

use crate::error::{FrameError, Result};
use crate::frame::LoadOptions;

/// Bytes of a frame file, either mapped or buffered.
pub enum FileSource {
    /// Memory-mapped file.
    Mmap(Mmap),
    /// Fully buffered file.
    Buffered(Vec<u8>),
}

impl FileSource {
    /// Opens a file, using mmap if its size reaches the configured threshold.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::FileRead`] if the file cannot be opened or read.
    pub fn open(path: &Path, options: &LoadOptions) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| FrameError::file_read(path, e))?;
        let size = file
            .metadata()
            .map_err(|e| FrameError::file_read(path, e))?
            .len();

        if options.should_mmap(size) {
            match Self::try_mmap(&file) {
                Ok(source) => return Ok(source),
                Err(e) => warn!(
                    path = %path.display(),
                    error = %e,
                    "mmap failed, falling back to buffered read"
                ),
            }
        }

        let mut buf = Vec::with_capacity(size as usize);
        file.read_to_end(&mut buf)
            .map_err(|e| FrameError::file_read(path, e))?;
        Ok(FileSource::Buffered(buf))
    }

    #[allow(unsafe_code)]
    fn try_mmap(file: &File) -> std::io::Result<Self> {
        // SAFETY: the file is opened read-only and frame files are not
        // expected to change while a frame is being decoded.
        let mmap = unsafe { Mmap::map(file) }?;
        Ok(FileSource::Mmap(mmap))
    }

    /// Returns true if the contents are memory-mapped.
    #[must_use]
    pub fn is_mmap(&self) -> bool {
        matches!(self, FileSource::Mmap(_))
    }
}

impl Deref for FileSource {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            FileSource::Mmap(mmap) => &mmap[..],
            FileSource::Buffered(buf) => &buf[..],
        }
    }
}
