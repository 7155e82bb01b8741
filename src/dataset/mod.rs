//! Datasets: ordered lists of data frame files sharing one schema.
//!
//! A dataset is described by a YAML manifest:
//!
//! ```yaml
//! path: data
//! files:
//!   - file1.json
//!   - file2.json
//! ```
//!
//! File names are joined onto `path`; a relative `path` resolves against
//! the process working directory, not the manifest's location.
//!
//! A [`DataSet`] carries a cursor and must not be shared between two
//! concurrent streams. Independently loaded instances may be iterated
//! concurrently.

use std::io::Read;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FrameError, Result};
use crate::frame::{DataFrame, LoadOptions};
use crate::schema::VectorSpec;
use crate::stream::{DataSetVectors, Prefetch, StreamConfig};

/// Name used for decode errors when a manifest is read from memory.
const IN_MEMORY: &str = "<dataset manifest>";

/// An ordered, resettable cursor over data frame files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    /// Base directory for file names.
    #[serde(default)]
    path: PathBuf,

    /// Ordered file names, relative to `path`.
    #[serde(default)]
    files: Vec<String>,

    #[serde(skip)]
    cursor: usize,

    #[serde(skip)]
    options: LoadOptions,
}

impl DataSet {
    /// Creates a dataset from a base directory and file names.
    #[must_use]
    pub fn new<S: Into<String>>(
        path: impl Into<PathBuf>,
        files: impl IntoIterator<Item = S>,
    ) -> Self {
        DataSet {
            path: path.into(),
            files: files.into_iter().map(Into::into).collect(),
            cursor: 0,
            options: LoadOptions::default(),
        }
    }

    /// Decodes a dataset manifest from YAML bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Decode`] if the manifest is malformed.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::decode(bytes, IN_MEMORY)
    }

    /// Reads a dataset manifest from a reader.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or decoding fails.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .map_err(|e| FrameError::file_read(IN_MEMORY, e))?;
        Self::from_slice(&buf)
    }

    /// Reads a dataset manifest from a file.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::FileRead`] if the file cannot be read, or
    /// [`FrameError::Decode`] if it is malformed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| FrameError::file_read(path, e))?;
        Self::decode(&bytes, &path.display().to_string())
    }

    fn decode(bytes: &[u8], source_name: &str) -> Result<Self> {
        let dataset: DataSet =
            serde_yaml::from_slice(bytes).map_err(|e| FrameError::decode(source_name, e))?;
        debug!(
            source = source_name,
            path = %dataset.path.display(),
            files = dataset.files.len(),
            "loaded dataset manifest"
        );
        Ok(dataset)
    }

    /// Sets the options used to load each frame.
    #[must_use]
    pub fn with_options(mut self, options: LoadOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the base directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the ordered file names.
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Returns the number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true if the dataset lists no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns the position of the next file to load.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the full path of the file at `index`.
    #[must_use]
    pub fn file_path(&self, index: usize) -> Option<PathBuf> {
        self.files.get(index).map(|file| self.path.join(file))
    }

    /// Goes back to the first file.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Loads the frame under the cursor and advances.
    ///
    /// Returns `Ok(None)` when every file has been read; the cursor is then
    /// reset so the following call starts again from the first file. A
    /// failed load leaves the cursor in place.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::FileRead`] or [`FrameError::Decode`] if the
    /// frame file can't be loaded.
    pub fn next_frame(&mut self) -> Result<Option<DataFrame>> {
        let Some(path) = self.file_path(self.cursor) else {
            self.cursor = 0;
            return Ok(None);
        };

        debug!(file = %path.display(), cursor = self.cursor, "reading data frame file");
        let frame = DataFrame::from_path_with(&path, &self.options)?;
        self.cursor += 1;
        Ok(Some(frame))
    }

    /// Resets the dataset and returns a lazy stream of float vectors over
    /// all of its frames.
    pub fn vectors(&mut self, spec: &VectorSpec) -> DataSetVectors<&mut DataSet> {
        self.reset();
        DataSetVectors::new(self, spec.clone())
    }

    /// Resets the dataset and consumes it into a lazy vector stream.
    #[must_use]
    pub fn into_vectors(mut self, spec: VectorSpec) -> DataSetVectors<DataSet> {
        self.reset();
        DataSetVectors::new(self, spec)
    }

    /// Streams float vectors from a background producer thread.
    ///
    /// The dataset moves into the producer, so it can't be advanced by
    /// anyone else while the stream runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the thread can't be spawned.
    pub fn prefetch_vectors(
        self,
        spec: VectorSpec,
        config: &StreamConfig,
    ) -> Result<Prefetch<Vec<f64>>> {
        Prefetch::spawn(self.into_vectors(spec), config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_manifest() {
        let ds = DataSet::from_slice(b"path: data\nfiles:\n  - file1.json\n  - file2.json\n")
            .unwrap();
        assert_eq!(ds.path(), Path::new("data"));
        assert_eq!(ds.files(), ["file1.json", "file2.json"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.cursor(), 0);
    }

    #[test]
    fn test_malformed_manifest() {
        let err = DataSet::from_slice(b"files: {not: [a list").unwrap_err();
        assert!(matches!(err, FrameError::Decode { .. }));
    }

    #[test]
    fn test_file_path_joins_base() {
        let ds = DataSet::new("data", ["a.json"]);
        assert_eq!(ds.file_path(0), Some(Path::new("data").join("a.json")));
        assert_eq!(ds.file_path(1), None);
    }

    #[test]
    fn test_empty_dataset_signals_end() {
        let mut ds = DataSet::new("data", Vec::<String>::new());
        assert!(ds.is_empty());
        assert!(ds.next_frame().unwrap().is_none());
        assert_eq!(ds.cursor(), 0);
    }

    #[test]
    fn test_missing_file_keeps_cursor() {
        let mut ds = DataSet::new("/nonexistent-framekit-dir", ["a.json"]);
        assert!(matches!(ds.next_frame(), Err(FrameError::FileRead { .. })));
        assert_eq!(ds.cursor(), 0);
    }
}
