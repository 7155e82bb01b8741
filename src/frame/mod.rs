//! In-memory data frames.
//!
//! A [`DataFrame`] is a table where columns are variables and rows are
//! measurements. Each variable can have a different type:
//!
//! ```text
//!   ROOM      WIFI                     ACC_Z
//!   KITCHEN   [-56.1, -78.9, -44.12]   1.3
//!   BATH      [-58, -71.1, -39.8]      1.8
//! ```
//!
//! Frames are decoded from JSON documents:
//!
//! ```json
//! {
//!   "description": "An indoor positioning data set.",
//!   "batchid": "24001-015",
//!   "var_names": ["room", "wifi", "acceleration"],
//!   "var_types": ["string", "[]float64", "float64"],
//!   "data": [
//!     ["KITCHEN", [-56.1, -78.9, -44.12], 1.3],
//!     ["BATH",    [-58, -71.1, -39.8],    1.8]
//!   ]
//! }
//! ```
//!
//! All fields are optional. Row shape is not validated at load time; a
//! row too short for a requested column fails when it is accessed.

mod extract;
mod options;
mod source;

pub use options::{LoadOptions, DEFAULT_MMAP_THRESHOLD};
pub use source::FileSource;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FrameError, Result};
use crate::schema::{ColumnIndex, VectorSpec};
use crate::stream::{FrameVectors, Prefetch, StreamConfig};
use crate::types::Cell;

/// Name used for decode errors when a frame is read from memory.
const IN_MEMORY: &str = "<data frame>";

/// A table of heterogeneously typed rows sharing one column schema.
///
/// Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataFrame {
    /// Describes the data.
    #[serde(default)]
    description: String,

    /// Identifies the batch of data, e.g. a session or a file.
    #[serde(rename = "batchid", default)]
    batch_id: String,

    /// Ordered list of variable names.
    #[serde(default)]
    var_names: Vec<String>,

    /// Ordered list of variable type tags, aligned with `var_names`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    var_types: Option<Vec<String>>,

    /// Ordered list of rows.
    #[serde(default)]
    data: Vec<Vec<Cell>>,

    /// Custom properties related to the data frame.
    #[serde(default)]
    properties: HashMap<String, String>,

    #[serde(skip)]
    index: ColumnIndex,
}

impl DataFrame {
    /// Decodes a frame from JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Decode`] if the document is malformed.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_slice_with(bytes, &LoadOptions::default())
    }

    /// Decodes a frame from JSON bytes using the given options.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Decode`] if the document is malformed, or
    /// [`FrameError::DuplicateColumn`] if duplicates are rejected.
    pub fn from_slice_with(bytes: &[u8], options: &LoadOptions) -> Result<Self> {
        Self::decode(bytes, IN_MEMORY, options)
    }

    /// Reads a frame from a reader.
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

    /// Reads a frame from a file.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::FileRead`] if the file cannot be read, or
    /// [`FrameError::Decode`] if its contents are malformed.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_path_with(path, &LoadOptions::default())
    }

    /// Reads a frame from a file using the given options.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid or reading or decoding fails.
    pub fn from_path_with<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<Self> {
        options.validate()?;
        let path = path.as_ref();
        let source = FileSource::open(path, options)?;
        Self::decode(&source, &path.display().to_string(), options)
    }

    fn decode(bytes: &[u8], source_name: &str, options: &LoadOptions) -> Result<Self> {
        let mut frame: DataFrame =
            serde_json::from_slice(bytes).map_err(|e| FrameError::decode(source_name, e))?;
        frame.index = ColumnIndex::build_with_policy(&frame.var_names, options.duplicate_columns)?;
        debug!(
            source = source_name,
            rows = frame.data.len(),
            columns = frame.var_names.len(),
            "loaded data frame"
        );
        Ok(frame)
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the batch identifier.
    #[must_use]
    pub fn batch_id(&self) -> &str {
        &self.batch_id
    }

    /// Returns the ordered column names.
    #[must_use]
    pub fn var_names(&self) -> &[String] {
        &self.var_names
    }

    /// Returns the ordered column type tags, if declared.
    #[must_use]
    pub fn var_types(&self) -> Option<&[String]> {
        self.var_types.as_deref()
    }

    /// Returns the custom properties.
    #[must_use]
    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }

    /// Gets a custom property by key.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Returns the column index.
    #[must_use]
    pub fn column_index(&self) -> &ColumnIndex {
        &self.index
    }

    /// Returns all rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.data
    }

    /// Gets a row by index.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.data.get(index).map(Vec::as_slice)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the frame has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of cells in the first row.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::EmptyFrame`] if the frame has no rows.
    pub fn column_count(&self) -> Result<usize> {
        self.data.first().map(Vec::len).ok_or(FrameError::EmptyFrame)
    }

    /// Gets the cell at `row` in the named column.
    ///
    /// # Errors
    ///
    /// Returns an error if the row or column doesn't exist, or the row is
    /// too short to hold the column.
    pub fn cell(&self, row: usize, name: &str) -> Result<&Cell> {
        let position = self.index.resolve(name)?;
        let cells = self.row_checked(row)?;
        cells.get(position).ok_or(FrameError::ShortRow {
            row,
            len: cells.len(),
            position,
        })
    }

    /// Gets the string value at `row` in the named column.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::UnknownColumn`] if the column doesn't exist,
    /// or [`FrameError::TypeMismatch`] if the cell is not a string.
    pub fn get_string(&self, row: usize, name: &str) -> Result<&str> {
        let cell = self.cell(row, name)?;
        cell.as_str().ok_or_else(|| FrameError::TypeMismatch {
            row,
            column: name.to_string(),
            expected: "string",
            actual: cell.type_name(),
        })
    }

    /// Resolves a vector spec against this frame's columns.
    ///
    /// # Errors
    ///
    /// See [`VectorSpec::resolve_indices`].
    pub fn resolve(&self, spec: &VectorSpec) -> Result<Vec<usize>> {
        spec.resolve_indices(&self.index, self.var_types())
    }

    /// Joins the float and float-array columns named by `spec` at `row`.
    ///
    /// # Errors
    ///
    /// Returns an error if `row` is out of range, the spec doesn't resolve,
    /// or a referenced cell is null, too short, or not numeric.
    pub fn extract_float_vector(&self, row: usize, spec: &VectorSpec) -> Result<Vec<f64>> {
        let indices = self.resolve(spec)?;
        self.extract_resolved(row, &indices)
    }

    /// Joins the named float columns at `row` into one vector.
    ///
    /// # Errors
    ///
    /// See [`DataFrame::extract_float_vector`].
    pub fn float_vector(&self, row: usize, names: &[&str]) -> Result<Vec<f64>> {
        self.extract_float_vector(row, &VectorSpec::float64(names.iter().copied()))
    }

    /// Returns a lazy stream of float vectors, one per row.
    #[must_use]
    pub fn vectors(&self, spec: &VectorSpec) -> FrameVectors<&DataFrame> {
        FrameVectors::new(self, spec.clone())
    }

    /// Consumes the frame into a lazy stream of float vectors.
    #[must_use]
    pub fn into_vectors(self, spec: VectorSpec) -> FrameVectors<DataFrame> {
        FrameVectors::new(self, spec)
    }

    /// Streams float vectors from a background producer thread.
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

    fn row_checked(&self, row: usize) -> Result<&[Cell]> {
        self.row(row).ok_or(FrameError::RowOutOfRange {
            row,
            rows: self.data.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOMS: &str = r#"{
        "description": "An indoor positioning data set.",
        "batchid": "24001-015",
        "var_names": ["room", "wifi", "acceleration"],
        "var_types": ["string", "[]float64", "float64"],
        "data": [
            ["BED5", [-40.8, -41.2], 1.3],
            ["BED5", [-41.8, -41.1], 1.4],
            ["DINING", [-42.9, -40.11], 1.6]
        ],
        "properties": {"site": "lab"}
    }"#;

    fn rooms() -> DataFrame {
        DataFrame::from_slice(ROOMS.as_bytes()).unwrap()
    }

    #[test]
    fn test_load_metadata() {
        let df = rooms();
        assert_eq!(df.description(), "An indoor positioning data set.");
        assert_eq!(df.batch_id(), "24001-015");
        assert_eq!(df.var_names(), ["room", "wifi", "acceleration"]);
        assert_eq!(df.var_types().unwrap().len(), 3);
        assert_eq!(df.property("site"), Some("lab"));
        assert_eq!(df.property("missing"), None);
    }

    #[test]
    fn test_dimensions() {
        let df = rooms();
        assert_eq!(df.row_count(), 3);
        assert_eq!(df.column_count().unwrap(), 3);
    }

    #[test]
    fn test_column_count_empty_frame() {
        let df = DataFrame::from_slice(br#"{"var_names": ["a"], "data": []}"#).unwrap();
        assert!(df.is_empty());
        assert!(matches!(df.column_count(), Err(FrameError::EmptyFrame)));
    }

    #[test]
    fn test_all_fields_optional() {
        let df = DataFrame::from_slice(b"{}").unwrap();
        assert_eq!(df.row_count(), 0);
        assert!(df.var_types().is_none());
        assert!(df.column_index().is_empty());
    }

    #[test]
    fn test_malformed_document() {
        let err = DataFrame::from_slice(b"{\"data\": [").unwrap_err();
        assert!(matches!(err, FrameError::Decode { .. }));
    }

    #[test]
    fn test_get_string() {
        let df = rooms();
        assert_eq!(df.get_string(2, "room").unwrap(), "DINING");
        assert!(matches!(
            df.get_string(0, "wifi"),
            Err(FrameError::TypeMismatch { actual: "[]float64", .. })
        ));
        assert!(matches!(
            df.get_string(0, "nope"),
            Err(FrameError::UnknownColumn(_))
        ));
        assert!(matches!(
            df.get_string(9, "room"),
            Err(FrameError::RowOutOfRange { row: 9, rows: 3 })
        ));
    }

    #[test]
    fn test_duplicate_columns_rejected_when_strict() {
        let doc = br#"{"var_names": ["a", "a"], "data": [[1, 2]]}"#;
        assert!(DataFrame::from_slice(doc).is_ok());
        assert!(matches!(
            DataFrame::from_slice_with(doc, &LoadOptions::strict()),
            Err(FrameError::DuplicateColumn(_))
        ));
    }

    #[test]
    fn test_float_vector() {
        let df = rooms();
        assert_eq!(
            df.float_vector(1, &["wifi", "acceleration"]).unwrap(),
            vec![-41.8, -41.1, 1.4]
        );
    }
}
