//! framekit - typed vector extraction over JSON data frames.
//!
//! A [`DataFrame`] is a table where columns are variables and rows are
//! measurements, and each column may hold strings, numbers, or arrays of
//! numbers. A [`VectorSpec`] names the columns to concatenate into one
//! float vector per row. A [`DataSet`] is an ordered list of frame files
//! sharing one schema, loaded one frame at a time.
//!
//! ```ignore
//! use framekit::{DataSet, VectorSpec};
//!
//! let mut dataset = DataSet::from_path("dataset.yaml")?;
//! let spec = VectorSpec::float64(["wifi", "acceleration"]);
//! for vector in dataset.vectors(&spec) {
//!     let vector = vector?;
//!     println!("{vector:?}");
//! }
//! ```

pub mod dataset;
pub mod error;
pub mod frame;
pub mod schema;
pub mod stream;
pub mod types;

pub use dataset::DataSet;
pub use error::{FrameError, Result};
pub use frame::{DataFrame, LoadOptions};
pub use schema::{ColumnIndex, DuplicatePolicy, VectorSpec};
pub use stream::{DataSetVectors, FrameVectors, Prefetch, StreamConfig};
pub use types::Cell;
