//! Column name resolution and vector specifications.

mod column_index;
mod vector_spec;

pub use column_index::{ColumnIndex, DuplicatePolicy};
pub use vector_spec::{VectorSpec, FLOAT64};
