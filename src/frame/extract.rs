//! Row vector extraction.

use rayon::prelude::*;

use crate::error::{FrameError, Result};
use crate::frame::DataFrame;
use crate::schema::VectorSpec;
use crate::types::Cell;

impl DataFrame {
    /// Joins the cells at already-resolved positions of `row`.
    ///
    /// Scalars contribute one element, numeric arrays contribute all of
    /// their elements in order.
    pub(crate) fn extract_resolved(&self, row: usize, indices: &[usize]) -> Result<Vec<f64>> {
        let cells = self.row_checked(row)?;
        let mut floats = Vec::with_capacity(indices.len());

        for &position in indices {
            let cell = cells.get(position).ok_or(FrameError::ShortRow {
                row,
                len: cells.len(),
                position,
            })?;
            match cell {
                Cell::Null => return Err(FrameError::NullVariable { row, position }),
                Cell::Number(n) => floats.push(*n),
                Cell::NumberArray(values) => floats.extend_from_slice(values),
                Cell::String(_) | Cell::Bool(_) | Cell::Array(_) | Cell::Object(_) => {
                    return Err(FrameError::UnsupportedVariableType {
                        row,
                        type_name: cell.type_name(),
                    });
                }
            }
        }

        Ok(floats)
    }

    /// Extracts the float vector of every row in parallel.
    ///
    /// The result is in row order. The spec is resolved once up front, so
    /// an invalid spec fails even for a frame with no rows.
    ///
    /// # Errors
    ///
    /// Returns an error if any row fails. When several rows fail, which
    /// error is returned is unspecified.
    pub fn par_float_vectors(&self, spec: &VectorSpec) -> Result<Vec<Vec<f64>>> {
        let indices = self.resolve(spec)?;
        (0..self.row_count())
            .into_par_iter()
            .map(|row| self.extract_resolved(row, &indices))
            .collect()
    }
}
