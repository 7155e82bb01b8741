//! Row-ordered vector stream over one frame.

use std::borrow::Borrow;
use std::iter::FusedIterator;

use crate::error::Result;
use crate::frame::DataFrame;
use crate::schema::VectorSpec;

/// Lazily extracts one float vector per row, in row order.
///
/// The spec is resolved on the first pull. The first error ends the
/// stream; vectors already yielded stay valid.
#[derive(Debug, Clone)]
pub struct FrameVectors<F> {
    frame: F,
    spec: VectorSpec,
    indices: Option<Vec<usize>>,
    row: usize,
    done: bool,
}

impl<F: Borrow<DataFrame>> FrameVectors<F> {
    /// Creates a stream over `frame`, which may be owned or borrowed.
    pub fn new(frame: F, spec: VectorSpec) -> Self {
        Self {
            frame,
            spec,
            indices: None,
            row: 0,
            done: false,
        }
    }

    /// Returns the index of the next row to be extracted.
    #[must_use]
    pub fn position(&self) -> usize {
        self.row
    }

    /// Returns the underlying frame.
    #[must_use]
    pub fn frame(&self) -> &DataFrame {
        self.frame.borrow()
    }
}

impl<F: Borrow<DataFrame>> Iterator for FrameVectors<F> {
    type Item = Result<Vec<f64>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let frame: &DataFrame = self.frame.borrow();
        if self.row >= frame.row_count() {
            self.done = true;
            return None;
        }

        if self.indices.is_none() {
            match frame.resolve(&self.spec) {
                Ok(indices) => self.indices = Some(indices),
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }

        let indices = self.indices.as_deref().unwrap_or_default();
        let item = frame.extract_resolved(self.row, indices);
        self.row += 1;
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let frame: &DataFrame = self.frame.borrow();
        let remaining = frame.row_count().saturating_sub(self.row);
        (0, Some(remaining))
    }
}

impl<F: Borrow<DataFrame>> FusedIterator for FrameVectors<F> {}
