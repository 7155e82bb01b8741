//! File-ordered vector stream over a whole dataset.

use std::borrow::BorrowMut;
use std::iter::FusedIterator;

use tracing::debug;

use crate::dataset::DataSet;
use crate::error::Result;
use crate::frame::DataFrame;
use crate::schema::VectorSpec;
use crate::stream::FrameVectors;

/// Lazily extracts float vectors from every frame of a dataset.
///
/// Frames are loaded one at a time in file-list order and their rows are
/// yielded in row order. End of the file list ends the stream and leaves
/// the dataset cursor at 0, so a new stream over the same dataset starts
/// again from the first file. The first load or extraction error ends the
/// stream.
#[derive(Debug)]
pub struct DataSetVectors<D> {
    dataset: D,
    spec: VectorSpec,
    current: Option<FrameVectors<DataFrame>>,
    frames: usize,
    done: bool,
}

impl<D: BorrowMut<DataSet>> DataSetVectors<D> {
    /// Creates a stream that continues from the dataset's current cursor.
    pub fn new(dataset: D, spec: VectorSpec) -> Self {
        Self {
            dataset,
            spec,
            current: None,
            frames: 0,
            done: false,
        }
    }

    /// Returns the number of frames loaded so far.
    #[must_use]
    pub fn frames_loaded(&self) -> usize {
        self.frames
    }

    /// Consumes the stream and returns the dataset.
    pub fn into_inner(self) -> D {
        self.dataset
    }
}

impl<D: BorrowMut<DataSet>> Iterator for DataSetVectors<D> {
    type Item = Result<Vec<f64>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }

            if let Some(vectors) = self.current.as_mut() {
                match vectors.next() {
                    Some(Ok(vector)) => return Some(Ok(vector)),
                    Some(Err(e)) => {
                        self.done = true;
                        return Some(Err(e));
                    }
                    None => {}
                }
            }

            let dataset: &mut DataSet = self.dataset.borrow_mut();
            match dataset.next_frame() {
                Ok(Some(frame)) => {
                    self.frames += 1;
                    self.current = Some(frame.into_vectors(self.spec.clone()));
                }
                Ok(None) => {
                    debug!(frames = self.frames, "dataset stream exhausted");
                    self.current = None;
                    self.done = true;
                    return None;
                }
                Err(e) => {
                    self.current = None;
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl<D: BorrowMut<DataSet>> FusedIterator for DataSetVectors<D> {}
