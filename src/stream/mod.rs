//! Lazy, ordered vector streams.
//!
//! [`FrameVectors`] and [`DataSetVectors`] are pull-based: nothing is read
//! or extracted until the consumer asks for the next item, and abandoning
//! them is just a matter of not calling `next` again. [`Prefetch`] moves
//! either of them onto a producer thread with a bounded queue when reads
//! should overlap with consumption.
//!
//! Every stream is single-pass and fail-fast: the first error is yielded
//! as `Some(Err(_))` and the stream then returns `None`.

mod config;
mod dataset;
mod frame;
mod prefetch;

pub use config::{StreamConfig, DEFAULT_CHANNEL_CAPACITY, MAX_CHANNEL_CAPACITY};
pub use dataset::DataSetVectors;
pub use frame::FrameVectors;
pub use prefetch::Prefetch;
