//! Background producer for vector streams.
//!
//! A [`Prefetch`] drives any fallible iterator on its own thread and hands
//! items to the consumer through a bounded queue, so file reads and
//! decoding overlap with consumption.
//!
//! ```text
//!   producer thread                      consumer
//!   ┌──────────────┐   bounded queue   ┌──────────┐
//!   │ source.next()│ ──▶ [ ][ ][ ] ──▶ │  next()  │
//!   └──────────────┘                   └──────────┘
//! ```
//!
//! Dropping the consumer (or calling [`Prefetch::cancel`]) disconnects the
//! queue, which stops the producer at its next hand-off, and joins it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, trace};

use crate::error::{FrameError, Result};
use crate::stream::StreamConfig;

/// Items produced on a background thread, consumed in order.
#[derive(Debug)]
pub struct Prefetch<T> {
    receiver: Option<Receiver<Result<T>>>,
    cancelled: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    done: bool,
}

impl<T: Send + 'static> Prefetch<T> {
    /// Starts producing items from `source` on a new thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the thread can't be spawned.
    pub fn spawn<I>(source: I, config: &StreamConfig) -> Result<Self>
    where
        I: IntoIterator<Item = Result<T>>,
        I::IntoIter: Send + 'static,
    {
        config.validate()?;

        let (sender, receiver) = bounded(config.channel_capacity);
        let cancelled = Arc::new(AtomicBool::new(false));
        let worker_cancelled = Arc::clone(&cancelled);
        let source = source.into_iter();

        let worker = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || Self::produce(source, &sender, &worker_cancelled))
            .map_err(FrameError::ThreadSpawn)?;

        Ok(Self {
            receiver: Some(receiver),
            cancelled,
            worker: Some(worker),
            done: false,
        })
    }

    fn produce<I>(source: I, sender: &Sender<Result<T>>, cancelled: &AtomicBool)
    where
        I: Iterator<Item = Result<T>>,
    {
        let mut sent = 0usize;
        for item in source {
            if cancelled.load(Ordering::Acquire) {
                debug!(sent, "producer cancelled");
                return;
            }
            let failed = item.is_err();
            if sender.send(item).is_err() {
                debug!(sent, "consumer gone, stopping producer");
                return;
            }
            sent += 1;
            if failed {
                debug!(sent, "producer stopped on error");
                return;
            }
        }
        trace!(sent, "producer finished");
    }
}

impl<T> Prefetch<T> {
    /// Stops the producer and releases its thread.
    ///
    /// Items still queued are discarded; later calls to `next` return `None`.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        self.receiver = None;
        self.done = true;
        self.discard_worker("cancel");
    }

    /// Returns true once the stream has ended or been cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.done
    }

    fn join_worker(&mut self) -> Option<FrameError> {
        let worker = self.worker.take()?;
        match worker.join() {
            Ok(()) => None,
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Some(FrameError::ProducerPanic(message))
            }
        }
    }

    /// Joins the producer when its outcome can no longer reach the consumer.
    fn discard_worker(&mut self, reason: &'static str) {
        if let Some(err) = self.join_worker() {
            trace!(reason, error = %err, "discarding producer panic");
        }
    }
}

impl<T> Iterator for Prefetch<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let received = self.receiver.as_ref().map(Receiver::recv);
        match received {
            Some(Ok(item)) => {
                if item.is_err() {
                    self.done = true;
                    self.receiver = None;
                    self.discard_worker("error delivered");
                }
                Some(item)
            }
            Some(Err(_)) | None => {
                self.done = true;
                self.receiver = None;
                self.join_worker().map(Err)
            }
        }
    }
}

impl<T> Drop for Prefetch<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
