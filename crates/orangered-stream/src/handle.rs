//! Stream handles and the registry of running instances.
//!
//! Cancellation is a watch-channel token: callers flip it to `true`, the
//! poll loop observes it at the top of each iteration and inside its sleep.
//! There is no write/write race to lose a stop request to, and dropping the
//! consumer side also winds the loop down (the loop watches for its output
//! channel closing), so an abandoned handle cannot leak a task.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use orangered_core::error::StreamError;

// ─── Stop signal ────────────────────────────────────────────────────

/// Cancellation token for one stream instance.
#[derive(Debug, Clone)]
pub struct StopSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl StopSignal {
    pub(crate) fn new() -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        (Self { tx: Arc::new(tx) }, rx)
    }

    /// Request cooperative stop. The loop exits after its current iteration;
    /// an in-flight listing call or blocked send is not interrupted.
    pub fn stop(&self) {
        let _ = self.tx.send(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.tx.borrow()
    }
}

// ─── Stream handle ──────────────────────────────────────────────────

/// The public surface of one running stream instance: item channel, error
/// channel, stop token.
#[derive(Debug)]
pub struct StreamHandle<T> {
    /// Delivered items, oldest-first within the life of the instance.
    pub items: mpsc::Receiver<T>,
    /// Per-iteration errors the loop absorbed (listing failures, failed
    /// read-marks). Draining this is optional; overflow is dropped.
    pub errors: mpsc::Receiver<StreamError>,
    stop: StopSignal,
}

impl<T> StreamHandle<T> {
    pub(crate) fn new(
        items: mpsc::Receiver<T>,
        errors: mpsc::Receiver<StreamError>,
        stop: StopSignal,
    ) -> Self {
        Self {
            items,
            errors,
            stop,
        }
    }

    /// Receive the next item; `None` once the loop has exited and the
    /// channel is drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.items.recv().await
    }

    /// Request cooperative stop of this instance.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// A clonable stop token, e.g. for wiring into shutdown logic that
    /// outlives the handle.
    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }
}

// ─── Registry ───────────────────────────────────────────────────────

struct StreamEntry {
    label: &'static str,
    stop: StopSignal,
    task: JoinHandle<()>,
}

/// Registry of running stream instances, with an explicit join/shutdown-all
/// operation for clean teardown.
#[derive(Default)]
pub struct StreamSet {
    entries: Vec<StreamEntry>,
}

impl StreamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task under a stop token.
    ///
    /// The engine registers every poll loop it spawns; callers managing
    /// their own teardown can additionally register consumer tasks under a
    /// handle's [`StreamHandle::stop_signal`] clone, so one `shutdown_all`
    /// stops the poll loop and joins the consumer with it.
    pub fn insert(&mut self, label: &'static str, stop: StopSignal, task: JoinHandle<()>) {
        self.entries.push(StreamEntry { label, stop, task });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Signal every instance to stop, then wait for each loop to exit.
    pub async fn shutdown_all(&mut self) {
        for entry in &self.entries {
            entry.stop.stop();
        }
        for entry in self.entries.drain(..) {
            if let Err(err) = entry.task.await {
                tracing::warn!(stream = entry.label, error = %err, "stream task join failed");
            }
        }
    }
}
