//! Dedicated worker queue for the layout pipeline.
//!
//! The legacy layout registry is owned by the pipeline's own worker thread.
//! UI code hands it work through [`TaskQueue::run_async`], which never waits
//! for the task to run.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::SafeAreaError;

pub type WorkerTask = Box<dyn FnOnce() + Send + 'static>;

/// Fire-and-forget submission point of a pipeline queue.
pub trait TaskQueue {
    /// Submits `task` for execution on the queue's own thread.
    ///
    /// Returns as soon as the task is queued. There is no result channel and
    /// no ordering guarantee relative to work the caller does afterwards.
    fn run_async(&self, task: WorkerTask) -> Result<(), SafeAreaError>;
}

enum WorkerMessage {
    Task(WorkerTask),
    Flush(mpsc::Sender<()>),
}

struct WorkerShared {
    pending: AtomicUsize,
}

/// A [`TaskQueue`] backed by one dedicated thread.
pub struct WorkerQueue {
    name: String,
    tx: Mutex<Option<mpsc::Sender<WorkerMessage>>>,
    thread: Mutex<Option<JoinHandle<()>>>,
    shared: Arc<WorkerShared>,
}

impl WorkerQueue {
    pub fn new(name: impl Into<String>) -> Result<Self, SafeAreaError> {
        let name = name.into();
        let (tx, rx) = mpsc::channel::<WorkerMessage>();
        let shared = Arc::new(WorkerShared {
            pending: AtomicUsize::new(0),
        });
        let worker_shared = Arc::clone(&shared);
        let thread_name = name.clone();
        let thread = thread::Builder::new()
            .name(name.clone())
            .spawn(move || run_worker(&thread_name, rx, &worker_shared))
            .map_err(|err| SafeAreaError::WorkerSpawn {
                reason: err.to_string(),
            })?;
        log::debug!("pipeline worker `{name}` started");
        Ok(Self {
            name,
            tx: Mutex::new(Some(tx)),
            thread: Mutex::new(Some(thread)),
            shared,
        })
    }

    /// Number of submitted tasks that have not finished yet.
    pub fn pending(&self) -> usize {
        self.shared.pending.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.lock().map(|tx| tx.is_none()).unwrap_or(true)
    }

    /// Blocks until every task submitted before this call has run.
    ///
    /// Intended for shutdown paths and tests; the UI path never calls it.
    pub fn flush(&self) -> Result<(), SafeAreaError> {
        let (ack_tx, ack_rx) = mpsc::channel();
        self.send(WorkerMessage::Flush(ack_tx))?;
        ack_rx.recv().map_err(|_| SafeAreaError::QueueClosed)
    }

    /// Closes the queue and joins the worker after it drains.
    ///
    /// Subsequent submissions fail with [`SafeAreaError::QueueClosed`].
    pub fn shutdown(&self) {
        if let Ok(mut tx) = self.tx.lock() {
            tx.take();
        }
        let handle = self.thread.lock().ok().and_then(|mut slot| slot.take());
        if let Some(handle) = handle {
            if handle.join().is_err() {
                log::warn!("pipeline worker `{}` terminated abnormally", self.name);
            }
            log::debug!("pipeline worker `{}` stopped", self.name);
        }
    }

    fn send(&self, message: WorkerMessage) -> Result<(), SafeAreaError> {
        let guard = self.tx.lock().map_err(|_| SafeAreaError::QueueClosed)?;
        let tx = guard.as_ref().ok_or(SafeAreaError::QueueClosed)?;
        tx.send(message).map_err(|_| SafeAreaError::QueueClosed)
    }
}

impl TaskQueue for WorkerQueue {
    fn run_async(&self, task: WorkerTask) -> Result<(), SafeAreaError> {
        self.shared.pending.fetch_add(1, Ordering::SeqCst);
        let result = self.send(WorkerMessage::Task(task));
        if result.is_err() {
            self.shared.pending.fetch_sub(1, Ordering::SeqCst);
        }
        result
    }
}

impl Drop for WorkerQueue {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(name: &str, rx: mpsc::Receiver<WorkerMessage>, shared: &WorkerShared) {
    for message in rx {
        match message {
            WorkerMessage::Task(task) => {
                if panic::catch_unwind(AssertUnwindSafe(task)).is_err() {
                    log::error!("task panicked on pipeline worker `{name}`");
                }
                shared.pending.fetch_sub(1, Ordering::SeqCst);
            }
            WorkerMessage::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/worker_tests.rs"]
mod tests;
