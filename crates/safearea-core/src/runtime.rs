use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::thread::ThreadId;

use crate::platform::RuntimeScheduler;

type UiTask = Box<dyn FnOnce() + 'static>;

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    local_tasks: RefCell<VecDeque<UiTask>>,
    ui_thread_id: ThreadId,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            local_tasks: RefCell::new(VecDeque::new()),
            ui_thread_id: std::thread::current().id(),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    /// Queues a closure that is already bound to the UI thread's local queue.
    ///
    /// The closure may capture `Rc`/`RefCell` values because it never leaves the
    /// runtime thread. Callers must only invoke this from the runtime thread.
    fn enqueue_ui_task(&self, task: UiTask) {
        debug_assert_eq!(
            std::thread::current().id(),
            self.ui_thread_id,
            "UI task enqueued off the runtime thread",
        );
        self.local_tasks.borrow_mut().push_back(task);
        self.schedule();
    }

    fn drain_ui(&self) -> usize {
        let mut executed = 0;
        loop {
            let task = {
                let mut local = self.local_tasks.borrow_mut();
                local.pop_front()
            };

            match task {
                Some(task) => {
                    executed += 1;
                    task();
                }
                None => break,
            }
        }
        executed
    }

    fn has_pending_ui(&self) -> bool {
        self.local_tasks
            .try_borrow()
            .map(|tasks| !tasks.is_empty())
            .unwrap_or(true)
    }
}

/// Owner of the UI-thread task queue.
///
/// Dropping the runtime invalidates every [`RuntimeHandle`]; handles then run
/// enqueued work inline instead of deferring it.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    /// Returns whether a frame was requested and clears the request.
    pub fn take_frame_request(&self) -> bool {
        self.inner.needs_frame.replace(false)
    }

    /// Runs every queued UI task, including tasks queued while draining.
    pub fn drain_ui(&self) -> usize {
        self.inner.drain_ui()
    }

    pub fn has_pending_ui(&self) -> bool {
        self.inner.has_pending_ui()
    }
}

#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

/// Non-owning handle to a [`Runtime`].
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    /// Requests a new frame from the host scheduler.
    pub fn schedule(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.schedule();
        }
    }

    /// Schedules work to run on the runtime thread on its next drain.
    ///
    /// The closure may capture `Rc`/`RefCell` values. If the runtime has
    /// already been dropped the task runs immediately.
    pub fn enqueue_ui_task(&self, task: Box<dyn FnOnce() + 'static>) {
        if let Some(inner) = self.inner.upgrade() {
            inner.enqueue_ui_task(task);
        } else {
            task();
        }
    }

    pub fn drain_ui(&self) -> usize {
        self.inner
            .upgrade()
            .map(|inner| inner.drain_ui())
            .unwrap_or(0)
    }

    pub fn has_pending_ui(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_pending_ui())
            .unwrap_or(false)
    }

    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
