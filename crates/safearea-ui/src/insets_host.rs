//! Window-level insets provider.
//!
//! [`InsetsHost`] is what a platform integration installs at the root of its
//! view tree. The platform feeds it raw geometry; it fans change notifications
//! out to every subscribed consumer and runs their pre-draw hooks before each
//! frame.

use std::cell::RefCell;

use indexmap::IndexMap;

use safearea_core::{ListenerId, RuntimeHandle, SafeAreaError};
use safearea_foundation::{InsetsListener, InsetsProvider, PlatformInsets, PreDrawListener};

struct InsetsHostInner {
    insets: PlatformInsets,
    insets_listeners: IndexMap<ListenerId, InsetsListener>,
    pre_draw_listeners: IndexMap<ListenerId, PreDrawListener>,
    next_listener_id: ListenerId,
}

impl InsetsHostInner {
    fn next_id(&mut self) -> ListenerId {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        id
    }
}

pub struct InsetsHost {
    inner: RefCell<InsetsHostInner>,
    runtime: RuntimeHandle,
}

impl InsetsHost {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            inner: RefCell::new(InsetsHostInner {
                insets: PlatformInsets::EMPTY,
                insets_listeners: IndexMap::new(),
                pre_draw_listeners: IndexMap::new(),
                next_listener_id: 1,
            }),
            runtime,
        }
    }

    /// Stores new platform geometry and notifies listeners if it changed.
    ///
    /// Returns whether the geometry differed from the stored value.
    pub fn set_platform_insets(&self, insets: PlatformInsets) -> bool {
        let changed = self.set_platform_insets_without_dispatch(insets);
        if changed {
            self.dispatch_insets_changed();
        }
        changed
    }

    /// Stores new platform geometry without notifying anyone.
    ///
    /// Models platforms whose push signal is unreliable; consumers pick the
    /// change up from their pre-draw hook instead.
    pub fn set_platform_insets_without_dispatch(&self, insets: PlatformInsets) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.insets == insets {
            return false;
        }
        inner.insets = insets;
        true
    }

    /// Notifies every insets listener.
    ///
    /// Listeners run on a snapshot of the registrations so they may add or
    /// remove listeners while being notified.
    pub fn dispatch_insets_changed(&self) {
        let listeners: Vec<InsetsListener> =
            self.inner.borrow().insets_listeners.values().cloned().collect();
        log::trace!("dispatching insets change to {} listeners", listeners.len());
        for listener in listeners {
            listener();
        }
    }

    /// Runs every pre-draw hook before a frame is drawn.
    ///
    /// All hooks run even after one vetoes. Returns `false` when the frame must
    /// be skipped, in which case another frame has already been requested.
    pub fn dispatch_pre_draw(&self) -> bool {
        let listeners: Vec<PreDrawListener> =
            self.inner.borrow().pre_draw_listeners.values().cloned().collect();
        let mut proceed = true;
        for listener in listeners {
            proceed &= listener();
        }
        if !proceed {
            log::trace!("pre-draw vetoed; rescheduling frame");
            self.runtime.schedule();
        }
        proceed
    }

    pub fn insets_listener_count(&self) -> usize {
        self.inner.borrow().insets_listeners.len()
    }

    pub fn pre_draw_listener_count(&self) -> usize {
        self.inner.borrow().pre_draw_listeners.len()
    }

    pub fn listener_count(&self) -> usize {
        self.insets_listener_count() + self.pre_draw_listener_count()
    }
}

impl InsetsProvider for InsetsHost {
    fn platform_insets(&self) -> PlatformInsets {
        self.inner.borrow().insets
    }

    fn add_insets_listener(&self, listener: InsetsListener) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id();
        inner.insets_listeners.insert(id, listener);
        id
    }

    fn remove_insets_listener(&self, id: ListenerId) -> Result<(), SafeAreaError> {
        self.inner
            .borrow_mut()
            .insets_listeners
            .shift_remove(&id)
            .map(|_| ())
            .ok_or(SafeAreaError::ListenerMissing { id })
    }

    fn add_pre_draw_listener(&self, listener: PreDrawListener) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id();
        inner.pre_draw_listeners.insert(id, listener);
        id
    }

    fn remove_pre_draw_listener(&self, id: ListenerId) -> Result<(), SafeAreaError> {
        self.inner
            .borrow_mut()
            .pre_draw_listeners
            .shift_remove(&id)
            .map(|_| ())
            .ok_or(SafeAreaError::ListenerMissing { id })
    }
}

#[cfg(test)]
#[path = "tests/insets_host_tests.rs"]
mod tests;
