//! Recording collaborators for assertions about what a node published.

use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use safearea_core::{ListenerId, NodeId, RuntimeHandle, SafeAreaError};
use safearea_foundation::{InsetsListener, InsetsProvider, PlatformInsets, PreDrawListener};
use safearea_ui::{InsetsHost, LayoutRegistry, SafeAreaLocalData, SafeAreaViewState, StateWrapper};

/// Direct state channel that keeps every state it receives.
#[derive(Default)]
pub struct RecordingStateWrapper {
    states: RefCell<Vec<SafeAreaViewState>>,
}

impl RecordingStateWrapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states(&self) -> Vec<SafeAreaViewState> {
        self.states.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.states.borrow().len()
    }

    pub fn last(&self) -> Option<SafeAreaViewState> {
        self.states.borrow().last().copied()
    }
}

impl StateWrapper for RecordingStateWrapper {
    fn update_state(&self, state: SafeAreaViewState) {
        self.states.borrow_mut().push(state);
    }
}

/// Legacy layout registry that records writes and can be told to refuse them.
#[derive(Default)]
pub struct RecordingRegistry {
    writes: Mutex<Vec<(NodeId, SafeAreaLocalData)>>,
    rejecting: AtomicBool,
}

impl RecordingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<(NodeId, SafeAreaLocalData)> {
        self.writes
            .lock()
            .map(|writes| writes.clone())
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.writes.lock().map(|writes| writes.len()).unwrap_or(0)
    }

    pub fn last(&self) -> Option<(NodeId, SafeAreaLocalData)> {
        self.writes
            .lock()
            .ok()
            .and_then(|writes| writes.last().copied())
    }

    pub fn set_rejecting(&self, rejecting: bool) {
        self.rejecting.store(rejecting, Ordering::SeqCst);
    }
}

impl LayoutRegistry for RecordingRegistry {
    fn set_local_data(&self, node: NodeId, data: SafeAreaLocalData) -> Result<(), SafeAreaError> {
        if self.rejecting.load(Ordering::SeqCst) {
            return Err(SafeAreaError::RegistryRejected {
                node,
                reason: "registry is rejecting writes".to_string(),
            });
        }
        let mut writes = self
            .writes
            .lock()
            .map_err(|_| SafeAreaError::RegistryRejected {
                node,
                reason: "registry lock poisoned".to_string(),
            })?;
        writes.push((node, data));
        Ok(())
    }
}

/// Insets provider that counts geometry queries and can fail unregistration.
pub struct FakeInsetsProvider {
    host: InsetsHost,
    queries: Cell<usize>,
    failing_removal: Cell<bool>,
}

impl FakeInsetsProvider {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            host: InsetsHost::new(runtime),
            queries: Cell::new(0),
            failing_removal: Cell::new(false),
        }
    }

    pub fn set_platform_insets(&self, insets: PlatformInsets) -> bool {
        self.host.set_platform_insets(insets)
    }

    pub fn set_platform_insets_silently(&self, insets: PlatformInsets) -> bool {
        self.host.set_platform_insets_without_dispatch(insets)
    }

    pub fn dispatch_insets_changed(&self) {
        self.host.dispatch_insets_changed();
    }

    pub fn dispatch_pre_draw(&self) -> bool {
        self.host.dispatch_pre_draw()
    }

    /// Number of [`InsetsProvider::platform_insets`] calls so far.
    pub fn query_count(&self) -> usize {
        self.queries.get()
    }

    /// Makes listener removal fail and leave the registration in place.
    pub fn set_failing_removal(&self, failing: bool) {
        self.failing_removal.set(failing);
    }

    pub fn listener_count(&self) -> usize {
        self.host.listener_count()
    }

    fn check_removal(&self, id: ListenerId) -> Result<(), SafeAreaError> {
        if self.failing_removal.get() {
            Err(SafeAreaError::ListenerMissing { id })
        } else {
            Ok(())
        }
    }
}

impl InsetsProvider for FakeInsetsProvider {
    fn platform_insets(&self) -> PlatformInsets {
        self.queries.set(self.queries.get() + 1);
        self.host.platform_insets()
    }

    fn add_insets_listener(&self, listener: InsetsListener) -> ListenerId {
        self.host.add_insets_listener(listener)
    }

    fn remove_insets_listener(&self, id: ListenerId) -> Result<(), SafeAreaError> {
        self.check_removal(id)?;
        self.host.remove_insets_listener(id)
    }

    fn add_pre_draw_listener(&self, listener: PreDrawListener) -> ListenerId {
        self.host.add_pre_draw_listener(listener)
    }

    fn remove_pre_draw_listener(&self, id: ListenerId) -> Result<(), SafeAreaError> {
        self.check_removal(id)?;
        self.host.remove_pre_draw_listener(id)
    }
}
