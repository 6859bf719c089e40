//! Attach/detach scaffolding shared by consumer nodes.

use std::cell::Cell;

use crate::provider::ViewHierarchy;

/// Runtime state tracked for every lifecycle node.
///
/// The attached flag is the single guard that keeps attach and detach paired:
/// nodes consult it before acquiring or releasing any subscription.
#[derive(Debug, Default)]
pub struct NodeState {
    attached: Cell<bool>,
    attach_count: Cell<u32>,
}

impl NodeState {
    pub const fn new() -> Self {
        Self {
            attached: Cell::new(false),
            attach_count: Cell::new(0),
        }
    }

    /// Marks the node attached. Returns `false` if it already was.
    pub fn begin_attach(&self) -> bool {
        if self.attached.replace(true) {
            return false;
        }
        self.attach_count.set(self.attach_count.get().saturating_add(1));
        true
    }

    /// Marks the node detached. Returns `false` if it already was.
    pub fn begin_detach(&self) -> bool {
        self.attached.replace(false)
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    /// Number of completed detached-to-attached transitions.
    pub fn attach_count(&self) -> u32 {
        self.attach_count.get()
    }
}

/// Services exposed to a node while it attaches to a tree.
pub trait AttachContext {
    fn hierarchy(&self) -> &dyn ViewHierarchy;
}

/// [`AttachContext`] over a borrowed hierarchy.
pub struct BasicAttachContext<'a> {
    hierarchy: &'a dyn ViewHierarchy,
}

impl<'a> BasicAttachContext<'a> {
    pub fn new(hierarchy: &'a dyn ViewHierarchy) -> Self {
        Self { hierarchy }
    }
}

impl AttachContext for BasicAttachContext<'_> {
    fn hierarchy(&self) -> &dyn ViewHierarchy {
        self.hierarchy
    }
}

/// Core trait implemented by nodes with an attach/detach lifecycle.
///
/// Hosts call [`on_attach`](Self::on_attach) when the node joins a tree and
/// [`on_detach`](Self::on_detach) when it leaves. Both must tolerate being
/// called out of order: attaching twice is a no-op and detaching an already
/// detached node does nothing.
pub trait LifecycleNode {
    fn node_state(&self) -> &NodeState;

    fn on_attach(&mut self, _context: &mut dyn AttachContext) {}

    fn on_detach(&mut self) {}

    fn is_attached(&self) -> bool {
        self.node_state().is_attached()
    }
}
