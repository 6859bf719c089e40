//! Pipeline invalidation requests issued by nodes.

use std::cell::{Cell, RefCell};

use smallvec::SmallVec;

use safearea_core::{NodeId, SafeAreaError};

/// Identifies which part of the rendering pipeline should be invalidated
/// after a node changes state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvalidationKind {
    Layout,
    Draw,
}

/// Node-local calls into the host layout pipeline.
///
/// Calls execute on the calling thread and return without waiting for the
/// requested pass to run.
pub trait LayoutHost {
    fn node_id(&self) -> NodeId;

    /// Requests that a particular pipeline stage be invalidated.
    fn invalidate(&self, kind: InvalidationKind) -> Result<(), SafeAreaError>;

    /// Requests a new measure/layout pass on the current frame schedule.
    fn request_layout(&self) -> Result<(), SafeAreaError> {
        self.invalidate(InvalidationKind::Layout)
    }

    /// Marks the node's drawing as dirty.
    fn mark_dirty(&self) -> Result<(), SafeAreaError> {
        self.invalidate(InvalidationKind::Draw)
    }
}

/// Lightweight [`LayoutHost`] that records invalidation requests.
///
/// The ordered list of kinds is coalesced; per-kind counters keep the raw
/// number of requests. Callers can inspect or drain this state after driving
/// a node.
#[derive(Debug)]
pub struct BasicLayoutHost {
    node_id: NodeId,
    invalidations: RefCell<SmallVec<[InvalidationKind; 2]>>,
    layout_requests: Cell<usize>,
    draw_requests: Cell<usize>,
    available: Cell<bool>,
}

impl BasicLayoutHost {
    pub fn new(node_id: NodeId) -> Self {
        Self {
            node_id,
            invalidations: RefCell::new(SmallVec::new()),
            layout_requests: Cell::new(0),
            draw_requests: Cell::new(0),
            available: Cell::new(true),
        }
    }

    /// Returns the ordered list of invalidation kinds requested since the
    /// last [`take_invalidations`](Self::take_invalidations).
    pub fn invalidations(&self) -> Vec<InvalidationKind> {
        self.invalidations.borrow().to_vec()
    }

    /// Drains the recorded invalidations and returns them to the caller.
    pub fn take_invalidations(&self) -> Vec<InvalidationKind> {
        std::mem::take(&mut *self.invalidations.borrow_mut()).into_vec()
    }

    pub fn layout_requests(&self) -> usize {
        self.layout_requests.get()
    }

    pub fn draw_requests(&self) -> usize {
        self.draw_requests.get()
    }

    /// Makes subsequent invalidations fail with [`SafeAreaError::HostUnavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }
}

impl LayoutHost for BasicLayoutHost {
    fn node_id(&self) -> NodeId {
        self.node_id
    }

    fn invalidate(&self, kind: InvalidationKind) -> Result<(), SafeAreaError> {
        if !self.available.get() {
            return Err(SafeAreaError::HostUnavailable { node: self.node_id });
        }
        let counter = match kind {
            InvalidationKind::Layout => &self.layout_requests,
            InvalidationKind::Draw => &self.draw_requests,
        };
        counter.set(counter.get() + 1);
        let mut invalidations = self.invalidations.borrow_mut();
        if !invalidations.contains(&kind) {
            invalidations.push(kind);
        }
        Ok(())
    }
}
