//! Safe-area consumer node.
//!
//! A [`SafeAreaNode`] subscribes to two independent signals on its provider:
//!
//! - a push listener fired when the platform reports new geometry;
//! - a pre-draw hook run before every frame, for platforms whose push signal
//!   is late or missing.
//!
//! Both funnel into [`SafeAreaNode::maybe_update`], which recomputes the
//! insets and publishes only when they differ from the last published value.
//! Any number of redundant signals therefore costs one comparison each.
//!
//! When the pre-draw hook publishes a change it vetoes the current frame so
//! stale layout is never drawn; the host draws again once layout has caught up.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use safearea_core::{ListenerId, NodeId, RuntimeHandle, SafeAreaError};
use safearea_foundation::{
    find_provider, AttachContext, InsetsProvider, LayoutHost, LifecycleNode, NodeState,
};
use safearea_ui_graphics::EdgeInsets;

use crate::insets::compute_safe_area_insets;
use crate::pipeline::{
    LegacyBinding, PipelineBinding, PublishChannel, SafeAreaLocalData, StateWrapper,
};
use crate::view_mode::{SafeAreaViewEdges, SafeAreaViewMode};

struct Subscriptions {
    provider: Weak<dyn InsetsProvider>,
    insets_listener: ListenerId,
    pre_draw_listener: ListenerId,
}

struct SafeAreaInner {
    node_id: NodeId,
    state: Rc<NodeState>,
    mode: SafeAreaViewMode,
    edges: SafeAreaViewEdges,
    cached_insets: Option<EdgeInsets>,
    provider: Option<Weak<dyn InsetsProvider>>,
    binding: PipelineBinding,
    host: Rc<dyn LayoutHost>,
    publish_count: usize,
}

impl SafeAreaInner {
    fn maybe_update(cell: &RefCell<SafeAreaInner>) -> bool {
        Self::update(cell).is_some()
    }

    /// Returns the channel a changed value went out on, or `None` when nothing
    /// was published.
    fn update(cell: &RefCell<SafeAreaInner>) -> Option<PublishChannel> {
        let (node_id, provider) = {
            let inner = cell.borrow();
            if !inner.state.is_attached() {
                return None;
            }
            (inner.node_id, inner.provider.as_ref().and_then(Weak::upgrade))
        };

        let platform = provider
            .map(|provider| provider.platform_insets())
            .unwrap_or_default();
        let insets = compute_safe_area_insets(&platform);

        if cell.borrow().cached_insets == Some(insets) {
            log::trace!("node {node_id}: insets unchanged");
            return None;
        }

        match Self::publish(cell, insets) {
            Ok(channel) => {
                cell.borrow_mut().cached_insets = Some(insets);
                log::debug!("node {node_id}: published insets {insets:?} via {channel:?}");
                Some(channel)
            }
            Err(err) => {
                log::debug!("node {node_id}: insets not published: {err}");
                None
            }
        }
    }

    /// Hands `insets` to the pipeline with the current mode and edges.
    ///
    /// No borrow is held while the pipeline runs so hosts may read the node
    /// back from inside a layout request.
    fn publish(
        cell: &RefCell<SafeAreaInner>,
        insets: EdgeInsets,
    ) -> Result<PublishChannel, SafeAreaError> {
        let (binding, host, data) = {
            let inner = cell.borrow();
            let data = SafeAreaLocalData {
                insets,
                mode: inner.mode,
                edges: inner.edges,
            };
            (inner.binding.clone(), Rc::clone(&inner.host), data)
        };
        let channel = binding.publish(host.as_ref(), data)?;
        cell.borrow_mut().publish_count += 1;
        Ok(channel)
    }

    fn republish(cell: &RefCell<SafeAreaInner>) {
        let (node_id, cached) = {
            let inner = cell.borrow();
            (inner.node_id, inner.cached_insets)
        };
        let Some(insets) = cached else {
            return;
        };
        if let Err(err) = Self::publish(cell, insets) {
            log::debug!("node {node_id}: republish failed: {err}");
        }
    }

    fn on_insets_changed(this: &Weak<RefCell<SafeAreaInner>>) {
        let Some(cell) = this.upgrade() else {
            return;
        };
        // The legacy channel requests layout itself.
        if Self::update(&cell) == Some(PublishChannel::Direct) {
            let host = Rc::clone(&cell.borrow().host);
            if let Err(err) = host.request_layout() {
                log::debug!("layout request after insets change failed: {err}");
            }
        }
    }

    fn on_pre_draw(this: &Weak<RefCell<SafeAreaInner>>) -> bool {
        match this.upgrade() {
            Some(cell) => !Self::maybe_update(&cell),
            None => true,
        }
    }
}

/// Consumer node that keeps its published insets in sync with its provider.
pub struct SafeAreaNode {
    state: Rc<NodeState>,
    inner: Rc<RefCell<SafeAreaInner>>,
    subscriptions: Option<Subscriptions>,
    runtime: RuntimeHandle,
}

impl SafeAreaNode {
    pub fn new(host: Rc<dyn LayoutHost>, runtime: RuntimeHandle) -> Self {
        let state = Rc::new(NodeState::new());
        let inner = SafeAreaInner {
            node_id: host.node_id(),
            state: Rc::clone(&state),
            mode: SafeAreaViewMode::default(),
            edges: SafeAreaViewEdges::default(),
            cached_insets: None,
            provider: None,
            binding: PipelineBinding::new(),
            host,
            publish_count: 0,
        };
        Self {
            state,
            inner: Rc::new(RefCell::new(inner)),
            subscriptions: None,
            runtime,
        }
    }

    pub fn with_binding(self, binding: PipelineBinding) -> Self {
        self.inner.borrow_mut().binding = binding;
        self
    }

    pub fn node_id(&self) -> NodeId {
        self.inner.borrow().node_id
    }

    /// Installs or clears the direct state channel.
    ///
    /// Hosts hand the channel over once the node is mounted in the new
    /// pipeline; until then publication falls back to the legacy binding.
    pub fn set_state_wrapper(&mut self, state_wrapper: Option<Rc<dyn StateWrapper>>) {
        self.inner.borrow_mut().binding.set_state_wrapper(state_wrapper);
    }

    pub fn set_legacy_binding(&mut self, binding: Option<LegacyBinding>) {
        self.inner.borrow_mut().binding.set_legacy(binding);
    }

    pub fn mode(&self) -> SafeAreaViewMode {
        self.inner.borrow().mode
    }

    /// Changes the mode and republishes the cached insets.
    ///
    /// Geometry is not recomputed. Before the first publication this only
    /// stores the mode.
    pub fn set_mode(&mut self, mode: SafeAreaViewMode) {
        self.inner.borrow_mut().mode = mode;
        SafeAreaInner::republish(&self.inner);
    }

    pub fn edges(&self) -> SafeAreaViewEdges {
        self.inner.borrow().edges
    }

    /// Changes the edge policy and republishes the cached insets.
    pub fn set_edges(&mut self, edges: SafeAreaViewEdges) {
        self.inner.borrow_mut().edges = edges;
        SafeAreaInner::republish(&self.inner);
    }

    /// Last successfully published insets, kept across detach.
    pub fn insets(&self) -> Option<EdgeInsets> {
        self.inner.borrow().cached_insets
    }

    /// Recomputes the insets and publishes them if they changed.
    ///
    /// Returns whether a new value reached the pipeline. A value whose
    /// publication failed is not cached, so the next signal retries it.
    pub fn maybe_update(&self) -> bool {
        SafeAreaInner::maybe_update(&self.inner)
    }

    pub fn provider(&self) -> Option<Rc<dyn InsetsProvider>> {
        self.inner.borrow().provider.as_ref().and_then(Weak::upgrade)
    }

    /// Number of listener registrations currently held on the provider.
    pub fn active_subscriptions(&self) -> usize {
        if self.subscriptions.is_some() {
            2
        } else {
            0
        }
    }

    #[cfg(any(test, feature = "test-helpers"))]
    pub fn publish_count(&self) -> usize {
        self.inner.borrow().publish_count
    }

    fn subscribe(&mut self, provider: &Rc<dyn InsetsProvider>) {
        let on_insets = Rc::downgrade(&self.inner);
        let insets_listener = provider.add_insets_listener(Rc::new(move || {
            SafeAreaInner::on_insets_changed(&on_insets);
        }));
        let on_pre_draw = Rc::downgrade(&self.inner);
        let pre_draw_listener =
            provider.add_pre_draw_listener(Rc::new(move || SafeAreaInner::on_pre_draw(&on_pre_draw)));

        self.subscriptions = Some(Subscriptions {
            provider: Rc::downgrade(provider),
            insets_listener,
            pre_draw_listener,
        });
    }

    fn unsubscribe(&mut self) {
        let Some(subscriptions) = self.subscriptions.take() else {
            return;
        };
        let node_id = self.node_id();
        let Some(provider) = subscriptions.provider.upgrade() else {
            log::debug!("node {node_id}: {}", SafeAreaError::ProviderDropped);
            return;
        };
        if let Err(err) = provider.remove_insets_listener(subscriptions.insets_listener) {
            log::debug!("node {node_id}: insets listener removal failed: {err}");
        }
        if let Err(err) = provider.remove_pre_draw_listener(subscriptions.pre_draw_listener) {
            log::debug!("node {node_id}: pre-draw listener removal failed: {err}");
        }
    }
}

impl LifecycleNode for SafeAreaNode {
    fn node_state(&self) -> &NodeState {
        &self.state
    }

    fn on_attach(&mut self, context: &mut dyn AttachContext) {
        let node_id = self.node_id();
        if !self.state.begin_attach() {
            log::warn!("node {node_id}: attach while attached ignored");
            return;
        }

        let hierarchy = context.hierarchy();
        let provider_id = find_provider(hierarchy, node_id).unwrap_or_else(|err| {
            log::debug!("{err}; node {node_id} is its own provider");
            node_id
        });

        match hierarchy.insets_source(provider_id) {
            Some(provider) => {
                // Some providers fire a listener as soon as it is registered.
                self.inner.borrow_mut().provider = Some(Rc::downgrade(&provider));
                self.subscribe(&provider);
            }
            None => {
                log::debug!("node {provider_id} exposes no insets source; node {node_id} falls back to zero insets");
            }
        }

        let initial = Rc::downgrade(&self.inner);
        self.runtime.enqueue_ui_task(Box::new(move || {
            if let Some(cell) = initial.upgrade() {
                SafeAreaInner::maybe_update(&cell);
            }
        }));
        log::debug!("node {node_id}: attached to provider {provider_id}");
    }

    fn on_detach(&mut self) {
        if !self.state.begin_detach() {
            return;
        }
        self.unsubscribe();
        self.inner.borrow_mut().provider = None;
        log::debug!("node {}: detached", self.node_id());
    }
}

impl Drop for SafeAreaNode {
    fn drop(&mut self) {
        self.on_detach();
    }
}

#[cfg(test)]
#[path = "tests/safe_area_node_tests.rs"]
mod tests;
