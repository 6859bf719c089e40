//! Publication of inset state to the render pipeline.
//!
//! A node publishes through whichever binding the host gave it:
//!
//! - the **direct state channel** ([`StateWrapper`]) when present, which takes
//!   the new state synchronously and never blocks;
//! - otherwise the **legacy side-channel**: a [`LayoutRegistry`] keyed by node
//!   id that is only written from the pipeline's own worker, reached through a
//!   fire-and-forget [`TaskQueue`] submission, followed by a layout request and
//!   a draw invalidation on the calling thread.

use std::rc::Rc;
use std::sync::Arc;

use safearea_core::{NodeId, SafeAreaError, TaskQueue};
use safearea_foundation::LayoutHost;
use safearea_ui_graphics::EdgeInsets;

use crate::view_mode::{SafeAreaViewEdges, SafeAreaViewMode};

/// State value handed to the direct state channel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SafeAreaViewState {
    pub insets: EdgeInsets,
}

/// Value written into the legacy layout registry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SafeAreaLocalData {
    pub insets: EdgeInsets,
    pub mode: SafeAreaViewMode,
    pub edges: SafeAreaViewEdges,
}

impl SafeAreaLocalData {
    /// Spacing the layout side should apply given the node's own `base`
    /// padding or margin.
    pub fn resolved_insets(&self, base: EdgeInsets) -> EdgeInsets {
        self.edges.resolve(self.insets, base)
    }
}

/// Direct render-pipeline state handle of a node.
pub trait StateWrapper {
    fn update_state(&self, state: SafeAreaViewState);
}

/// Legacy per-node layout data store owned by the pipeline worker.
pub trait LayoutRegistry: Send + Sync {
    fn set_local_data(&self, node: NodeId, data: SafeAreaLocalData) -> Result<(), SafeAreaError>;
}

/// Which channel a publication went through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PublishChannel {
    Direct,
    Legacy,
}

/// Registry plus the queue of the worker that owns it.
#[derive(Clone)]
pub struct LegacyBinding {
    registry: Arc<dyn LayoutRegistry>,
    queue: Rc<dyn TaskQueue>,
}

impl LegacyBinding {
    pub fn new(registry: Arc<dyn LayoutRegistry>, queue: Rc<dyn TaskQueue>) -> Self {
        Self { registry, queue }
    }

    fn publish(&self, host: &dyn LayoutHost, data: SafeAreaLocalData) -> Result<(), SafeAreaError> {
        let node = host.node_id();
        let registry = Arc::clone(&self.registry);
        self.queue.run_async(Box::new(move || {
            if let Err(err) = registry.set_local_data(node, data) {
                log::debug!("safe-area local data dropped on pipeline worker: {err}");
            }
        }))?;

        if let Err(err) = host.request_layout() {
            log::debug!("layout request after safe-area publish failed: {err}");
        }
        if let Err(err) = host.mark_dirty() {
            log::debug!("draw invalidation after safe-area publish failed: {err}");
        }
        Ok(())
    }
}

/// The render-pipeline integration points available on a node.
#[derive(Clone, Default)]
pub struct PipelineBinding {
    state_wrapper: Option<Rc<dyn StateWrapper>>,
    legacy: Option<LegacyBinding>,
}

impl PipelineBinding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn direct(state_wrapper: Rc<dyn StateWrapper>) -> Self {
        Self {
            state_wrapper: Some(state_wrapper),
            legacy: None,
        }
    }

    pub fn legacy(binding: LegacyBinding) -> Self {
        Self {
            state_wrapper: None,
            legacy: Some(binding),
        }
    }

    pub fn set_state_wrapper(&mut self, state_wrapper: Option<Rc<dyn StateWrapper>>) {
        self.state_wrapper = state_wrapper;
    }

    pub fn set_legacy(&mut self, binding: Option<LegacyBinding>) {
        self.legacy = binding;
    }

    /// Delivers `data` without waiting on the pipeline.
    ///
    /// An error means nothing was handed to the pipeline. Failures that occur
    /// after the legacy dispatch was accepted are logged and not reported.
    pub fn publish(
        &self,
        host: &dyn LayoutHost,
        data: SafeAreaLocalData,
    ) -> Result<PublishChannel, SafeAreaError> {
        if let Some(state_wrapper) = &self.state_wrapper {
            state_wrapper.update_state(SafeAreaViewState {
                insets: data.insets,
            });
            return Ok(PublishChannel::Direct);
        }
        match &self.legacy {
            Some(legacy) => {
                legacy.publish(host, data)?;
                Ok(PublishChannel::Legacy)
            }
            None => Err(SafeAreaError::BindingMissing {
                node: host.node_id(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
