use std::rc::Rc;
use std::sync::Arc;

use safearea_core::{DefaultScheduler, NodeId, Runtime, RuntimeHandle, SafeAreaError, WorkerQueue};
use safearea_foundation::{BasicAttachContext, BasicLayoutHost, LifecycleNode, PlatformInsets};
use safearea_ui::{InsetsHost, LayoutRegistry, LegacyBinding, PipelineBinding, SafeAreaNode, ViewTree};

/// Headless harness for exercising safe-area nodes in tests.
///
/// `SafeAreaTestRule` owns a runtime, a view tree whose root is tagged as the
/// insets provider and, on demand, a pipeline worker for the legacy binding.
/// Frames are driven by hand: [`advance_frame`](Self::advance_frame) drains
/// deferred UI work and runs the provider's pre-draw hooks once.
pub struct SafeAreaTestRule {
    runtime: Runtime,
    tree: ViewTree,
    provider: Rc<InsetsHost>,
    root: NodeId,
    pipeline: Option<Rc<WorkerQueue>>,
}

impl SafeAreaTestRule {
    pub fn new() -> Self {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let provider = Rc::new(InsetsHost::new(runtime.handle()));
        let mut tree = ViewTree::new();
        let root = tree.insert(None);
        tree.set_insets_provider(root, provider.clone());
        Self {
            runtime,
            tree,
            provider,
            root,
            pipeline: None,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn provider(&self) -> Rc<InsetsHost> {
        Rc::clone(&self.provider)
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ViewTree {
        &mut self.tree
    }

    /// Adds a node directly under the provider root.
    pub fn add_child(&mut self) -> NodeId {
        self.tree.insert(Some(self.root))
    }

    /// Creates a detached safe-area node under the provider root.
    pub fn create_node(&mut self, binding: PipelineBinding) -> (SafeAreaNode, Rc<BasicLayoutHost>) {
        let id = self.add_child();
        let host = Rc::new(BasicLayoutHost::new(id));
        let node = SafeAreaNode::new(host.clone(), self.runtime.handle()).with_binding(binding);
        (node, host)
    }

    pub fn attach(&self, node: &mut dyn LifecycleNode) {
        let mut context = BasicAttachContext::new(&self.tree);
        node.on_attach(&mut context);
    }

    pub fn detach(&self, node: &mut dyn LifecycleNode) {
        node.on_detach();
    }

    /// Pushes new geometry through the provider's change signal.
    pub fn set_platform_insets(&self, insets: PlatformInsets) -> bool {
        self.provider.set_platform_insets(insets)
    }

    /// Stores new geometry without firing the change signal.
    pub fn set_platform_insets_silently(&self, insets: PlatformInsets) -> bool {
        self.provider.set_platform_insets_without_dispatch(insets)
    }

    /// Drains deferred UI work, then runs one frame's pre-draw pass.
    ///
    /// Returns whether the frame was allowed to draw.
    pub fn advance_frame(&self) -> bool {
        self.runtime.drain_ui();
        self.runtime.take_frame_request();
        self.provider.dispatch_pre_draw()
    }

    /// Runs frames until one draws without a veto and no UI work is pending.
    pub fn pump_until_idle(&self) -> usize {
        let mut frames = 0;
        loop {
            frames += 1;
            if frames > 100 {
                panic!("pump_until_idle looped too many times!");
            }
            let drew = self.advance_frame();
            if drew && !self.runtime.has_pending_ui() {
                return frames;
            }
        }
    }

    /// Legacy binding writing into `registry` on the rule's pipeline worker.
    ///
    /// The worker is started on first use.
    pub fn legacy_binding(
        &mut self,
        registry: Arc<dyn LayoutRegistry>,
    ) -> Result<LegacyBinding, SafeAreaError> {
        let queue = match &self.pipeline {
            Some(queue) => Rc::clone(queue),
            None => {
                let queue = Rc::new(WorkerQueue::new("safearea-test-pipeline")?);
                self.pipeline = Some(Rc::clone(&queue));
                queue
            }
        };
        Ok(LegacyBinding::new(registry, queue))
    }

    /// Blocks until the pipeline worker has run every submitted write.
    pub fn flush_pipeline(&self) -> Result<(), SafeAreaError> {
        match &self.pipeline {
            Some(queue) => queue.flush(),
            None => Ok(()),
        }
    }

    /// Closes the pipeline worker; later legacy publications fail.
    pub fn shutdown_pipeline(&self) {
        if let Some(queue) = &self.pipeline {
            queue.shutdown();
        }
    }
}

impl Default for SafeAreaTestRule {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
