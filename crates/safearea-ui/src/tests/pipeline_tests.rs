use super::*;
use safearea_foundation::{BasicLayoutHost, InvalidationKind};
use safearea_core::WorkerTask;
use std::cell::RefCell;
use std::sync::Mutex;

#[derive(Default)]
struct RecordingState {
    states: RefCell<Vec<SafeAreaViewState>>,
}

impl StateWrapper for RecordingState {
    fn update_state(&self, state: SafeAreaViewState) {
        self.states.borrow_mut().push(state);
    }
}

#[derive(Default)]
struct Registry {
    writes: Mutex<Vec<(NodeId, SafeAreaLocalData)>>,
}

impl LayoutRegistry for Registry {
    fn set_local_data(&self, node: NodeId, data: SafeAreaLocalData) -> Result<(), SafeAreaError> {
        self.writes.lock().unwrap().push((node, data));
        Ok(())
    }
}

/// Holds submitted tasks until the test runs them.
#[derive(Default)]
struct ManualQueue {
    tasks: RefCell<Vec<WorkerTask>>,
    closed: bool,
}

impl ManualQueue {
    fn run_all(&self) {
        for task in self.tasks.borrow_mut().drain(..) {
            task();
        }
    }
}

impl TaskQueue for ManualQueue {
    fn run_async(&self, task: WorkerTask) -> Result<(), SafeAreaError> {
        if self.closed {
            return Err(SafeAreaError::QueueClosed);
        }
        self.tasks.borrow_mut().push(task);
        Ok(())
    }
}

fn sample() -> SafeAreaLocalData {
    SafeAreaLocalData {
        insets: EdgeInsets::from_components(0.0, 40.0, 0.0, 300.0),
        mode: SafeAreaViewMode::Margin,
        edges: SafeAreaViewEdges::ALL,
    }
}

#[test]
fn direct_channel_is_preferred_and_carries_only_insets() {
    let state = Rc::new(RecordingState::default());
    let registry = Arc::new(Registry::default());
    let queue = Rc::new(ManualQueue::default());
    let mut binding = PipelineBinding::legacy(LegacyBinding::new(registry.clone(), queue.clone()));
    binding.set_state_wrapper(Some(state.clone()));
    let host = BasicLayoutHost::new(9);

    assert_eq!(binding.publish(&host, sample()), Ok(PublishChannel::Direct));
    assert_eq!(
        *state.states.borrow(),
        vec![SafeAreaViewState {
            insets: sample().insets
        }]
    );
    assert!(queue.tasks.borrow().is_empty());
    assert!(host.invalidations().is_empty());
}

#[test]
fn legacy_write_is_deferred_to_the_queue() {
    let registry = Arc::new(Registry::default());
    let queue = Rc::new(ManualQueue::default());
    let binding = PipelineBinding::legacy(LegacyBinding::new(registry.clone(), queue.clone()));
    let host = BasicLayoutHost::new(4);

    assert_eq!(binding.publish(&host, sample()), Ok(PublishChannel::Legacy));

    // Layout and draw are requested before the registry sees the write.
    assert!(registry.writes.lock().unwrap().is_empty());
    assert_eq!(
        host.invalidations(),
        vec![InvalidationKind::Layout, InvalidationKind::Draw]
    );

    queue.run_all();
    assert_eq!(*registry.writes.lock().unwrap(), vec![(4, sample())]);
}

#[test]
fn closed_queue_fails_without_invalidating() {
    let registry = Arc::new(Registry::default());
    let queue = Rc::new(ManualQueue {
        closed: true,
        ..ManualQueue::default()
    });
    let binding = PipelineBinding::legacy(LegacyBinding::new(registry, queue));
    let host = BasicLayoutHost::new(4);

    assert_eq!(
        binding.publish(&host, sample()),
        Err(SafeAreaError::QueueClosed)
    );
    assert!(host.invalidations().is_empty());
}

#[test]
fn failed_invalidation_after_dispatch_still_counts_as_published() {
    let registry = Arc::new(Registry::default());
    let queue = Rc::new(ManualQueue::default());
    let binding = PipelineBinding::legacy(LegacyBinding::new(registry.clone(), queue.clone()));
    let host = BasicLayoutHost::new(2);
    host.set_available(false);

    assert_eq!(binding.publish(&host, sample()), Ok(PublishChannel::Legacy));
    queue.run_all();
    assert_eq!(registry.writes.lock().unwrap().len(), 1);
}

#[test]
fn missing_binding_is_reported() {
    let binding = PipelineBinding::new();
    let host = BasicLayoutHost::new(11);
    assert_eq!(
        binding.publish(&host, sample()),
        Err(SafeAreaError::BindingMissing { node: 11 })
    );
}

#[test]
fn local_data_resolves_against_base_spacing() {
    let data = SafeAreaLocalData {
        edges: SafeAreaViewEdges::ALL.with(
            safearea_ui_graphics::Edge::Bottom,
            crate::view_mode::EdgeMode::Off,
        ),
        ..sample()
    };
    assert_eq!(
        data.resolved_insets(EdgeInsets::uniform(8.0)),
        EdgeInsets::from_components(8.0, 48.0, 8.0, 8.0)
    );
}
