use std::rc::Rc;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use safearea_core::{DefaultScheduler, Runtime};
use safearea_testing::RecordingStateWrapper;
use safearea_ui::{
    compute_safe_area_insets, BasicAttachContext, BasicLayoutHost, EdgeInsets, ImeInsets,
    InsetsHost, LifecycleNode, PipelineBinding, PlatformInsets, SafeAreaNode, ViewTree,
};

const CONSUMER_SAMPLES: &[usize] = &[1, 16, 128];

fn platform(keyboard: bool) -> PlatformInsets {
    let ime = if keyboard {
        ImeInsets::shown(300.0)
    } else {
        ImeInsets::hidden(0.0)
    };
    PlatformInsets::EMPTY
        .with_system_bars(EdgeInsets::from_components(0.0, 24.0, 0.0, 48.0))
        .with_cutout(EdgeInsets::from_components(0.0, 40.0, 0.0, 0.0))
        .with_ime(ime)
}

fn bench_compute(c: &mut Criterion) {
    let input = platform(true);
    c.bench_function("compute_safe_area_insets", |b| {
        b.iter(|| compute_safe_area_insets(black_box(&input)))
    });
}

struct Scene {
    runtime: Runtime,
    provider: Rc<InsetsHost>,
    _nodes: Vec<SafeAreaNode>,
}

fn scene(consumers: usize) -> Scene {
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let provider = Rc::new(InsetsHost::new(runtime.handle()));
    let mut tree = ViewTree::new();
    let root = tree.insert(None);
    tree.set_insets_provider(root, provider.clone());

    let mut nodes = Vec::with_capacity(consumers);
    for _ in 0..consumers {
        let id = tree.insert(Some(root));
        let binding = PipelineBinding::direct(Rc::new(RecordingStateWrapper::new()));
        let mut node = SafeAreaNode::new(Rc::new(BasicLayoutHost::new(id)), runtime.handle())
            .with_binding(binding);
        let mut context = BasicAttachContext::new(&tree);
        node.on_attach(&mut context);
        nodes.push(node);
    }
    runtime.drain_ui();
    Scene {
        runtime,
        provider,
        _nodes: nodes,
    }
}

fn bench_unchanged_pre_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("pre_draw_unchanged");
    for &consumers in CONSUMER_SAMPLES {
        let scene = scene(consumers);
        group.bench_with_input(BenchmarkId::from_parameter(consumers), &consumers, |b, _| {
            b.iter(|| black_box(scene.provider.dispatch_pre_draw()))
        });
    }
    group.finish();
}

fn bench_keyboard_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyboard_toggle");
    for &consumers in CONSUMER_SAMPLES {
        let scene = scene(consumers);
        let mut visible = false;
        group.bench_with_input(BenchmarkId::from_parameter(consumers), &consumers, |b, _| {
            b.iter(|| {
                visible = !visible;
                scene.provider.set_platform_insets(platform(visible));
                scene.runtime.take_frame_request();
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_compute,
    bench_unchanged_pre_draw,
    bench_keyboard_toggle
);
criterion_main!(benches);
