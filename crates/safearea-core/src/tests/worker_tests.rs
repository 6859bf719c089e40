use super::*;
use std::sync::atomic::AtomicBool;

#[test]
fn run_async_executes_on_worker_thread() {
    let queue = WorkerQueue::new("test-pipeline").expect("worker starts");
    let caller = thread::current().id();
    let seen = Arc::new(Mutex::new(None));

    let slot = Arc::clone(&seen);
    queue
        .run_async(Box::new(move || {
            *slot.lock().unwrap() = Some(thread::current().id());
        }))
        .expect("queue open");
    queue.flush().expect("flush");

    let worker = seen.lock().unwrap().expect("task ran");
    assert_ne!(worker, caller);
    assert_eq!(queue.pending(), 0);
}

#[test]
fn tasks_run_in_submission_order() {
    let queue = WorkerQueue::new("ordered").expect("worker starts");
    let log = Arc::new(Mutex::new(Vec::new()));
    for value in 0..5 {
        let log = Arc::clone(&log);
        queue
            .run_async(Box::new(move || log.lock().unwrap().push(value)))
            .expect("queue open");
    }
    queue.flush().expect("flush");
    assert_eq!(*log.lock().unwrap(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn submissions_after_shutdown_fail_with_queue_closed() {
    let queue = WorkerQueue::new("closing").expect("worker starts");
    queue.shutdown();

    assert!(queue.is_closed());
    let result = queue.run_async(Box::new(|| {}));
    assert_eq!(result, Err(SafeAreaError::QueueClosed));
    assert_eq!(queue.pending(), 0);
    assert_eq!(queue.flush(), Err(SafeAreaError::QueueClosed));
}

#[test]
fn shutdown_drains_queued_tasks_first() {
    let queue = WorkerQueue::new("draining").expect("worker starts");
    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);
    queue
        .run_async(Box::new(move || flag.store(true, Ordering::SeqCst)))
        .expect("queue open");
    queue.shutdown();
    assert!(ran.load(Ordering::SeqCst));
}

#[test]
fn panicking_task_does_not_kill_worker() {
    let queue = WorkerQueue::new("resilient").expect("worker starts");
    queue
        .run_async(Box::new(|| panic!("registry exploded")))
        .expect("queue open");

    let ran = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&ran);
    queue
        .run_async(Box::new(move || flag.store(true, Ordering::SeqCst)))
        .expect("queue still open");
    queue.flush().expect("flush");

    assert!(ran.load(Ordering::SeqCst));
    assert_eq!(queue.pending(), 0);
}
