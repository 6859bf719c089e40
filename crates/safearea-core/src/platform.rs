//! Platform abstraction traits for runtime services.
//!
//! These traits let the runtime delegate frame scheduling to the host
//! platform so it can be driven by a display link, a winit event loop or a
//! test harness alike.

/// Schedules frames on behalf of the runtime.
///
/// Implementations must be safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}
