//! Core runtime for safe-area propagation.
//!
//! Provides the UI-thread task queue used for deferred work, the frame
//! scheduling hook and the dedicated worker queue the legacy layout pipeline
//! runs on.

pub mod collections;
pub mod platform;
mod runtime;
mod worker;

pub use platform::RuntimeScheduler;
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};
pub use worker::{TaskQueue, WorkerQueue, WorkerTask};

use std::fmt;

/// Identity of a node in the view hierarchy.
pub type NodeId = usize;

/// Handle returned by a listener registration on an insets provider.
pub type ListenerId = u64;

/// Failures raised at the component boundaries of the safe-area system.
///
/// None of these reach the host application: callers on the best-effort
/// paths log and discard them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafeAreaError {
    /// No ancestor is tagged as an insets provider.
    MissingProvider { node: NodeId },
    /// The node has neither a state channel nor a legacy registry binding.
    BindingMissing { node: NodeId },
    /// The pipeline worker queue has shut down.
    QueueClosed,
    /// The legacy layout registry refused the write.
    RegistryRejected { node: NodeId, reason: String },
    /// The node's layout host can no longer accept invalidations.
    HostUnavailable { node: NodeId },
    /// A listener id was not registered on the provider.
    ListenerMissing { id: ListenerId },
    /// The provider was dropped before the call could reach it.
    ProviderDropped,
    /// The pipeline worker thread could not be started.
    WorkerSpawn { reason: String },
}

impl fmt::Display for SafeAreaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafeAreaError::MissingProvider { node } => {
                write!(f, "no insets provider above node {node}")
            }
            SafeAreaError::BindingMissing { node } => {
                write!(f, "node {node} has no render pipeline binding")
            }
            SafeAreaError::QueueClosed => write!(f, "pipeline queue is closed"),
            SafeAreaError::RegistryRejected { node, reason } => {
                write!(f, "layout registry rejected node {node}: {reason}")
            }
            SafeAreaError::HostUnavailable { node } => {
                write!(f, "layout host for node {node} is unavailable")
            }
            SafeAreaError::ListenerMissing { id } => write!(f, "listener {id} is not registered"),
            SafeAreaError::ProviderDropped => write!(f, "insets provider was dropped"),
            SafeAreaError::WorkerSpawn { reason } => {
                write!(f, "failed to start pipeline worker: {reason}")
            }
        }
    }
}

impl std::error::Error for SafeAreaError {}
