//! Node lifecycle scaffolding and collaborator traits.
//!
//! Consumer nodes are written against the traits in this crate: the provider
//! they read insets from, the hierarchy they locate it in, and the layout host
//! they invalidate. Concrete implementations live in `safearea-ui` and in
//! platform integrations.

pub mod invalidation;
pub mod node;
pub mod provider;

pub use invalidation::{BasicLayoutHost, InvalidationKind, LayoutHost};
pub use node::{AttachContext, BasicAttachContext, LifecycleNode, NodeState};
pub use provider::{
    find_provider, ImeInsets, InsetsListener, InsetsProvider, PlatformInsets, PreDrawListener,
    ViewHierarchy,
};

pub use safearea_core::{ListenerId, NodeId, SafeAreaError};
pub use safearea_ui_graphics::EdgeInsets;
