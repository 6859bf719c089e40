//! Safe-area insets for consumer nodes.
//!
//! A [`SafeAreaNode`] computes the region of the window not obstructed by
//! system bars, the on-screen keyboard or display cutouts, and publishes it to
//! the render pipeline whenever it changes. [`InsetsHost`] is the window-level
//! provider the platform integration feeds; [`ViewTree`] is a minimal host
//! tree used to locate it.

mod insets;
mod insets_host;
mod pipeline;
mod safe_area_node;
mod view_mode;
mod view_tree;

pub use insets::compute_safe_area_insets;
pub use insets_host::InsetsHost;
pub use pipeline::{
    LayoutRegistry, LegacyBinding, PipelineBinding, PublishChannel, SafeAreaLocalData,
    SafeAreaViewState, StateWrapper,
};
pub use safe_area_node::SafeAreaNode;
pub use view_mode::{EdgeMode, SafeAreaViewEdges, SafeAreaViewMode};
pub use view_tree::ViewTree;

pub use safearea_foundation::{
    find_provider, AttachContext, BasicAttachContext, BasicLayoutHost, ImeInsets,
    InvalidationKind, InsetsListener, InsetsProvider, LayoutHost, LifecycleNode, NodeState,
    PlatformInsets, PreDrawListener, ViewHierarchy,
};
pub use safearea_ui_graphics::{Dp, Edge, EdgeInsets, Px};

pub use safearea_core::{ListenerId, NodeId, SafeAreaError};

pub mod prelude {
    pub use crate::{
        compute_safe_area_insets, EdgeInsets, EdgeMode, InsetsHost, InsetsProvider,
        LifecycleNode, PlatformInsets, SafeAreaNode, SafeAreaViewEdges, SafeAreaViewMode,
        ViewTree,
    };
}
