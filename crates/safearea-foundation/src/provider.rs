//! Insets provider and view hierarchy contracts.

use std::rc::Rc;

use safearea_core::collections::map::HashSet;
use safearea_core::{ListenerId, NodeId, SafeAreaError};
use safearea_ui_graphics::EdgeInsets;

/// On-screen keyboard geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ImeInsets {
    pub visible: bool,
    pub bottom: f32,
}

impl ImeInsets {
    pub fn shown(bottom: f32) -> Self {
        Self {
            visible: true,
            bottom,
        }
    }

    pub fn hidden(bottom: f32) -> Self {
        Self {
            visible: false,
            bottom,
        }
    }
}

/// Raw obstruction geometry reported by the platform, in dp.
///
/// Every source is optional; a missing source contributes nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlatformInsets {
    /// Status/navigation-bar equivalent reserved regions.
    pub system_bars: Option<EdgeInsets>,
    pub ime: Option<ImeInsets>,
    /// Display cutout safe insets (notches, camera holes, curved edges).
    pub cutout: Option<EdgeInsets>,
}

impl PlatformInsets {
    pub const EMPTY: PlatformInsets = PlatformInsets {
        system_bars: None,
        ime: None,
        cutout: None,
    };

    pub fn with_system_bars(mut self, insets: EdgeInsets) -> Self {
        self.system_bars = Some(insets);
        self
    }

    pub fn with_ime(mut self, ime: ImeInsets) -> Self {
        self.ime = Some(ime);
        self
    }

    pub fn with_cutout(mut self, insets: EdgeInsets) -> Self {
        self.cutout = Some(insets);
        self
    }
}

/// Push-style callback fired when inset-affecting geometry changes.
pub type InsetsListener = Rc<dyn Fn()>;

/// Hook run right before a frame is drawn. Returning `false` cancels the draw
/// and asks the host for another frame.
pub type PreDrawListener = Rc<dyn Fn() -> bool>;

/// Signal source and coordinate reference for inset computation.
///
/// Consumers only read from a provider; any number of them may subscribe to
/// the same one independently. Listeners never consume a notification: every
/// registered listener observes every change.
pub trait InsetsProvider {
    /// Current raw platform geometry.
    fn platform_insets(&self) -> PlatformInsets;

    fn add_insets_listener(&self, listener: InsetsListener) -> ListenerId;

    fn remove_insets_listener(&self, id: ListenerId) -> Result<(), SafeAreaError>;

    fn add_pre_draw_listener(&self, listener: PreDrawListener) -> ListenerId;

    fn remove_pre_draw_listener(&self, id: ListenerId) -> Result<(), SafeAreaError>;
}

/// Read-only view of parent links in the host view tree.
pub trait ViewHierarchy {
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Whether `node` is tagged as the insets provider for its subtree.
    fn is_insets_provider(&self, node: NodeId) -> bool;

    /// The signal source backing `node`, if the host exposes one.
    fn insets_source(&self, node: NodeId) -> Option<Rc<dyn InsetsProvider>>;
}

/// Walks the ancestors of `node` and returns the nearest one tagged as a
/// provider.
///
/// `node` itself is not considered. Fails with
/// [`SafeAreaError::MissingProvider`] when the walk reaches the root, or
/// revisits a node in a malformed hierarchy, without finding one.
pub fn find_provider(hierarchy: &dyn ViewHierarchy, node: NodeId) -> Result<NodeId, SafeAreaError> {
    let mut visited = HashSet::default();
    visited.insert(node);
    let mut current = hierarchy.parent(node);
    while let Some(candidate) = current {
        if !visited.insert(candidate) {
            log::warn!("cycle in view hierarchy at node {candidate}");
            break;
        }
        if hierarchy.is_insets_provider(candidate) {
            return Ok(candidate);
        }
        current = hierarchy.parent(candidate);
    }
    Err(SafeAreaError::MissingProvider { node })
}

#[cfg(test)]
#[path = "tests/provider_tests.rs"]
mod tests;
