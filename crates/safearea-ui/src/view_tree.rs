//! Minimal host view tree implementing [`ViewHierarchy`].

use std::rc::Rc;

use safearea_core::collections::map::HashMap;
use safearea_core::NodeId;
use safearea_foundation::{InsetsProvider, ViewHierarchy};

struct ViewEntry {
    parent: Option<NodeId>,
    is_provider: bool,
    source: Option<Rc<dyn InsetsProvider>>,
}

/// Parent links, provider tags and insets sources for a set of nodes.
#[derive(Default)]
pub struct ViewTree {
    nodes: HashMap<NodeId, ViewEntry>,
    next_id: NodeId,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node under `parent` and returns its id.
    ///
    /// An unknown `parent` makes the new node a root.
    pub fn insert(&mut self, parent: Option<NodeId>) -> NodeId {
        let parent = parent.filter(|id| self.nodes.contains_key(id));
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(
            id,
            ViewEntry {
                parent,
                is_provider: false,
                source: None,
            },
        );
        id
    }

    /// Tags `node` as the insets provider for its subtree.
    pub fn set_insets_provider(&mut self, node: NodeId, provider: Rc<dyn InsetsProvider>) {
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.is_provider = true;
            entry.source = Some(provider);
        }
    }

    /// Gives `node` a signal source without tagging it as a provider.
    pub fn set_insets_source(&mut self, node: NodeId, source: Rc<dyn InsetsProvider>) {
        if let Some(entry) = self.nodes.get_mut(&node) {
            entry.source = Some(source);
        }
    }

    /// Removes `node`. Its children become roots.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if self.nodes.remove(&node).is_none() {
            return false;
        }
        for entry in self.nodes.values_mut() {
            if entry.parent == Some(node) {
                entry.parent = None;
            }
        }
        true
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ViewHierarchy for ViewTree {
    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|entry| entry.parent)
    }

    fn is_insets_provider(&self, node: NodeId) -> bool {
        self.nodes.get(&node).is_some_and(|entry| entry.is_provider)
    }

    fn insets_source(&self, node: NodeId) -> Option<Rc<dyn InsetsProvider>> {
        self.nodes.get(&node).and_then(|entry| entry.source.clone())
    }
}
