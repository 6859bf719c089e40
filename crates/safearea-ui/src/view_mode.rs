//! Per-node inset policy: how insets are applied and on which edges.

use safearea_ui_graphics::{Edge, EdgeInsets};

/// Whether the render pipeline applies insets as padding or margin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SafeAreaViewMode {
    #[default]
    Padding,
    Margin,
}

/// Policy for a single edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeMode {
    /// Ignore the inset on this edge.
    Off,
    /// Add the inset to the node's own spacing.
    #[default]
    Additive,
    /// Use whichever is larger, the inset or the node's own spacing.
    Maximum,
}

/// One [`EdgeMode`] per edge. Defaults to [`EdgeMode::Additive`] everywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SafeAreaViewEdges {
    pub left: EdgeMode,
    pub top: EdgeMode,
    pub right: EdgeMode,
    pub bottom: EdgeMode,
}

impl SafeAreaViewEdges {
    pub const ALL: Self = Self::uniform(EdgeMode::Additive);

    pub const NONE: Self = Self::uniform(EdgeMode::Off);

    pub const fn uniform(mode: EdgeMode) -> Self {
        Self {
            left: mode,
            top: mode,
            right: mode,
            bottom: mode,
        }
    }

    pub const fn new(left: EdgeMode, top: EdgeMode, right: EdgeMode, bottom: EdgeMode) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn get(&self, edge: Edge) -> EdgeMode {
        match edge {
            Edge::Left => self.left,
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
        }
    }

    pub fn with(mut self, edge: Edge, mode: EdgeMode) -> Self {
        match edge {
            Edge::Left => self.left = mode,
            Edge::Top => self.top = mode,
            Edge::Right => self.right = mode,
            Edge::Bottom => self.bottom = mode,
        }
        self
    }

    /// Zeroes the insets on every `Off` edge.
    pub fn filter(&self, insets: EdgeInsets) -> EdgeInsets {
        self.resolve(insets, EdgeInsets::ZERO)
    }

    /// Applies the edge policy to `insets` on top of the node's own `base`
    /// spacing.
    pub fn resolve(&self, insets: EdgeInsets, base: EdgeInsets) -> EdgeInsets {
        Edge::ALL.iter().fold(EdgeInsets::ZERO, |acc, &edge| {
            let inset = insets.get(edge);
            let own = base.get(edge);
            let value = match self.get(edge) {
                EdgeMode::Off => own,
                EdgeMode::Additive => own + inset,
                EdgeMode::Maximum => own.max(inset),
            };
            acc.with(edge, value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_padding_and_additive() {
        assert_eq!(SafeAreaViewMode::default(), SafeAreaViewMode::Padding);
        assert_eq!(SafeAreaViewEdges::default(), SafeAreaViewEdges::ALL);
    }

    #[test]
    fn filter_drops_off_edges() {
        let edges = SafeAreaViewEdges::ALL.with(Edge::Top, EdgeMode::Off);
        let insets = EdgeInsets::from_components(1.0, 40.0, 2.0, 300.0);
        assert_eq!(
            edges.filter(insets),
            EdgeInsets::from_components(1.0, 0.0, 2.0, 300.0)
        );
        assert!(SafeAreaViewEdges::NONE.filter(insets).is_zero());
    }

    #[test]
    fn resolve_applies_each_mode() {
        let edges = SafeAreaViewEdges::new(
            EdgeMode::Off,
            EdgeMode::Additive,
            EdgeMode::Maximum,
            EdgeMode::Maximum,
        );
        let insets = EdgeInsets::from_components(10.0, 40.0, 4.0, 48.0);
        let base = EdgeInsets::uniform(16.0);
        assert_eq!(
            edges.resolve(insets, base),
            EdgeInsets::from_components(16.0, 56.0, 16.0, 48.0)
        );
    }
}
