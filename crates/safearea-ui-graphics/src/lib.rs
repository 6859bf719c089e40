//! Pure math/data for safe-area insets and units
//!
//! This crate contains the edge/inset primitives and the unit types that are
//! shared by every other crate in the workspace.

mod geometry;
mod unit;

pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::geometry::{Edge, EdgeInsets};
    pub use crate::unit::{Dp, Px};
}
