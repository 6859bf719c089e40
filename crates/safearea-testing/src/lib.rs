//! Testing utilities and harness for safe-area propagation

pub mod fakes;
pub mod testing;

pub use fakes::*;
pub use testing::*;

pub mod prelude {
    pub use crate::fakes::*;
    pub use crate::testing::*;
    pub use safearea_ui::prelude::*;
}
