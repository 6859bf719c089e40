//! Safe-area inset computation.

use safearea_foundation::PlatformInsets;
use safearea_ui_graphics::EdgeInsets;

/// Combines every obstruction source into the distance each screen edge must
/// keep clear.
///
/// Sources may overlap (a cutout inside the status bar, a keyboard over the
/// navigation bar), so each edge takes the largest single claim. The keyboard
/// only counts while visible and only on the bottom edge. Missing sources and
/// negative values contribute zero.
pub fn compute_safe_area_insets(platform: &PlatformInsets) -> EdgeInsets {
    let bars = platform.system_bars.unwrap_or_default().non_negative();
    let cutout = platform.cutout.unwrap_or_default().non_negative();

    let combined = bars.max_each(&cutout);

    let bottom = match platform.ime {
        Some(ime) if ime.visible => combined.bottom.max(ime.bottom.max(0.0)),
        _ => combined.bottom,
    };

    EdgeInsets { bottom, ..combined }
}

#[cfg(test)]
#[path = "tests/insets_tests.rs"]
mod tests;
