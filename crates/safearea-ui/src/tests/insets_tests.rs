use super::*;
use safearea_foundation::ImeInsets;

fn phone() -> PlatformInsets {
    PlatformInsets::EMPTY
        .with_system_bars(EdgeInsets::from_components(0.0, 24.0, 0.0, 48.0))
        .with_cutout(EdgeInsets::from_components(0.0, 40.0, 0.0, 0.0))
}

#[test]
fn visible_keyboard_and_cutout_take_per_edge_maximum() {
    let platform = phone().with_ime(ImeInsets::shown(300.0));
    assert_eq!(
        compute_safe_area_insets(&platform),
        EdgeInsets::from_components(0.0, 40.0, 0.0, 300.0)
    );
}

#[test]
fn hidden_keyboard_is_ignored() {
    let platform = phone().with_ime(ImeInsets::hidden(300.0));
    assert_eq!(
        compute_safe_area_insets(&platform),
        EdgeInsets::from_components(0.0, 40.0, 0.0, 48.0)
    );
}

#[test]
fn keyboard_shorter_than_navigation_bar_keeps_bar_height() {
    let platform = phone().with_ime(ImeInsets::shown(20.0));
    assert_eq!(compute_safe_area_insets(&platform).bottom, 48.0);
}

#[test]
fn cutout_on_bottom_edge_wins_over_bars() {
    let platform = PlatformInsets::EMPTY
        .with_system_bars(EdgeInsets::from_components(0.0, 24.0, 0.0, 16.0))
        .with_cutout(EdgeInsets::from_components(30.0, 0.0, 0.0, 32.0));
    assert_eq!(
        compute_safe_area_insets(&platform),
        EdgeInsets::from_components(30.0, 24.0, 0.0, 32.0)
    );
}

#[test]
fn overlapping_sources_are_never_summed() {
    let platform = PlatformInsets::EMPTY
        .with_system_bars(EdgeInsets::uniform(10.0))
        .with_cutout(EdgeInsets::uniform(10.0));
    assert_eq!(compute_safe_area_insets(&platform), EdgeInsets::uniform(10.0));
}

#[test]
fn absent_platform_data_yields_zero() {
    assert!(compute_safe_area_insets(&PlatformInsets::EMPTY).is_zero());
    let keyboard_only = PlatformInsets::EMPTY.with_ime(ImeInsets::shown(250.0));
    assert_eq!(
        compute_safe_area_insets(&keyboard_only),
        EdgeInsets::from_components(0.0, 0.0, 0.0, 250.0)
    );
}

#[test]
fn negative_platform_values_are_clamped() {
    let platform = PlatformInsets::EMPTY
        .with_system_bars(EdgeInsets::from_components(-5.0, 24.0, -1.0, 0.0))
        .with_ime(ImeInsets::shown(-30.0));
    assert_eq!(
        compute_safe_area_insets(&platform),
        EdgeInsets::from_components(0.0, 24.0, 0.0, 0.0)
    );
}
