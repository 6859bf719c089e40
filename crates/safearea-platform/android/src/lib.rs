use safearea_foundation::{ImeInsets, PlatformInsets};
use safearea_ui::InsetsHost;
use safearea_ui_graphics::{EdgeInsets, Px};

/// Insets for one source as Android reports them, in physical pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawInsets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RawInsets {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Snapshot of a window's insets as delivered by the platform callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawWindowInsets {
    pub system_bars: Option<RawInsets>,
    pub ime: Option<RawInsets>,
    pub ime_visible: bool,
    /// Safe insets of the display cutout, absent on devices without one.
    pub cutout: Option<RawInsets>,
}

/// Platform abstraction for Android.
///
/// Converts window insets from physical pixels into the density-independent
/// geometry consumed by [`InsetsHost`].
#[derive(Debug, Clone)]
pub struct AndroidPlatform {
    scale_factor: f64,
}

impl Default for AndroidPlatform {
    fn default() -> Self {
        Self { scale_factor: 1.0 }
    }
}

impl AndroidPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the platform's scale factor.
    ///
    /// This should be called when the device density changes. Non-positive
    /// factors are ignored.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        if scale_factor > 0.0 && scale_factor.is_finite() {
            self.scale_factor = scale_factor;
        } else {
            log::warn!("ignoring invalid scale factor {scale_factor}");
        }
    }

    /// Returns the current scale factor (density).
    pub fn scale_factor(&self) -> f32 {
        self.scale_factor as f32
    }

    fn to_dp(&self, raw: RawInsets) -> EdgeInsets {
        let density = self.scale_factor();
        let dp = |value: i32| Px::from(value).to_dp(density).0;
        EdgeInsets::from_components(dp(raw.left), dp(raw.top), dp(raw.right), dp(raw.bottom))
    }

    /// Converts a raw insets snapshot into logical platform geometry.
    pub fn window_insets(&self, raw: &RawWindowInsets) -> PlatformInsets {
        let ime = raw.ime.map(|ime| ImeInsets {
            visible: raw.ime_visible,
            bottom: self.to_dp(ime).bottom,
        });
        PlatformInsets {
            system_bars: raw.system_bars.map(|bars| self.to_dp(bars)),
            ime,
            cutout: raw.cutout.map(|cutout| self.to_dp(cutout)),
        }
    }

    /// Feeds a raw insets callback into `host`.
    ///
    /// Returns whether the geometry changed and listeners were notified.
    pub fn apply_window_insets(&self, host: &InsetsHost, raw: &RawWindowInsets) -> bool {
        let insets = self.window_insets(raw);
        log::trace!("window insets {raw:?} -> {insets:?}");
        host.set_platform_insets(insets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use safearea_core::{DefaultScheduler, Runtime};
    use safearea_ui::compute_safe_area_insets;
    use std::sync::Arc;

    fn raw(ime_visible: bool) -> RawWindowInsets {
        RawWindowInsets {
            system_bars: Some(RawInsets::new(0, 60, 0, 120)),
            ime: Some(RawInsets::new(0, 0, 0, 750)),
            ime_visible,
            cutout: Some(RawInsets::new(0, 100, 0, 0)),
        }
    }

    #[test]
    fn physical_pixels_are_scaled_to_dp() {
        let mut platform = AndroidPlatform::new();
        platform.set_scale_factor(2.5);

        let insets = platform.window_insets(&raw(true));
        assert_eq!(
            insets.system_bars,
            Some(EdgeInsets::from_components(0.0, 24.0, 0.0, 48.0))
        );
        assert_eq!(insets.ime, Some(ImeInsets::shown(300.0)));
        assert_eq!(
            compute_safe_area_insets(&insets),
            EdgeInsets::from_components(0.0, 40.0, 0.0, 300.0)
        );
    }

    #[test]
    fn invalid_scale_factor_is_ignored() {
        let mut platform = AndroidPlatform::new();
        platform.set_scale_factor(2.0);
        platform.set_scale_factor(0.0);
        platform.set_scale_factor(f64::NAN);
        assert_eq!(platform.scale_factor(), 2.0);
    }

    #[test]
    fn repeated_callbacks_notify_once() {
        let runtime = Runtime::new(Arc::new(DefaultScheduler));
        let host = InsetsHost::new(runtime.handle());
        let platform = AndroidPlatform::default();

        assert!(platform.apply_window_insets(&host, &raw(false)));
        assert!(!platform.apply_window_insets(&host, &raw(false)));
        assert!(platform.apply_window_insets(&host, &raw(true)));
    }
}
