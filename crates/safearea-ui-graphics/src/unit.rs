//! Unit types: Dp, Px, and conversions

/// Density-independent pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Dp(pub f32);

impl Dp {
    pub fn to_px(&self, density: f32) -> Px {
        Px(self.0 * density)
    }

    pub fn from_px(px: Px, density: f32) -> Self {
        if density <= 0.0 {
            return Self(px.0);
        }
        Self(px.0 / density)
    }
}

/// Raw physical pixels as reported by the platform.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Px(pub f32);

impl Px {
    pub fn to_dp(&self, density: f32) -> Dp {
        Dp::from_px(*self, density)
    }
}

impl From<i32> for Px {
    fn from(value: i32) -> Self {
        Px(value as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dp_px_conversion_uses_density() {
        assert_eq!(Dp(24.0).to_px(2.5), Px(60.0));
        assert_eq!(Px(60.0).to_dp(2.5), Dp(24.0));
    }

    #[test]
    fn non_positive_density_is_treated_as_identity() {
        assert_eq!(Dp::from_px(Px(48.0), 0.0), Dp(48.0));
        assert_eq!(Dp::from_px(Px(48.0), -1.0), Dp(48.0));
    }
}
