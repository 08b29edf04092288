use serde::{Deserialize, Serialize};

use lobby_core::WalkableArea;

/// Scale range and z-order base for the depth illusion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthRange {
    /// Scale at the back of the floor (`max_y`).
    pub min_scale: f64,
    /// Scale at the front of the floor (`min_y`).
    pub max_scale: f64,
    /// z-order is `z_base - y`, so the front of the floor stacks on top.
    pub z_base: f64,
}

impl Default for DepthRange {
    fn default() -> Self {
        Self {
            min_scale: 0.85,
            max_scale: 1.1,
            z_base: 100.0,
        }
    }
}

/// Derived visual depth for one position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Depth {
    /// Sprite scale factor.
    pub scale: f64,
    /// Stacking order; higher draws in front.
    pub z_index: i32,
}

impl DepthRange {
    /// Scale for a `y`: largest at the front, smallest at the back.
    pub fn scale_for_y(&self, area: &WalkableArea, y: f64) -> f64 {
        let t = area.depth_fraction(y);
        self.max_scale - t * (self.max_scale - self.min_scale)
    }

    /// z-order for a `y`: lower `y` stacks higher.
    pub fn z_index_for_y(&self, area: &WalkableArea, y: f64) -> i32 {
        (self.z_base - area.clamp_y(y)).round() as i32
    }

    /// Both depth values at once.
    pub fn depth_for_y(&self, area: &WalkableArea, y: f64) -> Depth {
        Depth {
            scale: self.scale_for_y(area, y),
            z_index: self.z_index_for_y(area, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn scale_endpoints() {
        let range = DepthRange::default();
        let area = WalkableArea::LOBBY;
        assert!((range.scale_for_y(&area, 20.0) - 1.1).abs() < 1e-9);
        assert!((range.scale_for_y(&area, 64.0) - 0.85).abs() < 1e-9);
        // Outside the band clamps to the endpoints.
        assert!((range.scale_for_y(&area, -50.0) - 1.1).abs() < 1e-9);
        assert!((range.scale_for_y(&area, 500.0) - 0.85).abs() < 1e-9);
    }

    #[test]
    fn z_index_endpoints() {
        let range = DepthRange::default();
        let area = WalkableArea::LOBBY;
        assert_eq!(range.z_index_for_y(&area, 20.0), 80);
        assert_eq!(range.z_index_for_y(&area, 64.0), 36);
        assert_eq!(range.z_index_for_y(&area, 0.0), 80);
        assert_eq!(range.z_index_for_y(&area, 40.4), 60);
    }

    proptest! {
        #[test]
        fn depth_is_monotonic_in_y(a in -100.0f64..200.0, b in -100.0f64..200.0) {
            let range = DepthRange::default();
            let area = WalkableArea::LOBBY;
            let (y1, y2) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(range.scale_for_y(&area, y1) >= range.scale_for_y(&area, y2));
            prop_assert!(range.z_index_for_y(&area, y1) >= range.z_index_for_y(&area, y2));
        }
    }
}
