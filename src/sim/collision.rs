//! Collision and bounds checks
//!
//! Everything here is a plain circle: no square roots, no reflection vectors.

use glam::Vec2;

/// Circle/circle overlap using squared distances. Touching counts as a hit.
#[inline]
pub fn circles_intersect(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) <= reach * reach
}

/// Whether a circle centre at `x` keeps the whole circle inside `[0, width]`
#[inline]
pub fn within_horizontal_bounds(x: f32, radius: f32, width: f32) -> bool {
    x >= radius && x <= width - radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlap_and_miss() {
        assert!(circles_intersect(Vec2::ZERO, 5.0, Vec2::new(8.0, 0.0), 5.0));
        assert!(!circles_intersect(Vec2::ZERO, 5.0, Vec2::new(20.0, 0.0), 5.0));
    }

    #[test]
    fn test_touching_counts() {
        // 3-4-5 triangle: distance exactly 5 = 2 + 3
        assert!(circles_intersect(Vec2::ZERO, 2.0, Vec2::new(3.0, 4.0), 3.0));
    }

    #[test]
    fn test_horizontal_bounds() {
        assert!(within_horizontal_bounds(12.0, 12.0, 600.0));
        assert!(within_horizontal_bounds(588.0, 12.0, 600.0));
        assert!(!within_horizontal_bounds(11.9, 12.0, 600.0));
        assert!(!within_horizontal_bounds(588.1, 12.0, 600.0));
    }

    proptest! {
        #[test]
        fn prop_matches_squared_reach(
            ax in -100i32..100, ay in -100i32..100,
            bx in -100i32..100, by in -100i32..100,
            ra in 1i32..30, rb in 1i32..30,
        ) {
            // Integer inputs keep the squared comparison exact in f32
            let a = Vec2::new(ax as f32, ay as f32);
            let b = Vec2::new(bx as f32, by as f32);
            let d2 = (ax - bx).pow(2) + (ay - by).pow(2);
            let expected = d2 <= (ra + rb).pow(2);
            prop_assert_eq!(circles_intersect(a, ra as f32, b, rb as f32), expected);
            prop_assert_eq!(circles_intersect(b, rb as f32, a, ra as f32), expected);
        }
    }
}
