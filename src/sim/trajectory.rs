//! Vertical bounce trajectory
//!
//! The player's height is a fixed parabola of a parameter `t` that walks back
//! and forth: `t` advances by a fixed step each frame and the walk reverses
//! whenever the ball drops below the floor line.

use crate::consts::{TRAJECTORY_A, TRAJECTORY_C_RATIO, TRAJECTORY_STEP};

/// Pure quadratic `a*t^2 + b*t + c`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl Quadratic {
    pub const fn new(a: f32, b: f32, c: f32) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn eval(&self, t: f32) -> f32 {
        self.a * (t * t) + self.b * t + self.c
    }
}

/// The bounce arc for a world of the given height
pub fn bounce_curve(world_height: f32) -> Quadratic {
    Quadratic::new(TRAJECTORY_A, 0.0, world_height * TRAJECTORY_C_RATIO)
}

/// Caller-owned walk along the curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    pub curve: Quadratic,
    /// Current curve parameter
    pub t: f32,
    /// +1 or -1
    pub direction: f32,
    pub step: f32,
}

impl Bounce {
    pub fn new(curve: Quadratic) -> Self {
        Self {
            curve,
            t: 0.0,
            direction: 1.0,
            step: TRAJECTORY_STEP,
        }
    }

    /// Back to the vertex, heading in the positive direction
    pub fn reset(&mut self) {
        self.t = 0.0;
        self.direction = 1.0;
    }

    pub fn flip(&mut self) {
        self.direction = -self.direction;
    }

    /// Advance one step and return the new height
    pub fn advance(&mut self) -> f32 {
        self.t += self.step * self.direction;
        self.curve.eval(self.t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_eval_matches_formula() {
        let q = Quadratic::new(0.5, -2.0, 3.0);
        assert_eq!(q.eval(0.0), 3.0);
        assert_eq!(q.eval(2.0), 0.5 * 4.0 - 4.0 + 3.0);
    }

    #[test]
    fn test_curve_vertex_is_apex() {
        let curve = bounce_curve(400.0);
        assert!((curve.eval(0.0) - 120.0).abs() < 1e-4);
        assert!(curve.eval(10.0) > curve.eval(0.0));
    }

    #[test]
    fn test_advance_and_flip() {
        let mut bounce = Bounce::new(bounce_curve(400.0));
        let y = bounce.advance();
        assert_eq!(bounce.t, 2.0);
        assert!((y - 120.4).abs() < 1e-4);

        bounce.flip();
        bounce.advance();
        bounce.advance();
        assert_eq!(bounce.t, -2.0);

        bounce.reset();
        assert_eq!(bounce.t, 0.0);
        assert_eq!(bounce.direction, 1.0);
    }

    proptest! {
        #[test]
        fn prop_no_linear_term(a in -10.0f32..10.0, c in -500.0f32..500.0, t in -200.0f32..200.0) {
            let q = Quadratic::new(a, 0.0, c);
            let expected = a * t * t + c;
            let scale = (a * t * t).abs() + c.abs() + 1.0;
            prop_assert!((q.eval(t) - expected).abs() <= 1e-4 * scale);
        }

        #[test]
        fn prop_symmetric(t in -500.0f32..500.0, h in 100.0f32..2000.0) {
            let curve = bounce_curve(h);
            prop_assert_eq!(curve.eval(t), curve.eval(-t));
        }
    }
}
