// core/math.rs
//
// Scalar and Vec2 helpers shared by the orbit, transit and zoom code.
// No dependencies on Planet/Ship/Scene.

use glam::Vec2;

/// Clamp `value` into `[min, max]`. Unlike `f32::clamp` this never panics
/// when the range is inverted; `max` wins.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Map `value` from the range `from` onto the range `to`.
/// Degenerate source ranges yield `to.1` so callers never see NaN.
#[inline]
pub fn map_range(value: f32, from: (f32, f32), to: (f32, f32)) -> f32 {
    let span = from.1 - from.0;
    if span == 0.0 {
        return to.1;
    }
    to.0 + (value - from.0) * (to.1 - to.0) / span
}

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec2 values.
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Heading in radians from `from` towards `to` (0 = +X, counter-clockwise).
#[inline]
pub fn heading_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(5.0, 0.0, 2.0), 2.0);
        assert_eq!(clamp(-1.0, 0.0, 2.0), 0.0);
        assert_eq!(clamp(1.5, 0.0, 2.0), 1.5);
    }

    #[test]
    fn clamp_inverted_range_prefers_max() {
        assert_eq!(clamp(3.0, 4.0, 1.0), 1.0);
    }

    #[test]
    fn map_range_scales_linearly() {
        assert!((map_range(25.0, (0.0, 100.0), (0.0, 1.0)) - 0.25).abs() < 1e-6);
        assert!((map_range(0.5, (0.0, 1.0), (10.0, 20.0)) - 15.0).abs() < 1e-6);
        // reversed target range
        assert!((map_range(0.0, (0.0, 1.0), (40.0, 0.0)) - 40.0).abs() < 1e-6);
    }

    #[test]
    fn map_range_degenerate_source() {
        assert_eq!(map_range(3.0, (2.0, 2.0), (0.0, 1.0)), 1.0);
    }

    #[test]
    fn lerp_vec2_midpoint() {
        let mid = lerp_vec2(Vec2::ZERO, Vec2::new(10.0, -4.0), 0.5);
        assert_eq!(mid, Vec2::new(5.0, -2.0));
        assert!((lerp(100.0, 200.0, 0.25) - 125.0).abs() < 1e-4);
    }

    #[test]
    fn heading_points_at_target() {
        let h = heading_between(Vec2::ZERO, Vec2::new(0.0, 5.0));
        assert!((h - FRAC_PI_2).abs() < 1e-6);
    }
}
