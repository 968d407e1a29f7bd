//! Involute-curve sampling primitives for gear tooth flanks.
//!
//! The involute of a base circle of radius `r_b` is parametrized by the
//! unwinding angle `t`:
//!
//! `P(t) = r_b * (cos t + t * sin t, sin t - t * cos t)`
//!
//! In polar form the same point sits at radius `r_b * sqrt(1 + t^2)` and
//! polar angle `t - atan(t)` measured from the involute's origin ray.

use super::Point2;

/// Evaluates the involute of a base circle at unwinding parameter `t`.
#[must_use]
pub fn involute_point(base_radius: f64, t: f64) -> Point2 {
    Point2::new(
        base_radius * (t.cos() + t * t.sin()),
        base_radius * (t.sin() - t * t.cos()),
    )
}

/// Radial distance from the base-circle center at parameter `t`.
#[must_use]
pub fn involute_radius(base_radius: f64, t: f64) -> f64 {
    base_radius * t.mul_add(t, 1.0).sqrt()
}

/// Polar angle swept from the involute origin ray at parameter `t`.
///
/// This is the involute function `inv(a) = tan(a) - a` expressed in the
/// unwinding parameter `t = tan(a)`.
#[must_use]
pub fn involute_polar_angle(t: f64) -> f64 {
    t - t.atan()
}

/// Unwinding parameter at which the involute reaches the given radius.
///
/// Returns 0 when `radius <= base_radius` (the involute starts on the
/// base circle and only moves outward).
#[must_use]
pub fn involute_param_at_radius(base_radius: f64, radius: f64) -> f64 {
    if radius <= base_radius {
        return 0.0;
    }
    let ratio = radius / base_radius;
    ratio.mul_add(ratio, -1.0).sqrt()
}
