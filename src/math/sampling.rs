//! Shared point-sampling helpers for helical sweeps.
//!
//! A helix with pitch `p` (axial advance per full turn) is parametrized by
//! the sweep angle `theta`:
//!
//! `H(theta) = (r * cos theta, r * sin theta, p * theta / 2pi)`

use std::f64::consts::TAU;

use super::{Point3, Vector3};

/// An orthonormal frame at a point on a helix centerline.
///
/// `tangent` points forward along the helix; `radial` points away from the
/// helix axis; `binormal = tangent x radial`. Cross-sections placed in the
/// `(radial, binormal)` plane stay perpendicular to the sweep direction.
#[derive(Debug, Clone, Copy)]
pub struct HelixFrame {
    /// Point on the helix centerline.
    pub center: Point3,
    /// Unit tangent along the helix.
    pub tangent: Vector3,
    /// Unit vector pointing radially away from the helix axis.
    pub radial: Vector3,
    /// Unit vector completing the right-handed frame.
    pub binormal: Vector3,
}

/// Evaluates a z-axis helix at sweep angle `theta`.
#[must_use]
pub fn helix_point(radius: f64, pitch: f64, theta: f64) -> Point3 {
    Point3::new(
        radius * theta.cos(),
        radius * theta.sin(),
        pitch * theta / TAU,
    )
}

/// Point at `(r cos theta, r sin theta, z)`.
#[must_use]
pub fn polar_point(radius: f64, theta: f64, z: f64) -> Point3 {
    Point3::new(radius * theta.cos(), radius * theta.sin(), z)
}

/// Computes the analytic orthonormal frame of a z-axis helix at `theta`.
///
/// The frame is exact (no parallel transport needed): the radial direction
/// `(cos theta, sin theta, 0)` is always perpendicular to the helix tangent,
/// so the pair spans a valid cross-section plane at every sample.
#[must_use]
pub fn helix_frame(radius: f64, pitch: f64, theta: f64) -> HelixFrame {
    let center = helix_point(radius, pitch, theta);
    let radial = Vector3::new(theta.cos(), theta.sin(), 0.0);
    let tangent = Vector3::new(
        -radius * theta.sin(),
        radius * theta.cos(),
        pitch / TAU,
    );
    let tangent = tangent / tangent.norm();
    let binormal = tangent.cross(&radial);
    HelixFrame {
        center,
        tangent,
        radial,
        binormal,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn helix_point_at_zero() {
        let p = helix_point(2.0, 1.0, 0.0);
        assert!((p - Point3::new(2.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn helix_advances_pitch_per_turn() {
        let p = helix_point(2.0, 3.0, TAU);
        assert_relative_eq!(p.z, 3.0, epsilon = 1e-12);
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-12);
        assert!(p.y.abs() < 1e-9);
    }

    #[test]
    fn helix_quarter_turn() {
        let p = helix_point(1.0, 4.0, FRAC_PI_2);
        assert!((p - Point3::new(0.0, 1.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn frame_is_orthonormal() {
        for i in 0..8 {
            let theta = f64::from(i) * PI / 4.0;
            let f = helix_frame(10.0, 4.0, theta);
            assert_relative_eq!(f.tangent.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(f.radial.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(f.binormal.norm(), 1.0, epsilon = 1e-12);
            assert!(f.tangent.dot(&f.radial).abs() < 1e-12);
            assert!(f.tangent.dot(&f.binormal).abs() < 1e-12);
            assert!(f.radial.dot(&f.binormal).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_pitch_frame_degenerates_to_circle() {
        let f = helix_frame(5.0, 0.0, 0.0);
        // Flat helix: tangent is the circle tangent, binormal is anti-axial
        assert!((f.tangent - Vector3::y()).norm() < 1e-12);
        assert!((f.binormal + Vector3::z()).norm() < 1e-12);
    }
}
