use std::f64::consts::TAU;

use crate::error::{Result, ValidationError};
use crate::generator::{require, require_count, ShapeParams};
use crate::math::sampling::polar_point;
use crate::math::{Point3, TOLERANCE};
use crate::mesh::MeshData;

use super::ParametricShape;

/// A cylinder carrying a helical V-thread, closed with flat end caps.
///
/// Each helical station holds one crest/root profile: a root point half a
/// flank width behind the crest, the crest itself, a root point half a
/// flank width ahead, and, when the root band between adjacent turns is
/// non-degenerate, a fourth root point completing the band up to the next
/// turn. Consecutive stations are joined into a continuous ribbon the same
/// way as the spring tube; both cylinder ends are capped with fans from the
/// minor-diameter center point.
#[derive(Debug, Clone)]
pub struct ThreadShape {
    major_diameter: f64,
    minor_diameter: f64,
    pitch: f64,
    length: f64,
    thread_angle: f64,
    resolution: usize,
}

/// Thread profile constants derived from the diameters, pitch, and angle.
struct ThreadProfile {
    crest_radius: f64,
    root_radius: f64,
    /// Axial half-width of the V at the root, clamped to half the pitch.
    half_width: f64,
    /// Helix-angle equivalent of `half_width`.
    angle_offset: f64,
    /// Whether a flat root band separates adjacent turns.
    root_band: bool,
}

impl ThreadShape {
    /// Creates a thread generator.
    ///
    /// * `major_diameter` - crest-to-crest diameter
    /// * `minor_diameter` - root-to-root diameter
    /// * `pitch` - axial advance per turn
    /// * `length` - total cylinder length along z
    /// * `thread_angle` - included flank angle, in degrees
    /// * `resolution` - helical stations per turn
    #[must_use]
    pub fn new(
        major_diameter: f64,
        minor_diameter: f64,
        pitch: f64,
        length: f64,
        thread_angle: f64,
        resolution: usize,
    ) -> Self {
        Self {
            major_diameter,
            minor_diameter,
            pitch,
            length,
            thread_angle,
            resolution,
        }
    }

    /// Parses a thread from a parameter mapping and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] on missing, non-integral, or
    /// out-of-domain parameters.
    pub fn from_params(params: &ShapeParams) -> Result<Self> {
        let shape = Self::new(
            require(params, "major_diameter")?,
            require(params, "minor_diameter")?,
            require(params, "pitch")?,
            require(params, "length")?,
            require(params, "thread_angle")?,
            require_count(params, "resolution")?,
        );
        shape.validate_parameters()?;
        Ok(shape)
    }

    /// Number of helical crest/root stations along the full length.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn station_count(&self) -> usize {
        (self.length / self.pitch * self.resolution as f64).ceil() as usize
    }

    fn profile(&self) -> ThreadProfile {
        let crest_radius = self.major_diameter / 2.0;
        let root_radius = self.minor_diameter / 2.0;
        let depth = crest_radius - root_radius;
        // Flank half-width from the included angle; a V deeper than the
        // pitch allows degenerates into adjacent turns touching at the root
        let half_width = (depth * (self.thread_angle / 2.0).to_radians().tan())
            .min(self.pitch / 2.0);
        ThreadProfile {
            crest_radius,
            root_radius,
            half_width,
            angle_offset: TAU * half_width / self.pitch,
            root_band: self.pitch - 2.0 * half_width > TOLERANCE,
        }
    }
}

impl ParametricShape for ThreadShape {
    fn validate_parameters(&self) -> Result<()> {
        if self.minor_diameter <= 0.0 {
            return Err(ValidationError::Constraint {
                parameter: "minor_diameter",
                constraint: "must be positive".into(),
            }
            .into());
        }
        if self.major_diameter <= self.minor_diameter {
            return Err(ValidationError::Constraint {
                parameter: "major_diameter",
                constraint: format!(
                    "must exceed minor_diameter {}",
                    self.minor_diameter
                ),
            }
            .into());
        }
        if self.pitch <= 0.0 {
            return Err(ValidationError::Constraint {
                parameter: "pitch",
                constraint: "must be positive".into(),
            }
            .into());
        }
        if self.length < self.pitch {
            return Err(ValidationError::Constraint {
                parameter: "length",
                constraint: format!(
                    "must cover at least one turn (pitch {})",
                    self.pitch
                ),
            }
            .into());
        }
        if self.thread_angle <= 0.0 || self.thread_angle >= 90.0 {
            return Err(ValidationError::OutOfRange {
                parameter: "thread_angle",
                value: self.thread_angle,
                min: 0.0,
                max: 90.0,
            }
            .into());
        }
        if self.resolution < 8 {
            return Err(ValidationError::Constraint {
                parameter: "resolution",
                constraint: "must be at least 8".into(),
            }
            .into());
        }
        Ok(())
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn generate_mesh_data(&self) -> Result<MeshData> {
        self.validate_parameters()?;

        let stations = self.station_count();
        let profile = self.profile();
        let rows = if profile.root_band { 4 } else { 3 };
        let cap_ring = self.resolution;
        let mut mesh = MeshData::with_capacity(
            stations * rows + 2 * (cap_ring + 1),
            2 * (stations - 1) * (rows - 1) + 2 * cap_ring,
        );

        // Helical crest/root stations; profile heights clamped to the rod
        let clamp = |z: f64| z.clamp(0.0, self.length);
        for i in 0..stations {
            let theta = TAU * i as f64 / self.resolution as f64;
            let z = self.pitch * theta / TAU;
            mesh.add_vertex(polar_point(
                profile.root_radius,
                theta - profile.angle_offset,
                clamp(z - profile.half_width),
            ));
            mesh.add_vertex(polar_point(profile.crest_radius, theta, clamp(z)));
            mesh.add_vertex(polar_point(
                profile.root_radius,
                theta + profile.angle_offset,
                clamp(z + profile.half_width),
            ));
            if profile.root_band {
                // Root band up to the next turn's leading flank
                mesh.add_vertex(polar_point(
                    profile.root_radius,
                    theta - profile.angle_offset,
                    clamp(z + self.pitch - profile.half_width),
                ));
            }
        }

        // Ribbon between consecutive stations, wound outward
        let rows_u = rows as u32;
        for i in 0..(stations - 1) as u32 {
            let station = i * rows_u;
            let next = (i + 1) * rows_u;
            for k in 0..rows_u - 1 {
                mesh.push_quad(station + k, next + k, next + k + 1, station + k + 1);
            }
        }

        // Flat caps at z = 0 and z = length, fanned from the axis
        let bottom_center = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let bottom_ring = mesh.vertices.len() as u32;
        for j in 0..cap_ring {
            let theta = TAU * j as f64 / cap_ring as f64;
            mesh.add_vertex(polar_point(profile.root_radius, theta, 0.0));
        }
        mesh.push_fan(bottom_center, bottom_ring, cap_ring as u32, true);

        let top_center = mesh.add_vertex(Point3::new(0.0, 0.0, self.length));
        let top_ring = mesh.vertices.len() as u32;
        for j in 0..cap_ring {
            let theta = TAU * j as f64 / cap_ring as f64;
            mesh.add_vertex(polar_point(profile.root_radius, theta, self.length));
        }
        mesh.push_fan(top_center, top_ring, cap_ring as u32, false);

        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn reference_thread() -> ThreadShape {
        ThreadShape::new(10.0, 8.0, 1.5, 15.0, 30.0, 32)
    }

    #[test]
    fn station_count_matches_turns_times_resolution() {
        // ceil(15 / 1.5 * 32) = 320
        assert_eq!(reference_thread().station_count(), 320);
        // A fractional turn count rounds up
        let shape = ThreadShape::new(10.0, 8.0, 1.5, 15.1, 30.0, 32);
        assert_eq!(shape.station_count(), 323);
    }

    #[test]
    fn mesh_layout_with_root_band() {
        let shape = reference_thread();
        // depth 1, half-width tan(15 deg) ~ 0.268 < pitch/2: root band present
        let mesh = shape.generate_mesh_data().unwrap();
        assert_eq!(mesh.vertices.len(), 320 * 4 + 2 * 33);
        assert_eq!(mesh.faces.len(), 2 * 319 * 3 + 2 * 32);
        assert!(mesh.indices_valid());
    }

    #[test]
    fn both_end_caps_present() {
        let mesh = reference_thread().generate_mesh_data().unwrap();
        let first_cap_face = mesh.faces.len() - 64;
        for i in 0..64 {
            let n = mesh.face_normal(first_cap_face + i).unwrap();
            if i < 32 {
                assert!(n.z < -0.99, "bottom cap face {i}");
            } else {
                assert!(n.z > 0.99, "top cap face {i}");
            }
        }
    }

    #[test]
    fn geometry_spans_zero_to_length() {
        let mesh = reference_thread().generate_mesh_data().unwrap();
        let (min, max) = mesh.bounds().unwrap();
        assert!(min.z.abs() < 1e-12);
        assert!((max.z - 15.0).abs() < 1e-12);
        // Radially bounded by the crest
        assert!(max.x <= 5.0 + 1e-9);
        assert!(min.x >= -5.0 - 1e-9);
    }

    #[test]
    fn crest_points_sit_on_major_radius() {
        let mesh = reference_thread().generate_mesh_data().unwrap();
        for i in 0..320 {
            let crest = mesh.vertices[i * 4 + 1];
            let r = crest.x.hypot(crest.y);
            assert!((r - 5.0).abs() < 1e-9, "station {i}");
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = reference_thread().generate_mesh_data().unwrap();
        let b = reference_thread().generate_mesh_data().unwrap();
        assert_eq!(a.vertices, b.vertices);
        assert_eq!(a.faces, b.faces);
    }

    #[test]
    fn deep_thread_drops_root_band() {
        // Depth 2 at 60 degrees: half-width tan(30)*2 ~ 1.15, clamped to
        // pitch/2 = 0.5, no band left
        let shape = ThreadShape::new(10.0, 6.0, 1.0, 5.0, 60.0, 8);
        let mesh = shape.generate_mesh_data().unwrap();
        let stations = shape.station_count();
        assert_eq!(mesh.vertices.len(), stations * 3 + 2 * 9);
        assert!(mesh.indices_valid());
    }

    #[test]
    fn minor_at_least_major_fails() {
        let shape = ThreadShape::new(8.0, 10.0, 1.5, 15.0, 30.0, 32);
        assert!(shape.validate_parameters().is_err());
        assert!(shape.generate_mesh_data().is_err());
        assert!(ThreadShape::new(8.0, 8.0, 1.5, 15.0, 30.0, 32)
            .validate_parameters()
            .is_err());
    }

    #[test]
    fn length_below_pitch_fails() {
        assert!(ThreadShape::new(10.0, 8.0, 1.5, 1.0, 30.0, 32)
            .validate_parameters()
            .is_err());
    }

    #[test]
    fn thread_angle_domain_is_open() {
        assert!(ThreadShape::new(10.0, 8.0, 1.5, 15.0, 0.0, 32)
            .validate_parameters()
            .is_err());
        assert!(ThreadShape::new(10.0, 8.0, 1.5, 15.0, 90.0, 32)
            .validate_parameters()
            .is_err());
    }

    #[test]
    fn resolution_below_eight_fails() {
        assert!(ThreadShape::new(10.0, 8.0, 1.5, 15.0, 30.0, 7)
            .validate_parameters()
            .is_err());
    }
}
