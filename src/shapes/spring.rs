use std::f64::consts::TAU;

use crate::error::{Result, ValidationError};
use crate::generator::{require, require_count, ShapeParams};
use crate::math::sampling::helix_frame;
use crate::mesh::MeshData;

use super::ParametricShape;

/// A helical compression/extension spring swept as an open-ended tube.
///
/// Circular cross-sections of `wire_radius` are placed in the analytic
/// helix frame at every centerline sample and joined by quad strips. Both
/// tube ends stay open: the spring's value as a design primitive is its
/// coil geometry, not closed-solid correctness.
#[derive(Debug, Clone)]
pub struct SpringShape {
    coils: f64,
    mean_radius: f64,
    wire_radius: f64,
    pitch: f64,
    resolution: usize,
    cross_section_segments: usize,
}

impl SpringShape {
    /// Creates a spring generator.
    ///
    /// * `coils` - number of turns (fractional allowed)
    /// * `mean_radius` - helix centerline radius
    /// * `wire_radius` - tube radius around the centerline
    /// * `pitch` - axial advance per full turn
    /// * `resolution` - cross-sections per coil
    /// * `cross_section_segments` - points per circular cross-section
    #[must_use]
    pub fn new(
        coils: f64,
        mean_radius: f64,
        wire_radius: f64,
        pitch: f64,
        resolution: usize,
        cross_section_segments: usize,
    ) -> Self {
        Self {
            coils,
            mean_radius,
            wire_radius,
            pitch,
            resolution,
            cross_section_segments,
        }
    }

    /// Parses a spring from a parameter mapping and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] on missing, non-integral, or
    /// out-of-domain parameters.
    pub fn from_params(params: &ShapeParams) -> Result<Self> {
        let shape = Self::new(
            require(params, "coils")?,
            require(params, "mean_radius")?,
            require(params, "wire_radius")?,
            require(params, "pitch")?,
            require_count(params, "resolution")?,
            require_count(params, "cross_section_segments")?,
        );
        shape.validate_parameters()?;
        Ok(shape)
    }

    /// Number of helix steps; the tube carries one more cross-section ring.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn step_count(&self) -> usize {
        (self.coils * self.resolution as f64).ceil() as usize
    }
}

impl ParametricShape for SpringShape {
    fn validate_parameters(&self) -> Result<()> {
        if self.coils <= 0.0 {
            return Err(ValidationError::Constraint {
                parameter: "coils",
                constraint: "must be positive".into(),
            }
            .into());
        }
        if self.mean_radius <= 0.0 {
            return Err(ValidationError::Constraint {
                parameter: "mean_radius",
                constraint: "must be positive".into(),
            }
            .into());
        }
        if self.wire_radius <= 0.0 {
            return Err(ValidationError::Constraint {
                parameter: "wire_radius",
                constraint: "must be positive".into(),
            }
            .into());
        }
        if self.wire_radius >= self.mean_radius {
            return Err(ValidationError::Constraint {
                parameter: "wire_radius",
                constraint: format!(
                    "must be less than mean_radius {} or the coil self-intersects",
                    self.mean_radius
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
        if self.resolution < 3 {
            return Err(ValidationError::Constraint {
                parameter: "resolution",
                constraint: "must be at least 3".into(),
            }
            .into());
        }
        if self.cross_section_segments < 3 {
            return Err(ValidationError::Constraint {
                parameter: "cross_section_segments",
                constraint: "must be at least 3".into(),
            }
            .into());
        }
        Ok(())
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn generate_mesh_data(&self) -> Result<MeshData> {
        self.validate_parameters()?;

        let steps = self.step_count();
        let segments = self.cross_section_segments;
        let mut mesh = MeshData::with_capacity((steps + 1) * segments, 2 * steps * segments);

        // One cross-section ring per centerline sample
        for i in 0..=steps {
            let theta = TAU * i as f64 / self.resolution as f64;
            let frame = helix_frame(self.mean_radius, self.pitch, theta);
            for j in 0..segments {
                let phi = TAU * j as f64 / segments as f64;
                let offset = frame.radial * (self.wire_radius * phi.cos())
                    + frame.binormal * (self.wire_radius * phi.sin());
                mesh.add_vertex(frame.center + offset);
            }
        }

        // Quad strip between consecutive rings, wound outward
        let segments = segments as u32;
        for i in 0..steps as u32 {
            let ring = i * segments;
            let next = (i + 1) * segments;
            for j in 0..segments {
                let j1 = (j + 1) % segments;
                mesh.push_quad(ring + j, ring + j1, next + j1, next + j);
            }
        }

        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn reference_spring() -> SpringShape {
        SpringShape::new(3.0, 10.0, 1.0, 4.0, 16, 8)
    }

    /// Mean z of one cross-section ring equals the centerline z (the
    /// cross-section offsets cancel over a full circle).
    fn ring_mean_z(mesh: &MeshData, ring: usize, segments: usize) -> f64 {
        let start = ring * segments;
        #[allow(clippy::cast_precision_loss)]
        let n = segments as f64;
        mesh.vertices[start..start + segments]
            .iter()
            .map(|v| v.z)
            .sum::<f64>()
            / n
    }

    #[test]
    fn tube_layout() {
        let mesh = reference_spring().generate_mesh_data().unwrap();
        // ceil(3 * 16) = 48 steps, 49 rings of 8 points
        assert_eq!(mesh.vertices.len(), 49 * 8);
        assert_eq!(mesh.faces.len(), 2 * 48 * 8);
        assert!(mesh.indices_valid());
    }

    #[test]
    fn axial_extent_is_coils_times_pitch() {
        let mesh = reference_spring().generate_mesh_data().unwrap();
        let extent = ring_mean_z(&mesh, 48, 8) - ring_mean_z(&mesh, 0, 8);
        assert!((extent - 12.0).abs() < 1e-9);
    }

    #[test]
    fn consecutive_rings_share_no_vertices() {
        let mesh = reference_spring().generate_mesh_data().unwrap();
        for ring in 0..48 {
            let a = &mesh.vertices[ring * 8..(ring + 1) * 8];
            let b = &mesh.vertices[(ring + 1) * 8..(ring + 2) * 8];
            for p in a {
                for q in b {
                    assert!((p - q).norm() > 1e-9, "tube degenerated into a fan");
                }
            }
        }
    }

    #[test]
    fn tube_is_continuous_and_open() {
        let mesh = reference_spring().generate_mesh_data().unwrap();
        // Every face bridges two adjacent rings: no caps, no fan collapse
        for face in &mesh.faces {
            let rings: Vec<u32> = face.iter().map(|&i| i / 8).collect();
            let lo = *rings.iter().min().unwrap();
            let hi = *rings.iter().max().unwrap();
            assert_eq!(hi, lo + 1, "face {face:?} does not bridge adjacent rings");
        }
    }

    #[test]
    fn cross_sections_have_wire_radius() {
        let spring = reference_spring();
        let mesh = spring.generate_mesh_data().unwrap();
        let frame = helix_frame(10.0, 4.0, 0.0);
        for v in &mesh.vertices[0..8] {
            assert!(((v - frame.center).norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn fractional_coils_round_up() {
        let spring = SpringShape::new(2.5, 10.0, 1.0, 4.0, 16, 8);
        assert_eq!(spring.step_count(), 40);
        let spring = SpringShape::new(2.51, 10.0, 1.0, 4.0, 16, 8);
        assert_eq!(spring.step_count(), 41);
    }

    #[test]
    fn generation_is_deterministic() {
        let a = reference_spring().generate_mesh_data().unwrap();
        let b = reference_spring().generate_mesh_data().unwrap();
        assert_eq!(a.vertices, b.vertices);
        assert_eq!(a.faces, b.faces);
    }

    #[test]
    fn wire_radius_must_stay_inside_mean_radius() {
        let spring = SpringShape::new(3.0, 5.0, 10.0, 4.0, 16, 8);
        assert!(spring.validate_parameters().is_err());
        assert!(spring.generate_mesh_data().is_err());
        // Equality self-intersects at the axis as well
        assert!(SpringShape::new(3.0, 5.0, 5.0, 4.0, 16, 8)
            .validate_parameters()
            .is_err());
    }

    #[test]
    fn non_positive_coils_fails() {
        assert!(SpringShape::new(0.0, 10.0, 1.0, 4.0, 16, 8)
            .validate_parameters()
            .is_err());
        assert!(SpringShape::new(-2.0, 10.0, 1.0, 4.0, 16, 8)
            .validate_parameters()
            .is_err());
    }

    #[test]
    fn degenerate_sampling_fails() {
        assert!(SpringShape::new(3.0, 10.0, 1.0, 4.0, 2, 8)
            .validate_parameters()
            .is_err());
        assert!(SpringShape::new(3.0, 10.0, 1.0, 4.0, 16, 2)
            .validate_parameters()
            .is_err());
    }
}
