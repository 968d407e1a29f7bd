use std::f64::consts::{PI, TAU};

use crate::error::{Result, ValidationError};
use crate::generator::{require, require_count, ShapeParams};
use crate::math::involute::{involute_param_at_radius, involute_polar_angle, involute_radius};
use crate::math::{Point2, Point3};
use crate::mesh::MeshData;

use super::ParametricShape;

/// An involute spur gear, extruded along the z axis.
///
/// The silhouette is one closed counter-clockwise loop: per tooth a leading
/// involute flank from the root to the addendum circle, a short tip arc, the
/// mirrored trailing flank, and a root fillet dipping to the dedendum
/// circle. The loop is extruded to `thickness` and capped with center fans
/// (the silhouette is star-shaped about the axis, so a center fan is valid).
#[derive(Debug, Clone)]
pub struct GearShape {
    module: f64,
    teeth: u32,
    pressure_angle: f64,
    thickness: f64,
    resolution: usize,
}

/// Standard gear radii derived from module, tooth count, and pressure angle.
struct GearRadii {
    pitch: f64,
    base: f64,
    addendum: f64,
    dedendum: f64,
}

impl GearShape {
    /// Creates a gear generator.
    ///
    /// * `module` - mm per tooth unit
    /// * `teeth` - number of teeth
    /// * `pressure_angle` - in degrees
    /// * `thickness` - extrusion depth along z
    /// * `resolution` - points sampled per involute flank
    #[must_use]
    pub fn new(
        module: f64,
        teeth: u32,
        pressure_angle: f64,
        thickness: f64,
        resolution: usize,
    ) -> Self {
        Self {
            module,
            teeth,
            pressure_angle,
            thickness,
            resolution,
        }
    }

    /// Parses a gear from a parameter mapping and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] on missing, non-integral, or
    /// out-of-domain parameters.
    pub fn from_params(params: &ShapeParams) -> Result<Self> {
        let teeth = u32::try_from(require_count(params, "teeth")?).map_err(|_| {
            ValidationError::Constraint {
                parameter: "teeth",
                constraint: "exceeds the supported range".into(),
            }
        })?;
        let shape = Self::new(
            require(params, "module")?,
            teeth,
            require(params, "pressure_angle")?,
            require(params, "thickness")?,
            require_count(params, "resolution")?,
        );
        shape.validate_parameters()?;
        Ok(shape)
    }

    fn radii(&self) -> GearRadii {
        let pitch = self.module * f64::from(self.teeth) / 2.0;
        GearRadii {
            pitch,
            base: pitch * self.pressure_angle.to_radians().cos(),
            addendum: pitch + self.module,
            dedendum: 1.25f64.mul_add(-self.module, pitch),
        }
    }

    /// Samples the closed 2D silhouette of the gear, counter-clockwise.
    ///
    /// Every tooth contributes the same number of points, so the loop is
    /// rotationally symmetric by `2*pi / teeth`.
    #[allow(clippy::cast_precision_loss)]
    fn silhouette(&self) -> Vec<Point2> {
        let r = self.radii();
        let tooth_pitch = TAU / f64::from(self.teeth);
        // Half the tooth thickness, as an angle at the pitch circle
        let half_tooth = PI / (2.0 * f64::from(self.teeth));

        // The flank spans the involute from the dedendum (or the base circle,
        // whichever is larger) out to the addendum circle.
        let t_min = involute_param_at_radius(r.base, r.dedendum);
        let t_max = involute_param_at_radius(r.base, r.addendum);
        let t_pitch = involute_param_at_radius(r.base, r.pitch);
        let psi_pitch = involute_polar_angle(t_pitch);

        // Angular offset placing the leading flank's pitch-circle crossing
        // at -half_tooth from the tooth centerline.
        let lead_offset = -half_tooth - psi_pitch;

        let res = self.resolution;
        let tip_steps = (res / 2).max(2);
        let flank_root_radius = involute_radius(r.base, t_min);

        let mut points = Vec::with_capacity(self.teeth as usize * (3 * res + tip_steps));

        for tooth in 0..self.teeth {
            let center = f64::from(tooth) * tooth_pitch;

            // Leading flank, root to tip
            for k in 0..res {
                let t = t_min + (t_max - t_min) * k as f64 / (res - 1) as f64;
                let theta = center + lead_offset + involute_polar_angle(t);
                points.push(polar(involute_radius(r.base, t), theta));
            }

            // Tip arc on the addendum circle (interior points only)
            let tip_lead = center + lead_offset + involute_polar_angle(t_max);
            let tip_trail = center - lead_offset - involute_polar_angle(t_max);
            for k in 1..=tip_steps {
                let s = k as f64 / (tip_steps + 1) as f64;
                points.push(polar(r.addendum, tip_lead + (tip_trail - tip_lead) * s));
            }

            // Trailing flank, tip to root (mirror of the leading flank)
            for k in (0..res).rev() {
                let t = t_min + (t_max - t_min) * k as f64 / (res - 1) as f64;
                let theta = center - lead_offset - involute_polar_angle(t);
                points.push(polar(involute_radius(r.base, t), theta));
            }

            // Root span to the next tooth, dipping to the dedendum circle
            // with cosine-eased fillets at both flanks (interior points only)
            let root_start = center - lead_offset - involute_polar_angle(t_min);
            let root_end = center + tooth_pitch + lead_offset + involute_polar_angle(t_min);
            for k in 1..=res {
                let s = k as f64 / (res + 1) as f64;
                let radius = r.dedendum + (flank_root_radius - r.dedendum) * root_blend(s);
                points.push(polar(radius, root_start + (root_end - root_start) * s));
            }
        }

        points
    }
}

fn polar(radius: f64, theta: f64) -> Point2 {
    Point2::new(radius * theta.cos(), radius * theta.sin())
}

/// Radial blend across the root span: 1 at the flanks, 0 on the dedendum
/// circle, with a cosine ease over the first and last quarter of the span.
fn root_blend(s: f64) -> f64 {
    const EASE: f64 = 0.25;
    if s < EASE {
        0.5 * (1.0 + (PI * s / EASE).cos())
    } else if s > 1.0 - EASE {
        0.5 * (1.0 + (PI * (1.0 - s) / EASE).cos())
    } else {
        0.0
    }
}

impl ParametricShape for GearShape {
    fn validate_parameters(&self) -> Result<()> {
        if self.module <= 0.0 {
            return Err(ValidationError::Constraint {
                parameter: "module",
                constraint: "must be positive".into(),
            }
            .into());
        }
        if self.teeth < 3 {
            return Err(ValidationError::Constraint {
                parameter: "teeth",
                constraint: "must be at least 3".into(),
            }
            .into());
        }
        if self.pressure_angle <= 0.0 || self.pressure_angle >= 45.0 {
            return Err(ValidationError::OutOfRange {
                parameter: "pressure_angle",
                value: self.pressure_angle,
                min: 0.0,
                max: 45.0,
            }
            .into());
        }
        if self.thickness <= 0.0 {
            return Err(ValidationError::Constraint {
                parameter: "thickness",
                constraint: "must be positive".into(),
            }
            .into());
        }
        if self.resolution < 2 {
            return Err(ValidationError::Constraint {
                parameter: "resolution",
                constraint: "must be at least 2".into(),
            }
            .into());
        }
        let r = self.radii();
        if r.dedendum <= 0.0 {
            return Err(ValidationError::Constraint {
                parameter: "teeth",
                constraint: format!(
                    "dedendum radius {} is not positive; too few teeth for module {}",
                    r.dedendum, self.module
                ),
            }
            .into());
        }
        // The flanks must still be apart when they reach the addendum circle,
        // or the tip arc inverts and the silhouette self-intersects
        let t_max = involute_param_at_radius(r.base, r.addendum);
        let t_pitch = involute_param_at_radius(r.base, r.pitch);
        let flank_spread = involute_polar_angle(t_max) - involute_polar_angle(t_pitch);
        if flank_spread >= PI / (2.0 * f64::from(self.teeth)) {
            return Err(ValidationError::Constraint {
                parameter: "pressure_angle",
                constraint: format!(
                    "flanks cross below the addendum circle at {} teeth; the tooth has no tip",
                    self.teeth
                ),
            }
            .into());
        }
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn generate_mesh_data(&self) -> Result<MeshData> {
        self.validate_parameters()?;

        let silhouette = self.silhouette();
        let n = silhouette.len() as u32;
        let mut mesh = MeshData::with_capacity(2 * silhouette.len() + 2, 4 * silhouette.len());

        // Silhouette loop at z = 0, then at z = thickness
        for p in &silhouette {
            mesh.add_vertex(Point3::new(p.x, p.y, 0.0));
        }
        for p in &silhouette {
            mesh.add_vertex(Point3::new(p.x, p.y, self.thickness));
        }

        // Side walls, wound so normals point away from the axis
        for i in 0..n {
            let j = (i + 1) % n;
            mesh.push_quad(i, j, n + j, n + i);
        }

        // Caps: the loop is star-shaped about the axis, so a center fan covers it
        let bottom_center = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
        let top_center = mesh.add_vertex(Point3::new(0.0, 0.0, self.thickness));
        mesh.push_fan(bottom_center, 0, n, true);
        mesh.push_fan(top_center, n, n, false);

        Ok(mesh)
    }
}
