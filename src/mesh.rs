use crate::math::{Point3, Vector3, TOLERANCE};

/// A triangulated surface mesh, the sole output of every shape generator.
///
/// Faces wind counter-clockwise when viewed from outside the solid. Normals
/// are optional; when the vector is empty, consumers derive normals from the
/// face winding. A `MeshData` is built once by a generator and handed over
/// to the caller; nothing in this crate mutates it afterwards.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex positions, 0-based and index-addressable.
    pub vertices: Vec<Point3>,
    /// Triangle indices into `vertices`.
    pub faces: Vec<[u32; 3]>,
    /// Optional per-vertex unit normals (empty when not generated).
    pub normals: Vec<Vector3>,
}

impl MeshData {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with capacity for the given counts.
    #[must_use]
    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
            normals: Vec::new(),
        }
    }

    /// Appends a vertex and returns its index.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_vertex(&mut self, point: Point3) -> u32 {
        let idx = self.vertices.len() as u32;
        self.vertices.push(point);
        idx
    }

    /// Appends a triangle face.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.faces.push([a, b, c]);
    }

    /// Appends a quad as two triangles.
    ///
    /// `a, b, c, d` must be in counter-clockwise order when viewed from
    /// outside the solid; the quad splits along the `a`-`c` diagonal.
    pub fn push_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.faces.push([a, b, c]);
        self.faces.push([a, c, d]);
    }

    /// Appends a triangle fan from `center` over a contiguous vertex ring.
    ///
    /// The ring occupies indices `ring_start..ring_start + ring_len` and
    /// wraps around. With `flip = false` the fan winds `(center, j, j+1)`;
    /// with `flip = true` the order reverses, for caps whose outward normal
    /// opposes the ring's counter-clockwise axis.
    pub fn push_fan(&mut self, center: u32, ring_start: u32, ring_len: u32, flip: bool) {
        for j in 0..ring_len {
            let a = ring_start + j;
            let b = ring_start + (j + 1) % ring_len;
            if flip {
                self.faces.push([center, b, a]);
            } else {
                self.faces.push([center, a, b]);
            }
        }
    }

    /// Computes the unit normal of face `i` from its winding.
    ///
    /// Returns `None` if the index is out of bounds or the face is
    /// degenerate.
    #[must_use]
    pub fn face_normal(&self, i: usize) -> Option<Vector3> {
        let [a, b, c] = *self.faces.get(i)?;
        let pa = self.vertices.get(a as usize)?;
        let pb = self.vertices.get(b as usize)?;
        let pc = self.vertices.get(c as usize)?;
        let n = (pb - pa).cross(&(pc - pa));
        let len = n.norm();
        if len < TOLERANCE {
            return None;
        }
        Some(n / len)
    }

    /// Axis-aligned bounding box over all vertices.
    ///
    /// Returns `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let first = *self.vertices.first()?;
        let mut min = first;
        let mut max = first;
        for v in &self.vertices[1..] {
            min = Point3::new(min.x.min(v.x), min.y.min(v.y), min.z.min(v.z));
            max = Point3::new(max.x.max(v.x), max.y.max(v.y), max.z.max(v.z));
        }
        Some((min, max))
    }

    /// Checks the index invariants: every face index is in bounds and every
    /// face has three distinct indices.
    #[must_use]
    pub fn indices_valid(&self) -> bool {
        let n = self.vertices.len() as u64;
        self.faces.iter().all(|&[a, b, c]| {
            u64::from(a) < n
                && u64::from(b) < n
                && u64::from(c) < n
                && a != b
                && b != c
                && a != c
        })
    }
}
