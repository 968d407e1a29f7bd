mod gear;
mod spring;
mod thread;

pub use gear::GearShape;
pub use spring::SpringShape;
pub use thread::ThreadShape;

use crate::error::Result;
use crate::mesh::MeshData;

/// Trait for parametric mechanical-primitive generators.
///
/// Every implementation is a stateless strategy: parameters in, mesh out.
/// Generation is deterministic (identical parameters yield identical vertex
/// and face sequences), performs no I/O, and never returns a partial mesh.
/// Generators are plain parameter records, so they are also debuggable.
pub trait ParametricShape: std::fmt::Debug {
    /// Checks every parameter against its documented domain.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ValidationError`] naming the offending
    /// parameter and the violated constraint.
    fn validate_parameters(&self) -> Result<()>;

    /// Generates the triangulated surface mesh for this shape.
    ///
    /// Validates parameters first, so malformed input fails before any
    /// vertex is allocated.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ValidationError`] if any parameter is out
    /// of domain.
    fn generate_mesh_data(&self) -> Result<MeshData>;
}

/// The closed set of supported shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Gear,
    Spring,
    Thread,
}

impl ShapeKind {
    /// All supported kinds, in dispatch order.
    pub const ALL: [Self; 3] = [Self::Gear, Self::Spring, Self::Thread];

    /// Parses a shape-type identifier (ASCII-case-insensitive).
    #[must_use]
    pub fn parse(shape_type: &str) -> Option<Self> {
        if shape_type.eq_ignore_ascii_case("gear") {
            Some(Self::Gear)
        } else if shape_type.eq_ignore_ascii_case("spring") {
            Some(Self::Spring)
        } else if shape_type.eq_ignore_ascii_case("thread") {
            Some(Self::Thread)
        } else {
            None
        }
    }

    /// The canonical identifier for this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gear => "gear",
            Self::Spring => "spring",
            Self::Thread => "thread",
        }
    }
}
