pub mod error;
pub mod generator;
pub mod math;
pub mod mesh;
pub mod shapes;

pub use error::{MechagenError, Result};
pub use generator::{create_shape, ShapeParams};
pub use mesh::MeshData;
pub use shapes::{GearShape, ParametricShape, ShapeKind, SpringShape, ThreadShape};
