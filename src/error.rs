use thiserror::Error;

/// Top-level error type for the mechagen generator.
#[derive(Debug, Error)]
pub enum MechagenError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UnsupportedShape(#[from] UnsupportedShapeError),
}

/// A shape parameter violates its documented domain.
///
/// Raised before any geometry is sampled; a failed generation never
/// returns a partially built mesh.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("missing parameter: {0}")]
    Missing(&'static str),

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    OutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("parameter {parameter} = {value} must be an integer")]
    NotAnInteger { parameter: &'static str, value: f64 },

    #[error("parameter {parameter}: {constraint}")]
    Constraint {
        parameter: &'static str,
        constraint: String,
    },
}

/// The factory received a shape type outside `{gear, spring, thread}`.
#[derive(Debug, Error)]
#[error("unsupported shape type: {shape_type}")]
pub struct UnsupportedShapeError {
    /// The offending identifier as supplied by the caller.
    pub shape_type: String,
}

/// Convenience type alias for results using [`MechagenError`].
pub type Result<T> = std::result::Result<T, MechagenError>;
