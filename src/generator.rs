use std::collections::BTreeMap;

use crate::error::{Result, UnsupportedShapeError, ValidationError};
use crate::shapes::{GearShape, ParametricShape, ShapeKind, SpringShape, ThreadShape};

/// A named numeric parameter mapping, as supplied by the upstream pipeline.
///
/// Keys are the per-shape parameter names; extra keys are ignored, missing
/// keys fail validation. A `BTreeMap` keeps iteration deterministic.
pub type ShapeParams = BTreeMap<String, f64>;

/// Creates a generator for the given shape type and parameter mapping.
///
/// Dispatch is a direct lookup from the identifier to one of the three
/// shape constructors. Parameters are parsed and validated here, before the
/// generator is returned, so malformed input fails before any vertex is
/// allocated. No caching: every call returns a fresh, independent generator.
///
/// # Errors
///
/// Returns [`UnsupportedShapeError`] for an identifier outside
/// `{gear, spring, thread}`, or [`ValidationError`] if the mapping is
/// missing a parameter or carries an out-of-domain value.
pub fn create_shape(shape_type: &str, params: &ShapeParams) -> Result<Box<dyn ParametricShape>> {
    let Some(kind) = ShapeKind::parse(shape_type) else {
        return Err(UnsupportedShapeError {
            shape_type: shape_type.to_owned(),
        }
        .into());
    };
    let shape: Box<dyn ParametricShape> = match kind {
        ShapeKind::Gear => Box::new(GearShape::from_params(params)?),
        ShapeKind::Spring => Box::new(SpringShape::from_params(params)?),
        ShapeKind::Thread => Box::new(ThreadShape::from_params(params)?),
    };
    Ok(shape)
}

/// Looks up a required numeric parameter.
pub(crate) fn require(params: &ShapeParams, name: &'static str) -> Result<f64> {
    match params.get(name) {
        Some(&v) if v.is_finite() => Ok(v),
        Some(&v) => Err(ValidationError::Constraint {
            parameter: name,
            constraint: format!("value {v} is not finite"),
        }
        .into()),
        None => Err(ValidationError::Missing(name).into()),
    }
}

/// Upper bound on count-valued parameters. Far above any sensible sampling
/// density, but low enough that garbage upstream values fail in validation
/// instead of in the allocator.
const MAX_COUNT: f64 = 1_000_000.0;

/// Looks up a required parameter that must carry a non-negative integer.
pub(crate) fn require_count(params: &ShapeParams, name: &'static str) -> Result<usize> {
    let v = require(params, name)?;
    if v < 0.0 || v.fract() != 0.0 {
        return Err(ValidationError::NotAnInteger {
            parameter: name,
            value: v,
        }
        .into());
    }
    if v > MAX_COUNT {
        return Err(ValidationError::OutOfRange {
            parameter: name,
            value: v,
            min: 0.0,
            max: MAX_COUNT,
        }
        .into());
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Ok(v as usize)
}
