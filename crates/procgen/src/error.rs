//! Errors raised by the point-cloud generators.

use thiserror::Error;

/// A generator rejected its parameters instead of producing degenerate geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl GenerationError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Reject NaN/infinite values and values below `min`.
pub(crate) fn check_at_least(name: &'static str, value: f32, min: f32) -> Result<(), GenerationError> {
    if !value.is_finite() {
        return Err(GenerationError::invalid(name, format!("must be finite, got {value}")));
    }
    if value < min {
        return Err(GenerationError::invalid(name, format!("must be >= {min}, got {value}")));
    }
    Ok(())
}

/// Reject NaN/infinite values and values that are not strictly positive.
pub(crate) fn check_positive(name: &'static str, value: f32) -> Result<(), GenerationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GenerationError::invalid(name, format!("must be a positive number, got {value}")));
    }
    Ok(())
}

/// Reject NaN/infinite values.
pub(crate) fn check_finite(name: &'static str, value: f32) -> Result<(), GenerationError> {
    if !value.is_finite() {
        return Err(GenerationError::invalid(name, format!("must be finite, got {value}")));
    }
    Ok(())
}
