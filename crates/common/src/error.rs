use crate::types::{ObjectId, WorldId};

/// Errors raised by the simulation value model and world bookkeeping.
///
/// Validation errors are raised when a value is constructed or a field is
/// set, never from inside the per-tick physics path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("{quantity} must not be negative, got {value}")]
    Negative { quantity: &'static str, value: f64 },
    #[error("{quantity} must be positive, got {value}")]
    NonPositive { quantity: &'static str, value: f64 },
    #[error("{quantity} must lie in [{min}, {max}], got {value}")]
    OutOfRange {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{quantity} must be a number")]
    NotANumber { quantity: &'static str },
    #[error("{field} is pinned for {kind} objects")]
    PinnedField {
        field: &'static str,
        kind: &'static str,
    },
    #[error("values belong to different worlds: required {required}, provided {provided}")]
    DifferentWorld { required: WorldId, provided: WorldId },
    #[error("division by zero in {0}")]
    DivisionByZero(&'static str),
    #[error("object {0} is already registered")]
    DuplicateObject(ObjectId),
    #[error("world {0} is already registered")]
    DuplicateWorld(WorldId),
    #[error("{0}")]
    Failed(String),
}

pub type SimResult<T> = Result<T, SimError>;

impl SimError {
    /// Reject NaN and negative values for quantities that must be `>= 0`.
    pub fn check_non_negative(quantity: &'static str, value: f64) -> SimResult<f64> {
        if value.is_nan() {
            return Err(Self::NotANumber { quantity });
        }
        if value < 0.0 {
            return Err(Self::Negative { quantity, value });
        }
        Ok(value)
    }

    /// Reject NaN and non-positive values for quantities that must be `> 0`.
    pub fn check_positive(quantity: &'static str, value: f64) -> SimResult<f64> {
        if value.is_nan() {
            return Err(Self::NotANumber { quantity });
        }
        if value <= 0.0 {
            return Err(Self::NonPositive { quantity, value });
        }
        Ok(value)
    }

    /// Reject NaN and values outside the closed range `[min, max]`.
    pub fn check_range(quantity: &'static str, value: f64, min: f64, max: f64) -> SimResult<f64> {
        if value.is_nan() {
            return Err(Self::NotANumber { quantity });
        }
        if value < min || value > max {
            return Err(Self::OutOfRange {
                quantity,
                value,
                min,
                max,
            });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_accepts_zero() {
        assert_eq!(SimError::check_non_negative("mass", 0.0), Ok(0.0));
    }

    #[test]
    fn non_negative_rejects_negative_and_nan() {
        assert!(matches!(
            SimError::check_non_negative("mass", -1.0),
            Err(SimError::Negative { quantity: "mass", .. })
        ));
        assert!(matches!(
            SimError::check_non_negative("mass", f64::NAN),
            Err(SimError::NotANumber { .. })
        ));
    }

    #[test]
    fn positive_rejects_zero() {
        assert!(matches!(
            SimError::check_positive("air density", 0.0),
            Err(SimError::NonPositive { .. })
        ));
    }

    #[test]
    fn range_is_closed() {
        assert_eq!(SimError::check_range("restitution", 1.0, 0.0, 1.0), Ok(1.0));
        assert_eq!(SimError::check_range("restitution", 0.0, 0.0, 1.0), Ok(0.0));
        assert!(matches!(
            SimError::check_range("restitution", 1.01, 0.0, 1.0),
            Err(SimError::OutOfRange { .. })
        ));
    }

    #[test]
    fn messages_name_the_quantity() {
        let err = SimError::Negative {
            quantity: "volume.x",
            value: -2.0,
        };
        assert_eq!(err.to_string(), "volume.x must not be negative, got -2");
    }
}
