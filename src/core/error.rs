use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
}

impl EngineError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Rejects NaN, infinities and negative values.
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> EngineResult<f64> {
    if !value.is_finite() {
        return Err(EngineError::invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(EngineError::invalid(field, format!("must be >= 0, got {value}")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_non_negative_accepts_zero_and_positive() {
        assert_eq!(ensure_non_negative("amount", 0.0), Ok(0.0));
        assert_eq!(ensure_non_negative("amount", 12.5), Ok(12.5));
    }

    #[test]
    fn ensure_non_negative_rejects_negative_and_non_finite() {
        let err = ensure_non_negative("amount", -1.0).expect_err("negative");
        assert!(err.to_string().contains("`amount`"));
        assert!(ensure_non_negative("rate", f64::NAN).is_err());
        assert!(ensure_non_negative("rate", f64::INFINITY).is_err());
    }
}
