//! Error types for chart-ta.
//!
//! Insufficient history is never an error in this crate: transforms return
//! NaN for every bar they cannot compute yet. The variants below cover the
//! few conditions where a call cannot produce a meaningful series at all.

use thiserror::Error;

/// The main error type for chart-ta operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Failed to convert a numeric value to the target type.
    ///
    /// This error occurs when using `NumCast::from()` to convert values
    /// (e.g., converting a `usize` period to a generic `Float` type) and
    /// the conversion fails.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },

    /// The period parameter is invalid.
    ///
    /// Returned when a window length is zero.
    #[error("invalid period {period}: {reason}")]
    InvalidPeriod {
        /// The invalid period value that was provided.
        period: usize,
        /// Description of why the period is invalid.
        reason: &'static str,
    },

    /// Parallel input series do not have the same length.
    #[error("length mismatch: {description}")]
    LengthMismatch {
        /// Which inputs disagree and by how much.
        description: String,
    },

    /// A caller-provided output buffer is shorter than the input.
    #[error("{indicator}: output buffer too small: required {required}, got {actual}")]
    BufferTooSmall {
        /// Name of the transform that rejected the buffer.
        indicator: &'static str,
        /// Required buffer length.
        required: usize,
        /// Provided buffer length.
        actual: usize,
    },

    /// A non-period parameter makes the formula meaningless.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the input struct.
        name: &'static str,
        /// Description of the constraint that was violated.
        reason: &'static str,
    },
}

/// Convenience type alias for Results using the chart-ta Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_conversion_error() {
        let err = Error::NumericConversion {
            context: "converting period to float",
        };
        assert_eq!(
            err.to_string(),
            "numeric conversion failed: converting period to float"
        );
    }

    #[test]
    fn test_invalid_period_error() {
        let err = Error::InvalidPeriod {
            period: 0,
            reason: "period must be at least 1",
        };
        assert_eq!(err.to_string(), "invalid period 0: period must be at least 1");
    }

    #[test]
    fn test_length_mismatch_error() {
        let err = Error::LengthMismatch {
            description: "high has 3 elements, low has 2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "length mismatch: high has 3 elements, low has 2"
        );
    }

    #[test]
    fn test_buffer_too_small_error() {
        let err = Error::BufferTooSmall {
            indicator: "sma",
            required: 10,
            actual: 4,
        };
        assert_eq!(
            err.to_string(),
            "sma: output buffer too small: required 10, got 4"
        );
    }

    #[test]
    fn test_invalid_parameter_error() {
        let err = Error::InvalidParameter {
            name: "period",
            reason: "hull moving average needs period >= 2",
        };
        assert_eq!(
            err.to_string(),
            "invalid parameter `period`: hull moving average needs period >= 2"
        );
    }

    #[test]
    fn test_error_equality() {
        let err1 = Error::InvalidPeriod {
            period: 0,
            reason: "x",
        };
        let err2 = err1.clone();
        let err3 = Error::InvalidPeriod {
            period: 1,
            reason: "x",
        };

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn test_error_is_std_error() {
        fn accepts_std_error<E: std::error::Error>(_: E) {}
        accepts_std_error(Error::InvalidParameter {
            name: "multiplier",
            reason: "must be positive",
        });
    }
}
