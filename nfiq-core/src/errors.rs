//! Error Types for Quality Scoring Failures
//!
//! ## Design Philosophy
//!
//! Scoring runs inside enrollment and authentication paths, so errors stay
//! small and cheap to move around:
//!
//! 1. **No Heap Allocation**: messages are `&'static str`, never `String`.
//! 2. **Copy Semantics**: errors are returned by value from every stage.
//! 3. **Legacy Status Codes**: every error maps onto a negative integer code
//!    so callers that speak the old numeric protocol keep working.
//!
//! ## Error Categories
//!
//! ### Configuration
//! - `Configuration`: generic parameter problem
//! - `UnsupportedActivation`: activation code outside the known set
//! - `HiddenLayerTooLarge`: network exceeds the hidden-unit cap
//! - `DimensionMismatch`: vector, statistics or weight lengths disagree
//!
//! All of these are detected before any arithmetic happens.
//!
//! ### Input
//! - `InvalidInput`: malformed image, map or training matrix
//!
//! ### Collaborator
//! - `Detection`: the minutiae detector failed; its code is kept verbatim
//!
//! Degenerate images (empty quality map, too few minutiae) are *not* errors.
//! They produce a sentinel score and a non-zero status instead.
//!
//! ```rust
//! use nfiq_core::NfiqError;
//!
//! let err = NfiqError::Detection { code: -17 };
//! assert_eq!(err.code(), -17);
//!
//! let err = NfiqError::UnsupportedActivation { code: 9 };
//! assert!(err.is_configuration());
//! assert_eq!(err.code(), -2);
//! ```

use thiserror_no_std::Error;

/// Result type for scoring operations
pub type NfiqResult<T> = Result<T, NfiqError>;

/// Status code reported for every configuration-class error.
pub const CONFIGURATION_ERROR_CODE: i32 = -2;

/// Status code reported for malformed input.
pub const INVALID_INPUT_CODE: i32 = -3;

/// Status code substituted when a detector fails with a non-negative code.
pub const DETECTOR_FAILURE_CODE: i32 = -4;

/// Scoring errors - inline data only
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum NfiqError {
    /// Parameter set is unusable
    #[error("Configuration error: {reason}")]
    Configuration {
        /// What is wrong with the configuration
        reason: &'static str,
    },

    /// Activation function code is not LINEAR(0), SIGMOID(1) or SINUSOID(2)
    #[error("Unsupported activation function code {code}")]
    UnsupportedActivation {
        /// The rejected code
        code: i32,
    },

    /// Hidden layer exceeds the engine's hard cap
    #[error("Hidden layer of {requested} units exceeds maximum {max}")]
    HiddenLayerTooLarge {
        /// Requested number of hidden units
        requested: usize,
        /// Maximum supported number of hidden units
        max: usize,
    },

    /// Two buffers that must agree in length do not
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which buffer was checked
        what: &'static str,
        /// Length required by the configuration
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// Input data is malformed
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// What is wrong with the input
        reason: &'static str,
    },

    /// External minutiae detector reported failure
    #[error("Minutiae detection failed with code {code}")]
    Detection {
        /// Detector status code, propagated unchanged
        code: i32,
    },
}

impl NfiqError {
    /// Legacy numeric status for this error.
    ///
    /// Detector codes pass through untouched; everything else maps to a
    /// fixed negative code per category.
    pub fn code(&self) -> i32 {
        match self {
            Self::Detection { code } => *code,
            Self::InvalidInput { .. } => INVALID_INPUT_CODE,
            Self::Configuration { .. }
            | Self::UnsupportedActivation { .. }
            | Self::HiddenLayerTooLarge { .. }
            | Self::DimensionMismatch { .. } => CONFIGURATION_ERROR_CODE,
        }
    }

    /// True for errors caused by the parameter set rather than the input.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration { .. }
                | Self::UnsupportedActivation { .. }
                | Self::HiddenLayerTooLarge { .. }
                | Self::DimensionMismatch { .. }
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for NfiqError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Configuration { reason } =>
                defmt::write!(fmt, "Configuration: {}", reason),
            Self::UnsupportedActivation { code } =>
                defmt::write!(fmt, "Unsupported activation {}", code),
            Self::HiddenLayerTooLarge { requested, max } =>
                defmt::write!(fmt, "Hidden layer {} > {}", requested, max),
            Self::DimensionMismatch { what, expected, actual } =>
                defmt::write!(fmt, "{}: expected {}, got {}", what, expected, actual),
            Self::InvalidInput { reason } =>
                defmt::write!(fmt, "Invalid input: {}", reason),
            Self::Detection { code } =>
                defmt::write!(fmt, "Detection failed: {}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_code_is_verbatim() {
        assert_eq!(NfiqError::Detection { code: -1 }.code(), -1);
        assert_eq!(NfiqError::Detection { code: -4242 }.code(), -4242);
    }

    #[test]
    fn configuration_family_shares_code() {
        let errors = [
            NfiqError::Configuration { reason: "x" },
            NfiqError::UnsupportedActivation { code: 7 },
            NfiqError::HiddenLayerTooLarge { requested: 2000, max: 1000 },
            NfiqError::DimensionMismatch { what: "weights", expected: 3, actual: 2 },
        ];
        for err in errors {
            assert!(err.is_configuration());
            assert_eq!(err.code(), CONFIGURATION_ERROR_CODE);
        }
    }

    #[test]
    fn input_and_detection_are_not_configuration() {
        assert!(!NfiqError::InvalidInput { reason: "empty" }.is_configuration());
        assert!(!NfiqError::Detection { code: -5 }.is_configuration());
        assert_eq!(NfiqError::InvalidInput { reason: "empty" }.code(), INVALID_INPUT_CODE);
    }
}
