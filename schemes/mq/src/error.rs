//! Error types shared by the UOV, MQDSS and MQAT operations.

use std::fmt;

/// Specific reasons why signature or token verification failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationFailure {
    /// The public map evaluated on the signature differs from the target.
    ImageMismatch,
    /// The recomputed round commitments do not hash to sigma0.
    CommitmentMismatch,
    /// A signature component has the wrong length.
    InvalidLength,
    /// The signature bytes could not be decoded.
    Malformed,
}

impl fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationFailure::ImageMismatch => write!(f, "public map image mismatch"),
            VerificationFailure::CommitmentMismatch => write!(f, "commitment hash mismatch"),
            VerificationFailure::InvalidLength => write!(f, "invalid signature length"),
            VerificationFailure::Malformed => write!(f, "malformed signature encoding"),
        }
    }
}

/// Errors that can occur in the multivariate schemes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MqError {
    /// Signature or token verification failed with a specific reason.
    VerificationFailed(VerificationFailure),

    /// UOV signing exhausted every vinegar trial.
    SigningFailed {
        /// Number of attempts made before failure.
        attempts: u32,
    },

    /// A linear system had no unique solution.
    SingularSystem,

    /// Operand shapes do not agree.
    DimensionMismatch {
        /// The operation that detected the mismatch.
        context: &'static str,
        /// The size the operation required.
        expected: usize,
        /// The size it was given.
        found: usize,
    },

    /// The system random number generator failed.
    RandomnessFailure,

    /// The unblinded issuer response does not map to the committed value.
    ProtocolBindingFailure,

    /// The provided parameters are invalid.
    InvalidParams {
        /// Description of why the parameters are invalid.
        reason: &'static str,
    },

    /// Invalid input was provided to a function.
    InvalidInput {
        /// The name of the invalid field/parameter.
        field: &'static str,
        /// Description of why the input is invalid.
        reason: &'static str,
    },

    /// Decoding from bytes failed.
    DecodingError {
        /// What was being decoded.
        context: &'static str,
    },
}

impl fmt::Display for MqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MqError::VerificationFailed(reason) => {
                write!(f, "verification failed: {}", reason)
            }
            MqError::SigningFailed { attempts } => {
                write!(f, "signing failed after {} attempts", attempts)
            }
            MqError::SingularSystem => {
                write!(f, "linear system is singular")
            }
            MqError::DimensionMismatch {
                context,
                expected,
                found,
            } => {
                write!(
                    f,
                    "dimension mismatch in {}: expected {}, found {}",
                    context, expected, found
                )
            }
            MqError::RandomnessFailure => {
                write!(f, "system randomness unavailable")
            }
            MqError::ProtocolBindingFailure => {
                write!(f, "issuer response does not bind to the committed value")
            }
            MqError::InvalidParams { reason } => {
                write!(f, "invalid parameters: {}", reason)
            }
            MqError::InvalidInput { field, reason } => {
                write!(f, "invalid input for '{}': {}", field, reason)
            }
            MqError::DecodingError { context } => {
                write!(f, "decoding error: {}", context)
            }
        }
    }
}

impl std::error::Error for MqError {}

/// Result type alias for the multivariate schemes.
pub type Result<T> = std::result::Result<T, MqError>;

/// Returns a [`MqError::DimensionMismatch`] unless `found == expected`.
#[inline]
pub(crate) fn check_len(context: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(MqError::DimensionMismatch {
            context,
            expected,
            found,
        })
    }
}
