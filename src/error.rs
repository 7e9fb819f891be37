/// Error types for the threshold elliptic-curve library
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    /// (x, y) does not satisfy y^2 = x^3 + ax + b (mod p)
    #[error("point is not on the curve")]
    NotOnCurve,
    /// Operands belong to different curve instances
    #[error("points are not on the same curve")]
    CurveMismatch,
    /// Generator, order or threshold failed a sanity check
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    /// A received secret share does not match its sender's commitments
    #[error("secret share verification failed: {0}")]
    ShareVerificationFailed(String),
    #[error("plaintext is not on the system curve")]
    PlaintextNotOnCurve,
    #[error("invalid ciphertext")]
    InvalidCiphertext,
    #[error("invalid shares")]
    InvalidShares,
    #[error("invalid partial signatures")]
    InvalidPartialSignatures,
    /// The value is congruent to zero modulo the modulus
    #[error("value has no inverse modulo the given modulus")]
    NotInvertible,
    #[error("missing key material: {0}")]
    MissingKeyMaterial(&'static str),
}

pub type Result<T> = std::result::Result<T, ThresholdError>;
