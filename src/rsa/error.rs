// RSA Errors
// Typed failures for key derivation, signing, verification and decoding

use thiserror::Error;

/// Errors raised by the RSA core
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RsaError {
    /// Public exponent or modulus is zero
    #[error("invalid public key: exponent and modulus must be non-zero")]
    InvalidPublicKey,

    /// Private exponent or modulus is zero
    #[error("invalid private key: exponent and modulus must be non-zero")]
    InvalidPrivateKey,

    /// Signature integer is zero
    #[error("invalid signature: value is zero")]
    InvalidSignature,

    /// A fixed-width buffer had the wrong length
    #[error("decode failure: expected {expected} bytes, got {actual}")]
    Decode { expected: usize, actual: usize },

    /// Key generation parameters out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for RSA operations
pub type RsaResult<T> = Result<T, RsaError>;
