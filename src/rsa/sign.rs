// RSA Signing
// Textbook RSA: the digest representative raised to d modulo n, no padding

use num_traits::Zero;
use tracing::debug;

use super::bigint::{mod_pow, RsaBigInt};
use super::codec::{decode, decode_slice, encode, INTEGER_WIDTH};
use super::error::{RsaError, RsaResult};
use super::hash::{message_representative, DigestEncoding};
use super::keygen::RsaPrivateKey;

/// A signature integer, stored as one fixed-width codec block on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(RsaBigInt);

impl Signature {
    pub fn new(value: RsaBigInt) -> Self {
        Self(value)
    }

    pub fn value(&self) -> &RsaBigInt {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn to_bytes(&self) -> [u8; INTEGER_WIDTH] {
        encode(&self.0)
    }

    pub fn from_bytes(bytes: &[u8; INTEGER_WIDTH]) -> Self {
        Self(decode(bytes))
    }

    /// Decode a block that must be exactly [`INTEGER_WIDTH`] bytes
    pub fn from_slice(bytes: &[u8]) -> RsaResult<Self> {
        decode_slice(bytes).map(Self)
    }
}

/// Sign `message` with the lowercase hex digest representative
pub fn sign(private_key: &RsaPrivateKey, message: &[u8]) -> RsaResult<Signature> {
    sign_with_encoding(private_key, message, DigestEncoding::default())
}

/// signature = digest_as_integer(digest_hex(message))^d mod n
///
/// Deterministic: the same key and message always give the same signature.
pub fn sign_with_encoding(
    private_key: &RsaPrivateKey,
    message: &[u8],
    encoding: DigestEncoding,
) -> RsaResult<Signature> {
    if private_key.is_degenerate() {
        return Err(RsaError::InvalidPrivateKey);
    }

    let representative = message_representative(message, encoding);
    let signature = mod_pow(&representative, &private_key.d, &private_key.n)
        .ok_or(RsaError::InvalidPrivateKey)?;

    debug!(
        modulus_bits = private_key.bit_length(),
        message_len = message.len(),
        "signed message"
    );

    Ok(Signature(signature))
}
