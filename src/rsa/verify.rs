// RSA Verification
// Recovers the representative with e and compares it to the message digest

use tracing::debug;

use super::bigint::mod_pow;
use super::error::{RsaError, RsaResult};
use super::hash::{message_representative, DigestEncoding};
use super::keygen::RsaPublicKey;
use super::sign::Signature;

/// Verify with the lowercase hex digest representative
pub fn verify(public_key: &RsaPublicKey, message: &[u8], signature: &Signature) -> RsaResult<bool> {
    verify_with_encoding(public_key, message, signature, DigestEncoding::default())
}

/// Check `signature^e mod n == digest_as_integer(digest_hex(message))`.
///
/// Zero exponent, modulus or signature are errors and are rejected before
/// any exponentiation. The signature is reduced mod n, so any value
/// congruent to a valid signature verifies. A mismatch is `Ok(false)`, not
/// an error.
pub fn verify_with_encoding(
    public_key: &RsaPublicKey,
    message: &[u8],
    signature: &Signature,
    encoding: DigestEncoding,
) -> RsaResult<bool> {
    if public_key.is_degenerate() {
        return Err(RsaError::InvalidPublicKey);
    }
    if signature.is_zero() {
        return Err(RsaError::InvalidSignature);
    }

    let decrypted = mod_pow(signature.value(), &public_key.e, &public_key.n)
        .ok_or(RsaError::InvalidPublicKey)?;
    let expected = message_representative(message, encoding);

    debug!(%expected, %decrypted, "compared signature representative");

    Ok(decrypted == expected)
}
