// Message Digest
// SHA-256 rendered as hex text; the text itself is what gets signed

use sha2::{Digest, Sha256};

use super::bigint::{from_bytes, RsaBigInt};

/// Length of a SHA-256 digest rendered as hex
pub const DIGEST_HEX_LEN: usize = 64;

/// Letter case of the hex digest text
///
/// The signed integer is built from the ASCII of the hex text, so the case
/// changes the value. `UpperHex` matches signatures made by tools whose hex
/// encoder emits capitals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DigestEncoding {
    #[default]
    LowerHex,
    UpperHex,
}

/// SHA-256 of `message` as 64 lowercase hex characters
pub fn digest_hex(message: &[u8]) -> String {
    digest_hex_with(message, DigestEncoding::LowerHex)
}

/// SHA-256 of `message` as 64 hex characters in the requested case
pub fn digest_hex_with(message: &[u8], encoding: DigestEncoding) -> String {
    let digest = Sha256::digest(message);
    match encoding {
        DigestEncoding::LowerHex => hex::encode(digest),
        DigestEncoding::UpperHex => hex::encode_upper(digest),
    }
}

/// Read the ASCII bytes of a hex digest as a big-endian integer.
///
/// This is not the numeric value of the digest: "ab" becomes 0x6162.
pub fn digest_as_integer(hex_digest: &str) -> RsaBigInt {
    from_bytes(hex_digest.as_bytes())
}

/// The integer signed for `message`
pub fn message_representative(message: &[u8], encoding: DigestEncoding) -> RsaBigInt {
    digest_as_integer(&digest_hex_with(message, encoding))
}
