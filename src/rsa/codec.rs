// Fixed-Width Integer Codec
// Big-endian, left zero-padded encoding used by every key and signature file

use super::bigint::{from_bytes, to_bytes, RsaBigInt};
use super::error::{RsaError, RsaResult};

/// Width in bytes of one encoded integer
pub const INTEGER_WIDTH: usize = 1024;

/// Largest encodable bit length; wider values lose their high-order bytes
pub const MAX_INTEGER_BITS: usize = INTEGER_WIDTH * 8;

/// Write `value` big-endian into `buf`, zero-padded on the left.
///
/// Values wider than `buf` are silently truncated: the high-order bytes are
/// dropped and `value mod 2^(8 * buf.len())` is what gets stored.
pub fn encode_into(value: &RsaBigInt, buf: &mut [u8]) {
    let bytes = to_bytes(value);
    buf.fill(0);

    if bytes.len() > buf.len() {
        let skip = bytes.len() - buf.len();
        buf.copy_from_slice(&bytes[skip..]);
    } else {
        let start = buf.len() - bytes.len();
        buf[start..].copy_from_slice(&bytes);
    }
}

/// Encode `value` into a fixed [`INTEGER_WIDTH`] buffer
///
/// Truncates like [`encode_into`].
pub fn encode(value: &RsaBigInt) -> [u8; INTEGER_WIDTH] {
    let mut buf = [0u8; INTEGER_WIDTH];
    encode_into(value, &mut buf);
    buf
}

/// Decode a fixed-width buffer
pub fn decode(buf: &[u8; INTEGER_WIDTH]) -> RsaBigInt {
    from_bytes(buf)
}

/// Decode a slice that must be exactly [`INTEGER_WIDTH`] bytes
pub fn decode_slice(bytes: &[u8]) -> RsaResult<RsaBigInt> {
    let buf: &[u8; INTEGER_WIDTH] = bytes.try_into().map_err(|_| RsaError::Decode {
        expected: INTEGER_WIDTH,
        actual: bytes.len(),
    })?;
    Ok(decode(buf))
}
