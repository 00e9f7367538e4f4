//! Textbook RSA key generation, signing and verification.
//!
//! Keys and signatures are stored as fixed 1024-byte big-endian blocks. The
//! value signed is the ASCII text of the message's SHA-256 hex digest,
//! read as an integer; no padding scheme is applied.

pub mod cli;
pub mod rsa;
pub mod util;
