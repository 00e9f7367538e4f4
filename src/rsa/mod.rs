// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod codec;
pub mod error;
pub mod hash;
pub mod keygen;
pub mod prime;
pub mod sign;
pub mod verify;

pub use codec::{decode, decode_slice, encode, encode_into, INTEGER_WIDTH, MAX_INTEGER_BITS};
pub use error::{RsaError, RsaResult};
pub use hash::{digest_as_integer, digest_hex, digest_hex_with, DigestEncoding};
pub use keygen::{
    generate_keypair, KeyDeriver, KeyGenConfig, RsaKeyPair, RsaPrivateKey, RsaPublicKey,
};
pub use prime::PrimeGenerator;
pub use sign::{sign, sign_with_encoding, Signature};
pub use verify::{verify, verify_with_encoding};
