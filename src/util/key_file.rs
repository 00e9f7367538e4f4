// Key and Signature File Layouts
//
// public_key.bin   e (1024B) || n (1024B)
// private_key.bin  d (1024B) || n (1024B)
// signature.bin    s (1024B)

use std::path::{Path, PathBuf};

use tracing::info;
use zeroize::Zeroizing;

use super::file_ops::{read_exact_len, write_file, FileResult};
use crate::rsa::{
    decode_slice, encode, RsaKeyPair, RsaPrivateKey, RsaPublicKey, RsaResult, Signature,
    INTEGER_WIDTH,
};

pub const PUBLIC_KEY_FILE: &str = "public_key.bin";
pub const PRIVATE_KEY_FILE: &str = "private_key.bin";
pub const SIGNATURE_FILE: &str = "signature.bin";

/// Size of either key file
pub const KEY_FILE_LEN: usize = 2 * INTEGER_WIDTH;

/// Size of a signature file
pub const SIGNATURE_FILE_LEN: usize = INTEGER_WIDTH;

fn split_pair(bytes: &[u8]) -> (&[u8], &[u8]) {
    bytes.split_at(bytes.len().min(INTEGER_WIDTH))
}

/// Serialize a public key as e || n
pub fn public_key_to_bytes(key: &RsaPublicKey) -> Vec<u8> {
    let mut out = Vec::with_capacity(KEY_FILE_LEN);
    out.extend_from_slice(&encode(&key.e));
    out.extend_from_slice(&encode(&key.n));
    out
}

/// Parse e || n; the input must be exactly [`KEY_FILE_LEN`] bytes
pub fn public_key_from_bytes(bytes: &[u8]) -> RsaResult<RsaPublicKey> {
    let (e, n) = split_pair(bytes);
    Ok(RsaPublicKey::new(decode_slice(e)?, decode_slice(n)?))
}

/// Serialize a private key as d || n
pub fn private_key_to_bytes(key: &RsaPrivateKey) -> Zeroizing<Vec<u8>> {
    let d_block = Zeroizing::new(encode(&key.d));
    let mut out = Zeroizing::new(Vec::with_capacity(KEY_FILE_LEN));
    out.extend_from_slice(&*d_block);
    out.extend_from_slice(&encode(&key.n));
    out
}

/// Parse d || n; the input must be exactly [`KEY_FILE_LEN`] bytes
pub fn private_key_from_bytes(bytes: &[u8]) -> RsaResult<RsaPrivateKey> {
    let (d, n) = split_pair(bytes);
    Ok(RsaPrivateKey::new(decode_slice(d)?, decode_slice(n)?))
}

pub fn save_public_key(path: &Path, key: &RsaPublicKey) -> FileResult<()> {
    write_file(path, &public_key_to_bytes(key))
}

pub fn load_public_key(path: &Path) -> FileResult<RsaPublicKey> {
    let bytes = read_exact_len(path, KEY_FILE_LEN)?;
    Ok(public_key_from_bytes(&bytes)?)
}

pub fn save_private_key(path: &Path, key: &RsaPrivateKey) -> FileResult<()> {
    write_file(path, &private_key_to_bytes(key))
}

pub fn load_private_key(path: &Path) -> FileResult<RsaPrivateKey> {
    let bytes = read_exact_len(path, KEY_FILE_LEN)?;
    Ok(private_key_from_bytes(&bytes)?)
}

pub fn save_signature(path: &Path, signature: &Signature) -> FileResult<()> {
    write_file(path, &signature.to_bytes())
}

pub fn load_signature(path: &Path) -> FileResult<Signature> {
    let bytes = read_exact_len(path, SIGNATURE_FILE_LEN)?;
    Ok(Signature::from_slice(&bytes)?)
}

/// Write both key files into `dir` under their standard names
pub fn save_keypair(dir: &Path, keypair: &RsaKeyPair) -> FileResult<(PathBuf, PathBuf)> {
    let public_path = dir.join(PUBLIC_KEY_FILE);
    let private_path = dir.join(PRIVATE_KEY_FILE);

    save_public_key(&public_path, &keypair.public_key)?;
    save_private_key(&private_path, &keypair.private_key)?;

    info!(
        public = %public_path.display(),
        private = %private_path.display(),
        modulus_bits = keypair.bit_length(),
        "wrote key files"
    );

    Ok((public_path, private_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::from_u64;
    use crate::rsa::RsaError;
    use crate::util::file_ops::{write_file, FileError};

    #[test]
    fn test_public_key_layout() {
        let key = RsaPublicKey::new(from_u64(0x0102), from_u64(0x0304));
        let bytes = public_key_to_bytes(&key);

        assert_eq!(bytes.len(), KEY_FILE_LEN);
        assert_eq!(&bytes[INTEGER_WIDTH - 2..INTEGER_WIDTH], &[0x01u8, 0x02]);
        assert_eq!(&bytes[KEY_FILE_LEN - 2..], &[0x03u8, 0x04]);
        assert_eq!(public_key_from_bytes(&bytes).unwrap(), key);
    }

    #[test]
    fn test_private_key_layout() {
        let key = RsaPrivateKey::new(from_u64(0xaa), from_u64(0xbb));
        let bytes = private_key_to_bytes(&key);

        assert_eq!(bytes.len(), KEY_FILE_LEN);
        assert_eq!(bytes[INTEGER_WIDTH - 1], 0xaa);
        assert_eq!(bytes[KEY_FILE_LEN - 1], 0xbb);
        assert_eq!(private_key_from_bytes(&bytes).unwrap(), key);
    }

    #[test]
    fn test_wrong_length_is_a_decode_failure() {
        let err = public_key_from_bytes(&[0u8; 1500]).unwrap_err();
        assert_eq!(
            err,
            RsaError::Decode {
                expected: INTEGER_WIDTH,
                actual: 476
            }
        );
        assert!(private_key_from_bytes(&[0u8; 10]).is_err());
    }

    #[test]
    fn test_files_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let keypair = RsaKeyPair {
            public_key: RsaPublicKey::new(from_u64(17), from_u64(3233)),
            private_key: RsaPrivateKey::new(from_u64(2753), from_u64(3233)),
            bit_length: 12,
        };

        let (public_path, private_path) = save_keypair(dir.path(), &keypair).unwrap();
        assert_eq!(public_path, dir.path().join(PUBLIC_KEY_FILE));
        assert_eq!(load_public_key(&public_path).unwrap(), keypair.public_key);
        assert_eq!(load_private_key(&private_path).unwrap(), keypair.private_key);

        let signature_path = dir.path().join(SIGNATURE_FILE);
        let signature = Signature::new(from_u64(855));
        save_signature(&signature_path, &signature).unwrap();
        assert_eq!(std::fs::metadata(&signature_path).unwrap().len(), 1024);
        assert_eq!(load_signature(&signature_path).unwrap(), signature);
    }

    #[test]
    fn test_truncated_private_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PRIVATE_KEY_FILE);
        let key = RsaPrivateKey::new(from_u64(2753), from_u64(3233));
        write_file(&path, &private_key_to_bytes(&key)[..2000]).unwrap();

        match load_private_key(&path) {
            Err(FileError::ShortRead {
                expected, actual, ..
            }) => {
                assert_eq!(expected, KEY_FILE_LEN);
                assert_eq!(actual, 2000);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_all_zero_public_key_loads_as_degenerate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PUBLIC_KEY_FILE);
        write_file(&path, &[0u8; KEY_FILE_LEN]).unwrap();

        let key = load_public_key(&path).unwrap();
        assert!(key.is_degenerate());
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SIGNATURE_FILE);
        let mut bytes = Signature::new(from_u64(42)).to_bytes().to_vec();
        bytes.extend_from_slice(b"junk");
        write_file(&path, &bytes).unwrap();

        assert_eq!(load_signature(&path).unwrap(), Signature::new(from_u64(42)));
    }
}
