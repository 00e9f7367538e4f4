// Utility Module
// File handling for keys and signatures

pub mod file_ops;
pub mod key_file;

pub use file_ops::{FileError, FileResult};
pub use key_file::{
    load_private_key, load_public_key, load_signature, save_keypair, save_signature,
    KEY_FILE_LEN, PRIVATE_KEY_FILE, PUBLIC_KEY_FILE, SIGNATURE_FILE, SIGNATURE_FILE_LEN,
};
