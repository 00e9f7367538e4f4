// Command Handlers
// Load files, run the RSA operation and report the result on stdout

use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use super::{KeygenArgs, SignArgs, VerifyArgs};
use crate::rsa::{generate_keypair, sign_with_encoding, verify_with_encoding, DigestEncoding, RsaError};
use crate::util::file_ops::read_file;
use crate::util::{
    load_private_key, load_public_key, load_signature, save_keypair, save_signature,
    PRIVATE_KEY_FILE, PUBLIC_KEY_FILE,
};

pub fn keygen(args: KeygenArgs) -> Result<()> {
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("cannot create {}", args.out_dir.display()))?;

    let keypair = generate_keypair();
    save_keypair(&args.out_dir, &keypair).context("failed to save keys")?;

    println!(
        "Keys generated and saved to {} and {}.",
        PUBLIC_KEY_FILE, PRIVATE_KEY_FILE
    );
    Ok(())
}

pub fn sign(args: SignArgs, encoding: DigestEncoding) -> Result<()> {
    let private_key = load_private_key(&args.private_key_file).context("Invalid private key")?;
    let message = read_file(&args.data_file).context("Cannot read data file")?;

    let signature = sign_with_encoding(&private_key, &message, encoding)?;
    save_signature(&args.output, &signature).context("failed to save signature")?;

    info!(path = %args.output.display(), "wrote signature");
    println!(
        "Message signed and signature saved to '{}'.",
        args.output.display()
    );
    Ok(())
}

pub fn verify(args: VerifyArgs, encoding: DigestEncoding) -> Result<()> {
    let public_key = load_public_key(&args.public_key_file).context("Invalid public key")?;
    if public_key.is_degenerate() {
        return Err(RsaError::InvalidPublicKey.into());
    }

    let message = read_file(&args.data_file).context("Cannot read data file")?;

    let signature = load_signature(&args.signature_file).context("Invalid signature")?;
    if signature.is_zero() {
        return Err(RsaError::InvalidSignature.into());
    }

    if verify_with_encoding(&public_key, &message, &signature, encoding)? {
        println!("Signature is valid.");
    } else {
        println!("Signature is invalid.");
    }
    Ok(())
}
