// Command Line Interface
// Argument parsing and dispatch for keygen, sign and verify

pub mod commands;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::rsa::DigestEncoding;
use crate::util::SIGNATURE_FILE;

/// Textbook RSA command line
#[derive(Parser, Debug)]
#[command(name = "rsa_cli")]
#[command(version)]
#[command(about = "Textbook RSA key generation, signing and verification", long_about = None)]
pub struct Cli {
    /// Letter case of the hex digest whose text is signed
    #[arg(long, global = true, value_enum, default_value_t = DigestCase::Lower)]
    pub digest_case: DigestCase,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate public_key.bin and private_key.bin
    Keygen(KeygenArgs),

    /// Sign a file with a private key
    Sign(SignArgs),

    /// Check a signature against a file and a public key
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Directory receiving the key files
    #[arg(long, default_value = ".", env = "RSA_CLI_OUT_DIR")]
    pub out_dir: PathBuf,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    pub private_key_file: PathBuf,
    pub data_file: PathBuf,

    /// Where to write the signature
    #[arg(short, long, default_value = SIGNATURE_FILE)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    pub public_key_file: PathBuf,
    pub data_file: PathBuf,
    pub signature_file: PathBuf,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DigestCase {
    #[default]
    Lower,
    Upper,
}

impl From<DigestCase> for DigestEncoding {
    fn from(case: DigestCase) -> Self {
        match case {
            DigestCase::Lower => DigestEncoding::LowerHex,
            DigestCase::Upper => DigestEncoding::UpperHex,
        }
    }
}

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let encoding = DigestEncoding::from(cli.digest_case);
    let started = Instant::now();

    let result = match cli.command {
        Commands::Keygen(args) => commands::keygen(args),
        Commands::Sign(args) => commands::sign(args, encoding),
        Commands::Verify(args) => commands::verify(args, encoding),
    };

    info!(
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Execution cost"
    );
    result
}
