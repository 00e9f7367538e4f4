// RSA Key Generation
// Implements RSA key pair generation (public and private keys)

use std::fmt;

use num_traits::{One, Zero};
use rand::{thread_rng, CryptoRng, Rng};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::bigint::{gcd, mod_inverse, random_bits, RsaBigInt};
use super::error::{RsaError, RsaResult};
use super::prime::{PrimeGenerator, DEFAULT_PRIMALITY_ROUNDS};
use super::sign::{sign_with_encoding, Signature};
use super::hash::DigestEncoding;
use super::verify::verify_with_encoding;

/// Bit length of each prime factor
pub const DEFAULT_PRIME_BITS: usize = 512;

/// Bit length bound of the randomly sampled private exponent
pub const DEFAULT_EXPONENT_BITS: usize = 512;

/// RSA Public Key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    pub e: RsaBigInt,  // Public exponent
    pub n: RsaBigInt,  // Modulus
}

/// RSA Private Key
///
/// Both fields are wiped when the key is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RsaPrivateKey {
    pub d: RsaBigInt,  // Private exponent
    pub n: RsaBigInt,  // Modulus (same as public)
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    pub public_key: RsaPublicKey,
    pub private_key: RsaPrivateKey,
    pub bit_length: usize,
}

impl RsaPublicKey {
    pub fn new(e: RsaBigInt, n: RsaBigInt) -> Self {
        Self { e, n }
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> usize {
        self.n.bits()
    }

    /// A zero exponent or modulus can never verify anything
    pub fn is_degenerate(&self) -> bool {
        self.e.is_zero() || self.n.is_zero()
    }

    /// Verify a signature over `message` with this key
    pub fn verify(&self, message: &[u8], signature: &Signature) -> RsaResult<bool> {
        verify_with_encoding(self, message, signature, DigestEncoding::default())
    }
}

impl RsaPrivateKey {
    pub fn new(d: RsaBigInt, n: RsaBigInt) -> Self {
        Self { d, n }
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> usize {
        self.n.bits()
    }

    pub fn is_degenerate(&self) -> bool {
        self.d.is_zero() || self.n.is_zero()
    }

    /// Sign `message` with this key
    pub fn sign(&self, message: &[u8]) -> RsaResult<Signature> {
        sign_with_encoding(self, message, DigestEncoding::default())
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("d", &"[redacted]")
            .field("n", &self.n)
            .finish()
    }
}

impl RsaKeyPair {
    /// Get the bit length of the key
    pub fn bit_length(&self) -> usize {
        self.bit_length
    }
}

/// Parameters for key derivation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyGenConfig {
    pub prime_bits: usize,
    pub exponent_bits: usize,
    pub primality_rounds: u32,
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            prime_bits: DEFAULT_PRIME_BITS,
            exponent_bits: DEFAULT_EXPONENT_BITS,
            primality_rounds: DEFAULT_PRIMALITY_ROUNDS,
        }
    }
}

impl KeyGenConfig {
    pub fn with_prime_bits(mut self, bits: usize) -> Self {
        self.prime_bits = bits;
        self
    }

    pub fn with_exponent_bits(mut self, bits: usize) -> Self {
        self.exponent_bits = bits;
        self
    }

    pub fn with_primality_rounds(mut self, rounds: u32) -> Self {
        self.primality_rounds = rounds;
        self
    }

    /// Reject parameters for which derivation could never finish
    pub fn validate(&self) -> RsaResult<()> {
        // 2-bit primes admit only the value 3, so p != q would never hold
        if self.prime_bits < 3 {
            return Err(RsaError::InvalidConfig(format!(
                "prime bit length must be at least 3, got {}",
                self.prime_bits
            )));
        }
        if self.exponent_bits < 1 {
            return Err(RsaError::InvalidConfig(
                "private exponent bit length must be at least 1".to_string(),
            ));
        }
        if self.primality_rounds == 0 {
            return Err(RsaError::InvalidConfig(
                "at least one primality round is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builds keypairs from two random primes and a random private exponent
#[derive(Clone, Debug)]
pub struct KeyDeriver {
    config: KeyGenConfig,
    primes: PrimeGenerator,
}

impl Default for KeyDeriver {
    fn default() -> Self {
        let config = KeyGenConfig::default();
        Self {
            primes: PrimeGenerator::from_validated(config.prime_bits, config.primality_rounds),
            config,
        }
    }
}

impl KeyDeriver {
    pub fn new(config: KeyGenConfig) -> RsaResult<Self> {
        config.validate()?;
        let primes = PrimeGenerator::new(config.prime_bits)?.with_rounds(config.primality_rounds);
        Ok(Self { config, primes })
    }

    /// Derive a fresh keypair.
    ///
    /// p, q and phi are wiped before returning. Blocks until the random
    /// searches succeed.
    pub fn derive<R>(&self, rng: &mut R) -> RsaKeyPair
    where
        R: Rng + CryptoRng + ?Sized,
    {
        // Step 1: Generate two distinct random primes p and q
        let (p, q) = distinct_primes(|| self.primes.generate(&mut *rng));

        // Step 2: Compute n = p * q and φ(n) = (p-1)(q-1)
        let n = &*p * &*q;
        let p_minus_1 = Zeroizing::new(&*p - 1u32);
        let q_minus_1 = Zeroizing::new(&*q - 1u32);
        let phi = Zeroizing::new(&*p_minus_1 * &*q_minus_1);

        // Steps 3-4: random d coprime to φ(n), e = d^(-1) mod φ(n)
        let (d, e) = self.derive_exponents(&phi, rng);

        let bit_length = n.bits();
        debug!(
            modulus_bits = bit_length,
            public_exponent_bits = e.bits(),
            "derived keypair"
        );

        RsaKeyPair {
            public_key: RsaPublicKey::new(e, n.clone()),
            private_key: RsaPrivateKey::new(d, n),
            bit_length,
        }
    }

    fn derive_exponents<R>(&self, phi: &RsaBigInt, rng: &mut R) -> (RsaBigInt, RsaBigInt)
    where
        R: Rng + CryptoRng + ?Sized,
    {
        let mut attempts = 0u64;

        loop {
            attempts += 1;
            // Rejected candidates are wiped on drop as well
            let mut d = Zeroizing::new(random_bits(self.config.exponent_bits, rng));

            if !gcd(&d, phi).is_one() {
                continue;
            }

            if let Some(e) = mod_inverse(&d, phi) {
                debug!(attempts, "sampled private exponent");
                return (std::mem::take(&mut *d), e);
            }
        }
    }
}

/// Draw primes until two distinct ones are found, resampling q on collision
pub(crate) fn distinct_primes<F>(mut next_prime: F) -> (Zeroizing<RsaBigInt>, Zeroizing<RsaBigInt>)
where
    F: FnMut() -> RsaBigInt,
{
    let p = Zeroizing::new(next_prime());
    let mut q = Zeroizing::new(next_prime());

    while *q == *p {
        debug!("prime collision, resampling q");
        q = Zeroizing::new(next_prime());
    }

    (p, q)
}

/// Generate an RSA key pair with the default parameters
/// (two 512-bit primes, 512-bit private exponent)
pub fn generate_keypair() -> RsaKeyPair {
    KeyDeriver::default().derive(&mut thread_rng())
}
