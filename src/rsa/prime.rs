// Random Prime Generation
// Rejection sampling of fixed-length candidates against Miller-Rabin

use rand::{CryptoRng, Rng};
use tracing::debug;

use super::bigint::{is_probable_prime, random_odd_with_bits, RsaBigInt};
use super::error::{RsaError, RsaResult};

/// Miller-Rabin rounds; error probability at most 4^-40 per prime
pub const DEFAULT_PRIMALITY_ROUNDS: u32 = 40;

/// Draws probable primes of an exact bit length
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimeGenerator {
    bits: usize,
    rounds: u32,
}

impl PrimeGenerator {
    /// Generator for primes with exactly `bits` significant bits
    pub fn new(bits: usize) -> RsaResult<Self> {
        if bits < 2 {
            return Err(RsaError::InvalidConfig(format!(
                "prime bit length must be at least 2, got {}",
                bits
            )));
        }

        Ok(Self {
            bits,
            rounds: DEFAULT_PRIMALITY_ROUNDS,
        })
    }

    /// For parameters already checked by the caller
    pub(crate) fn from_validated(bits: usize, rounds: u32) -> Self {
        Self {
            bits: bits.max(2),
            rounds: rounds.max(1),
        }
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds.max(1);
        self
    }

    /// Sample until a candidate passes the primality test.
    ///
    /// There is no attempt limit; termination is probabilistic.
    pub fn generate<R>(&self, rng: &mut R) -> RsaBigInt
    where
        R: Rng + CryptoRng + ?Sized,
    {
        self.generate_counted(rng).0
    }

    /// Like [`generate`](Self::generate), also returning how many candidates
    /// were drawn
    pub fn generate_counted<R>(&self, rng: &mut R) -> (RsaBigInt, u64)
    where
        R: Rng + CryptoRng + ?Sized,
    {
        let mut attempts = 0u64;

        loop {
            attempts += 1;
            let candidate = random_odd_with_bits(self.bits, rng);

            if self.is_prime(&candidate, rng) {
                debug!(bits = self.bits, attempts, "found probable prime");
                return (candidate, attempts);
            }
        }
    }

    /// The primality predicate used to accept candidates
    pub fn is_prime<R>(&self, candidate: &RsaBigInt, rng: &mut R) -> bool
    where
        R: Rng + CryptoRng + ?Sized,
    {
        is_probable_prime(candidate, self.rounds, rng)
    }
}
