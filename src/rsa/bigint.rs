// RSA Big Integer Operations
// Wrapper around num-bigint for RSA-specific operations

use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::{CryptoRng, Rng};
use zeroize::Zeroizing;

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Odd primes used to discard most candidates before Miller-Rabin
const SMALL_PRIMES: [u32; 53] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181,
    191, 193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from bytes (big-endian)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Convert big integer to bytes (big-endian, minimal length)
pub fn to_bytes(n: &RsaBigInt) -> Vec<u8> {
    n.to_bytes_be()
}

/// Modular exponentiation: base^exp mod modulus
///
/// Returns `None` for a zero modulus, where the result is undefined.
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> Option<RsaBigInt> {
    if modulus.is_zero() {
        return None;
    }
    if modulus.is_one() {
        return Some(RsaBigInt::zero());
    }

    Some(base.modpow(exp, modulus))
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd = gcd(a, b)
///
/// Inputs are often secret (d, phi), so every signed intermediate is wiped.
pub fn extended_gcd(a: &RsaBigInt, b: &RsaBigInt) -> (RsaBigInt, BigInt, BigInt) {
    let mut old_r = Zeroizing::new(BigInt::from(a.clone()));
    let mut r = Zeroizing::new(BigInt::from(b.clone()));
    let (mut old_x, mut x) = (Zeroizing::new(BigInt::one()), Zeroizing::new(BigInt::zero()));
    let (mut old_y, mut y) = (Zeroizing::new(BigInt::zero()), Zeroizing::new(BigInt::one()));

    while !r.is_zero() {
        let quotient = Zeroizing::new(&*old_r / &*r);

        let next_r = Zeroizing::new(&*old_r - &*quotient * &*r);
        old_r = std::mem::replace(&mut r, next_r);

        let next_x = Zeroizing::new(&*old_x - &*quotient * &*x);
        old_x = std::mem::replace(&mut x, next_x);

        let next_y = Zeroizing::new(&*old_y - &*quotient * &*y);
        old_y = std::mem::replace(&mut y, next_y);
    }

    // Remainders stay non-negative for unsigned inputs
    let gcd = old_r.to_biguint().unwrap_or_default();
    (
        gcd,
        std::mem::take(&mut *old_x),
        std::mem::take(&mut *old_y),
    )
}

/// Compute modular inverse: a^(-1) mod m
/// Returns None if inverse doesn't exist
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Option<RsaBigInt> {
    if m.is_zero() {
        return None;
    }

    let (gcd, x, y) = extended_gcd(a, m);
    let (x, _y) = (Zeroizing::new(x), Zeroizing::new(y));
    if !gcd.is_one() {
        // Inverse doesn't exist
        return None;
    }

    let modulus = Zeroizing::new(BigInt::from(m.clone()));
    let reduced = Zeroizing::new(x.mod_floor(&modulus));
    reduced.to_biguint()
}

/// Greatest common divisor
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a.gcd(b)
}

/// Miller-Rabin primality test
/// Returns true if n is probably prime
pub fn is_probable_prime<R>(n: &RsaBigInt, iterations: u32, rng: &mut R) -> bool
where
    R: Rng + ?Sized,
{
    let two = RsaBigInt::from(2u8);
    if n < &two {
        return false;
    }
    if n == &two {
        return true;
    }
    if n.is_even() {
        return false;
    }

    for &p in SMALL_PRIMES.iter() {
        let p = RsaBigInt::from(p);
        if n == &p {
            return true;
        }
        if (n % &p).is_zero() {
            return false;
        }
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u32;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    // Witness loop
    let n_minus_two = n - &two;

    'witness: for _ in 0..iterations {
        // Pick random witness a in [2, n-2)
        let a = rng.gen_biguint_range(&two, &n_minus_two);

        // Compute x = a^d mod n
        let mut x = a.modpow(&d, n);

        if x.is_one() || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }

        // Composite
        return false;
    }

    // Probably prime
    true
}

/// Sample a uniformly random integer in [0, 2^bits)
pub fn random_bits<R>(bits: usize, rng: &mut R) -> RsaBigInt
where
    R: Rng + CryptoRng + ?Sized,
{
    rng.gen_biguint(bits)
}

/// Sample a uniformly random odd integer with exactly `bits` significant bits
pub fn random_odd_with_bits<R>(bits: usize, rng: &mut R) -> RsaBigInt
where
    R: Rng + CryptoRng + ?Sized,
{
    let top = RsaBigInt::one() << bits.saturating_sub(1);
    random_bits(bits, rng) | top | RsaBigInt::one()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_mod_pow() {
        // 3^5 mod 7 = 243 mod 7 = 5
        let base = from_u64(3);
        let exp = from_u64(5);
        let modulus = from_u64(7);
        let result = mod_pow(&base, &exp, &modulus).unwrap();
        assert_eq!(result, from_u64(5));
    }

    #[test]
    fn test_mod_pow_degenerate_modulus() {
        assert_eq!(mod_pow(&from_u64(3), &from_u64(5), &from_u64(0)), None);
        assert_eq!(mod_pow(&from_u64(3), &from_u64(5), &from_u64(1)), Some(from_u64(0)));
    }

    #[test]
    fn test_extended_gcd() {
        let (g, x, y) = extended_gcd(&from_u64(240), &from_u64(46));
        assert_eq!(g, from_u64(2));
        assert_eq!(BigInt::from(240) * x + BigInt::from(46) * y, BigInt::from(2));
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7, so inverse of 3 mod 7 is 5
        let a = from_u64(3);
        let m = from_u64(7);
        let inv = mod_inverse(&a, &m).unwrap();
        assert_eq!(inv, from_u64(5));

        // Verify: 3 * 5 = 15 ≡ 1 (mod 7)
        assert_eq!((a * inv) % m, from_u64(1));
    }

    #[test]
    fn test_mod_inverse_of_value_larger_than_modulus() {
        // 17 ≡ 3 (mod 7)
        assert_eq!(mod_inverse(&from_u64(17), &from_u64(7)), Some(from_u64(5)));
    }

    #[test]
    fn test_mod_inverse_of_secret_sized_values() {
        let mut rng = StdRng::seed_from_u64(17);
        let m = (RsaBigInt::one() << 1023usize) - 1u32;
        let mut found = 0;

        while found < 5 {
            let a = rng.gen_biguint(512);
            if let Some(inv) = mod_inverse(&a, &m) {
                assert!(inv < m);
                assert!(((a * &inv) % &m).is_one());
                found += 1;
            }
        }
    }

    #[test]
    fn test_extended_gcd_coefficients_survive_wiping() {
        let (g, x, y) = extended_gcd(&from_u64(3233), &from_u64(3120));
        assert!(g.is_one());
        assert!(!x.is_zero() && !y.is_zero());
        assert_eq!(BigInt::from(3233) * x + BigInt::from(3120) * y, BigInt::one());
    }

    #[test]
    fn test_mod_inverse_missing() {
        assert_eq!(mod_inverse(&from_u64(6), &from_u64(9)), None);
        assert_eq!(mod_inverse(&from_u64(6), &from_u64(0)), None);
    }

    #[test]
    fn test_is_probable_prime() {
        let mut rng = StdRng::seed_from_u64(7);
        // 2 is prime
        assert!(is_probable_prime(&from_u64(2), 5, &mut rng));
        // 3 is prime
        assert!(is_probable_prime(&from_u64(3), 5, &mut rng));
        // 7 is prime
        assert!(is_probable_prime(&from_u64(7), 5, &mut rng));
        // 4 is not prime
        assert!(!is_probable_prime(&from_u64(4), 5, &mut rng));
        // 9 is not prime
        assert!(!is_probable_prime(&from_u64(9), 5, &mut rng));
        assert!(!is_probable_prime(&from_u64(0), 5, &mut rng));
        assert!(!is_probable_prime(&from_u64(1), 5, &mut rng));
    }

    #[test]
    fn test_is_probable_prime_large() {
        let mut rng = StdRng::seed_from_u64(11);
        // 2^61 - 1 is a Mersenne prime
        let m61 = (RsaBigInt::one() << 61usize) - 1u32;
        assert!(is_probable_prime(&m61, 40, &mut rng));
        // Carmichael number 561 = 3 * 11 * 17
        assert!(!is_probable_prime(&from_u64(561), 40, &mut rng));
        // Product of two primes above the trial division table
        assert!(!is_probable_prime(&from_u64(65_537 * 65_539), 40, &mut rng));
    }

    #[test]
    fn test_random_odd_with_bits() {
        let mut rng = StdRng::seed_from_u64(3);
        for bits in [2usize, 8, 64, 512] {
            let v = random_odd_with_bits(bits, &mut rng);
            assert_eq!(v.bits(), bits);
            assert!(v.is_odd());
        }
    }
}
