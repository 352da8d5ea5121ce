// RSA Number Theory
// gcd, trial-division primality, and exact modular arithmetic

use std::num::NonZeroU64;

use num_bigint::BigUint;
use num_integer::{Integer, Roots};
use num_traits::{One, Zero};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Greatest common divisor, gcd(a, 0) == a
pub fn gcd(a: u64, b: u64) -> u64 {
    a.gcd(&b)
}

/// Deterministic primality test by trial division up to floor(sqrt(n)).
/// Only meant for the small primes this crate works with.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }

    let limit = n.sqrt();
    !(2..=limit).any(|i| n % i == 0)
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply algorithm
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }

    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// `mod_pow` over u64 values
pub fn mod_pow_u64(base: u64, exp: u64, modulus: NonZeroU64) -> u64 {
    let result = mod_pow(&from_u64(base), &from_u64(exp), &from_u64(modulus.get()));
    // result < modulus: at most one u64 digit, and zero has none
    result.iter_u64_digits().next().unwrap_or(0)
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd = gcd(a, b)
pub fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
    if b == 0 {
        return (a, 1, 0);
    }

    let (gcd, x1, y1) = extended_gcd(b, a % b);
    let x = y1;
    let y = x1 - (a / b) * y1;

    (gcd, x, y)
}

/// Compute modular inverse: a^(-1) mod m, in [1, m)
/// Returns None if the inverse doesn't exist
pub fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    if m < 2 {
        return None;
    }

    let m = i128::from(m);
    let (gcd, x, _) = extended_gcd(i128::from(a) % m, m);
    if gcd != 1 {
        return None;
    }

    u64::try_from(x.rem_euclid(m)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(6, 12), 6);
        assert_eq!(gcd(4, 12), 4);
        assert_eq!(gcd(5, 11), 1);
        assert_eq!(gcd(9, 0), 9);
        assert_eq!(gcd(0, 9), 9);
    }

    #[test]
    fn test_is_prime() {
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(is_prime(7));
        assert!(is_prime(31));
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(!is_prime(4));
        assert!(!is_prime(39));
        assert!(!is_prime(57));
        // perfect square of a prime needs the sqrt bound to be inclusive
        assert!(!is_prime(49));
        assert!(!is_prime(961));
    }

    fn nz(n: u64) -> NonZeroU64 {
        NonZeroU64::new(n).unwrap()
    }

    #[test]
    fn test_mod_pow() {
        // 3^5 mod 7 = 243 mod 7 = 5
        let result = mod_pow(&from_u64(3), &from_u64(5), &from_u64(7));
        assert_eq!(result, from_u64(5));

        assert_eq!(mod_pow_u64(9, 0, nz(5)), 1);
        assert_eq!(mod_pow_u64(9, 4, nz(1)), 0);
        assert_eq!(mod_pow_u64(10, 1, nz(5)), 0);
        assert_eq!(mod_pow_u64(u64::MAX - 1, 1, nz(u64::MAX)), u64::MAX - 1);
    }

    #[test]
    fn test_mod_pow_matches_full_power() {
        for base in 0u64..20 {
            for exp in 0u32..12 {
                let full = from_u64(base).pow(exp) % from_u64(527);
                assert_eq!(from_u64(mod_pow_u64(base, u64::from(exp), nz(527))), full);
            }
        }
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7, so inverse of 3 mod 7 is 5
        assert_eq!(mod_inverse(3, 7), Some(5));
        assert_eq!(mod_inverse(7, 480), Some(343));
        assert_eq!(mod_inverse(6, 9), None);
        assert_eq!(mod_inverse(3, 1), None);
    }

    #[test]
    fn test_extended_gcd_identity() {
        let (g, x, y) = extended_gcd(240, 46);
        assert_eq!(g, 2);
        assert_eq!(240 * x + 46 * y, g);
    }
}
