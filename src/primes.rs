//! Probabilistic primality testing and random prime generation.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::TryCryptoRng;
use tracing::{debug, trace};

use crate::error::ElGamalError;
use crate::random::{random_below, random_bits};

/// Odd primes used for trial division before Miller-Rabin.
const SMALL_PRIMES: [u32; 53] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Miller-Rabin test with `rounds` random witnesses, preceded by trial division.
///
/// A composite passes with probability at most `4^-rounds`.
///
/// # Errors
/// Returns an error only if the RNG fails while drawing witnesses
pub fn is_probable_prime<R: TryCryptoRng + ?Sized>(
    n: &BigUint,
    rounds: usize,
    rng: &mut R,
) -> Result<bool, ElGamalError> {
    let two = BigUint::from(2u32);
    if n < &two {
        return Ok(false);
    }
    if n == &two {
        return Ok(true);
    }
    if n.is_even() {
        return Ok(false);
    }
    for &p in SMALL_PRIMES.iter() {
        let p = BigUint::from(p);
        if n == &p {
            return Ok(true);
        }
        if (n % &p).is_zero() {
            return Ok(false);
        }
    }

    // n - 1 = d * 2^s with d odd
    let one = BigUint::one();
    let n_minus_one = n - &one;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    // witnesses are drawn from [2, n - 2]
    let witness_span = n - 3u32;
    'witness: for _ in 0..rounds {
        let a = random_below(&witness_span, rng)? + &two;
        let mut x = a.modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
            if x == one {
                return Ok(false);
            }
        }
        return Ok(false);
    }

    Ok(true)
}

/// Samples a prime of exactly `bits` bits by rejection.
///
/// Candidates come from [`random_bits`], so the two top bits are set; the low
/// bit is forced to 1.
///
/// # Errors
/// Returns an error if `bits <= 2`, the RNG fails, or no prime is found within
/// `max_attempts` candidates
pub fn random_prime<R: TryCryptoRng + ?Sized>(
    bits: usize,
    rounds: usize,
    max_attempts: usize,
    rng: &mut R,
) -> Result<BigUint, ElGamalError> {
    for attempt in 1..=max_attempts {
        let mut bytes = random_bits(bits, rng)?;
        if let Some(last) = bytes.last_mut() {
            *last |= 1;
        }
        let candidate = BigUint::from_bytes_be(&bytes);

        if is_probable_prime(&candidate, rounds, rng)? {
            debug!(bits, attempt, "found random prime");
            return Ok(candidate);
        }
        trace!(bits, attempt, "rejected prime candidate");
    }

    Err(ElGamalError::SearchExhausted {
        what: "prime",
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn naive_is_prime(n: u64) -> bool {
        if n < 2 {
            return false;
        }
        let mut i = 2;
        while i * i <= n {
            if n % i == 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    #[test]
    fn test_matches_trial_division_for_small_numbers() {
        let mut rng = StdRng::seed_from_u64(5);
        for n in 0u64..3000 {
            let got = is_probable_prime(&BigUint::from(n), 16, &mut rng).unwrap();
            assert_eq!(got, naive_is_prime(n), "primality mismatch for {}", n);
        }
    }

    #[test]
    fn test_known_large_values() {
        let mut rng = StdRng::seed_from_u64(9);
        // 2^127 - 1 is a Mersenne prime
        let m127 = (BigUint::one() << 127u32) - 1u32;
        assert!(is_probable_prime(&m127, 32, &mut rng).unwrap());

        // Carmichael number 561 = 3 * 11 * 17 and a large semiprime
        assert!(!is_probable_prime(&BigUint::from(561u32), 32, &mut rng).unwrap());
        let semiprime = &m127 * BigUint::from(1_000_003u32);
        assert!(!is_probable_prime(&semiprime, 32, &mut rng).unwrap());
    }

    #[test]
    fn test_random_prime_bit_length() {
        let mut rng = StdRng::seed_from_u64(13);
        for bits in [3usize, 8, 10, 64, 128] {
            let p = random_prime(bits, 32, 100_000, &mut rng).unwrap();
            assert_eq!(p.bits() as usize, bits);
            assert!(is_probable_prime(&p, 32, &mut rng).unwrap());
        }
    }

    #[test]
    fn test_random_prime_reports_exhaustion() {
        let mut rng = StdRng::seed_from_u64(13);
        let result = random_prime(64, 32, 0, &mut rng);
        assert_eq!(
            result,
            Err(ElGamalError::SearchExhausted {
                what: "prime",
                attempts: 0
            })
        );
    }
}
