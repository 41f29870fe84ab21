//! Randomness primitives built on top of a fallible cryptographic RNG.
//!
//! Every routine here takes an injected `TryCryptoRng`. Production callers pass
//! `rand::rngs::OsRng`, whose failures surface as [`ElGamalError::Randomness`];
//! tests pass a seeded `StdRng`.

use num_bigint::BigUint;
use rand::TryCryptoRng;

use crate::error::ElGamalError;

/// Fills `buf` from the RNG, mapping any failure to a randomness error.
pub(crate) fn fill<R: TryCryptoRng + ?Sized>(
    rng: &mut R,
    buf: &mut [u8],
) -> Result<(), ElGamalError> {
    rng.try_fill_bytes(buf)
        .map_err(|e| ElGamalError::Randomness(format!("{:?}", e)))
}

/// Returns `bits` random bits, big-endian, in `ceil(bits / 8)` bytes.
///
/// The two most significant requested bits are forced to 1, so the product
/// of two such values has exactly the sum of their bit lengths. Padding bits
/// above the requested count (in byte 0) are forced to 0.
///
/// # Errors
/// Returns an error if `bits <= 2` or if the RNG fails
pub fn random_bits<R: TryCryptoRng + ?Sized>(
    bits: usize,
    rng: &mut R,
) -> Result<Vec<u8>, ElGamalError> {
    if bits <= 2 {
        return Err(ElGamalError::InvalidArgument(format!(
            "bits must be > 2, got {}",
            bits
        )));
    }

    let mut out = vec![0u8; bits.div_ceil(8)];
    fill(rng, &mut out)?;

    let padding = 8 * out.len() - bits;
    out[0] &= 0xFF >> padding;
    out[0] |= 0x80 >> padding;
    // with seven padding bits the second requested bit opens byte 1
    if padding == 7 {
        out[1] |= 0x80;
    } else {
        out[0] |= 0x40 >> padding;
    }

    Ok(out)
}

/// Samples an integer uniformly from `[0, bound)` by masking and rejecting.
///
/// # Errors
/// Returns an error if `bound` is zero or if the RNG fails
pub fn random_below<R: TryCryptoRng + ?Sized>(
    bound: &BigUint,
    rng: &mut R,
) -> Result<BigUint, ElGamalError> {
    let bits = bound.bits() as usize;
    if bits == 0 {
        return Err(ElGamalError::InvalidArgument(
            "sampling bound must be positive".to_string(),
        ));
    }

    let mut buf = vec![0u8; bits.div_ceil(8)];
    let padding = 8 * buf.len() - bits;
    // Each draw lands below the bound with probability > 1/2.
    loop {
        fill(rng, &mut buf)?;
        buf[0] &= 0xFF >> padding;
        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < bound {
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_bits_lengths() {
        let mut rng = StdRng::seed_from_u64(7);

        let out = random_bits(24, &mut rng).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0] & 0xC0, 0xC0);

        let out = random_bits(14, &mut rng).unwrap();
        assert_eq!(out.len(), 2);
        // two padding bits above the 14 requested ones
        assert_eq!(out[0] & 0xC0, 0);
        // the two leading requested bits
        assert_eq!(out[0] & 0x30, 0x30);
    }

    #[test]
    fn test_random_bits_exact_bit_length() {
        let mut rng = StdRng::seed_from_u64(11);
        for bits in 3..80 {
            let out = random_bits(bits, &mut rng).unwrap();
            assert_eq!(out.len(), bits.div_ceil(8));
            let value = BigUint::from_bytes_be(&out);
            assert_eq!(value.bits() as usize, bits);
            assert!(value.bit((bits - 2) as u64), "second bit unset for {}", bits);
        }
    }

    #[test]
    fn test_random_bits_one_past_a_byte_boundary() {
        let mut rng = StdRng::seed_from_u64(12);
        for bits in [9usize, 17, 65] {
            for _ in 0..200 {
                let out = random_bits(bits, &mut rng).unwrap();
                assert_eq!(out[0], 0x01);
                assert_eq!(out[1] & 0x80, 0x80);
            }
        }
    }

    #[test]
    fn test_random_bits_rejects_small_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            random_bits(2, &mut rng),
            Err(ElGamalError::InvalidArgument(_))
        ));
        assert!(random_bits(0, &mut rng).is_err());
    }

    #[test]
    fn test_random_below_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let bound = BigUint::from(23u32);
        for _ in 0..200 {
            assert!(random_below(&bound, &mut rng).unwrap() < bound);
        }
        assert!(random_below(&BigUint::from(0u32), &mut rng).is_err());
    }
}
