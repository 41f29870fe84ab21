//! Schnorr group generation: a prime-order `q` subgroup of (Z/pZ)*.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::TryCryptoRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ElGamalError;
use crate::field::{GroupElement, GroupField, ScalarField};
use crate::params::{GroupParams, SearchLimits};
use crate::primes::{is_probable_prime, random_prime};
use crate::random::{random_below, random_bits};
use crate::wire::biguint_bytes;

/// A subgroup of order `q` inside the multiplicative group modulo `p`.
///
/// Invariants: `p` and `q` are prime, `q | p - 1`, `g^q = 1 mod p`, `g != 1`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchnorrGroup {
    /// Prime modulus of (Z/pZ)*
    #[serde(with = "biguint_bytes")]
    pub p: BigUint,
    /// Prime order of the subgroup
    #[serde(with = "biguint_bytes")]
    pub q: BigUint,
    /// Generator of the subgroup
    #[serde(with = "biguint_bytes")]
    pub g: BigUint,
}

impl SchnorrGroup {
    /// Z/pZ, where group elements live.
    pub fn group_field(&self) -> Result<GroupField, ElGamalError> {
        GroupField::new(&self.p)
    }

    /// Z/qZ, where exponents live.
    pub fn scalar_field(&self) -> Result<ScalarField, ElGamalError> {
        ScalarField::new(&self.q)
    }

    pub fn generator(&self) -> GroupElement {
        GroupElement::new(self.g.clone())
    }

    /// Re-checks every structural invariant, e.g. after deserialization.
    ///
    /// # Errors
    /// Returns an error if any invariant fails or the RNG fails
    pub fn validate<R: TryCryptoRng + ?Sized>(
        &self,
        rounds: usize,
        rng: &mut R,
    ) -> Result<(), ElGamalError> {
        if !is_probable_prime(&self.q, rounds, rng)? {
            return Err(ElGamalError::InvalidArgument("q is not prime".to_string()));
        }
        if !is_probable_prime(&self.p, rounds, rng)? {
            return Err(ElGamalError::InvalidArgument("p is not prime".to_string()));
        }
        if !(&self.p % &self.q).is_one() {
            return Err(ElGamalError::InvalidArgument(
                "q does not divide p - 1".to_string(),
            ));
        }
        let g = &self.g % &self.p;
        if g.is_zero() || g.is_one() {
            return Err(ElGamalError::InvalidArgument(
                "g must not be 0 or 1 mod p".to_string(),
            ));
        }
        if !g.modpow(&self.q, &self.p).is_one() {
            return Err(ElGamalError::InvalidArgument(
                "g does not generate the order-q subgroup".to_string(),
            ));
        }
        Ok(())
    }
}

/// Generates a Schnorr group with a `p_bits`-bit modulus and `q_bits`-bit
/// subgroup order, using default search limits.
///
/// # Errors
/// Returns an error if `q_bits >= p_bits`, a bit length is too small to
/// sample, or the RNG fails
pub fn generate_schnorr_group<R: TryCryptoRng + ?Sized>(
    p_bits: usize,
    q_bits: usize,
    rng: &mut R,
) -> Result<SchnorrGroup, ElGamalError> {
    let params = GroupParams::new(p_bits, q_bits)?;
    generate_schnorr_group_with_limits(&params, &SearchLimits::default(), rng)
}

/// Generates a Schnorr group, bounding each rejection loop by `limits`.
///
/// 1. `q` is a random `q_bits`-bit prime.
/// 2. `r` is resampled until `p = q * r + 1` is prime. Both `q` and `r` have
///    their top two bits set, so `p` has exactly `p_bits` bits.
/// 3. `g = h^((p - 1) / q)` for random `h` in `[2, p)`, until `g != 1`. Since
///    `q` is prime any such `g` generates the whole subgroup.
///
/// # Errors
/// Returns an error on invalid bit lengths, RNG failure, or an exhausted loop
pub fn generate_schnorr_group_with_limits<R: TryCryptoRng + ?Sized>(
    params: &GroupParams,
    limits: &SearchLimits,
    rng: &mut R,
) -> Result<SchnorrGroup, ElGamalError> {
    if params.q_bits >= params.p_bits {
        return Err(ElGamalError::InvalidArgument(format!(
            "q_bits ({}) must be < p_bits ({})",
            params.q_bits, params.p_bits
        )));
    }

    let q = random_prime(
        params.q_bits,
        limits.primality_rounds,
        limits.prime_attempts,
        rng,
    )?;

    let p = find_modulus(&q, params.r_bits(), limits, rng)?;
    let g = find_generator(&p, &q, limits, rng)?;

    debug!(
        p_bits = params.p_bits,
        q_bits = params.q_bits,
        "generated Schnorr group"
    );
    Ok(SchnorrGroup { p, q, g })
}

fn find_modulus<R: TryCryptoRng + ?Sized>(
    q: &BigUint,
    r_bits: usize,
    limits: &SearchLimits,
    rng: &mut R,
) -> Result<BigUint, ElGamalError> {
    for attempt in 1..=limits.prime_attempts {
        let r = BigUint::from_bytes_be(&random_bits(r_bits, rng)?);
        // q is odd, so an odd r gives an even p
        if r.is_odd() {
            trace!(attempt, "skipping odd cofactor");
            continue;
        }
        let p = q * r + 1u32;
        if is_probable_prime(&p, limits.primality_rounds, rng)? {
            debug!(attempt, "found prime modulus p = q * r + 1");
            return Ok(p);
        }
        trace!(attempt, "rejected modulus candidate");
    }

    Err(ElGamalError::SearchExhausted {
        what: "modulus",
        attempts: limits.prime_attempts,
    })
}

fn find_generator<R: TryCryptoRng + ?Sized>(
    p: &BigUint,
    q: &BigUint,
    limits: &SearchLimits,
    rng: &mut R,
) -> Result<BigUint, ElGamalError> {
    let zp = GroupField::new(p)?;
    let cofactor = (p - 1u32) / q;
    // h is drawn from [2, p)
    let span = p - 2u32;
    let two = BigUint::from(2u32);

    for attempt in 1..=limits.generator_attempts {
        let h = GroupElement::new(random_below(&span, rng)? + &two);
        let g = zp.pow(&h, &cofactor);
        if !g.value().is_one() {
            debug!(attempt, "found subgroup generator");
            return Ok(g.into_value());
        }
        trace!(attempt, "rejected generator candidate");
    }

    Err(ElGamalError::SearchExhausted {
        what: "generator",
        attempts: limits.generator_attempts,
    })
}
