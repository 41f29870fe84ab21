//! Polynomial (Shamir) secret sharing over the exponent field.
//!
//! A secret `s` becomes the constant term of a random polynomial `f` of degree
//! `t`; share `i` is `(i, f(i))` for `i` in `1..=n`. Any `t + 1` shares
//! determine `f` and hence `s = f(0)`, while `t` or fewer reveal nothing.

use std::fmt;

use num_bigint::BigUint;
use rand::TryCryptoRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::ElGamalError;
use crate::field::{Scalar, ScalarField};

/// One evaluation `(id, f(id))` of the sharing polynomial.
#[derive(Clone, PartialEq, Eq)]
pub struct Share {
    pub id: usize,
    pub value: Scalar,
}

impl fmt::Debug for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Share")
            .field("id", &self.id)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl Zeroize for Share {
    fn zeroize(&mut self) {
        self.value.zeroize();
    }
}

/// Sharing polynomial held by the dealer; coefficients are wiped on drop.
struct Polynomial {
    coeffs: Vec<Scalar>,
}

impl Polynomial {
    fn evaluate(&self, x: &Scalar, field: &ScalarField) -> Scalar {
        // Horner's rule from the highest coefficient down
        self.coeffs
            .iter()
            .rev()
            .fold(field.zero(), |acc, c| field.add(&field.mul(&acc, x), c))
    }
}

impl Zeroize for Polynomial {
    fn zeroize(&mut self) {
        self.coeffs.iter_mut().for_each(|c| c.zeroize());
        self.coeffs.clear();
    }
}

impl Drop for Polynomial {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for Polynomial {}

/// Splits `secret` into `n` shares so that any `t + 1` of them recover it.
///
/// # Arguments
/// * `secret` - The value to share (the polynomial's constant term)
/// * `t` - Degree of the sharing polynomial
/// * `n` - Number of shares, with ids `1..=n`
/// * `field` - The field the polynomial lives in
/// * `rng` - A cryptographic random number generator
///
/// # Errors
/// Returns an error if `n == 0`, `t >= n`, `n` does not fit below the field
/// modulus, or the RNG fails
pub fn split<R: TryCryptoRng + ?Sized>(
    secret: &Scalar,
    t: usize,
    n: usize,
    field: &ScalarField,
    rng: &mut R,
) -> Result<Vec<Share>, ElGamalError> {
    if n == 0 {
        return Err(ElGamalError::InvalidArgument(
            "number of shares must be at least 1".to_string(),
        ));
    }
    if t >= n {
        return Err(ElGamalError::InvalidArgument(format!(
            "threshold ({}) must be < number of shares ({})",
            t, n
        )));
    }
    if &BigUint::from(n) >= field.modulus() {
        return Err(ElGamalError::InvalidArgument(format!(
            "number of shares ({}) must be < field modulus ({})",
            n,
            field.modulus()
        )));
    }

    let mut coeffs = Vec::with_capacity(t + 1);
    coeffs.push(field.element(secret.value().clone()));
    for _ in 0..t {
        coeffs.push(field.rand(rng)?);
    }
    let poly = Polynomial { coeffs };

    Ok((1..=n)
        .map(|id| Share {
            id,
            value: poly.evaluate(&Scalar::from_u64(id as u64), field),
        })
        .collect())
}

/// Lagrange basis coefficient `L_index(0)` for the interpolation nodes `ids`.
///
/// `L_i(0) = prod_{j != i} x_j / (x_j - x_i)`, computed in `field`.
///
/// # Errors
/// Returns an error if `index` is out of range or two nodes coincide
pub fn lagrange_basis(
    index: usize,
    ids: &[usize],
    field: &ScalarField,
) -> Result<Scalar, ElGamalError> {
    let xi = ids.get(index).ok_or_else(|| {
        ElGamalError::InvalidArgument(format!(
            "index ({}) must be < number of nodes ({})",
            index,
            ids.len()
        ))
    })?;
    let xi = field.element(BigUint::from(*xi));

    let mut num = field.one();
    let mut den = field.one();
    for (j, xj) in ids.iter().enumerate() {
        if j == index {
            continue;
        }
        let xj = field.element(BigUint::from(*xj));
        num = field.mul(&num, &xj);
        den = field.mul(&den, &field.sub(&xj, &xi));
    }

    let den_inv = field.inv(&den).map_err(|_| {
        ElGamalError::InvalidArgument(format!(
            "interpolation nodes must be distinct modulo {}",
            field.modulus()
        ))
    })?;
    Ok(field.mul(&num, &den_inv))
}

/// Recovers the secret directly by interpolating the shares at zero.
///
/// Too few shares yield a wrong value rather than an error.
///
/// # Errors
/// Returns an error if `shares` is empty or contains duplicate ids
pub fn recover(shares: &[Share], field: &ScalarField) -> Result<Scalar, ElGamalError> {
    if shares.is_empty() {
        return Err(ElGamalError::InvalidArgument(
            "at least one share is required".to_string(),
        ));
    }
    let ids: Vec<usize> = shares.iter().map(|s| s.id).collect();

    let mut secret = field.zero();
    for (i, share) in shares.iter().enumerate() {
        let basis = lagrange_basis(i, &ids, field)?;
        secret = field.add(&secret, &field.mul(&share.value, &basis));
    }
    Ok(secret)
}
