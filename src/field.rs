//! Prime fields over a runtime modulus.
//!
//! The scheme works in two structurally identical but unrelated rings: Z/qZ
//! holds exponents (private key, polynomial coefficients, Lagrange weights)
//! and Z/pZ holds group elements (public key, ciphertext `R`, decryption share
//! values). They are kept apart by a phantom kind parameter, so a
//! [`GroupElement`] can never be fed where a [`Scalar`] is expected.

use std::fmt;
use std::marker::PhantomData;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::TryCryptoRng;
use zeroize::Zeroize;

use crate::error::ElGamalError;
use crate::random::random_below;

/// Kind marker for Z/qZ, the exponent field of order `q`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exponent {}

/// Kind marker for Z/pZ, the residues the Schnorr subgroup lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Residue {}

/// An integer tagged with the ring it belongs to.
///
/// The value is not necessarily reduced; every field operation reduces its
/// result.
pub struct FieldElement<K> {
    value: BigUint,
    _kind: PhantomData<K>,
}

pub type Scalar = FieldElement<Exponent>;
pub type GroupElement = FieldElement<Residue>;

impl<K> FieldElement<K> {
    pub fn new(value: BigUint) -> Self {
        Self {
            value,
            _kind: PhantomData,
        }
    }

    pub fn from_u64(value: u64) -> Self {
        Self::new(BigUint::from(value))
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn into_value(self) -> BigUint {
        self.value
    }

    /// Minimal big-endian encoding, as fed to the key derivation hash.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        if self.value.is_zero() {
            return Vec::new();
        }
        self.value.to_bytes_be()
    }
}

// Manual impls: derives would put bounds on the uninhabited kind markers.
impl<K> Clone for FieldElement<K> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<K> PartialEq for FieldElement<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K> Eq for FieldElement<K> {}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar({})", self.value)
    }
}

impl fmt::Debug for GroupElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GroupElement({})", self.value)
    }
}

impl<K> Zeroize for FieldElement<K> {
    fn zeroize(&mut self) {
        // BigUint does not expose its limbs, so overwrite with zero
        self.value.set_zero();
    }
}

/// The prime field Z/mZ for a runtime modulus `m`.
pub struct Field<K> {
    modulus: BigUint,
    _kind: PhantomData<K>,
}

pub type ScalarField = Field<Exponent>;
pub type GroupField = Field<Residue>;

impl<K> Field<K> {
    /// Creates the field over `modulus`.
    ///
    /// # Errors
    /// Returns an error if the modulus is smaller than 2
    pub fn new(modulus: &BigUint) -> Result<Self, ElGamalError> {
        if modulus < &BigUint::from(2u32) {
            return Err(ElGamalError::Field(format!(
                "modulus must be at least 2, got {}",
                modulus
            )));
        }
        Ok(Self {
            modulus: modulus.clone(),
            _kind: PhantomData,
        })
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    pub fn zero(&self) -> FieldElement<K> {
        FieldElement::new(BigUint::zero())
    }

    pub fn one(&self) -> FieldElement<K> {
        FieldElement::new(BigUint::one())
    }

    /// Reduces an arbitrary integer into the field.
    pub fn element(&self, value: BigUint) -> FieldElement<K> {
        FieldElement::new(value % &self.modulus)
    }

    /// Uniformly random element in `[0, modulus)`.
    pub fn rand<R: TryCryptoRng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<FieldElement<K>, ElGamalError> {
        Ok(FieldElement::new(random_below(&self.modulus, rng)?))
    }

    pub fn add(&self, a: &FieldElement<K>, b: &FieldElement<K>) -> FieldElement<K> {
        FieldElement::new((&a.value + &b.value) % &self.modulus)
    }

    pub fn sub(&self, a: &FieldElement<K>, b: &FieldElement<K>) -> FieldElement<K> {
        let a = &a.value % &self.modulus;
        let b = &b.value % &self.modulus;
        FieldElement::new((a + &self.modulus - b) % &self.modulus)
    }

    pub fn mul(&self, a: &FieldElement<K>, b: &FieldElement<K>) -> FieldElement<K> {
        FieldElement::new((&a.value * &b.value) % &self.modulus)
    }

    /// Multiplicative inverse via Fermat's little theorem.
    ///
    /// # Errors
    /// Returns an error if `a` is zero in the field
    pub fn inv(&self, a: &FieldElement<K>) -> Result<FieldElement<K>, ElGamalError> {
        let reduced = &a.value % &self.modulus;
        if reduced.is_zero() {
            return Err(ElGamalError::Field(
                "zero has no multiplicative inverse".to_string(),
            ));
        }
        let exponent = &self.modulus - 2u32;
        Ok(FieldElement::new(reduced.modpow(&exponent, &self.modulus)))
    }

    pub fn contains(&self, a: &FieldElement<K>) -> bool {
        a.value < self.modulus
    }
}

impl GroupField {
    /// `base^exponent mod p`. The exponent is a scalar of the subgroup order
    /// field; the result stays in Z/pZ.
    pub fn exp(&self, base: &GroupElement, exponent: &Scalar) -> GroupElement {
        GroupElement::new(base.value.modpow(&exponent.value, &self.modulus))
    }

    /// Raises to a raw integer, used where the exponent is not an element of
    /// the subgroup order field (e.g. the cofactor `(p - 1) / q`).
    pub fn pow(&self, base: &GroupElement, exponent: &BigUint) -> GroupElement {
        GroupElement::new(base.value.modpow(exponent, &self.modulus))
    }
}

impl<K> fmt::Debug for Field<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF({})", self.modulus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn zq() -> ScalarField {
        ScalarField::new(&BigUint::from(11u32)).unwrap()
    }

    fn zp() -> GroupField {
        GroupField::new(&BigUint::from(23u32)).unwrap()
    }

    #[test]
    fn test_field_construction() {
        assert_eq!(zp().modulus(), &BigUint::from(23u32));
        assert!(matches!(
            ScalarField::new(&BigUint::from(1u32)),
            Err(ElGamalError::Field(_))
        ));
        assert!(GroupField::new(&BigUint::zero()).is_err());
    }

    #[test]
    fn test_scalar_arithmetic() {
        let f = zq();
        let a = Scalar::from_u64(7);
        let b = Scalar::from_u64(9);
        assert_eq!(f.add(&a, &b), Scalar::from_u64(5));
        assert_eq!(f.sub(&a, &b), Scalar::from_u64(9));
        assert_eq!(f.mul(&a, &b), Scalar::from_u64(8));

        let inv = f.inv(&a).unwrap();
        assert_eq!(f.mul(&a, &inv), f.one());
        assert!(f.inv(&Scalar::from_u64(22)).is_err());
    }

    #[test]
    fn test_group_exponentiation() {
        let f = zp();
        let g = GroupElement::from_u64(4);
        // 4 generates the order-11 subgroup of (Z/23Z)*
        assert_eq!(f.exp(&g, &Scalar::from_u64(11)), f.one());
        assert_eq!(f.exp(&g, &Scalar::from_u64(2)), GroupElement::from_u64(16));
        assert_eq!(f.pow(&g, &BigUint::from(2u32)), GroupElement::from_u64(16));
        assert_eq!(
            f.mul(&GroupElement::from_u64(12), &GroupElement::from_u64(2)),
            GroupElement::from_u64(1)
        );
    }

    #[test]
    fn test_rand_is_in_range() {
        let f = zq();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert!(f.contains(&f.rand(&mut rng).unwrap()));
        }
    }

    #[test]
    fn test_element_encoding_and_zeroize() {
        let mut e = Scalar::from_u64(0x0102);
        assert_eq!(e.to_bytes_be(), vec![0x01, 0x02]);
        e.zeroize();
        assert!(e.value().is_zero());
        assert!(e.to_bytes_be().is_empty());
    }
}
