//! Threshold key generation, run by a single trusted dealer.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use rand::TryCryptoRng;
use serde::{Deserialize, Serialize};
use tracing::info;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::ElGamalError;
use crate::field::{GroupElement, GroupField, Scalar, ScalarField};
use crate::params::KeyGenParams;
use crate::schnorr::{generate_schnorr_group_with_limits, SchnorrGroup};
use crate::sharing::{self, Share};
use crate::wire::{biguint_bytes, element_bytes};

/// Public key of the distributed ElGamal cryptosystem: the group plus
/// `y = g^x mod p`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    pub group: SchnorrGroup,
    #[serde(with = "biguint_bytes")]
    pub y: BigUint,
}

impl PublicKey {
    /// Z/pZ, over which all group operations happen.
    pub fn group_field(&self) -> Result<GroupField, ElGamalError> {
        self.group.group_field()
    }

    /// Z/qZ, over which exponents and share polynomials live.
    pub fn scalar_field(&self) -> Result<ScalarField, ElGamalError> {
        self.group.scalar_field()
    }

    pub fn y(&self) -> GroupElement {
        GroupElement::new(self.y.clone())
    }

    /// Checks the group invariants and that `y` lies in the subgroup.
    ///
    /// # Errors
    /// Returns an error if the key is malformed or the RNG fails
    pub fn validate<R: TryCryptoRng + ?Sized>(
        &self,
        rounds: usize,
        rng: &mut R,
    ) -> Result<(), ElGamalError> {
        self.group.validate(rounds, rng)?;
        let zp = self.group_field()?;
        let y = self.y();
        if !zp.contains(&y) || y.value().is_zero() {
            return Err(ElGamalError::InvalidArgument(
                "y must be a non-zero residue mod p".to_string(),
            ));
        }
        if zp.pow(&y, &self.group.q) != zp.one() {
            return Err(ElGamalError::InvalidArgument(
                "y is not in the order-q subgroup".to_string(),
            ));
        }
        Ok(())
    }
}

/// The whole private exponent `x`, known only to the dealer.
///
/// It is wiped when dropped; [`PrivateKey::destroy`] makes the end of its life
/// explicit once the shares have been handed out.
pub struct PrivateKey {
    x: Scalar,
}

impl PrivateKey {
    pub fn new(x: Scalar) -> Self {
        PrivateKey { x }
    }

    /// Get a reference to the private exponent
    ///
    /// # Security Warning
    /// The caller must ensure this reference is not used to leak the value
    pub fn expose_secret(&self) -> &Scalar {
        &self.x
    }

    /// Consumes and wipes the key.
    pub fn destroy(mut self) {
        self.zeroize();
    }
}

impl Zeroize for PrivateKey {
    fn zeroize(&mut self) {
        self.x.zeroize();
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for PrivateKey {}

// Prevent debug output from leaking sensitive data
impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

/// One custodian's share `(id, f(id))` of the private exponent.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKeyShare {
    pub id: usize,
    #[serde(with = "element_bytes")]
    pub value: Scalar,
}

impl From<Share> for PrivateKeyShare {
    fn from(share: Share) -> Self {
        PrivateKeyShare {
            id: share.id,
            value: share.value,
        }
    }
}

impl From<&PrivateKeyShare> for Share {
    fn from(share: &PrivateKeyShare) -> Self {
        Share {
            id: share.id,
            value: share.value.clone(),
        }
    }
}

impl Zeroize for PrivateKeyShare {
    fn zeroize(&mut self) {
        self.value.zeroize();
    }
}

impl Drop for PrivateKeyShare {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for PrivateKeyShare {}

impl fmt::Debug for PrivateKeyShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeyShare")
            .field("id", &self.id)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Generates a public key, the private key and its `n` shares.
///
/// Any `t + 1` of the returned shares interpolate to the private exponent.
/// The private key is returned only so the dealer can inspect or test it; it
/// should be destroyed as soon as the shares are delivered.
///
/// # Arguments
/// * `params` - Group bit lengths, threshold and search limits
/// * `rng` - A cryptographic random number generator
///
/// # Errors
/// Returns an error if group generation, sampling or sharing fails, or if
/// `n` is not smaller than the generated subgroup order
pub fn key_gen<R: TryCryptoRng + ?Sized>(
    params: &KeyGenParams,
    rng: &mut R,
) -> Result<(PublicKey, PrivateKey, Vec<PrivateKeyShare>), ElGamalError> {
    let group = generate_schnorr_group_with_limits(&params.group, &params.limits, rng)?;

    let zq = group.scalar_field()?;
    let zp = group.group_field()?;

    let priv_key = PrivateKey::new(zq.rand(rng)?);
    let y = zp.exp(&group.generator(), priv_key.expose_secret());

    let shares = sharing::split(
        priv_key.expose_secret(),
        params.threshold.t,
        params.threshold.n,
        &zq,
        rng,
    )?
    .into_iter()
    .map(PrivateKeyShare::from)
    .collect();

    info!(
        p_bits = params.group.p_bits,
        q_bits = params.group.q_bits,
        t = params.threshold.t,
        n = params.threshold.n,
        "generated threshold key"
    );

    Ok((
        PublicKey {
            group,
            y: y.into_value(),
        },
        priv_key,
        shares,
    ))
}
