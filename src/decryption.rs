use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::encryption::Ciphertext;
use crate::error::ElGamalError;
use crate::field::GroupElement;
use crate::keygen::{PrivateKeyShare, PublicKey};
use crate::sharing::lagrange_basis;
use crate::utils::{derive_key, xor_with_key, MESSAGE_SIZE};
use crate::wire::element_bytes;

/// A custodian's contribution `R^{x_i} mod p` towards decrypting one ciphertext.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptionShare {
    /// Id of the key share that produced this decryption share
    pub id: usize,
    #[serde(with = "element_bytes")]
    pub value: GroupElement,
}

/// Computes a decryption share of the ciphertext from one key share.
///
/// The key share is not checked against the public key or ciphertext.
///
/// # Errors
/// Returns an error if the group field cannot be built from the public key
pub fn partial_decrypt(
    pub_key: &PublicKey,
    key_share: &PrivateKeyShare,
    ct: &Ciphertext,
) -> Result<DecryptionShare, ElGamalError> {
    let zp = pub_key.group_field()?;

    Ok(DecryptionShare {
        id: key_share.id,
        value: zp.exp(&ct.r, &key_share.value),
    })
}

/// Computes decryption shares for several key shares in parallel.
///
/// Each share only reads the public key and ciphertext, so order is free.
pub fn partial_decrypt_all(
    pub_key: &PublicKey,
    key_shares: &[PrivateKeyShare],
    ct: &Ciphertext,
) -> Result<Vec<DecryptionShare>, ElGamalError> {
    key_shares
        .par_iter()
        .map(|share| partial_decrypt(pub_key, share, ct))
        .collect()
}

/// Recombines decryption shares and unmasks the message.
///
/// The shares are combined in the exponent: with `L_i` the Lagrange basis
/// coefficients over Z/qZ, `prod (R^{x_i})^{L_i} = R^x = y^r mod p`, the same
/// element that was hashed during encryption.
///
/// Fewer than `t + 1` shares, or shares of another ciphertext, produce a wrong
/// message rather than an error. Use [`recover_with_threshold`] to reject
/// short share sets.
///
/// # Errors
/// Returns an error if no shares are given, two shares carry the same id, the
/// ciphertext body has the wrong length, or a field cannot be built
pub fn recover(
    pub_key: &PublicKey,
    decryption_shares: &[DecryptionShare],
    ct: &Ciphertext,
) -> Result<Vec<u8>, ElGamalError> {
    if decryption_shares.is_empty() {
        return Err(ElGamalError::InvalidArgument(
            "at least one decryption share is required".to_string(),
        ));
    }
    if ct.c.len() != MESSAGE_SIZE {
        return Err(ElGamalError::InvalidArgument(format!(
            "ciphertext body must be {} bytes, got {}",
            MESSAGE_SIZE,
            ct.c.len()
        )));
    }

    let zp = pub_key.group_field()?;
    // Lagrange coefficients live in the exponent field
    let zq = pub_key.scalar_field()?;

    let ids: Vec<usize> = decryption_shares.iter().map(|s| s.id).collect();

    let mut z = zp.one();
    for (i, share) in decryption_shares.iter().enumerate() {
        let basis = lagrange_basis(i, &ids, &zq).inspect_err(|e| {
            warn!(error = %e, "rejected decryption share set");
        })?;
        z = zp.mul(&z, &zp.exp(&share.value, &basis));
    }

    let key = derive_key(&z);
    xor_with_key(&ct.c, &key)
}

/// Like [`recover`], but fails unless at least `t + 1` shares are supplied.
///
/// # Errors
/// Returns an error if fewer than `t + 1` shares are given, or for any reason
/// [`recover`] fails
pub fn recover_with_threshold(
    pub_key: &PublicKey,
    decryption_shares: &[DecryptionShare],
    ct: &Ciphertext,
    t: usize,
) -> Result<Vec<u8>, ElGamalError> {
    if decryption_shares.len() < t + 1 {
        warn!(
            got = decryption_shares.len(),
            needed = t + 1,
            "not enough decryption shares"
        );
        return Err(ElGamalError::InvalidArgument(format!(
            "need at least {} decryption shares (threshold t={}), got {}",
            t + 1,
            t,
            decryption_shares.len()
        )));
    }
    recover(pub_key, decryption_shares, ct)
}
