use rand::TryCryptoRng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::ElGamalError;
use crate::field::GroupElement;
use crate::keygen::PublicKey;
use crate::utils::{derive_key, xor_with_key, MESSAGE_SIZE};
use crate::wire::element_bytes;

/// A hashed ElGamal ciphertext.
///
/// Contains the ephemeral group element and the masked message body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ciphertext {
    /// `R = g^r mod p` for the per-message random `r`
    #[serde(with = "element_bytes")]
    pub r: GroupElement,
    /// `message XOR SHA-512(y^r mod p)`
    pub c: Vec<u8>,
}

impl Ciphertext {
    /// Creates a new ciphertext.
    ///
    /// # Arguments
    /// * `r` - The ephemeral element `g^r`
    /// * `c` - The masked message, `MESSAGE_SIZE` bytes
    pub fn new(r: GroupElement, c: Vec<u8>) -> Self {
        Ciphertext { r, c }
    }
}

/// Encrypts a `MESSAGE_SIZE`-byte message to the public key.
///
/// A fresh `r` is drawn for every call; reusing it would reuse the pad.
///
/// # Arguments
/// * `pub_key` - The public key of the custodians
/// * `message` - Exactly `MESSAGE_SIZE` bytes; see [`crate::utils::pad_message`]
/// * `rng` - A cryptographic random number generator
///
/// # Errors
/// Returns an error if the message length is wrong, a field cannot be built
/// from the key, or the RNG fails
pub fn encrypt<R: TryCryptoRng + ?Sized>(
    pub_key: &PublicKey,
    message: &[u8],
    rng: &mut R,
) -> Result<Ciphertext, ElGamalError> {
    if message.len() != MESSAGE_SIZE {
        return Err(ElGamalError::InvalidArgument(format!(
            "message must be exactly {} bytes, got {}",
            MESSAGE_SIZE,
            message.len()
        )));
    }

    let zq = pub_key.scalar_field()?;
    let zp = pub_key.group_field()?;

    let mut r = zq.rand(rng)?;
    let big_r = zp.exp(&pub_key.group.generator(), &r);
    let shared = zp.exp(&pub_key.y(), &r);
    r.zeroize();

    let key = derive_key(&shared);

    Ok(Ciphertext {
        r: big_r,
        c: xor_with_key(message, &key)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Scalar;
    use crate::schnorr::SchnorrGroup;
    use crate::utils::pad_message;
    use crate::wire::{from_bytes, to_bytes};
    use num_bigint::BigUint;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn toy_key() -> PublicKey {
        PublicKey {
            group: SchnorrGroup {
                p: BigUint::from(23u32),
                q: BigUint::from(11u32),
                g: BigUint::from(4u32),
            },
            y: BigUint::from(8u32),
        }
    }

    #[test]
    fn test_encryption() {
        let mut rng = StdRng::seed_from_u64(31);
        let pk = toy_key();
        let msg = pad_message(b"Hello world").unwrap();

        let ct = encrypt(&pk, &msg, &mut rng).unwrap();
        assert_eq!(ct.c.len(), MESSAGE_SIZE);
        // R must be a member of the order-11 subgroup
        assert_eq!(
            ct.r.value().modpow(&pk.group.q, &pk.group.p),
            BigUint::from(1u32)
        );

        let bytes = to_bytes(&ct).unwrap();
        assert_eq!(from_bytes::<Ciphertext>(&bytes).unwrap(), ct);
    }

    #[test]
    fn test_encryption_matches_shared_secret() {
        let mut rng = StdRng::seed_from_u64(32);
        let pk = toy_key();
        let msg = pad_message(b"Hello world").unwrap();
        let ct = encrypt(&pk, &msg, &mut rng).unwrap();

        // 4^7 = 8 mod 23, so the toy private key is x = 7
        let zp = pk.group_field().unwrap();
        let x = Scalar::from_u64(7);
        assert_eq!(zp.exp(&pk.group.generator(), &x), pk.y());
        let shared = zp.exp(&ct.r, &x);
        assert_eq!(
            xor_with_key(&ct.c, &derive_key(&shared)).unwrap(),
            msg.to_vec()
        );
    }

    #[test]
    fn test_message_length_must_be_exact() {
        let mut rng = StdRng::seed_from_u64(33);
        let pk = toy_key();
        assert!(matches!(
            encrypt(&pk, b"Hello world", &mut rng),
            Err(ElGamalError::InvalidArgument(_))
        ));
        assert!(encrypt(&pk, &[0u8; 65], &mut rng).is_err());
        assert!(encrypt(&pk, &[], &mut rng).is_err());
    }
}
