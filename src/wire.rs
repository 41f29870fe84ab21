//! Wire encoding for values exchanged between the dealer and custodians.
//!
//! Values are serialized with `bincode`. Every big integer is carried as its
//! big-endian byte string, which bincode writes with a `u64` length prefix;
//! plain byte fields are written verbatim behind the same kind of prefix.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ElGamalError;

/// Serializes a value into its length-prefixed wire form.
pub fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, ElGamalError> {
    Ok(bincode::serialize(value)?)
}

/// Parses a value from its wire form.
///
/// Decoding does not re-check group invariants; use
/// [`crate::keygen::PublicKey::validate`] on untrusted keys.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ElGamalError> {
    Ok(bincode::deserialize(bytes)?)
}

/// `serde(with = ...)` adapter writing a `BigUint` as a big-endian byte string.
pub mod biguint_bytes {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&value.to_bytes_be())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        Ok(BigUint::from_bytes_be(&bytes))
    }
}

/// Same adapter for field elements of either kind.
pub mod element_bytes {
    use serde::{Deserializer, Serializer};

    use crate::field::FieldElement;

    pub fn serialize<K, S: Serializer>(
        value: &FieldElement<K>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        super::biguint_bytes::serialize(value.value(), serializer)
    }

    pub fn deserialize<'de, K, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<FieldElement<K>, D::Error> {
        super::biguint_bytes::deserialize(deserializer).map(FieldElement::new)
    }
}
