use sha2::{Digest, Sha512};

use crate::error::ElGamalError;
use crate::field::GroupElement;

/// Output length of the key derivation hash (SHA-512), and therefore the
/// exact length of every plaintext and ciphertext body.
pub const MESSAGE_SIZE: usize = 64;

/// Derives the one-time pad `K = SHA-512(bytes(z))` from a group element,
/// using the element's minimal big-endian encoding.
pub fn derive_key(z: &GroupElement) -> [u8; MESSAGE_SIZE] {
    let digest = Sha512::digest(z.to_bytes_be());
    let mut key = [0u8; MESSAGE_SIZE];
    key.copy_from_slice(&digest);
    key
}

/// XORs `data` with `key` bytewise.
///
/// # Errors
/// Returns an error if `data` is not exactly `MESSAGE_SIZE` bytes
pub fn xor_with_key(data: &[u8], key: &[u8; MESSAGE_SIZE]) -> Result<Vec<u8>, ElGamalError> {
    if data.len() != MESSAGE_SIZE {
        return Err(ElGamalError::InvalidArgument(format!(
            "data must be exactly {} bytes, got {}",
            MESSAGE_SIZE,
            data.len()
        )));
    }
    Ok(data.iter().zip(key.iter()).map(|(d, k)| d ^ k).collect())
}

/// Zero-pads `message` to `MESSAGE_SIZE` bytes.
///
/// # Errors
/// Returns an error if the message is longer than `MESSAGE_SIZE`
pub fn pad_message(message: &[u8]) -> Result<[u8; MESSAGE_SIZE], ElGamalError> {
    if message.len() > MESSAGE_SIZE {
        return Err(ElGamalError::InvalidArgument(format!(
            "message must be at most {} bytes, got {}",
            MESSAGE_SIZE,
            message.len()
        )));
    }
    let mut padded = [0u8; MESSAGE_SIZE];
    padded[..message.len()].copy_from_slice(message);
    Ok(padded)
}
