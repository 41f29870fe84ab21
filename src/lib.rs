//! Distributed Hashed ElGamal
//!
//! This library implements a (t, n)-threshold variant of hashed ElGamal over a
//! prime-order Schnorr subgroup of (Z/pZ)*.
//!
//! ## Overview
//!
//! A trusted dealer generates one private exponent `x` and splits it among `n`
//! custodians with a degree-`t` polynomial. Anyone can encrypt a 64-byte
//! message to `y = g^x`; any `t + 1` custodians can then jointly decrypt it,
//! while `t` or fewer learn nothing. Neither `x` nor the per-message randomness
//! is ever reconstructed during decryption.
//!
//! ## Key Components
//!
//! - **Group generation**: Search for `(p, q, g)` with `p = q * r + 1`
//! - **Key Generation**: Sample `x`, publish `y = g^x`, split `x` into shares
//! - **Encryption**: `R = g^r`, `C = m XOR SHA-512(y^r)`
//! - **Partial decryption**: Each custodian publishes `R^{x_i}`
//! - **Recovery**: Combine `t + 1` partial decryptions with Lagrange weights
//!   in the exponent to get `y^r`, then unmask `C`
//!
//! ## Example
//!
//! ```rust,no_run
//! use rand::rngs::OsRng;
//! use distributed_elgamal::{
//!     decryption::{partial_decrypt, recover},
//!     encryption::encrypt,
//!     keygen::key_gen,
//!     params::KeyGenParams,
//!     utils::pad_message,
//! };
//!
//! let mut rng = OsRng;
//! let t = 2; // any t + 1 = 3 custodians can decrypt
//! let n = 5;
//!
//! // Key generation by the trusted dealer
//! let params = KeyGenParams::new(1024, 256, t, n).unwrap();
//! let (pk, sk, shares) = key_gen(&params, &mut rng).unwrap();
//! sk.destroy();
//!
//! // Encryption
//! let msg = pad_message(b"Hello world").unwrap();
//! let ct = encrypt(&pk, &msg, &mut rng).unwrap();
//!
//! // Decryption (with t+1 custodians)
//! let partials: Vec<_> = shares
//!     .iter()
//!     .take(t + 1)
//!     .map(|share| partial_decrypt(&pk, share, &ct).unwrap())
//!     .collect();
//! let recovered = recover(&pk, &partials, &ct).unwrap();
//! assert_eq!(recovered, msg.to_vec());
//! ```

pub mod decryption;
pub mod encryption;
pub mod error;
pub mod field;
pub mod keygen;
pub mod params;
pub mod primes;
pub mod random;
pub mod schnorr;
pub mod sharing;
pub mod utils;
pub mod wire;

pub use error::ElGamalError;
