//! Parameters for group generation and threshold key generation.

use crate::error::ElGamalError;

/// Miller-Rabin rounds; a composite survives with probability at most 2^-64.
pub const DEFAULT_PRIMALITY_ROUNDS: usize = 32;

/// Upper bounds on the rejection-sampling loops.
///
/// The searches terminate with overwhelming probability long before these
/// caps; hitting one surfaces as [`ElGamalError::SearchExhausted`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Candidates tried for `q`, and separately for the cofactor `r` of `p`
    pub prime_attempts: usize,
    /// Values of `h` tried while looking for a generator
    pub generator_attempts: usize,
    /// Miller-Rabin rounds per candidate
    pub primality_rounds: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        SearchLimits {
            prime_attempts: 1_000_000,
            generator_attempts: 10_000,
            primality_rounds: DEFAULT_PRIMALITY_ROUNDS,
        }
    }
}

/// Bit lengths of the Schnorr group modulus `p` and subgroup order `q`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GroupParams {
    pub p_bits: usize,
    pub q_bits: usize,
}

impl GroupParams {
    /// # Errors
    /// Returns an error if `q_bits >= p_bits`
    pub fn new(p_bits: usize, q_bits: usize) -> Result<Self, ElGamalError> {
        if q_bits >= p_bits {
            return Err(ElGamalError::InvalidArgument(format!(
                "q_bits ({}) must be < p_bits ({})",
                q_bits, p_bits
            )));
        }
        Ok(GroupParams { p_bits, q_bits })
    }

    /// Bit length of the cofactor `r` in `p = q * r + 1`.
    pub fn r_bits(&self) -> usize {
        self.p_bits - self.q_bits
    }
}

/// `t` is the polynomial degree: any `t + 1` of the `n` shares decrypt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThresholdParams {
    pub t: usize,
    pub n: usize,
}

impl ThresholdParams {
    /// # Errors
    /// Returns an error if `n == 0` or `t >= n`
    pub fn new(t: usize, n: usize) -> Result<Self, ElGamalError> {
        if n == 0 {
            return Err(ElGamalError::InvalidArgument(
                "number of custodians must be at least 1".to_string(),
            ));
        }
        if t >= n {
            return Err(ElGamalError::InvalidArgument(format!(
                "threshold ({}) must be < number of custodians ({})",
                t, n
            )));
        }
        Ok(ThresholdParams { t, n })
    }

    /// Number of decryption shares needed to recover a message.
    pub fn quorum(&self) -> usize {
        self.t + 1
    }
}

/// Everything the trusted dealer needs to run key generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyGenParams {
    pub group: GroupParams,
    pub threshold: ThresholdParams,
    pub limits: SearchLimits,
}

impl KeyGenParams {
    /// Validates all four values, using the default search limits.
    pub fn new(p_bits: usize, q_bits: usize, t: usize, n: usize) -> Result<Self, ElGamalError> {
        Ok(KeyGenParams {
            group: GroupParams::new(p_bits, q_bits)?,
            threshold: ThresholdParams::new(t, n)?,
            limits: SearchLimits::default(),
        })
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }
}
