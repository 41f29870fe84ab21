/// Error types for the distributed ElGamal library
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElGamalError {
    /// Invalid parameter provided (e.g., q_bits >= p_bits, wrong message length)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The secure randomness source failed; never retried
    #[error("Randomness source error: {0}")]
    Randomness(String),
    /// A field could not be built over the given modulus, or an element had no inverse
    #[error("Field error: {0}")]
    Field(String),
    /// A rejection-sampling loop ran out of attempts
    #[error("{what} search exhausted after {attempts} attempts")]
    SearchExhausted { what: &'static str, attempts: usize },
    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<bincode::Error> for ElGamalError {
    fn from(err: bincode::Error) -> Self {
        ElGamalError::SerializationError(format!("{:?}", err))
    }
}
