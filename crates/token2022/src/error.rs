use thiserror::Error;

/// Errors raised while building Token-2022 instructions or deriving addresses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("accounts.{0} is not set")]
    MissingAccount(&'static str),

    #[error("accounts.Signers is not set")]
    MissingSigners,

    #[error("too many signers; got {got}, but max is {max}")]
    TooManySigners { got: usize, max: usize },

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid seeds: {0}")]
    InvalidSeeds(String),

    #[error("could not find valid PDA bump seed")]
    PdaNotFound,

    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("invalid instruction: {0}")]
    InvalidInstruction(String),
}
