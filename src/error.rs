use thiserror::Error;

/// The only way the core can fail: the secret text does not decode to a key.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("the secret is not a valid base32 encoding: {0}")]
    Decode(#[from] data_encoding::DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;
