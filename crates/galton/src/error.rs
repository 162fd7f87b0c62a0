//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias.
//! Every variant is fatal: it reports a configuration mistake or a random source that
//! can no longer feed a batch, and is returned to the caller as-is.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("branch probability {probability} at row {row}, column {column} is outside [0, 1]")]
    InvalidProbability {
        row: u32,
        column: u32,
        probability: f64,
    },

    #[error("draw #{index} has value {value}, expected a value in [0, 1)")]
    InvalidDraw { index: usize, value: f64 },

    #[error("random source exhausted after {drawn} draws")]
    DrawsExhausted { drawn: usize },

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
