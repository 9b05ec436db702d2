use thiserror::Error;

/// Errors returned by fingerprinting and text preprocessing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimHashError {
    /// `shingle` was asked for zero-width n-grams.
    #[error("shingle width must be a positive integer (got {width})")]
    InvalidShingleWidth { width: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unsupported hash algorithm [{0}]. Supported hash algorithms [fnv1, fnv1a, sip, sea, sha1].")]
    UnknownHashAlgorithm(String),
}

pub type Result<T> = std::result::Result<T, SimHashError>;
