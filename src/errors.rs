use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The hash primitive refused input it should always accept. Never retry this;
    /// it means the hashing backend itself is broken.
    #[error("hash: generate: primitive failure: {0}")]
    Primitive(String),

    #[error("hash: compare: hash mismatch")]
    Mismatch,

    #[error("hash: invalid digest: {0}")]
    InvalidDigest(String),

    #[error("hash: invalid cost parameters: {0}")]
    InvalidCost(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl HashError {
    /// True for the two outcomes an end user should only ever see as "invalid credentials".
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, HashError::Mismatch | HashError::InvalidDigest(_))
    }

    /// Only I/O is worth retrying; every hashing outcome is final.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, HashError::Io(_))
    }
}

impl From<std::io::Error> for HashError {
    fn from(e: std::io::Error) -> Self {
        HashError::Io(e.to_string())
    }
}

impl From<toml::de::Error> for HashError {
    fn from(e: toml::de::Error) -> Self {
        HashError::Config(e.to_string())
    }
}
