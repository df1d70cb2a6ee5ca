use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::HashError;

/// Placeholder rendered instead of a digest's contents by `Debug` and `Display`.
pub const REDACTED: &str = "SECRET";

/// Stored form of a hashed secret: a PHC string such as
/// `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`.
///
/// The algorithm, version, cost and salt all travel inside the value, so it can be
/// persisted verbatim and handed back to verification later. Formatting a `Digest`
/// for diagnostics never shows the value; use [`Digest::as_str`] to persist it.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    pub(crate) fn from_phc(encoded: String) -> Self {
        Digest(encoded)
    }

    /// Accepts a stored value only if it parses as a PHC string.
    ///
    /// # Errors
    /// `HashError::InvalidDigest` when the value is not a well-formed PHC string.
    pub fn parse(encoded: &str) -> Result<Self, HashError> {
        argon2::PasswordHash::new(encoded)
            .map_err(|e| HashError::InvalidDigest(e.to_string()))?;
        Ok(Digest(encoded.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Checks `secret` against this digest; see [`super::SecretHasher::verify`].
    ///
    /// # Errors
    /// `HashError::Mismatch` for a wrong secret, `HashError::InvalidDigest` for a corrupt value.
    pub fn verify(&self, secret: impl AsRef<[u8]>) -> Result<(), HashError> {
        super::argon2::verify_encoded(secret.as_ref(), self.as_bytes())
    }
}

/// Stored values are taken as-is; malformed ones surface as `InvalidDigest` on verify.
impl From<String> for Digest {
    fn from(encoded: String) -> Self {
        Digest(encoded)
    }
}

impl From<&str> for Digest {
    fn from(encoded: &str) -> Self {
        Digest(encoded.to_owned())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Digest").field(&format_args!("{REDACTED}")).finish()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// Public parameters recovered from a digest. Salt and hash output are never exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestInfo {
    pub algorithm: String,
    pub version: u32,
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub output_len: usize,
}
