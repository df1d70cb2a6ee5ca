//! One-way secret hashing for credential storage.
//!
//! [`SecretHasher`] turns a plaintext secret into a salted Argon2id [`Digest`] and later
//! checks a plaintext against a stored digest in constant time. Digests are
//! self-describing PHC strings, so a stored value is all verification needs.
//!
//! ```no_run
//! use secrethash::{HashError, SecretHasher};
//!
//! let hasher = SecretHasher::default();
//! let digest = hasher.generate("hello");
//! assert!(hasher.verify("hello", &digest).is_ok());
//! assert_eq!(hasher.verify("goodbye", &digest), Err(HashError::Mismatch));
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod logger;

pub use crypto::{CostParams, Digest, DigestInfo, SecretHasher, VerifyOutcome};
pub use errors::HashError;

/// Initializes logging from `log4rs.yaml` in the working directory.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    logger::init()?;
    Ok(())
}
