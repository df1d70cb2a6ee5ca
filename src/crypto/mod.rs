//! Crypto utilities: one-way secret hashing for credential storage.
//!
//! The hashing core has no logging, file or environment surface. It reports every
//! outcome through `HashError` and leaves persistence of the digest to the caller.

pub mod hash_secrets;

pub use hash_secrets::{
    CostParams, Digest, DigestInfo, REDACTED, SecretHasher, VerifyOutcome, inspect,
};
