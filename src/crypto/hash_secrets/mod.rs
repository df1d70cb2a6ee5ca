//! Secret hashing: Argon2id digests, constant-time verification, rehash detection.
//! - `argon2`: the hasher, its cost parameters and verification
//! - `digest`: the stored, self-describing digest value

pub mod argon2;
pub mod digest;

pub use self::argon2::{CostParams, SecretHasher, VerifyOutcome, inspect};
pub use self::digest::{Digest, DigestInfo, REDACTED};
