use argon2::password_hash::{self, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use std::fmt;

use super::digest::{Digest, DigestInfo};
use crate::errors::HashError;

/// Random salt length in bytes.
pub const SALT_LEN: usize = 16;
/// Hash output length in bytes.
pub const OUTPUT_LEN: usize = Params::DEFAULT_OUTPUT_LEN;
/// Upper bound on memory cost (256 MiB), for generation and for digests accepted by
/// verification.
pub const MAX_MEMORY_KIB: u32 = 256 * 1024;
/// Upper bound on passes. Together with `MAX_MEMORY_KIB` a worst-case digest costs one
/// 256 MiB allocation and a few seconds of CPU per verify call.
pub const MAX_ITERATIONS: u32 = 16;

/// Argon2id work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostParams {
    memory_kib: u32,
    iterations: u32,
    parallelism: u32,
}

impl CostParams {
    /// 19 MiB, 2 passes, 1 lane: the OWASP Argon2id baseline and the `argon2` crate default.
    pub const DEFAULT: CostParams = CostParams {
        memory_kib: Params::DEFAULT_M_COST,
        iterations: Params::DEFAULT_T_COST,
        parallelism: Params::DEFAULT_P_COST,
    };

    /// Validates a cost triple against Argon2's limits and this crate's ceilings.
    ///
    /// # Errors
    /// `HashError::InvalidCost` if Argon2 would reject the values, or they exceed
    /// `MAX_MEMORY_KIB` / `MAX_ITERATIONS`.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Result<Self, HashError> {
        if memory_kib > MAX_MEMORY_KIB {
            return Err(HashError::InvalidCost(format!(
                "memory {memory_kib} KiB exceeds limit of {MAX_MEMORY_KIB} KiB"
            )));
        }
        if iterations > MAX_ITERATIONS {
            return Err(HashError::InvalidCost(format!(
                "iterations {iterations} exceeds limit of {MAX_ITERATIONS}"
            )));
        }
        Params::new(memory_kib, iterations, parallelism, Some(OUTPUT_LEN))
            .map_err(|e| HashError::InvalidCost(e.to_string()))?;
        Ok(CostParams { memory_kib, iterations, parallelism })
    }

    #[must_use]
    pub fn memory_kib(&self) -> u32 {
        self.memory_kib
    }

    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    #[must_use]
    pub fn parallelism(&self) -> u32 {
        self.parallelism
    }

    fn argon2_params(&self) -> Result<Params, argon2::Error> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, Some(OUTPUT_LEN))
    }
}

impl Default for CostParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for CostParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m={},t={},p={}", self.memory_kib, self.iterations, self.parallelism)
    }
}

/// Three-way verification result for callers that prefer a value over an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Match,
    Mismatch,
    InvalidDigest,
}

impl VerifyOutcome {
    #[must_use]
    pub fn is_match(self) -> bool {
        self == VerifyOutcome::Match
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VerifyOutcome::Match => "match",
            VerifyOutcome::Mismatch => "mismatch",
            VerifyOutcome::InvalidDigest => "invalid_digest",
        }
    }
}

/// One-way, salted secret hashing with Argon2id.
///
/// Stateless apart from its cost, so it is `Send + Sync` and cheap to clone. Every call
/// is CPU bound; with the default cost expect tens of milliseconds and 19 MiB per call.
#[derive(Debug, Clone, Default)]
pub struct SecretHasher {
    cost: CostParams,
}

impl SecretHasher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cost(cost: CostParams) -> Self {
        SecretHasher { cost }
    }

    #[must_use]
    pub fn cost(&self) -> CostParams {
        self.cost
    }

    /// Hashes `secret` with a fresh random salt.
    ///
    /// # Panics
    /// If the Argon2 primitive or the OS random source fails. That cannot happen for a
    /// validated cost and an input under `u32::MAX` bytes, so a failure here means the
    /// hashing backend is broken and there is nothing a caller could do to recover.
    /// Use [`SecretHasher::try_generate`] to receive it as `HashError::Primitive` instead.
    #[must_use]
    pub fn generate(&self, secret: impl AsRef<[u8]>) -> Digest {
        match self.try_generate(secret) {
            Ok(digest) => digest,
            Err(e) => panic!("{e}"),
        }
    }

    /// Same as [`SecretHasher::generate`] but reports a broken primitive as an error.
    ///
    /// # Errors
    /// Only `HashError::Primitive`. It is not retriable and must not be handled as an
    /// ordinary branch.
    pub fn try_generate(&self, secret: impl AsRef<[u8]>) -> Result<Digest, HashError> {
        let params = self.cost.argon2_params().map_err(primitive)?;
        let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = random_salt()?;
        let hash = argon.hash_password(secret.as_ref(), &salt).map_err(primitive)?;
        Ok(Digest::from_phc(hash.to_string()))
    }

    /// Recomputes the hash of `secret` with the salt and cost stored in `digest` and
    /// compares the two in constant time. The hasher's own cost plays no part.
    ///
    /// # Errors
    /// `HashError::Mismatch` for a wrong secret; `HashError::InvalidDigest` when
    /// `digest` is not a supported, well-formed Argon2 PHC string.
    pub fn verify(
        &self,
        secret: impl AsRef<[u8]>,
        digest: impl AsRef<[u8]>,
    ) -> Result<(), HashError> {
        verify_encoded(secret.as_ref(), digest.as_ref())
    }

    #[must_use]
    pub fn check(&self, secret: impl AsRef<[u8]>, digest: impl AsRef<[u8]>) -> VerifyOutcome {
        match self.verify(secret, digest) {
            Ok(()) => VerifyOutcome::Match,
            Err(HashError::Mismatch) => VerifyOutcome::Mismatch,
            Err(_) => VerifyOutcome::InvalidDigest,
        }
    }

    /// True when `digest` was produced with a different algorithm, version or cost than
    /// this hasher uses now. Callers typically regenerate after a successful verify.
    ///
    /// # Errors
    /// `HashError::InvalidDigest` for a malformed digest.
    pub fn needs_rehash(&self, digest: impl AsRef<[u8]>) -> Result<bool, HashError> {
        let info = inspect(digest)?;
        Ok(info.algorithm != Algorithm::Argon2id.as_str()
            || info.version != Version::V0x13 as u32
            || info.memory_kib != self.cost.memory_kib
            || info.iterations != self.cost.iterations
            || info.parallelism != self.cost.parallelism
            || info.output_len != OUTPUT_LEN)
    }
}

/// Reads the public parameters out of a digest without touching any secret.
///
/// # Errors
/// `HashError::InvalidDigest` for anything that is not an Argon2 PHC string.
pub fn inspect(digest: impl AsRef<[u8]>) -> Result<DigestInfo, HashError> {
    let encoded = as_utf8(digest.as_ref())?;
    let parsed = parse(encoded)?;
    let (algorithm, version, params) = argon2_parts(&parsed)?;
    Ok(DigestInfo {
        algorithm: algorithm.as_str().to_owned(),
        version: version as u32,
        memory_kib: params.m_cost(),
        iterations: params.t_cost(),
        parallelism: params.p_cost(),
        output_len: params.output_len().unwrap_or(OUTPUT_LEN),
    })
}

pub(crate) fn verify_encoded(secret: &[u8], digest: &[u8]) -> Result<(), HashError> {
    let encoded = as_utf8(digest)?;
    let parsed = parse(encoded)?;
    // Bounds are checked before any work so a corrupt cost cannot exhaust memory.
    let (_, _, params) = argon2_parts(&parsed)?;
    if params.m_cost() > MAX_MEMORY_KIB || params.t_cost() > MAX_ITERATIONS {
        return Err(HashError::InvalidDigest("cost exceeds verification limit".into()));
    }
    match Argon2::default().verify_password(secret, &parsed) {
        Ok(()) => Ok(()),
        Err(password_hash::Error::Password) => Err(HashError::Mismatch),
        Err(e) => Err(HashError::InvalidDigest(e.to_string())),
    }
}

fn as_utf8(digest: &[u8]) -> Result<&str, HashError> {
    std::str::from_utf8(digest)
        .map_err(|_| HashError::InvalidDigest("digest is not valid UTF-8".into()))
}

fn parse(encoded: &str) -> Result<PasswordHash<'_>, HashError> {
    let parsed =
        PasswordHash::new(encoded).map_err(|e| HashError::InvalidDigest(e.to_string()))?;
    // A PHC string may legally omit salt and output; a stored digest may not.
    if parsed.salt.is_none() || parsed.hash.is_none() {
        return Err(HashError::InvalidDigest("digest has no salt or hash output".into()));
    }
    Ok(parsed)
}

fn argon2_parts(parsed: &PasswordHash<'_>) -> Result<(Algorithm, Version, Params), HashError> {
    let algorithm = Algorithm::new(parsed.algorithm.as_str())
        .map_err(|e| HashError::InvalidDigest(e.to_string()))?;
    let version = match parsed.version {
        Some(v) => Version::try_from(v).map_err(|e| HashError::InvalidDigest(e.to_string()))?,
        None => Version::default(),
    };
    let params = Params::try_from(parsed).map_err(|e| HashError::InvalidDigest(e.to_string()))?;
    Ok((algorithm, version, params))
}

fn random_salt() -> Result<SaltString, HashError> {
    let mut bytes = [0u8; SALT_LEN];
    getrandom::fill(&mut bytes).map_err(primitive)?;
    SaltString::encode_b64(&bytes).map_err(primitive)
}

fn primitive(e: impl fmt::Display) -> HashError {
    HashError::Primitive(e.to_string())
}
