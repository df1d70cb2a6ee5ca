//! Free-function facade over `crypto::hash_secrets`, with audit logging of outcomes and
//! async wrappers that run the CPU-bound work on tokio's blocking pool.
//!
//! Audit records go to the `secrethash::audit` target and carry only the operation, the
//! outcome and cost parameters. Secrets and digest contents are never logged.

use crate::crypto::{CostParams, Digest, DigestInfo, SecretHasher, VerifyOutcome};
use crate::errors::HashError;
use zeroize::Zeroizing;

pub const AUDIT_TARGET: &str = "secrethash::audit";

/// Hashes `secret` with the default cost. Panics only if the primitive is broken.
#[must_use]
pub fn hash_secret(secret: impl AsRef<[u8]>) -> Digest {
    hash_with(&SecretHasher::default(), secret)
}

#[must_use]
pub fn hash_secret_with_cost(secret: impl AsRef<[u8]>, cost: CostParams) -> Digest {
    hash_with(&SecretHasher::with_cost(cost), secret)
}

/// Hashes with an explicit hasher and records the event.
#[must_use]
pub fn hash_with(hasher: &SecretHasher, secret: impl AsRef<[u8]>) -> Digest {
    let digest = hasher.generate(secret);
    log::info!(target: AUDIT_TARGET, "generate cost={}", hasher.cost());
    digest
}

pub fn verify_secret(secret: impl AsRef<[u8]>, digest: impl AsRef<[u8]>) -> Result<(), HashError> {
    verify_with(&SecretHasher::default(), secret, digest)
}

/// Verifies and records the outcome. Mismatch and invalid digests are both logged at
/// warn so they show up together in the audit trail.
pub fn verify_with(
    hasher: &SecretHasher,
    secret: impl AsRef<[u8]>,
    digest: impl AsRef<[u8]>,
) -> Result<(), HashError> {
    let res = hasher.verify(secret, digest);
    let outcome = match &res {
        Ok(()) => VerifyOutcome::Match,
        Err(HashError::Mismatch) => VerifyOutcome::Mismatch,
        Err(_) => VerifyOutcome::InvalidDigest,
    };
    if outcome.is_match() {
        log::info!(target: AUDIT_TARGET, "verify outcome={}", outcome.as_str());
    } else {
        log::warn!(target: AUDIT_TARGET, "verify outcome={}", outcome.as_str());
    }
    res
}

pub fn needs_rehash(digest: impl AsRef<[u8]>, cost: CostParams) -> Result<bool, HashError> {
    let stale = SecretHasher::with_cost(cost).needs_rehash(digest)?;
    log::debug!(target: AUDIT_TARGET, "needs_rehash={stale} cost={cost}");
    Ok(stale)
}

pub fn inspect_digest(digest: impl AsRef<[u8]>) -> Result<DigestInfo, HashError> {
    crate::crypto::inspect(digest)
}

/// Verifies and, on success, returns a fresh digest when the stored one is stale.
///
/// # Errors
/// Same as [`verify_with`]; nothing is regenerated unless the secret matched.
pub fn verify_and_upgrade(
    hasher: &SecretHasher,
    secret: impl AsRef<[u8]>,
    digest: &Digest,
) -> Result<Option<Digest>, HashError> {
    let secret = secret.as_ref();
    verify_with(hasher, secret, digest)?;
    if hasher.needs_rehash(digest)? {
        log::info!(target: AUDIT_TARGET, "rehash cost={}", hasher.cost());
        return Ok(Some(hasher.generate(secret)));
    }
    Ok(None)
}

/// Runs generation on the blocking pool. A panic in the task is resumed here so the
/// fatal-failure policy of `generate` still holds.
pub async fn hash_secret_async(hasher: SecretHasher, secret: impl Into<Vec<u8>>) -> Digest {
    let secret = Zeroizing::new(secret.into());
    match tokio::task::spawn_blocking(move || hash_with(&hasher, secret.as_slice())).await {
        Ok(digest) => digest,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => panic!("hash: generate: blocking task did not complete: {e}"),
    }
}

/// Runs verification on the blocking pool. A task that never completes (runtime
/// shutdown) is an operational failure, reported as `Primitive`, not as a mismatch.
pub async fn verify_secret_async(
    hasher: SecretHasher,
    secret: impl Into<Vec<u8>>,
    digest: Digest,
) -> Result<(), HashError> {
    let secret = Zeroizing::new(secret.into());
    match tokio::task::spawn_blocking(move || verify_with(&hasher, secret.as_slice(), &digest))
        .await
    {
        Ok(res) => res,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => Err(HashError::Primitive(format!("verification task did not complete: {e}"))),
    }
}
