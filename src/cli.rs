pub mod command;

pub use command::Command;

use std::io::{BufRead, Write};
use std::time::Instant;
use zeroize::Zeroizing;

use crate::api;
use crate::crypto::{Digest, SecretHasher};
use crate::errors::HashError;

/// Shown for both a wrong secret and a corrupt digest so the two cannot be told apart.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Reads one line from `reader` as the secret, dropping the line terminator.
///
/// # Errors
/// `HashError::Io` on read failure, `HashError::Config` if the input is empty.
pub fn read_secret_from<R: BufRead>(mut reader: R) -> Result<Zeroizing<String>, HashError> {
    let mut s = Zeroizing::new(String::new());
    reader.read_line(&mut s)?;
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
    if s.is_empty() {
        return Err(HashError::Config("empty secret".into()));
    }
    Ok(s)
}

/// Reads the secret from stdin when `from_stdin`, otherwise prompts without echo.
///
/// # Errors
/// `HashError::Io` on terminal or read failure, `HashError::Config` for an empty secret.
pub fn read_secret(from_stdin: bool, prompt: &str) -> Result<Zeroizing<String>, HashError> {
    if from_stdin {
        return read_secret_from(std::io::stdin().lock());
    }
    let s = Zeroizing::new(rpassword::prompt_password(prompt)?);
    if s.is_empty() {
        return Err(HashError::Config("empty secret".into()));
    }
    Ok(s)
}

pub fn run<W: Write>(
    hasher: &SecretHasher,
    cmd: Command,
    out: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    log::debug!("command={} cost={}", cmd.name(), hasher.cost());
    match cmd {
        Command::Hash { secret } => {
            let digest = api::hash_with(hasher, secret.as_bytes());
            writeln!(out, "{}", digest.as_str())?;
            Ok(())
        }
        Command::Verify { secret, digest } => {
            match api::verify_with(hasher, secret.as_bytes(), digest.trim()) {
                Ok(()) => {
                    writeln!(out, "ok")?;
                    Ok(())
                }
                Err(e) if e.is_auth_failure() => Err(INVALID_CREDENTIALS.into()),
                Err(e) => Err(e.into()),
            }
        }
        Command::NeedsRehash { digest } => {
            let stale = api::needs_rehash(digest.trim(), hasher.cost())?;
            writeln!(out, "{stale}")?;
            Ok(())
        }
        Command::Inspect { digest, json } => {
            let info = api::inspect_digest(digest.trim())?;
            if json {
                writeln!(out, "{}", serde_json::to_string(&info)?)?;
            } else {
                writeln!(
                    out,
                    "algorithm={} version={} m={} t={} p={} output_len={}",
                    info.algorithm,
                    info.version,
                    info.memory_kib,
                    info.iterations,
                    info.parallelism,
                    info.output_len
                )?;
            }
            Ok(())
        }
        Command::Bench { rounds } => {
            if rounds == 0 {
                return Err("bench: rounds must be at least 1".into());
            }
            let (gen_ms, verify_ms) = bench(hasher, rounds)?;
            writeln!(
                out,
                "cost={} rounds={rounds} generate_ms={gen_ms:.2} verify_ms={verify_ms:.2}",
                hasher.cost()
            )?;
            Ok(())
        }
    }
}

/// Mean wall-clock milliseconds per generate and per verify under `hasher`'s cost.
pub fn bench(hasher: &SecretHasher, rounds: u32) -> Result<(f64, f64), HashError> {
    let secret = b"secrethash-bench";
    let mut digests: Vec<Digest> = Vec::with_capacity(rounds as usize);
    let start = Instant::now();
    for _ in 0..rounds {
        digests.push(hasher.try_generate(secret)?);
    }
    let gen_ms = start.elapsed().as_secs_f64() * 1000.0 / f64::from(rounds);
    let start = Instant::now();
    for d in &digests {
        hasher.verify(secret, d)?;
    }
    let verify_ms = start.elapsed().as_secs_f64() * 1000.0 / f64::from(rounds);
    Ok((gen_ms, verify_ms))
}
