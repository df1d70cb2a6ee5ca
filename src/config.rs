//! Layered configuration for the hasher's cost and the CLI's logging.
//!
//! Precedence: explicit overrides > environment > config files > built-in defaults.
//! An explicit path is the only file read. Otherwise files are searched in order:
//! `SECRETHASH_CONFIG`, `<config dir>/secrethash.toml`, `./secrethash.toml`. For each
//! field the first layer that sets it wins.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::crypto::{CostParams, SecretHasher};
use crate::errors::HashError;

pub const ENV_CONFIG: &str = "SECRETHASH_CONFIG";
pub const ENV_MEMORY_KIB: &str = "SECRETHASH_MEMORY_KIB";
pub const ENV_ITERATIONS: &str = "SECRETHASH_ITERATIONS";
pub const ENV_PARALLELISM: &str = "SECRETHASH_PARALLELISM";
pub const FILE_NAME: &str = "secrethash.toml";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CostSection {
    pub memory_kib: Option<u32>,
    pub iterations: Option<u32>,
    pub parallelism: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct HasherConfig {
    pub cost: CostSection,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl HasherConfig {
    /// # Errors
    /// `HashError::Io` if the file cannot be read, `HashError::Config` if it is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self, HashError> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| HashError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml(&s)
    }

    /// # Errors
    /// `HashError::Config` for malformed TOML or unexpected value types.
    pub fn from_toml(s: &str) -> Result<Self, HashError> {
        Ok(toml::from_str::<HasherConfig>(s)?)
    }

    /// Builds a layer from environment-style lookups. Takes the lookup as a closure so
    /// callers and tests need not touch the process environment.
    ///
    /// # Errors
    /// `HashError::Config` when a variable is set but is not an unsigned integer.
    pub fn from_env_with<F>(lookup: F) -> Result<Self, HashError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let num = |key: &str| -> Result<Option<u32>, HashError> {
            match lookup(key) {
                Some(v) => v
                    .trim()
                    .parse::<u32>()
                    .map(Some)
                    .map_err(|e| HashError::Config(format!("{key}={v:?}: {e}"))),
                None => Ok(None),
            }
        };
        Ok(HasherConfig {
            cost: CostSection {
                memory_kib: num(ENV_MEMORY_KIB)?,
                iterations: num(ENV_ITERATIONS)?,
                parallelism: num(ENV_PARALLELISM)?,
            },
            log_dir: None,
            log_level: None,
        })
    }

    /// # Errors
    /// See [`HasherConfig::from_env_with`].
    pub fn from_env() -> Result<Self, HashError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Fills every unset field from `lower`.
    pub fn fill_from(&mut self, lower: &HasherConfig) {
        if self.cost.memory_kib.is_none() { self.cost.memory_kib = lower.cost.memory_kib; }
        if self.cost.iterations.is_none() { self.cost.iterations = lower.cost.iterations; }
        if self.cost.parallelism.is_none() { self.cost.parallelism = lower.cost.parallelism; }
        if self.log_dir.is_none() { self.log_dir = lower.log_dir.clone(); }
        if self.log_level.is_none() { self.log_level = lower.log_level.clone(); }
    }

    /// Resolves to a validated cost, using `CostParams::DEFAULT` for unset fields.
    ///
    /// # Errors
    /// `HashError::InvalidCost` when the combined values are rejected.
    pub fn cost(&self) -> Result<CostParams, HashError> {
        let d = CostParams::DEFAULT;
        CostParams::new(
            self.cost.memory_kib.unwrap_or(d.memory_kib()),
            self.cost.iterations.unwrap_or(d.iterations()),
            self.cost.parallelism.unwrap_or(d.parallelism()),
        )
    }

    /// # Errors
    /// See [`HasherConfig::cost`].
    pub fn hasher(&self) -> Result<SecretHasher, HashError> {
        Ok(SecretHasher::with_cost(self.cost()?))
    }
}

/// Candidate config files, highest precedence first. Paths may not exist.
/// An explicit path replaces the search path entirely.
pub fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(p) = explicit { return vec![p.to_path_buf()]; }
    let mut paths: Vec<PathBuf> = vec![];
    if let Ok(p) = std::env::var(ENV_CONFIG) { paths.push(PathBuf::from(p)); }
    if let Some(dir) = dirs_next::config_dir() { paths.push(dir.join(FILE_NAME)); }
    if let Ok(cur) = std::env::current_dir() { paths.push(cur.join(FILE_NAME)); }
    paths
}

/// Merges `overrides`, the environment layer `env` and every existing file in `paths`.
///
/// # Errors
/// An explicitly requested file that is missing is an error; other missing files are
/// skipped. Any file that exists but does not parse is an error.
pub fn load_layers(
    overrides: HasherConfig,
    env: &HasherConfig,
    explicit: Option<&Path>,
    paths: &[PathBuf],
) -> Result<HasherConfig, HashError> {
    let mut cfg = overrides;
    cfg.fill_from(env);
    if let Some(p) = explicit {
        if !p.exists() {
            return Err(HashError::Io(format!("config file not found: {}", p.display())));
        }
    }
    for p in paths {
        if p.exists() {
            let file_cfg = HasherConfig::from_file(p)?;
            log::debug!("config layer loaded from {}", p.display());
            cfg.fill_from(&file_cfg);
        }
    }
    Ok(cfg)
}

/// Loads the full configuration from the process environment and the default search path.
///
/// # Errors
/// See [`load_layers`] and [`HasherConfig::from_env`].
pub fn load(explicit: Option<&Path>, overrides: HasherConfig) -> Result<HasherConfig, HashError> {
    let env = HasherConfig::from_env()?;
    load_layers(overrides, &env, explicit, &config_paths(explicit))
}
