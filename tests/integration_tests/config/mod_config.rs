use secrethash::config::{self, HasherConfig};
use secrethash::crypto::CostParams;
use secrethash::HashError;
use std::fs;
use tempfile::tempdir;

#[test]
fn file_layer_sets_cost() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("secrethash.toml");
    fs::write(&p, "[cost]\nmemory_kib = 2048\niterations = 3\nparallelism = 2\n").unwrap();
    let cfg = config::load_layers(HasherConfig::default(), &HasherConfig::default(), Some(&p), &[p.clone()])
        .unwrap();
    assert_eq!(cfg.cost().unwrap(), CostParams::new(2048, 3, 2).unwrap());
}

#[test]
fn overrides_beat_env_beat_files() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("secrethash.toml");
    fs::write(&p, "log_level = \"debug\"\n[cost]\nmemory_kib = 2048\niterations = 3\nparallelism = 2\n")
        .unwrap();
    let mut overrides = HasherConfig::default();
    overrides.cost.memory_kib = Some(4096);
    let mut env = HasherConfig::default();
    env.cost.memory_kib = Some(8192);
    env.cost.iterations = Some(4);
    let cfg = config::load_layers(overrides, &env, None, &[p]).unwrap();
    assert_eq!(cfg.cost.memory_kib, Some(4096));
    assert_eq!(cfg.cost.iterations, Some(4));
    assert_eq!(cfg.cost.parallelism, Some(2));
    assert_eq!(cfg.log_level.as_deref(), Some("debug"));
}

#[test]
fn earlier_files_take_precedence() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.toml");
    let second = dir.path().join("second.toml");
    fs::write(&first, "[cost]\niterations = 5\n").unwrap();
    fs::write(&second, "[cost]\niterations = 9\nmemory_kib = 1024\n").unwrap();
    let cfg = config::load_layers(HasherConfig::default(), &HasherConfig::default(), None, &[first, second])
        .unwrap();
    assert_eq!(cfg.cost.iterations, Some(5));
    assert_eq!(cfg.cost.memory_kib, Some(1024));
}

#[test]
fn missing_files_are_skipped_unless_explicit() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let cfg = config::load_layers(HasherConfig::default(), &HasherConfig::default(), None, &[missing.clone()])
        .unwrap();
    assert_eq!(cfg.cost().unwrap(), CostParams::DEFAULT);
    let err = config::load_layers(HasherConfig::default(), &HasherConfig::default(), Some(&missing), &[missing.clone()]);
    assert!(matches!(err, Err(HashError::Io(_))));
}

#[test]
fn malformed_file_is_config_error() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("bad.toml");
    fs::write(&p, "[cost\nmemory_kib = ").unwrap();
    let err = config::load_layers(HasherConfig::default(), &HasherConfig::default(), None, &[p]);
    assert!(matches!(err, Err(HashError::Config(_))));
}

#[test]
fn explicit_path_replaces_search_path() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("mine.toml");
    assert_eq!(config::config_paths(Some(&p)), vec![p.clone()]);
    assert!(config::config_paths(None).iter().all(|q| !q.ends_with("mine.toml")));
}

#[test]
fn explicit_file_ignores_cwd_config() {
    let dir = tempdir().unwrap();
    let mine = dir.path().join("mine.toml");
    fs::write(&mine, "[cost]\nmemory_kib = 2048\n").unwrap();
    let stray = dir.path().join(config::FILE_NAME);
    fs::write(&stray, "[cost]\niterations = 9\n").unwrap();
    let paths = config::config_paths(Some(&mine));
    let cfg = config::load_layers(HasherConfig::default(), &HasherConfig::default(), Some(&mine), &paths).unwrap();
    assert_eq!(cfg.cost.memory_kib, Some(2048));
    assert_eq!(cfg.cost.iterations, None);
}

#[test]
fn configured_hasher_produces_configured_digests() {
    let cfg = HasherConfig::from_toml("[cost]\nmemory_kib = 1024\niterations = 1\nparallelism = 1\n").unwrap();
    let hasher = cfg.hasher().unwrap();
    let d = hasher.generate("pw");
    assert!(d.as_str().contains("m=1024,t=1,p=1"));
}
