use std::io::Write;
use std::process::{Command, Output, Stdio};

const FAST: [&str; 6] = ["--memory-kib", "1024", "--iterations", "1", "--parallelism", "1"];

fn secrethash(args: &[&str], stdin: Option<&str>) -> Output {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_secrethash"))
        .args(["--config", dir.path().join("none.toml").to_str().unwrap()])
        .args(args)
        .env_remove("SECRETHASH_CONFIG")
        .env_remove("SECRETHASH_LOG_DIR")
        .env_remove("SECRETHASH_MEMORY_KIB")
        .env_remove("SECRETHASH_ITERATIONS")
        .env_remove("SECRETHASH_PARALLELISM")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn secrethash");
    if let Some(input) = stdin {
        child.stdin.take().unwrap().write_all(input.as_bytes()).unwrap();
    }
    child.wait_with_output().unwrap()
}

fn secrethash_with_config(args: &[&str], stdin: Option<&str>) -> (tempfile::TempDir, Output) {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("secrethash.toml");
    std::fs::write(&cfg, "[cost]\nmemory_kib = 1024\niterations = 1\nparallelism = 1\n").unwrap();
    let mut child = Command::new(env!("CARGO_BIN_EXE_secrethash"))
        .args(["--config", cfg.to_str().unwrap()])
        .args(args)
        .env_remove("SECRETHASH_LOG_DIR")
        .env_remove("SECRETHASH_MEMORY_KIB")
        .env_remove("SECRETHASH_ITERATIONS")
        .env_remove("SECRETHASH_PARALLELISM")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn secrethash");
    if let Some(input) = stdin {
        child.stdin.take().unwrap().write_all(input.as_bytes()).unwrap();
    }
    let out = child.wait_with_output().unwrap();
    (dir, out)
}

#[test]
fn missing_explicit_config_is_an_error() {
    let out = secrethash(&["inspect", "x"], None);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("config file not found"));
}

#[test]
fn hash_verify_roundtrip_via_stdin() {
    let (_dir, out) = secrethash_with_config(&["hash", "--stdin"], Some("hello\n"));
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let digest = String::from_utf8(out.stdout).unwrap().trim().to_string();
    assert!(digest.starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));

    let (_dir, ok) = secrethash_with_config(&["verify", &digest, "--stdin"], Some("hello\n"));
    assert!(ok.status.success());
    assert_eq!(String::from_utf8_lossy(&ok.stdout).trim(), "ok");

    let (_dir, bad) = secrethash_with_config(&["verify", &digest, "--stdin"], Some("goodbye\n"));
    assert_eq!(bad.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&bad.stderr).contains("invalid credentials"));
}

#[test]
fn corrupt_digest_reports_same_message_as_wrong_secret() {
    let (_dir, out) = secrethash_with_config(&["verify", "$argon2id$broken", "--stdin"], Some("hello\n"));
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid credentials"));
    assert!(!stderr.contains("invalid digest"));
}

#[test]
fn cost_flags_override_config_file() {
    let mut args: Vec<&str> = FAST.to_vec();
    args[1] = "2048";
    args.extend(["hash", "--stdin"]);
    let (_dir, out) = secrethash_with_config(&args, Some("pw\n"));
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("m=2048,t=1,p=1"));
}

#[test]
fn needs_rehash_and_inspect() {
    let (_dir, out) = secrethash_with_config(&["hash", "--stdin"], Some("pw\n"));
    let digest = String::from_utf8(out.stdout).unwrap().trim().to_string();

    let (_dir, same) = secrethash_with_config(&["needs-rehash", &digest], None);
    assert_eq!(String::from_utf8_lossy(&same.stdout).trim(), "false");

    let mut args: Vec<&str> = FAST.to_vec();
    args[3] = "2";
    args.extend(["needs-rehash", digest.as_str()]);
    let (_dir, stale) = secrethash_with_config(&args, None);
    assert_eq!(String::from_utf8_lossy(&stale.stdout).trim(), "true");

    let (_dir, info) = secrethash_with_config(&["inspect", &digest, "--json"], None);
    let v: serde_json::Value = serde_json::from_slice(&info.stdout).unwrap();
    assert_eq!(v["algorithm"], "argon2id");
    assert_eq!(v["memory_kib"], 1024);
    assert!(!String::from_utf8_lossy(&info.stdout).contains(&digest));
}

#[test]
fn invalid_cost_flag_exits_with_config_status() {
    let (_dir, out) = secrethash_with_config(&["--iterations", "0", "bench"], None);
    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid cost parameters"));
}
