#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use secrethash::{CostParams, SecretHasher, VerifyOutcome};

#[derive(Arbitrary, Debug)]
struct Input {
    secret: Vec<u8>,
    digest: Vec<u8>,
}

fuzz_target!(|input: Input| {
    if input.digest.len() > 4096 || input.secret.len() > 1024 { return; }
    // Skip well-formed digests whose cost would stall the fuzzer.
    if let Ok(info) = secrethash::crypto::inspect(&input.digest) {
        if info.memory_kib > 4096 || info.iterations > 4 || info.parallelism > 4 { return; }
    }
    let hasher = SecretHasher::with_cost(CostParams::new(1024, 1, 1).expect("valid cost"));
    let res = hasher.verify(&input.secret, &input.digest);
    let outcome = hasher.check(&input.secret, &input.digest);
    assert_eq!(res.is_ok(), outcome == VerifyOutcome::Match);
});
