use secrethash::crypto::{CostParams, SecretHasher};
use secrethash::HashError;
use std::sync::Arc;
use std::thread;

#[test]
fn shared_hasher_across_threads() {
    let hasher = Arc::new(SecretHasher::with_cost(CostParams::new(1024, 1, 1).unwrap()));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let h = Arc::clone(&hasher);
            thread::spawn(move || {
                let secret = format!("secret-{i}");
                let d = h.generate(&secret);
                assert!(h.verify(&secret, &d).is_ok());
                assert_eq!(h.verify(format!("secret-{}", i + 1), &d), Err(HashError::Mismatch));
                d
            })
        })
        .collect();
    let digests: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    // Each thread's digest still verifies sequentially afterwards.
    for (i, d) in digests.iter().enumerate() {
        assert!(hasher.verify(format!("secret-{i}"), d).is_ok());
    }
}

#[test]
fn one_digest_verified_concurrently() {
    let hasher = SecretHasher::with_cost(CostParams::new(1024, 1, 1).unwrap());
    let digest = Arc::new(hasher.generate("shared"));
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let d = Arc::clone(&digest);
            let h = hasher.clone();
            thread::spawn(move || {
                let guess = if i % 2 == 0 { "shared" } else { "other" };
                (i, h.verify(guess, &*d))
            })
        })
        .collect();
    for handle in handles {
        let (i, res) = handle.join().unwrap();
        if i % 2 == 0 {
            assert!(res.is_ok());
        } else {
            assert_eq!(res, Err(HashError::Mismatch));
        }
    }
}
