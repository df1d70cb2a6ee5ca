#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 4096 { return; }
    let _ = secrethash::crypto::inspect(data);
    let _ = secrethash::SecretHasher::default().needs_rehash(data);
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(d) = secrethash::Digest::parse(s) {
            // Parsed digests always render redacted
            assert_eq!(format!("{d}"), "SECRET");
            assert_eq!(d.as_str(), s);
        }
    }
});
