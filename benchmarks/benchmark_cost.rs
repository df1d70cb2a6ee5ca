use secrethash::{CostParams, SecretHasher};

// (memory_kib, iterations, parallelism)
const GRID: &[(u32, u32, u32)] = &[
    (8 * 1024, 1, 1),
    (19 * 1024, 2, 1),
    (19 * 1024, 2, 2),
    (46 * 1024, 1, 1),
    (64 * 1024, 3, 4),
];

fn main() {
    let rounds: u32 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .filter(|r| *r > 0)
        .unwrap_or(5);

    println!("{:<22} {:>12} {:>12}", "cost", "generate_ms", "verify_ms");
    for &(m, t, p) in GRID {
        let cost = match CostParams::new(m, t, p) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("skipping m={m},t={t},p={p}: {e}");
                continue;
            }
        };
        let hasher = SecretHasher::with_cost(cost);
        match secrethash::cli::bench(&hasher, rounds) {
            Ok((gen_ms, verify_ms)) => println!("{:<22} {gen_ms:>12.2} {verify_ms:>12.2}", cost.to_string()),
            Err(e) => eprintln!("{cost}: {e}"),
        }
    }
    let d = CostParams::DEFAULT;
    println!("default cost: {d} ({rounds} rounds each)");
}
