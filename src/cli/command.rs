use zeroize::Zeroizing;

/// Programmatic form of the `secrethash` subcommands. The binary parses arguments and
/// reads the secret, then hands one of these to [`super::run`].
pub enum Command {
    Hash { secret: Zeroizing<String> },
    Verify { secret: Zeroizing<String>, digest: String },
    NeedsRehash { digest: String },
    Inspect { digest: String, json: bool },
    Bench { rounds: u32 },
}

impl Command {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Command::Hash { .. } => "hash",
            Command::Verify { .. } => "verify",
            Command::NeedsRehash { .. } => "needs-rehash",
            Command::Inspect { .. } => "inspect",
            Command::Bench { .. } => "bench",
        }
    }
}
