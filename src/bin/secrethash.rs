use clap::{Parser, Subcommand};
use secrethash::cli::{self as prog_cli, Command};
use secrethash::config::{self, CostSection, HasherConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "secrethash", version, about = "Hash and verify secrets with Argon2id", long_about = None)]
struct Cli {
    #[arg(long, help = "Path to a config file (TOML). If omitted, the default search path is used.")]
    config: Option<PathBuf>,
    #[arg(long, help = "Memory cost in KiB. Takes precedence over config/env.")]
    memory_kib: Option<u32>,
    #[arg(long, help = "Number of passes. Takes precedence over config/env.")]
    iterations: Option<u32>,
    #[arg(long, help = "Degree of parallelism (lanes). Takes precedence over config/env.")]
    parallelism: Option<u32>,
    #[arg(long, help = "Directory for app.log and audit.log; logging is off unless set here, in config or SECRETHASH_LOG_DIR")]
    log_dir: Option<PathBuf>,
    #[arg(long, help = "Log level: error|warn|info|debug|trace")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Hash a secret and print the digest")]
    Hash {
        #[arg(long, help = "Read the secret from the first line of stdin instead of prompting")]
        stdin: bool,
    },
    #[command(about = "Verify a secret against a stored digest; exits non-zero on failure")]
    Verify {
        #[arg(help = "Stored digest (PHC string)")]
        digest: String,
        #[arg(long, help = "Read the secret from the first line of stdin instead of prompting")]
        stdin: bool,
    },
    #[command(name = "needs-rehash", about = "Print whether a digest was made with a different cost than configured")]
    NeedsRehash {
        #[arg(help = "Stored digest (PHC string)")]
        digest: String,
    },
    #[command(about = "Print the algorithm and cost parameters stored in a digest")]
    Inspect {
        #[arg(help = "Stored digest (PHC string)")]
        digest: String,
        #[arg(long, help = "Print as JSON")]
        json: bool,
    },
    #[command(about = "Measure milliseconds per hash and verify under the configured cost")]
    Bench {
        #[arg(long, default_value_t = 5, help = "Number of hashes to time")]
        rounds: u32,
    },
}

fn setup_logging(cfg: &HasherConfig) {
    if let Some(dir) = cfg.log_dir.as_deref() {
        if let Err(e) =
            secrethash::logger::configure_logging(Some(dir), cfg.log_level.as_deref(), None)
        {
            eprintln!("warning: logging disabled: {e}");
        }
    } else if std::env::var_os("SECRETHASH_LOG_DIR").is_some() {
        if let Err(e) = secrethash::logger::configure_from_env() {
            eprintln!("warning: logging disabled: {e}");
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let overrides = HasherConfig {
        cost: CostSection {
            memory_kib: cli.memory_kib,
            iterations: cli.iterations,
            parallelism: cli.parallelism,
        },
        log_dir: cli.log_dir.clone(),
        log_level: cli.log_level.clone(),
    };
    let cfg = match config::load(cli.config.as_deref(), overrides) {
        Ok(c) => c,
        Err(e) => { eprintln!("error: {e}"); std::process::exit(2); }
    };
    setup_logging(&cfg);
    let hasher = match cfg.hasher() {
        Ok(h) => h,
        Err(e) => { eprintln!("error: {e}"); std::process::exit(2); }
    };

    let cmd: Result<Command, Box<dyn std::error::Error>> = match cli.command {
        Commands::Hash { stdin } => prog_cli::read_secret(stdin, "Secret: ")
            .map(|secret| Command::Hash { secret })
            .map_err(Into::into),
        Commands::Verify { digest, stdin } => prog_cli::read_secret(stdin, "Secret: ")
            .map(|secret| Command::Verify { secret, digest })
            .map_err(Into::into),
        Commands::NeedsRehash { digest } => Ok(Command::NeedsRehash { digest }),
        Commands::Inspect { digest, json } => Ok(Command::Inspect { digest, json }),
        Commands::Bench { rounds } => Ok(Command::Bench { rounds }),
    };

    let mut stdout = std::io::stdout().lock();
    let r = cmd.and_then(|c| prog_cli::run(&hasher, c, &mut stdout));
    if let Err(e) = r {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
