//! Bourbon shell entry point.

use std::{path::PathBuf, time::Duration};

use bourbon_app::{Runtime, RuntimeConfig};
use bourbon_cli::{CliError, Command, Shell};
use bourbon_store::{LocalUserRepository, MemoryStore, ProfileStore, RedbStore};
use clap::Parser;
use tokio::io::{AsyncWriteExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Bourbon navigation shell
#[derive(Parser, Debug)]
#[command(name = "bourbon")]
#[command(about = "Explore Bourbon navigation and onboarding from the command line")]
#[command(version)]
struct Args {
    /// Database file for accounts, profiles and the saved backstack
    ///
    /// Without it everything lives in memory for this run.
    #[arg(long)]
    db: Option<PathBuf>,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Start from the backstack saved by the previous run
    #[arg(long)]
    resume: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Delay before the startup session check, in milliseconds
    #[arg(long, default_value_t = 50)]
    startup_delay_ms: u64,

    /// How long the post-onboarding splash stays up, in milliseconds
    #[arg(long, default_value_t = 2000)]
    splash_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays a clean transcript.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr)).with(filter).init();

    match &args.db {
        Some(path) => run(RedbStore::open(path)?, &args).await?,
        None => run(MemoryStore::new(), &args).await?,
    }
    Ok(())
}

async fn run<S: ProfileStore>(store: S, args: &Args) -> Result<(), CliError> {
    let restore = if args.resume { store.load_backstack()? } else { None };
    if args.resume && restore.is_none() {
        tracing::warn!("no saved backstack, starting fresh");
    }

    let config = RuntimeConfig {
        startup_delay: Duration::from_millis(args.startup_delay_ms),
        splash_duration: Duration::from_millis(args.splash_ms),
        restore,
        ..RuntimeConfig::default()
    };
    let runtime = Runtime::start(LocalUserRepository::new(store), config)?;
    let mut shell = Shell::new(runtime);
    let mut stdout = tokio::io::stdout();

    let (_, launched) = shell.execute(Command::Launch).await?;
    stdout.write_all(format!("{launched}\n").as_bytes()).await?;

    match &args.script {
        Some(path) => {
            let file = tokio::fs::File::open(path).await?;
            shell.run(BufReader::new(file), &mut stdout, true).await?;
        },
        None => shell.run(BufReader::new(tokio::io::stdin()), &mut stdout, false).await?,
    }

    shell.save()?;
    shell.shutdown();
    Ok(())
}
